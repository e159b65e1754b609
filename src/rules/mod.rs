//! Validation rules applied to a registration
//!
//! Architectural Principle: Strategy Pattern - Every business rule is an independent ValidationRule
//! - Rules hold only their own configuration and keep no state between calls
//! - The service composes rules as trait objects, so new rules plug in without touching it
//! - Rule failures are returned as outcomes, never raised as errors

pub mod credit;
pub mod prerequisite;
pub mod schedule;

use crate::domain::course::Registration;
use crate::domain::outcome::ValidationOutcome;
use std::fmt;

pub use credit::CreditLimitRule;
pub use prerequisite::PrerequisiteRule;
pub use schedule::ScheduleConflictRule;

/// A configuration-only predicate over a registration
pub trait ValidationRule: fmt::Debug + Send + Sync {
    /// Stable identifier used in outcomes, reports and configuration
    fn id(&self) -> &'static str;

    /// One-line explanation of what the rule enforces
    fn describe(&self) -> String;

    /// Evaluate the registration
    fn validate(&self, registration: &Registration) -> ValidationOutcome;
}

/// Description of a built-in rule, for listing and explaining
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub id: &'static str,
    pub summary: &'static str,
    pub options: &'static [&'static str],
}

/// Every rule this crate ships, in the default evaluation order
pub const BUILTIN_RULES: &[RuleInfo] = &[
    RuleInfo {
        id: credit::RULE_ID,
        summary: "Rejects registrations whose total credit weight exceeds the configured cap",
        options: &["max_credits"],
    },
    RuleInfo {
        id: prerequisite::RULE_ID,
        summary: "Rejects selected courses whose prerequisites are not in the completed set",
        options: &[],
    },
    RuleInfo {
        id: schedule::RULE_ID,
        summary: "Rejects the first pair of selected courses that meet at overlapping times",
        options: &[],
    },
];

/// Look up a built-in rule by identifier
pub fn builtin_rule(id: &str) -> Option<&'static RuleInfo> {
    BUILTIN_RULES.iter().find(|info| info.id == id)
}
