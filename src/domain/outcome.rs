//! Validation outcomes and error types for registration checks
//!
//! Architecture: Rich Domain Models - A failed rule is a normal business outcome, not an error
//! - ValidationOutcome carries the per-rule verdict together with a typed failure reason
//! - AggregateResult acts as the aggregate root over every outcome of one request
//! - RegistrationError is reserved for precondition violations at construction time

use crate::domain::course::ScheduledSlot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message returned when every configured rule passes
pub const SUCCESS_MESSAGE: &str = "Registration validated successfully.";

/// A selected course whose prerequisite is absent from the completed set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPrerequisite {
    pub course_code: String,
    pub prerequisite_code: String,
}

impl MissingPrerequisite {
    pub fn new(course_code: impl Into<String>, prerequisite_code: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            prerequisite_code: prerequisite_code.into(),
        }
    }
}

/// Why a rule rejected a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Total selected credits went over the configured cap
    CreditExceeded { total: u64, max: u32 },
    /// One or more prerequisites are not in the completed set
    PrerequisiteMissing { missing: Vec<MissingPrerequisite> },
    /// The first overlapping pair found in scan order
    ScheduleConflict {
        first: ScheduledSlot,
        second: ScheduledSlot,
    },
}

/// Verdict of a single rule against a single registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    /// Identifier of the rule that produced this outcome
    pub rule_id: String,
    /// Whether the rule was satisfied
    pub passed: bool,
    /// Human-readable result, success or failure
    pub message: String,
    /// Typed failure reason, present only when `passed` is false
    pub failure: Option<FailureKind>,
}

impl ValidationOutcome {
    /// Create a passing outcome
    pub fn pass(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: true,
            message: message.into(),
            failure: None,
        }
    }

    /// Create a failing outcome with its reason
    pub fn fail(
        rule_id: impl Into<String>,
        failure: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: false,
            message: message.into(),
            failure: Some(failure),
        }
    }

    /// The `(passed, message)` pair
    pub fn as_pair(&self) -> (bool, &str) {
        (self.passed, self.message.as_str())
    }
}

/// Combined result of running every configured rule against one registration
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// Student the registration belongs to
    pub student_id: String,
    /// AND of every rule outcome
    pub passed: bool,
    /// One success message, or one message per failing rule in rule order
    pub messages: Vec<String>,
    /// Every rule outcome in evaluation order, passing ones included
    pub outcomes: Vec<ValidationOutcome>,
    /// When the registration was evaluated
    pub validated_at: DateTime<Utc>,
}

impl AggregateResult {
    /// Fold rule outcomes into an aggregate
    pub fn from_outcomes(student_id: impl Into<String>, outcomes: Vec<ValidationOutcome>) -> Self {
        let messages: Vec<String> = outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| outcome.message.clone())
            .collect();

        let passed = messages.is_empty();
        let messages = if passed { vec![SUCCESS_MESSAGE.to_string()] } else { messages };

        Self {
            student_id: student_id.into(),
            passed,
            messages,
            outcomes,
            validated_at: Utc::now(),
        }
    }

    /// The `(passed, messages)` pair callers render
    pub fn as_tuple(&self) -> (bool, &[String]) {
        (self.passed, &self.messages)
    }

    /// Outcomes of rules that rejected the registration
    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed)
    }

    /// Number of rules that rejected the registration
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Error types raised when inputs or configuration break a precondition
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Configuration file could not be loaded, parsed or validated
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Course definition violates an invariant
    #[error("Invalid course '{code}': {message}")]
    InvalidCourse { code: String, message: String },

    /// Schedule entry violates the interval invariant
    #[error("Invalid schedule entry on {day}: {message}")]
    InvalidSchedule { day: String, message: String },

    /// Clock text could not be interpreted
    #[error("Invalid time '{input}': {message}")]
    InvalidTime { input: String, message: String },

    /// Registration as a whole is malformed
    #[error("Invalid registration for '{student}': {message}")]
    InvalidRegistration { student: String, message: String },

    /// Registration document could not be parsed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Result could not be rendered in the requested output format
    #[error("Report error: {message}")]
    Report { message: String },
}

impl RegistrationError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a course error
    pub fn course(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCourse {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a schedule error
    pub fn schedule(day: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            day: day.into(),
            message: message.into(),
        }
    }

    /// Create a time parsing error
    pub fn time(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTime {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a registration error
    pub fn registration(student: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            student: student.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a report rendering error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}

/// Result type for registration operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;
