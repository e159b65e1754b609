//! Prerequisite satisfaction
//!
//! Completion is decided by the completed-course set alone. Selecting a prerequisite
//! in the same registration does not satisfy it.

use super::ValidationRule;
use crate::domain::course::Registration;
use crate::domain::outcome::{FailureKind, MissingPrerequisite, ValidationOutcome};

pub const RULE_ID: &str = "prerequisite";

/// Requires every prerequisite of every selected course to be completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrerequisiteRule;

impl PrerequisiteRule {
    pub fn new() -> Self {
        Self
    }

    /// Every missing `(course, prerequisite)` pair, in course then prerequisite order
    pub fn missing_prerequisites(registration: &Registration) -> Vec<MissingPrerequisite> {
        registration
            .selected_courses()
            .iter()
            .flat_map(move |course| {
                course
                    .prerequisites()
                    .iter()
                    .filter(move |code| !registration.has_completed(code))
                    .map(move |code| MissingPrerequisite::new(course.code(), code.as_str()))
            })
            .collect()
    }
}

impl ValidationRule for PrerequisiteRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn describe(&self) -> String {
        "every prerequisite of a selected course must already be completed".to_string()
    }

    fn validate(&self, registration: &Registration) -> ValidationOutcome {
        tracing::info!(rule = RULE_ID, "Checking course prerequisites");
        for course in registration.selected_courses() {
            tracing::debug!(
                rule = RULE_ID,
                course = course.code(),
                prerequisites = ?course.prerequisites(),
                "Checking prerequisites for {}",
                course.code()
            );
        }

        let missing = Self::missing_prerequisites(registration);
        if missing.is_empty() {
            return ValidationOutcome::pass(RULE_ID, "Prerequisites OK.");
        }

        let details: Vec<String> = missing
            .iter()
            .map(|m| format!("{} requires {}", m.course_code, m.prerequisite_code))
            .collect();
        let message = format!("Prerequisites not satisfied: {}", details.join(", "));
        tracing::warn!(rule = RULE_ID, missing = missing.len(), "{}", message);

        ValidationOutcome::fail(RULE_ID, FailureKind::PrerequisiteMissing { missing }, message)
    }
}
