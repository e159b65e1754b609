//! Credit-hour cap

use super::ValidationRule;
use crate::domain::course::Registration;
use crate::domain::outcome::{
    FailureKind, RegistrationError, RegistrationResult, ValidationOutcome,
};

pub const RULE_ID: &str = "credit_limit";

/// Caps the summed credit weight of the selected courses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditLimitRule {
    max_credits: u32,
}

impl CreditLimitRule {
    /// Create the rule; a zero cap is a configuration error
    pub fn new(max_credits: u32) -> RegistrationResult<Self> {
        if max_credits == 0 {
            return Err(RegistrationError::config(
                "credit_limit: max_credits must be a positive integer",
            ));
        }
        Ok(Self { max_credits })
    }

    pub fn max_credits(&self) -> u32 {
        self.max_credits
    }
}

impl ValidationRule for CreditLimitRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn describe(&self) -> String {
        format!("total credits must not exceed {}", self.max_credits)
    }

    fn validate(&self, registration: &Registration) -> ValidationOutcome {
        for course in registration.selected_courses() {
            tracing::debug!(
                rule = RULE_ID,
                course = course.code(),
                credits = course.credits(),
                "Counting course credits"
            );
        }

        let total = registration.total_credits();
        tracing::info!(
            rule = RULE_ID,
            total,
            max = self.max_credits,
            "Checking total credits: {}/{}",
            total,
            self.max_credits
        );

        if total > u64::from(self.max_credits) {
            let message = format!(
                "Total credits ({}) exceed the maximum allowed ({}).",
                total, self.max_credits
            );
            tracing::warn!(rule = RULE_ID, "{}", message);
            return ValidationOutcome::fail(
                RULE_ID,
                FailureKind::CreditExceeded { total, max: self.max_credits },
                message,
            );
        }

        ValidationOutcome::pass(RULE_ID, "Credits OK.")
    }
}
