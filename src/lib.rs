//! Course Registration Validator - Rule-based checks for student course registrations
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure domain values (courses, schedules, registrations) live in `domain`
//! - Business rules are independent strategies behind the `ValidationRule` trait
//! - RegistrationService runs every rule and aggregates the results without short-circuiting

pub mod config;
pub mod domain;
pub mod report;
pub mod rules;
pub mod sample;

// Re-export main types for convenient access
pub use domain::course::{Course, Registration, ScheduledSlot, TimeInterval};
pub use domain::outcome::{
    AggregateResult, FailureKind, MissingPrerequisite, RegistrationError, RegistrationResult,
    ValidationOutcome, SUCCESS_MESSAGE,
};
pub use domain::time::{format_time, minutes, parse_time};

pub use config::{ConfigBuilder, RegistrationConfig, RegistrationDocument, RuleConfig};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use rules::{CreditLimitRule, PrerequisiteRule, ScheduleConflictRule, ValidationRule};

use tracing::{error, info};

/// Runs an ordered, fixed list of rules against registrations
#[derive(Debug)]
pub struct RegistrationService {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RegistrationService {
    /// Create a service; the list order is the evaluation order
    pub fn new(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    /// Create a service from a rule configuration
    pub fn from_config(config: &RegistrationConfig) -> RegistrationResult<Self> {
        config.validate()?;
        Ok(Self::new(config.build_rules()?))
    }

    /// Create a service with the default rules
    pub fn with_defaults() -> RegistrationResult<Self> {
        Self::from_config(&RegistrationConfig::default())
    }

    /// Configured rules in evaluation order
    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Evaluate every rule in order and aggregate the outcomes.
    ///
    /// Every rule runs even after an earlier one fails, so the caller receives all
    /// failure messages at once. With no rules configured the registration passes.
    pub fn run_registration(&self, registration: &Registration) -> AggregateResult {
        info!(
            student = registration.student_id(),
            courses = registration.selected_courses().len(),
            rules = self.rules.len(),
            "Starting registration validation for {}",
            registration.student_id()
        );

        let outcomes: Vec<ValidationOutcome> =
            self.rules.iter().map(|rule| rule.validate(registration)).collect();

        let result = AggregateResult::from_outcomes(registration.student_id(), outcomes);

        if result.passed {
            info!(student = registration.student_id(), "All validations passed");
        } else {
            error!(
                student = registration.student_id(),
                failures = result.failure_count(),
                "Validation failed with {} error(s)",
                result.failure_count()
            );
        }

        result
    }
}

/// Convenience function to validate a registration with the default rules
pub fn validate_registration(registration: &Registration) -> RegistrationResult<AggregateResult> {
    let service = RegistrationService::with_defaults()?;
    Ok(service.run_registration(registration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn course(code: &str, credits: u32, prerequisites: &[&str], day: &str, start: &str, end: &str) -> Course {
        Course::new(code, code, credits)
            .unwrap()
            .with_prerequisites(prerequisites.iter().copied())
            .with_slot(TimeInterval::parse(day, start, end).unwrap())
    }

    fn default_rules(max_credits: u32) -> Vec<Box<dyn ValidationRule>> {
        vec![
            Box::new(CreditLimitRule::new(max_credits).unwrap()),
            Box::new(PrerequisiteRule::new()),
            Box::new(ScheduleConflictRule::new()),
        ]
    }

    #[test]
    fn test_mixed_failures_reported_in_rule_order() {
        let registration = Registration::new(
            "ani",
            Vec::<String>::new(),
            vec![
                course("MAT101", 3, &[], "Monday", "09:00", "11:00"),
                course("FIS201", 4, &["MAT101"], "Monday", "10:30", "12:00"),
            ],
        )
        .unwrap();

        let service = RegistrationService::new(default_rules(24));
        let result = service.run_registration(&registration);
        let (passed, messages) = result.as_tuple();

        assert!(!passed);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Prerequisites not satisfied"));
        assert!(messages[0].contains("FIS201 requires MAT101"));
        assert!(messages[1].starts_with("Schedule conflict between MAT101"));
        assert_eq!(result.outcomes.len(), 3);
        assert!(result.outcomes[0].passed);
    }

    #[test]
    fn test_no_short_circuit_across_rules() {
        let registration = Registration::new(
            "ani",
            Vec::<String>::new(),
            vec![
                course("MAT101", 3, &["X"], "Monday", "09:00", "11:00"),
                course("FIS201", 4, &[], "Monday", "10:00", "12:00"),
            ],
        )
        .unwrap();

        let result = RegistrationService::new(default_rules(5)).run_registration(&registration);
        assert_eq!(result.failure_count(), 3);
        assert_eq!(result.messages.len(), 3);
        assert!(result.messages[0].contains("Total credits (7)"));
    }

    #[test]
    fn test_all_rules_pass() {
        let registration = Registration::new(
            "ani",
            ["MAT101"],
            vec![
                course("FIS201", 4, &["MAT101"], "Monday", "09:00", "11:00"),
                course("KIM101", 3, &[], "Monday", "11:00", "12:00"),
            ],
        )
        .unwrap();

        let result = RegistrationService::new(default_rules(24)).run_registration(&registration);
        assert_eq!(result.as_tuple(), (true, &[SUCCESS_MESSAGE.to_string()][..]));
    }

    #[test]
    fn test_empty_rule_list_passes() {
        let registration = sample::sample_registration().unwrap();
        let result = RegistrationService::new(Vec::new()).run_registration(&registration);

        assert!(result.passed);
        assert_eq!(result.messages, vec![SUCCESS_MESSAGE.to_string()]);
        assert!(result.outcomes.is_empty());
    }

    #[test]
    fn test_repeated_rules_each_report() {
        let rules: Vec<Box<dyn ValidationRule>> = vec![
            Box::new(CreditLimitRule::new(5).unwrap()),
            Box::new(CreditLimitRule::new(6).unwrap()),
            Box::new(CreditLimitRule::new(50).unwrap()),
        ];
        let registration = sample::sample_registration().unwrap();
        let result = RegistrationService::new(rules).run_registration(&registration);

        assert_eq!(
            result.messages,
            vec![
                "Total credits (10) exceed the maximum allowed (5).".to_string(),
                "Total credits (10) exceed the maximum allowed (6).".to_string(),
            ]
        );
    }

    #[test]
    fn test_sample_scenario() {
        let registration = sample::sample_registration().unwrap();
        let result = validate_registration(&registration).unwrap();

        assert!(!result.passed);
        assert_eq!(
            result.messages,
            vec![
                "Prerequisites not satisfied: IFS300 requires FIS201".to_string(),
                "Schedule conflict between MAT101 (09:00-11:00) and FIS201 (10:30-12:00)."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_run_registration_is_deterministic() {
        let registration = sample::sample_registration().unwrap();
        let service = RegistrationService::with_defaults().unwrap();

        let first = service.run_registration(&registration);
        for _ in 0..5 {
            let again = service.run_registration(&registration);
            assert_eq!(again.as_tuple(), first.as_tuple());
            assert_eq!(again.outcomes, first.outcomes);
        }
    }

    #[test]
    fn test_service_shared_across_threads() {
        let registration = sample::sample_registration().unwrap();
        let service = RegistrationService::with_defaults().unwrap();
        let expected = service.run_registration(&registration).messages;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| service.run_registration(&registration).messages))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_from_config_uses_configured_order() {
        let config = ConfigBuilder::new().schedule_conflict().credit_limit(5).build().unwrap();
        let service = RegistrationService::from_config(&config).unwrap();
        let ids: Vec<_> = service.rules().iter().map(|rule| rule.id()).collect();
        assert_eq!(ids, ["schedule_conflict", "credit_limit"]);

        let registration = sample::sample_registration().unwrap();
        let result = service.run_registration(&registration);
        assert!(result.messages[0].starts_with("Schedule conflict"));
        assert!(result.messages[1].starts_with("Total credits"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_logging_does_not_change_results() {
        let registration = sample::sample_registration().unwrap();
        let service = RegistrationService::with_defaults().unwrap();

        let silent = service.run_registration(&registration);

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let logged = tracing::subscriber::with_default(subscriber, || {
            service.run_registration(&registration)
        });

        assert_eq!(logged.as_tuple(), silent.as_tuple());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("WARN"));
        assert!(output.contains("ERROR"));
        assert!(output.contains("Validation failed with 2 error(s)"));
    }

    #[test]
    fn test_rules_log_per_course_detail_at_debug() {
        let registration = sample::sample_registration().unwrap();
        let service = RegistrationService::with_defaults().unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || service.run_registration(&registration));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let debug_lines: Vec<_> = output.lines().filter(|line| line.contains("DEBUG")).collect();

        assert!(debug_lines.iter().any(|line| line.contains("Counting course credits")));
        assert!(debug_lines.iter().any(|line| line.contains("Checking prerequisites for FIS201")));
        assert!(debug_lines.iter().any(|line| line.contains("Scheduled slot MAT101 (09:00-11:00)")));
    }
}
