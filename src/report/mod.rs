//! Report generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain results to external formats
//! - AggregateResult (domain) is rendered for terminals, tooling or CI annotations
//! - Formatters only read `(passed, messages)` and the per-rule outcomes
//! - Validation logic never depends on how results are displayed

use crate::domain::outcome::{AggregateResult, RegistrationError, RegistrationResult};
use serde_json::Value as JsonValue;
use std::io::Write;

/// Supported output formats for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable verdict with one bullet per message
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions annotation lines
    GitHub,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "github" => Some(Self::GitHub),
            _ => None,
        }
    }

    /// Get all available format names
    pub fn all_formats() -> &'static [&'static str] {
        &["human", "json", "github"]
    }
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use ANSI colors (human format)
    pub use_colors: bool,
    /// Whether to list every rule outcome, passing ones included (human format)
    pub show_rule_details: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { use_colors: true, show_rule_details: false }
    }
}

/// Renders aggregate results
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a result in the specified format
    pub fn format_result(
        &self,
        result: &AggregateResult,
        format: OutputFormat,
    ) -> RegistrationResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_human(result)),
            OutputFormat::Json => self.format_json(result),
            OutputFormat::GitHub => Ok(self.format_github(result)),
        }
    }

    /// Write a formatted result to a writer
    pub fn write_result<W: Write>(
        &self,
        result: &AggregateResult,
        format: OutputFormat,
        mut writer: W,
    ) -> RegistrationResult<()> {
        let formatted = self.format_result(result, format)?;
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }

    fn format_human(&self, result: &AggregateResult) -> String {
        let mut output = String::new();

        let (headline, color) = if result.passed {
            ("RESULT: Registration accepted", "32")
        } else {
            ("RESULT: Registration rejected", "31")
        };

        if self.options.use_colors {
            output.push_str(&format!("\x1b[1;{color}m{headline}\x1b[0m ({})\n", result.student_id));
        } else {
            output.push_str(&format!("{headline} ({})\n", result.student_id));
        }

        for message in &result.messages {
            output.push_str(&format!("- {message}\n"));
        }

        if self.options.show_rule_details && !result.outcomes.is_empty() {
            output.push_str("\nRules:\n");
            for outcome in &result.outcomes {
                let status = if outcome.passed { "pass" } else { "FAIL" };
                if self.options.use_colors {
                    let color = if outcome.passed { "32" } else { "31" };
                    output.push_str(&format!(
                        "  \x1b[{color}m{status}\x1b[0m \x1b[2m{}\x1b[0m {}\n",
                        outcome.rule_id, outcome.message
                    ));
                } else {
                    output.push_str(&format!(
                        "  {status} {} {}\n",
                        outcome.rule_id, outcome.message
                    ));
                }
            }
        }

        output
    }

    fn format_json(&self, result: &AggregateResult) -> RegistrationResult<String> {
        let outcomes: Vec<JsonValue> = result
            .outcomes
            .iter()
            .map(|outcome| {
                serde_json::json!({
                    "rule_id": outcome.rule_id,
                    "passed": outcome.passed,
                    "message": outcome.message,
                    "failure": outcome.failure,
                })
            })
            .collect();

        let json_result = serde_json::json!({
            "student": result.student_id,
            "passed": result.passed,
            "messages": result.messages,
            "outcomes": outcomes,
            "validated_at": result.validated_at.to_rfc3339(),
        });

        serde_json::to_string_pretty(&json_result)
            .map_err(|e| RegistrationError::report(format!("JSON serialization failed: {e}")))
    }

    fn format_github(&self, result: &AggregateResult) -> String {
        if result.passed {
            return format!(
                "::notice title=registration::{} {}\n",
                result.student_id,
                result.messages.join(" ")
            );
        }

        result
            .failures()
            .map(|outcome| format!("::error title={}::{}\n", outcome.rule_id, outcome.message))
            .collect()
    }
}
