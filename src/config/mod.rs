//! Configuration loading and management for the registration validator
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML rule entries are converted into constructed ValidationRule instances
//! - Default configuration is embedded in the domain, not infrastructure
//! - The rule list order is the evaluation order

pub mod document;

use crate::domain::outcome::{RegistrationError, RegistrationResult};
use crate::rules::{CreditLimitRule, PrerequisiteRule, ScheduleConflictRule, ValidationRule};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub use document::{CourseEntry, RegistrationDocument, ScheduleEntry};

/// Default credit cap for a regular semester load
pub const DEFAULT_MAX_CREDITS: u32 = 24;

/// Configuration file names searched when none is given explicitly
pub const DEFAULT_CONFIG_FILES: &[&str] =
    &["registration.yaml", "registration.yml", ".registration.yaml"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Configuration format version
    pub version: String,
    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// A single rule entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Cap on the summed credit weight
    CreditLimit { max_credits: u32 },
    /// Prerequisites must already be completed
    Prerequisite,
    /// No overlapping same-day meetings
    ScheduleConflict,
}

impl RuleConfig {
    /// Identifier of the rule this entry builds
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::CreditLimit { .. } => crate::rules::credit::RULE_ID,
            Self::Prerequisite => crate::rules::prerequisite::RULE_ID,
            Self::ScheduleConflict => crate::rules::schedule::RULE_ID,
        }
    }

    /// Construct the configured rule
    pub fn build(&self) -> RegistrationResult<Box<dyn ValidationRule>> {
        let rule: Box<dyn ValidationRule> = match self {
            Self::CreditLimit { max_credits } => Box::new(CreditLimitRule::new(*max_credits)?),
            Self::Prerequisite => Box::new(PrerequisiteRule::new()),
            Self::ScheduleConflict => Box::new(ScheduleConflictRule::new()),
        };
        Ok(rule)
    }
}

impl RegistrationConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RegistrationResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            RegistrationError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            RegistrationError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), rules = config.rules.len(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> RegistrationResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| RegistrationError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Look for one of the default configuration files in the current directory
    pub fn discover() -> RegistrationResult<Self> {
        for name in DEFAULT_CONFIG_FILES {
            if Path::new(name).exists() {
                return Self::load_from_file(name);
            }
        }
        Ok(Self::default())
    }

    /// Credit cap, prerequisites and schedule conflicts, in that order
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            rules: vec![
                RuleConfig::CreditLimit { max_credits: DEFAULT_MAX_CREDITS },
                RuleConfig::Prerequisite,
                RuleConfig::ScheduleConflict,
            ],
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> RegistrationResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(RegistrationError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if let RuleConfig::CreditLimit { max_credits: 0 } = rule {
                return Err(RegistrationError::config(format!(
                    "Rule #{} (credit_limit): max_credits must be a positive integer",
                    index + 1
                )));
            }
        }

        Ok(())
    }

    /// Instantiate every configured rule in evaluation order
    pub fn build_rules(&self) -> RegistrationResult<Vec<Box<dyn ValidationRule>>> {
        self.rules.iter().map(RuleConfig::build).collect()
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> RegistrationResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RegistrationError::config(format!("Failed to serialize config: {e}")))
    }

    /// SHA-256 fingerprint of the version and ordered rule list
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.version.as_bytes());

        for rule in &self.rules {
            hasher.update(b"\0");
            hasher.update(rule.rule_id().as_bytes());
            if let RuleConfig::CreditLimit { max_credits } = rule {
                hasher.update(max_credits.to_le_bytes());
            }
        }

        format!("{:x}", hasher.finalize())
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: RegistrationConfig,
}

impl ConfigBuilder {
    /// Create a builder with no rules
    pub fn new() -> Self {
        Self {
            config: RegistrationConfig {
                version: "1.0".to_string(),
                rules: Vec::new(),
            },
        }
    }

    /// Append a credit cap rule
    pub fn credit_limit(mut self, max_credits: u32) -> Self {
        self.config.rules.push(RuleConfig::CreditLimit { max_credits });
        self
    }

    /// Append a prerequisite rule
    pub fn prerequisite(mut self) -> Self {
        self.config.rules.push(RuleConfig::Prerequisite);
        self
    }

    /// Append a schedule-conflict rule
    pub fn schedule_conflict(mut self) -> Self {
        self.config.rules.push(RuleConfig::ScheduleConflict);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> RegistrationResult<RegistrationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
