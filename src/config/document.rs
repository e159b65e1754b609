//! Registration request documents
//!
//! A document is the on-disk form of one registration: the student, the courses they
//! have passed, and the courses they want to take with `HH:MM` meeting times. YAML and
//! JSON are both accepted, since JSON parses as YAML.

use crate::domain::course::{Course, Registration, TimeInterval};
use crate::domain::outcome::{RegistrationError, RegistrationResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw registration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDocument {
    /// Student identifier
    pub student: String,
    /// Codes of courses already passed
    #[serde(default)]
    pub completed: Vec<String>,
    /// Courses the student wants to take
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
}

/// Raw course entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEntry {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub credits: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

/// Raw meeting slot with clock-text times
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: String,
    pub start: String,
    pub end: String,
}

impl RegistrationDocument {
    /// Load a document from a YAML or JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RegistrationResult<Self> {
        let contents = fs::read_to_string(&path)?;
        serde_yaml::from_str(&contents).map_err(|e| {
            RegistrationError::parse(format!(
                "Failed to parse registration '{}': {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Load a document from string content
    pub fn load_from_str(content: &str) -> RegistrationResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| RegistrationError::parse(format!("Failed to parse registration: {e}")))
    }

    /// Convert into a validated domain registration
    pub fn into_registration(self) -> RegistrationResult<Registration> {
        let courses = self
            .courses
            .into_iter()
            .map(CourseEntry::into_course)
            .collect::<RegistrationResult<Vec<_>>>()?;

        Registration::new(self.student, self.completed, courses)
    }
}

impl CourseEntry {
    fn into_course(self) -> RegistrationResult<Course> {
        let schedule = self
            .schedule
            .iter()
            .map(|slot| TimeInterval::parse(slot.day.as_str(), &slot.start, &slot.end))
            .collect::<RegistrationResult<Vec<_>>>()
            .map_err(|e| RegistrationError::course(self.code.as_str(), e.to_string()))?;

        Ok(Course::new(self.code, self.name, self.credits)?
            .with_prerequisites(self.prerequisites)
            .with_schedule(schedule))
    }
}
