//! Course catalogue entities and the registration request
//!
//! Architecture: Value Objects - Entities validate their invariants once, at construction
//! - TimeInterval guarantees `start < end <= MINUTES_PER_DAY`
//! - Course guarantees a non-empty code and a positive credit weight
//! - Registration guarantees unique course codes among the selected courses

use crate::domain::outcome::{RegistrationError, RegistrationResult};
use crate::domain::time::{format_time, parse_time, MINUTES_PER_DAY};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A weekly meeting slot: a day label plus a half-open `[start, end)` minute range
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    day: String,
    start: u32,
    end: u32,
}

impl TimeInterval {
    /// Create an interval, rejecting empty days and inverted or out-of-range times
    pub fn new(day: impl Into<String>, start: u32, end: u32) -> RegistrationResult<Self> {
        let day = day.into();

        if day.trim().is_empty() {
            return Err(RegistrationError::schedule(day, "day label must not be empty"));
        }
        if start >= end {
            return Err(RegistrationError::schedule(
                day,
                format!(
                    "start {} must be before end {}",
                    format_time(start),
                    format_time(end)
                ),
            ));
        }
        if end > MINUTES_PER_DAY {
            return Err(RegistrationError::schedule(
                day,
                format!("end {end} is past the end of the day"),
            ));
        }

        Ok(Self { day, start, end })
    }

    /// Create an interval from `HH:MM` clock strings
    pub fn parse(day: impl Into<String>, start: &str, end: &str) -> RegistrationResult<Self> {
        Self::new(day, parse_time(start)?, parse_time(end)?)
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Same day and overlapping half-open ranges; touching endpoints do not conflict
    pub fn conflicts_with(&self, other: &TimeInterval) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// `HH:MM-HH:MM`
    pub fn format_range(&self) -> String {
        format!("{}-{}", format_time(self.start), format_time(self.end))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.format_range())
    }
}

/// A course offering that may be selected in a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    code: String,
    name: String,
    credits: u32,
    prerequisites: Vec<String>,
    schedule: Vec<TimeInterval>,
}

impl Course {
    /// Create a course with no prerequisites and no schedule
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
    ) -> RegistrationResult<Self> {
        let code = code.into();

        if code.trim().is_empty() {
            return Err(RegistrationError::course(code, "course code must not be empty"));
        }
        if credits == 0 {
            return Err(RegistrationError::course(code, "credit weight must be positive"));
        }

        Ok(Self {
            code,
            name: name.into(),
            credits,
            prerequisites: Vec::new(),
            schedule: Vec::new(),
        })
    }

    /// Replace the prerequisite codes; duplicates are dropped, first occurrence wins
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        self.prerequisites = prerequisites
            .into_iter()
            .map(Into::into)
            .filter(|code: &String| seen.insert(code.clone()))
            .collect();
        self
    }

    /// Replace the weekly schedule
    pub fn with_schedule(mut self, schedule: Vec<TimeInterval>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Append one meeting slot
    pub fn with_slot(mut self, slot: TimeInterval) -> Self {
        self.schedule.push(slot);
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn schedule(&self) -> &[TimeInterval] {
        &self.schedule
    }

    /// Schedule entries tagged with this course's code
    pub fn slots(&self) -> impl Iterator<Item = ScheduledSlot> + '_ {
        self.schedule
            .iter()
            .map(move |interval| ScheduledSlot::new(self.code.clone(), interval.clone()))
    }
}

/// A schedule entry together with the course that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledSlot {
    pub course_code: String,
    pub interval: TimeInterval,
}

impl ScheduledSlot {
    pub fn new(course_code: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            course_code: course_code.into(),
            interval,
        }
    }

    pub fn conflicts_with(&self, other: &ScheduledSlot) -> bool {
        self.interval.conflicts_with(&other.interval)
    }
}

impl fmt::Display for ScheduledSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.course_code, self.interval.format_range())
    }
}

/// A student's proposed set of courses plus their academic history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    student_id: String,
    completed_courses: BTreeSet<String>,
    selected_courses: Vec<Course>,
}

impl Registration {
    /// Create a registration, rejecting duplicate course codes in the selection
    pub fn new<I, S>(
        student_id: impl Into<String>,
        completed_courses: I,
        selected_courses: Vec<Course>,
    ) -> RegistrationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let student_id = student_id.into();

        let mut seen = HashSet::new();
        for course in &selected_courses {
            if !seen.insert(course.code()) {
                return Err(RegistrationError::registration(
                    student_id,
                    format!("course '{}' is selected more than once", course.code()),
                ));
            }
        }

        Ok(Self {
            student_id,
            completed_courses: completed_courses.into_iter().map(Into::into).collect(),
            selected_courses,
        })
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn completed_courses(&self) -> &BTreeSet<String> {
        &self.completed_courses
    }

    pub fn selected_courses(&self) -> &[Course] {
        &self.selected_courses
    }

    /// Whether the student has already passed the given course
    pub fn has_completed(&self, code: &str) -> bool {
        self.completed_courses.contains(code)
    }

    /// Sum of credit weights over the selected courses, widened so it cannot wrap
    pub fn total_credits(&self) -> u64 {
        self.selected_courses.iter().map(|course| u64::from(course.credits())).sum()
    }

    /// Every schedule entry in course order, then entry order
    pub fn scheduled_slots(&self) -> Vec<ScheduledSlot> {
        self.selected_courses.iter().flat_map(|course| course.slots()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::minutes;
    use rstest::rstest;

    fn monday(start: u32, end: u32) -> TimeInterval {
        TimeInterval::new("Monday", start, end).unwrap()
    }

    #[test]
    fn test_interval_rejects_inverted_range() {
        assert!(TimeInterval::new("Monday", minutes(11, 0), minutes(9, 0)).is_err());
        assert!(TimeInterval::new("Monday", minutes(9, 0), minutes(9, 0)).is_err());
        assert!(TimeInterval::new("Monday", 0, MINUTES_PER_DAY + 1).is_err());
        assert!(TimeInterval::new("  ", 0, 60).is_err());
        assert!(TimeInterval::new("Monday", 0, MINUTES_PER_DAY).is_ok());
    }

    #[test]
    fn test_interval_parse() {
        let interval = TimeInterval::parse("Monday", "09:00", "11:00").unwrap();
        assert_eq!(interval.start(), 540);
        assert_eq!(interval.end(), 660);
        assert_eq!(interval.format_range(), "09:00-11:00");
        assert_eq!(interval.to_string(), "Monday 09:00-11:00");
    }

    #[rstest]
    #[case((540, 660), (630, 720), true)] // partial overlap
    #[case((540, 660), (600, 620), true)] // containment
    #[case((540, 660), (540, 660), true)] // identical
    #[case((540, 660), (660, 720), false)] // adjacency
    #[case((660, 720), (540, 660), false)] // adjacency, reversed
    #[case((540, 600), (700, 800), false)] // disjoint
    fn test_interval_conflicts(
        #[case] a: (u32, u32),
        #[case] b: (u32, u32),
        #[case] expected: bool,
    ) {
        let first = monday(a.0, a.1);
        let second = monday(b.0, b.1);
        assert_eq!(first.conflicts_with(&second), expected);
        assert_eq!(second.conflicts_with(&first), expected);
    }

    #[test]
    fn test_interval_different_days_never_conflict() {
        let first = monday(540, 660);
        let second = TimeInterval::new("Tuesday", 540, 660).unwrap();
        assert!(!first.conflicts_with(&second));
    }

    #[test]
    fn test_course_preconditions() {
        assert!(Course::new("", "Nothing", 3).is_err());
        let err = Course::new("MAT101", "Calculus", 0).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidCourse { ref code, .. } if code == "MAT101"));
    }

    #[test]
    fn test_course_builders() {
        let course = Course::new("IFS300", "Advanced Computing", 3)
            .unwrap()
            .with_prerequisites(["MAT101", "FIS201", "MAT101"])
            .with_slot(monday(540, 660));

        assert_eq!(course.prerequisites(), ["MAT101", "FIS201"]);
        assert_eq!(course.schedule().len(), 1);

        let slots: Vec<_> = course.slots().collect();
        assert_eq!(slots[0].course_code, "IFS300");
        assert_eq!(slots[0].to_string(), "IFS300 (09:00-11:00)");
    }

    #[test]
    fn test_registration_rejects_duplicate_courses() {
        let course = Course::new("MAT101", "Calculus", 3).unwrap();
        let err = Registration::new("ani", Vec::<String>::new(), vec![course.clone(), course])
            .unwrap_err();
        assert!(err.to_string().contains("MAT101"));
    }

    #[test]
    fn test_registration_accessors() {
        let mat = Course::new("MAT101", "Calculus", 3).unwrap().with_slot(monday(540, 660));
        let fis = Course::new("FIS201", "Physics", 4)
            .unwrap()
            .with_slot(monday(630, 720))
            .with_slot(TimeInterval::new("Wednesday", 540, 600).unwrap());

        let registration = Registration::new("ani", ["MAT101"], vec![mat, fis]).unwrap();

        assert_eq!(registration.student_id(), "ani");
        assert!(registration.has_completed("MAT101"));
        assert!(!registration.has_completed("FIS201"));
        assert_eq!(registration.total_credits(), 7);

        let slots = registration.scheduled_slots();
        let owners: Vec<_> = slots.iter().map(|slot| slot.course_code.as_str()).collect();
        assert_eq!(owners, ["MAT101", "FIS201", "FIS201"]);
    }

    #[test]
    fn test_total_credits_does_not_wrap() {
        let heavy = Course::new("HVY001", "Heavy", u32::MAX).unwrap();
        let light = Course::new("LGT001", "Light", 2).unwrap();
        let registration =
            Registration::new("ani", Vec::<String>::new(), vec![heavy, light]).unwrap();

        assert_eq!(registration.total_credits(), u64::from(u32::MAX) + 2);
    }
}
