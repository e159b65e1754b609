//! Schedule-conflict detection
//!
//! Slots are flattened in course order, then entry order, and compared pairwise
//! (`i < j`). The first overlapping pair in that order is reported and the scan
//! stops, so the message for a given registration is always the same.

use super::ValidationRule;
use crate::domain::course::{Registration, ScheduledSlot};
use crate::domain::outcome::{FailureKind, ValidationOutcome};

pub const RULE_ID: &str = "schedule_conflict";

/// Rejects registrations whose selected courses meet at overlapping times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleConflictRule;

impl ScheduleConflictRule {
    pub fn new() -> Self {
        Self
    }

    /// First conflicting pair in scan order, if any
    pub fn first_conflict(slots: &[ScheduledSlot]) -> Option<(&ScheduledSlot, &ScheduledSlot)> {
        slots.iter().enumerate().find_map(|(i, first)| {
            slots[i + 1..]
                .iter()
                .find(|second| first.conflicts_with(second))
                .map(|second| (first, second))
        })
    }
}

impl ValidationRule for ScheduleConflictRule {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn describe(&self) -> String {
        "no two selected courses may meet at overlapping times on the same day".to_string()
    }

    fn validate(&self, registration: &Registration) -> ValidationOutcome {
        let slots = registration.scheduled_slots();
        tracing::info!(rule = RULE_ID, slots = slots.len(), "Checking schedule conflicts");
        for slot in &slots {
            tracing::debug!(
                rule = RULE_ID,
                course = %slot.course_code,
                day = slot.interval.day(),
                "Scheduled slot {}",
                slot
            );
        }

        match Self::first_conflict(&slots) {
            Some((first, second)) => {
                let message = format!("Schedule conflict between {first} and {second}.");
                tracing::warn!(rule = RULE_ID, day = first.interval.day(), "{}", message);
                ValidationOutcome::fail(
                    RULE_ID,
                    FailureKind::ScheduleConflict {
                        first: first.clone(),
                        second: second.clone(),
                    },
                    message,
                )
            }
            None => ValidationOutcome::pass(RULE_ID, "No schedule conflicts."),
        }
    }
}
