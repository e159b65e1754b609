//! Minute-of-day helpers shared by schedule entries, rule messages and documents

use crate::domain::outcome::{RegistrationError, RegistrationResult};
use lazy_static::lazy_static;
use regex::Regex;

/// Number of minutes in one day; the exclusive upper bound for interval ends
pub const MINUTES_PER_DAY: u32 = 24 * 60;

lazy_static! {
    static ref CLOCK_PATTERN: Regex =
        Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("clock pattern is a valid regex");
}

/// Convert an hour/minute pair into minutes since midnight
pub const fn minutes(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

/// Format minutes since midnight as zero-padded 24-hour `HH:MM`
pub fn format_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse `HH:MM` text into minutes since midnight.
///
/// `24:00` is accepted so that a slot may run until midnight.
pub fn parse_time(text: &str) -> RegistrationResult<u32> {
    let captures = CLOCK_PATTERN
        .captures(text)
        .ok_or_else(|| RegistrationError::time(text, "expected HH:MM"))?;

    let hour: u32 = captures[1]
        .parse()
        .map_err(|e| RegistrationError::time(text, format!("invalid hour: {e}")))?;
    let minute: u32 = captures[2]
        .parse()
        .map_err(|e| RegistrationError::time(text, format!("invalid minute: {e}")))?;

    if minute >= 60 {
        return Err(RegistrationError::time(text, "minute must be below 60"));
    }

    let total = minutes(hour, minute);
    if total > MINUTES_PER_DAY {
        return Err(RegistrationError::time(text, "time is past the end of the day"));
    }

    Ok(total)
}
