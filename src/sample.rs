//! Built-in sample registration used by the `demo` command
//!
//! Ani has passed MAT101 only, selects IFS300 without FIS201, and MAT101 and
//! FIS201 meet at overlapping times on Monday.

use crate::domain::course::{Course, Registration, TimeInterval};
use crate::domain::outcome::RegistrationResult;
use crate::domain::time::minutes;

/// The three sample courses: MAT101, FIS201 and IFS300
pub fn sample_courses() -> RegistrationResult<Vec<Course>> {
    let mat101 = Course::new("MAT101", "Basic Mathematics", 3)?
        .with_slot(TimeInterval::new("Monday", minutes(9, 0), minutes(11, 0))?);

    let fis201 = Course::new("FIS201", "Physics I", 4)?
        .with_prerequisites(["MAT101"])
        .with_slot(TimeInterval::new("Monday", minutes(10, 30), minutes(12, 0))?);

    let ifs300 = Course::new("IFS300", "Advanced Computer Science", 3)?
        .with_prerequisites(["MAT101", "FIS201"])
        .with_slot(TimeInterval::new("Tuesday", minutes(9, 0), minutes(11, 0))?);

    Ok(vec![mat101, fis201, ifs300])
}

/// Ani's registration: completed MAT101, selecting all three sample courses
pub fn sample_registration() -> RegistrationResult<Registration> {
    Registration::new("Ani", ["MAT101"], sample_courses()?)
}
