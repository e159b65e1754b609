//! Domain layer for course registration validation
//!
//! Architecture: Domain-Driven Design - Pure business types with no infrastructure concerns

pub mod course;
pub mod outcome;
pub mod time;

// Re-export main domain types for convenience
pub use course::{Course, Registration, ScheduledSlot, TimeInterval};
pub use outcome::*;
