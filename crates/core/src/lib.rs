//! Shared primitives for the cohort scheduling engine.
//!
//! Domain-free building blocks used across the workspace:
//! - [`CohortError`]: error type for primitive parse/arithmetic failures
//! - [`IsoPeriod`]: ISO-8601 period value type with calendar-aware addition
//! - timezone helpers over `chrono-tz`

pub mod error;
pub mod period;
pub mod time;

pub use error::CohortError;
pub use period::IsoPeriod;
pub use time::parse_zone;
