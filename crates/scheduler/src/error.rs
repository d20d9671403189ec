//! Engine error taxonomy.
//!
//! Configuration errors fail fast at factory/builder time. Resolution misses
//! (unresolved event id, no matching criteria) are not errors; they surface
//! as empty results. [`SchedulerError::ExpansionCeiling`] is an internal
//! error signalling runaway expansion, distinct from bad user input.

use cohort_core::CohortError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("invalid cron expression '{expression}': {message}")]
    InvalidCron { expression: String, message: String },

    #[error("recurring schedule requires either an interval or a cron trigger")]
    MissingRecurrenceRule,

    #[error("recurring schedule declares both an interval and a cron trigger")]
    ConflictingRecurrenceRules,

    #[error("interval must be a non-zero period")]
    ZeroLengthInterval,

    #[error("schedule context requires a study identifier")]
    MissingStudyIdentifier,

    #[error("expansion exceeded the safety ceiling of {limit} iterations")]
    ExpansionCeiling { limit: usize },

    #[error(transparent)]
    Core(#[from] CohortError),
}
