//! Data model for schedules, plans, strategies, and per-request contexts.
//!
//! Schedule/plan/strategy values are read-only configuration, constructed
//! from persisted JSON documents (camelCase field names) by administrative
//! collaborators and supplied whole to the engine per call. Contexts and
//! occurrences are transient, built fresh per query.

mod activity;
mod context;
mod occurrence;
mod schedule;
mod strategy;

pub use activity::*;
pub use context::*;
pub use occurrence::*;
pub use schedule::*;
pub use strategy::*;
