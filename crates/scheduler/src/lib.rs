//! Activity scheduling engine for a mobile health-research platform.
//!
//! Given a declarative [`schema::Schedule`] and a per-user
//! [`schema::ScheduleContext`], the engine deterministically computes the
//! concrete activity occurrences the user should see. A separate strategy
//! layer picks which schedule applies when a plan defines several variants.
//!
//! This crate provides:
//! - serde schema for schedules, plans, strategies, and contexts
//! - three recurrence drivers (once, fixed-interval, cron) behind one factory
//! - window/minimum policy filtering and idempotent occurrence identity
//! - deterministic strategy resolution (simple, AB-test buckets, criteria)
//! - structured pre-save validation of schedule documents
//!
//! The engine is a pure function of its inputs: no I/O, no shared mutable
//! state, no ambient clock. Callers thread `now` through the context builder.

pub mod drivers;
pub mod engine;
pub mod error;
pub mod events;
pub mod expander;
pub mod schema;
pub mod strategy;
pub mod validation;

pub use engine::{schedule_activities, schedule_plan};
pub use error::SchedulerError;
