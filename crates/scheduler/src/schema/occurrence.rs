//! Materialized scheduling results.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Activity;

/// One concrete, schedulable instance of an activity.
///
/// `guid` is a stable hash of the activity guid and the UTC scheduled
/// instant: identical queries against unchanged inputs are idempotent, and
/// distinct instants never collide. Instants carry the query zone's offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivity {
    pub guid: String,
    pub activity: Activity,
    pub scheduled_on: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<DateTime<FixedOffset>>,
    /// True only for persistent schedules (declared or inferred).
    pub persistent: bool,
}
