//! The declarative schedule document.

use chrono::{DateTime, NaiveTime, Utc};
use cohort_core::IsoPeriod;
use serde::{Deserialize, Serialize};

use crate::events::candidate_event_ids;

use super::Activity;

/// A declarative recurrence definition, parsed from persisted JSON.
///
/// Immutable once attached to a plan for the duration of one scheduling
/// call. Invariants (enforced by [`crate::validation`] and by the driver
/// factory): a `recurring` schedule carries exactly one of `interval` or
/// `cronTrigger`, and `expires` for anything expected to repeat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Schedule {
    #[serde(default)]
    pub label: Option<String>,
    pub schedule_type: ScheduleType,
    /// Comma-separated ordered candidate event ids; empty means enrollment.
    #[serde(default)]
    pub event_id: Option<String>,
    /// Applied once to the anchor before any expansion.
    #[serde(default)]
    pub delay: Option<IsoPeriod>,
    /// Fixed recurrence period; mutually exclusive with `cron_trigger`.
    #[serde(default)]
    pub interval: Option<IsoPeriod>,
    /// Cron expression driving recurrence; mutually exclusive with `interval`.
    #[serde(default)]
    pub cron_trigger: Option<String>,
    /// Wall-clock times-of-day; empty means the anchor's own time-of-day.
    #[serde(default, with = "times_of_day")]
    pub times: Vec<NaiveTime>,
    /// Absolute validity bounds, independent of the query window.
    #[serde(default)]
    pub starts_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_on: Option<DateTime<Utc>>,
    /// Per-occurrence expiration period, added to each scheduled instant.
    #[serde(default)]
    pub expires: Option<IsoPeriod>,
    /// Caps a cron schedule's default expansion to this span after the anchor.
    #[serde(default)]
    pub sequence_period: Option<IsoPeriod>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Once,
    Recurring,
    Persistent,
}

impl Schedule {
    /// Whether occurrences of this schedule stay open until completed.
    ///
    /// True for `persistent` schedules, and retroactively for legacy `once`
    /// schedules with no (or zero) delay whose event-id list references the
    /// completion event of one of the schedule's own activities. Any
    /// non-zero delay disables that inference.
    pub fn is_persistent(&self) -> bool {
        match self.schedule_type {
            ScheduleType::Persistent => true,
            ScheduleType::Recurring => false,
            ScheduleType::Once => {
                if self.delay.is_some_and(|d| !d.is_zero()) {
                    return false;
                }
                let Some(event_id) = self.event_id.as_deref() else {
                    return false;
                };
                let candidates = candidate_event_ids(Some(event_id));
                self.activities
                    .iter()
                    .any(|a| candidates.contains(&a.completion_event_id().as_str()))
            }
        }
    }
}

/// Serde helpers for `times`: wall-clock strings like "10:00" or "10:00:30".
mod times_of_day {
    use chrono::{NaiveTime, Timelike};
    use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub(super) fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
    }

    pub fn serialize<S: Serializer>(times: &[NaiveTime], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(times.len()))?;
        for time in times {
            let formatted = if time.second() == 0 {
                time.format("%H:%M").to_string()
            } else {
                time.format("%H:%M:%S").to_string()
            };
            seq.serialize_element(&formatted)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<NaiveTime>, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| parse(s).map_err(|e| de::Error::custom(format!("invalid time '{s}': {e}"))))
            .collect()
    }
}
