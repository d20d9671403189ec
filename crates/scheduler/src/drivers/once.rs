//! One-shot driver: the anchor instant, optionally time-exploded.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::error::SchedulerError;
use crate::expander;

use super::ExpansionBounds;

/// Emits exactly the (possibly time-exploded) anchor; terminal after one
/// expansion, so a minimum override can never add more.
#[derive(Debug, Clone)]
pub struct OnceDriver {
    times: Vec<NaiveTime>,
}

impl OnceDriver {
    pub fn new(times: Vec<NaiveTime>) -> Self {
        Self { times }
    }

    pub(super) fn expand(
        &self,
        anchor: DateTime<Utc>,
        bounds: &ExpansionBounds,
        zone: Tz,
    ) -> Result<Vec<DateTime<Utc>>, SchedulerError> {
        Ok(expander::expand(anchor, &self.times, zone)
            .into_iter()
            .filter(|t| *t <= bounds.until)
            .collect())
    }
}
