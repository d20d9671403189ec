//! Fixed-interval driver: the anchor repeated every `interval`.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use cohort_core::IsoPeriod;
use tracing::error;

use crate::error::SchedulerError;
use crate::expander;

use super::{ExpansionBounds, MAX_EXPANSIONS};

/// Repeatedly adds `interval` to the anchor, re-applying the time expander
/// each period, until the cursor passes the effective window end.
#[derive(Debug, Clone)]
pub struct IntervalDriver {
    interval: IsoPeriod,
    times: Vec<NaiveTime>,
}

impl IntervalDriver {
    /// `interval` must be non-zero; the factory enforces that.
    pub fn new(interval: IsoPeriod, times: Vec<NaiveTime>) -> Self {
        Self { interval, times }
    }

    pub(super) fn expand(
        &self,
        anchor: DateTime<Utc>,
        bounds: &ExpansionBounds,
        zone: Tz,
    ) -> Result<Vec<DateTime<Utc>>, SchedulerError> {
        let mut out = Vec::new();
        let mut counted = 0usize;
        let mut cursor = anchor;
        let mut iterations = 0usize;

        loop {
            iterations += 1;
            if iterations > MAX_EXPANSIONS {
                error!(
                    interval = %self.interval,
                    anchor = %anchor,
                    until = %bounds.until,
                    "interval expansion exceeded the safety ceiling"
                );
                return Err(SchedulerError::ExpansionCeiling {
                    limit: MAX_EXPANSIONS,
                });
            }

            let mut produced = false;
            for instant in expander::expand(cursor, &self.times, zone) {
                if instant > bounds.until {
                    continue;
                }
                produced = true;
                if instant >= bounds.window_start {
                    counted += 1;
                }
                out.push(instant);
            }

            // Under a minimum override, finish the period that met the
            // minimum rather than truncating mid-period.
            if bounds.min_count > 0 && counted >= bounds.min_count {
                break;
            }
            // Declared times earlier in the day than the anchor's wall
            // clock can keep a past-`until` cursor's instants inside the
            // window, so termination keys on the produced instants.
            if cursor > bounds.until && !produced {
                break;
            }
            cursor = self.interval.add_to(cursor)?;
        }
        Ok(out)
    }
}
