//! Cron driver: fire times enumerated from a cron expression.

use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use tracing::error;

use crate::error::SchedulerError;

use super::{ExpansionBounds, MAX_EXPANSIONS};

/// Enumerates cron fire times from `max(anchor, windowStart)` forward, in
/// the query zone's wall clock.
///
/// With a sequence cap (`anchor + sequencePeriod`) enumeration stops at the
/// cap unless a minimum is in force, in which case the cap is ignored and
/// enumeration continues until the minimum is met or the hard bound is hit.
#[derive(Debug, Clone)]
pub struct CronDriver {
    schedule: cron::Schedule,
    expression: String,
}

impl CronDriver {
    /// Parse and normalize a cron expression; failure is a configuration
    /// error surfaced at factory time.
    pub fn parse(expression: &str) -> Result<Self, SchedulerError> {
        let normalized = normalize_cron(expression);
        let schedule =
            cron::Schedule::from_str(&normalized).map_err(|e| SchedulerError::InvalidCron {
                expression: expression.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            schedule,
            expression: normalized,
        })
    }

    /// The normalized expression this driver runs.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub(super) fn expand(
        &self,
        anchor: DateTime<Utc>,
        bounds: &ExpansionBounds,
        zone: Tz,
    ) -> Result<Vec<DateTime<Utc>>, SchedulerError> {
        let start = anchor.max(bounds.window_start).with_timezone(&zone);
        // `after` is strictly exclusive; back off one second so a fire
        // landing exactly on the bound is enumerated.
        let scan_from = start - TimeDelta::seconds(1);
        let mut out = Vec::new();
        let mut counted = 0usize;

        for (iterations, fire) in self.schedule.after(&scan_from).enumerate() {
            if iterations >= MAX_EXPANSIONS {
                error!(
                    cron = %self.expression,
                    anchor = %anchor,
                    until = %bounds.until,
                    "cron expansion exceeded the safety ceiling"
                );
                return Err(SchedulerError::ExpansionCeiling {
                    limit: MAX_EXPANSIONS,
                });
            }

            let fire = fire.with_timezone(&Utc);
            if fire > bounds.until {
                break;
            }
            if bounds.min_count == 0 && bounds.sequence_cap.is_some_and(|cap| fire > cap) {
                break;
            }
            out.push(fire);
            if fire >= bounds.window_start {
                counted += 1;
            }
            if bounds.min_count > 0 && counted >= bounds.min_count {
                break;
            }
        }
        Ok(out)
    }
}

/// Normalize a 5-field cron expression to 6-field by prepending seconds.
///
/// The `cron` crate requires at least 6 fields
/// (`sec min hour day-of-month month day-of-week [year]`); operators often
/// write standard 5-field cron.
pub(crate) fn normalize_cron(expression: &str) -> String {
    let trimmed = expression.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    }
}
