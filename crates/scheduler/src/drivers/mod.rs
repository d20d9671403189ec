//! Recurrence drivers: candidate-instant expansion per schedule type.
//!
//! The three drivers share one contract: produce ascending candidate
//! instants for an anchor within explicit bounds. The factory
//! ([`RecurrenceDriver::for_schedule`]) maps a schedule's declared trigger
//! fields to the right driver and is where configuration errors fail fast.
//!
//! Every expansion loop carries a hard iteration ceiling; exceeding it is a
//! fatal internal error, logged and reported rather than silently truncated.

mod cron;
mod interval;
mod once;


pub use self::cron::CronDriver;
pub use self::interval::IntervalDriver;
pub use self::once::OnceDriver;

pub(crate) use self::cron::normalize_cron;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::SchedulerError;
use crate::schema::{Schedule, ScheduleType};

/// Hard ceiling on expansion iterations in a single pass.
pub const MAX_EXPANSIONS: usize = 10_000;

/// Bounds for one expansion pass.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionBounds {
    /// Query window start; candidates before it never count toward a minimum.
    pub window_start: DateTime<Utc>,
    /// Hard stop: no candidate after this instant is produced.
    pub until: DateTime<Utc>,
    /// Rolling cap for cron schedules (`anchor + sequencePeriod`); only
    /// honored when no minimum is in force.
    pub sequence_cap: Option<DateTime<Utc>>,
    /// When non-zero, expansion stops once this many candidates at or after
    /// `window_start` exist, and the sequence cap is ignored.
    pub min_count: usize,
}

/// The closed set of recurrence drivers.
#[derive(Debug, Clone)]
pub enum RecurrenceDriver {
    Once(OnceDriver),
    Interval(IntervalDriver),
    Cron(CronDriver),
}

impl RecurrenceDriver {
    /// Scheduler factory: map declared type/trigger fields to a driver.
    ///
    /// Configuration errors surface here, before any expansion: a recurring
    /// schedule with both or neither of interval/cronTrigger, a zero-length
    /// interval, or an unparseable cron expression.
    pub fn for_schedule(schedule: &Schedule) -> Result<Self, SchedulerError> {
        match schedule.schedule_type {
            // Persistent schedules are routed to the persistent scheduler
            // before expansion; the once driver covers the legacy path.
            ScheduleType::Once | ScheduleType::Persistent => {
                Ok(Self::Once(OnceDriver::new(schedule.times.clone())))
            }
            ScheduleType::Recurring => match (&schedule.interval, &schedule.cron_trigger) {
                (Some(_), Some(_)) => Err(SchedulerError::ConflictingRecurrenceRules),
                (None, None) => Err(SchedulerError::MissingRecurrenceRule),
                (Some(interval), None) => {
                    if interval.is_zero() {
                        return Err(SchedulerError::ZeroLengthInterval);
                    }
                    Ok(Self::Interval(IntervalDriver::new(
                        *interval,
                        schedule.times.clone(),
                    )))
                }
                (None, Some(expression)) => Ok(Self::Cron(CronDriver::parse(expression)?)),
            },
        }
    }

    /// Produce ascending candidate instants for `anchor` within `bounds`.
    pub fn expand(
        &self,
        anchor: DateTime<Utc>,
        bounds: &ExpansionBounds,
        zone: Tz,
    ) -> Result<Vec<DateTime<Utc>>, SchedulerError> {
        match self {
            Self::Once(driver) => driver.expand(anchor, bounds, zone),
            Self::Interval(driver) => driver.expand(anchor, bounds, zone),
            Self::Cron(driver) => driver.expand(anchor, bounds, zone),
        }
    }
}
