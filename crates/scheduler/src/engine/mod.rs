//! Engine orchestration: from a plan (or a single schedule) and a context
//! to the ordered list of concrete activity occurrences.
//!
//! Control flow: strategy resolution picks the schedule, the factory picks
//! the recurrence driver, the event resolver supplies the anchor, the
//! driver produces candidate instants, the window/policy filter prunes or
//! extends them, and materialization emits the final records.

mod materialize;
mod persistent;
mod window;


use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::drivers::{ExpansionBounds, RecurrenceDriver};
use crate::error::SchedulerError;
use crate::events;
use crate::schema::{Schedule, ScheduleContext, SchedulePlan, ScheduledActivity};
use crate::strategy;

/// Expansion horizon when neither the query window nor a sequence period
/// bounds growth. Well under the iteration ceiling for sane intervals.
const DEFAULT_HORIZON_DAYS: i64 = 365;

/// Compute the occurrences a user should see for a plan.
///
/// Resolves the plan's strategy against the context's criteria first; a
/// user no strategy arm matches gets an empty result, not an error.
pub fn schedule_plan(
    plan: &SchedulePlan,
    ctx: &ScheduleContext,
) -> Result<Vec<ScheduledActivity>, SchedulerError> {
    let Some(schedule) = strategy::select_schedule(&plan.strategy, ctx.criteria()) else {
        debug!(plan = ?plan.guid, "no schedule selected for user");
        return Ok(Vec::new());
    };
    schedule_activities(schedule, ctx)
}

/// Compute the occurrences a user should see for one schedule.
pub fn schedule_activities(
    schedule: &Schedule,
    ctx: &ScheduleContext,
) -> Result<Vec<ScheduledActivity>, SchedulerError> {
    if schedule.is_persistent() {
        return persistent::expand_persistent(schedule, ctx);
    }

    // Configuration errors fail before any resolution work.
    let driver = RecurrenceDriver::for_schedule(schedule)?;

    let Some(event_ts) = events::resolve_anchor(schedule.event_id.as_deref(), ctx.events()) else {
        debug!(event_id = ?schedule.event_id, "no candidate event resolved, nothing to schedule");
        return Ok(Vec::new());
    };
    let anchor = match &schedule.delay {
        Some(delay) => delay.add_to(event_ts)?,
        None => event_ts,
    };
    // A delay that pushes the anchor past the schedule's validity yields nothing.
    if schedule.ends_on.is_some_and(|end| anchor > end) {
        return Ok(Vec::new());
    }

    let clip_start = match schedule.starts_on {
        Some(s) => ctx.starts_on().max(s),
        None => ctx.starts_on(),
    };
    let natural_until = natural_window_end(schedule, ctx)?;
    let sequence_cap = match &schedule.sequence_period {
        Some(period) => Some(period.add_to(anchor)?),
        None => None,
    };

    let natural = ExpansionBounds {
        window_start: clip_start,
        until: natural_until,
        sequence_cap,
        min_count: 0,
    };
    let candidates = driver.expand(anchor, &natural, ctx.zone())?;
    let mut instants = window::clip(candidates, clip_start, Some(natural_until));

    // Minimum override: only ever adds occurrences. When the natural count
    // already meets the minimum, the full naturally-windowed set stands.
    let minimum = ctx.minimum_per_schedule();
    if minimum > 0 && instants.len() < minimum {
        let extended = ExpansionBounds {
            window_start: clip_start,
            until: schedule
                .ends_on
                .unwrap_or(clip_start + TimeDelta::days(DEFAULT_HORIZON_DAYS)),
            sequence_cap,
            min_count: minimum,
        };
        debug!(
            minimum,
            natural = instants.len(),
            "natural window below minimum, re-expanding past the query end"
        );
        let candidates = driver.expand(anchor, &extended, ctx.zone())?;
        instants = window::clip(candidates, clip_start, schedule.ends_on);
    }

    materialize::materialize_all(schedule, &instants, ctx.zone())
}

/// Effective end for the natural pass: the query end, else the sequence
/// period from the window start, else the default horizon; always clamped
/// to the schedule's own end.
fn natural_window_end(
    schedule: &Schedule,
    ctx: &ScheduleContext,
) -> Result<DateTime<Utc>, SchedulerError> {
    let mut until = match ctx.ends_on() {
        Some(end) => end,
        None => match &schedule.sequence_period {
            Some(period) => period.add_to(ctx.starts_on())?,
            None => ctx.starts_on() + TimeDelta::days(DEFAULT_HORIZON_DAYS),
        },
    };
    if let Some(end) = schedule.ends_on {
        until = until.min(end);
    }
    Ok(until)
}
