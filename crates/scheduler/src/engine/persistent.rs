//! Persistent schedules: one open-ended occurrence anchored at the trigger.

use tracing::debug;

use crate::error::SchedulerError;
use crate::events;
use crate::schema::{Schedule, ScheduleContext, ScheduledActivity};

/// Expand a persistent schedule (declared or inferred).
///
/// The anchor is resolved exactly like any other schedule; if no candidate
/// event has fired there is nothing to re-anchor to and the result is
/// empty. Otherwise exactly one occurrence per activity is emitted at the
/// anchor instant, with no recurrence expansion and no expiration unless
/// the schedule sets one. Re-anchoring after the trigger fires again is
/// the caller's re-query; the engine holds no history.
pub(super) fn expand_persistent(
    schedule: &Schedule,
    ctx: &ScheduleContext,
) -> Result<Vec<ScheduledActivity>, SchedulerError> {
    let Some(anchor) = events::resolve_anchor(schedule.event_id.as_deref(), ctx.events()) else {
        debug!(event_id = ?schedule.event_id, "persistent trigger has not fired");
        return Ok(Vec::new());
    };
    super::materialize::materialize_all(schedule, &[anchor], ctx.zone())
}
