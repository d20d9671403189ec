//! Occurrence materialization: instants to stable, identified records.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sha2::{Digest, Sha256};

use crate::error::SchedulerError;
use crate::schema::{Activity, Schedule, ScheduledActivity};

/// Materialize every (instant, activity) pair, sorted by scheduled instant.
///
/// The sort is stable, so activities keep declaration order within one
/// instant and out-of-order declared times-of-day end up chronological.
pub(super) fn materialize_all(
    schedule: &Schedule,
    instants: &[DateTime<Utc>],
    zone: Tz,
) -> Result<Vec<ScheduledActivity>, SchedulerError> {
    let mut out = Vec::with_capacity(instants.len() * schedule.activities.len());
    for instant in instants {
        for activity in &schedule.activities {
            out.push(materialize(*instant, activity, schedule, zone)?);
        }
    }
    out.sort_by_key(|occurrence| occurrence.scheduled_on.with_timezone(&Utc));
    Ok(out)
}

fn materialize(
    instant: DateTime<Utc>,
    activity: &Activity,
    schedule: &Schedule,
    zone: Tz,
) -> Result<ScheduledActivity, SchedulerError> {
    let expires_on = match &schedule.expires {
        Some(period) => Some(period.add_to(instant)?.with_timezone(&zone).fixed_offset()),
        None => None,
    };
    Ok(ScheduledActivity {
        guid: occurrence_guid(&activity.guid, instant),
        activity: activity.clone(),
        scheduled_on: instant.with_timezone(&zone).fixed_offset(),
        expires_on,
        persistent: schedule.is_persistent(),
    })
}

/// Stable occurrence identity: hash of the activity guid and the UTC
/// instant. Identical queries against unchanged inputs repeat identifiers;
/// distinct instants never collide. The UTC rendering keeps the identifier
/// stable when only the query timezone changes.
fn occurrence_guid(activity_guid: &str, instant: DateTime<Utc>) -> String {
    let digest = Sha256::digest(format!("{activity_guid}:{}", instant.to_rfc3339()).as_bytes());
    let hex = format!("{digest:x}");
    hex[..32].to_string()
}
