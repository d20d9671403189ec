//! Strategy resolution: picking which schedule applies to a user.
//!
//! A plan's strategy is resolved against the criteria context alone; the
//! recurrence machinery never sees user attributes. AB weights summing to
//! 100 is a validation concern of the save path
//! ([`crate::validation::validate_plan`]); selection assumes validated
//! input and does not re-check.

mod bucket;


use tracing::debug;

use crate::schema::{AbTestGroup, CriteriaContext, Schedule, StudyStrategy};

/// Select the schedule for a user, or `None` when no arm applies.
///
/// `None` means "no schedule for this user", never an error.
pub fn select_schedule<'a>(
    strategy: &'a StudyStrategy,
    ctx: &CriteriaContext,
) -> Option<&'a Schedule> {
    match strategy {
        StudyStrategy::Simple { schedule } => Some(schedule),
        StudyStrategy::AbTest { schedule_groups } => select_ab_test(schedule_groups, ctx),
        StudyStrategy::Criteria { schedule_criteria } => schedule_criteria
            .iter()
            .find(|group| group.criteria.matches(ctx))
            .map(|group| &group.schedule),
    }
}

/// Deterministic bucket assignment: the same user always lands in the same
/// group, iterating groups in declared order over cumulative weight ranges.
fn select_ab_test<'a>(groups: &'a [AbTestGroup], ctx: &CriteriaContext) -> Option<&'a Schedule> {
    let key = ctx.health_code.as_deref().or(ctx.user_id.as_deref());
    let Some(key) = key else {
        debug!("no stable user key, cannot assign an AB bucket");
        return None;
    };

    let value = bucket::bucket_for_key(key);
    let mut cumulative = 0u32;
    for group in groups {
        cumulative += group.percentage;
        if value < cumulative {
            debug!(bucket = value, percentage = group.percentage, "assigned AB bucket");
            return Some(&group.schedule);
        }
    }
    // Weights under 100 leave a residual range; validated upstream.
    None
}
