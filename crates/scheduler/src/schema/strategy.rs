//! Schedule plans and their selection strategies.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CriteriaContext, Schedule};

/// Associates a study with the strategy that picks a user's schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchedulePlan {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub guid: Option<String>,
    pub strategy: StudyStrategy,
}

/// A closed set of selection strategies; no third-party extension point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StudyStrategy {
    /// Wraps exactly one schedule, always selected.
    #[serde(rename = "SimpleScheduleStrategy", rename_all = "camelCase")]
    Simple { schedule: Schedule },
    /// Weighted buckets; a deterministic per-user hash picks the bucket.
    /// Weights summing to 100 is enforced by validation, not at selection.
    #[serde(rename = "ABTestScheduleStrategy", rename_all = "camelCase")]
    AbTest { schedule_groups: Vec<AbTestGroup> },
    /// Ordered (criteria, schedule) pairs; first matching criteria wins.
    #[serde(rename = "CriteriaScheduleStrategy", rename_all = "camelCase")]
    Criteria {
        schedule_criteria: Vec<CriteriaGroup>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AbTestGroup {
    /// Weight in [0, 100]; all groups in a strategy sum to 100.
    pub percentage: u32,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CriteriaGroup {
    /// Empty criteria match everything; place a default arm last.
    #[serde(default)]
    pub criteria: Criteria,
    pub schedule: Schedule,
}

/// Selection criteria for one strategy arm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Criteria {
    pub min_app_version: Option<u32>,
    pub max_app_version: Option<u32>,
    /// Every listed group must be present on the user.
    pub all_of_groups: BTreeSet<String>,
    /// No listed group may be present on the user.
    pub none_of_groups: BTreeSet<String>,
    pub all_of_substudy_ids: BTreeSet<String>,
    pub none_of_substudy_ids: BTreeSet<String>,
}

impl Criteria {
    /// Whether this arm declares no constraints at all.
    pub fn is_empty(&self) -> bool {
        self.min_app_version.is_none()
            && self.max_app_version.is_none()
            && self.all_of_groups.is_empty()
            && self.none_of_groups.is_empty()
            && self.all_of_substudy_ids.is_empty()
            && self.none_of_substudy_ids.is_empty()
    }

    /// Whether the user context satisfies every declared constraint.
    ///
    /// An absent context app version matches any version range; an unset
    /// bound is unbounded, never zero.
    pub fn matches(&self, ctx: &CriteriaContext) -> bool {
        if let Some(version) = ctx.app_version {
            if self.min_app_version.is_some_and(|min| version < min) {
                return false;
            }
            if self.max_app_version.is_some_and(|max| version > max) {
                return false;
            }
        }
        self.all_of_groups
            .iter()
            .all(|g| ctx.data_groups.contains(g))
            && self
                .none_of_groups
                .iter()
                .all(|g| !ctx.data_groups.contains(g))
            && self
                .all_of_substudy_ids
                .iter()
                .all(|s| ctx.substudy_ids.contains(s))
            && self
                .none_of_substudy_ids
                .iter()
                .all(|s| !ctx.substudy_ids.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(version: Option<u32>, groups: &[&str]) -> CriteriaContext {
        CriteriaContext {
            app_version: version,
            data_groups: groups.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    fn criteria(min: Option<u32>, max: Option<u32>, all: &[&str], none: &[&str]) -> Criteria {
        Criteria {
            min_app_version: min,
            max_app_version: max,
            all_of_groups: all.iter().map(|g| g.to_string()).collect(),
            none_of_groups: none.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_criteria_match_everything() {
        assert!(Criteria::default().is_empty());
        assert!(Criteria::default().matches(&ctx(None, &[])));
        assert!(Criteria::default().matches(&ctx(Some(12), &["a", "b"])));
    }

    #[test]
    fn version_range_bounds() {
        let c = criteria(Some(5), Some(10), &[], &[]);
        assert!(!c.matches(&ctx(Some(4), &[])));
        assert!(c.matches(&ctx(Some(5), &[])));
        assert!(c.matches(&ctx(Some(10), &[])));
        assert!(!c.matches(&ctx(Some(11), &[])));
        // Absent context version matches any range.
        assert!(c.matches(&ctx(None, &[])));
    }

    #[test]
    fn unset_bound_is_unbounded_not_zero() {
        let min_only = criteria(Some(5), None, &[], &[]);
        assert!(min_only.matches(&ctx(Some(u32::MAX), &[])));
        let max_only = criteria(None, Some(5), &[], &[]);
        assert!(max_only.matches(&ctx(Some(0), &[])));
    }

    #[test]
    fn all_of_groups_must_all_be_present() {
        let c = criteria(None, None, &["a", "b"], &[]);
        assert!(c.matches(&ctx(None, &["a", "b", "c"])));
        assert!(!c.matches(&ctx(None, &["a"])));
    }

    #[test]
    fn none_of_groups_must_be_disjoint() {
        let c = criteria(None, None, &[], &["x"]);
        assert!(c.matches(&ctx(None, &["a"])));
        assert!(!c.matches(&ctx(None, &["a", "x"])));
    }

    #[test]
    fn substudy_constraints() {
        let c = Criteria {
            all_of_substudy_ids: ["s1".to_string()].into(),
            none_of_substudy_ids: ["s2".to_string()].into(),
            ..Default::default()
        };
        let mut context = CriteriaContext::default();
        context.substudy_ids.insert("s1".to_string());
        assert!(c.matches(&context));
        context.substudy_ids.insert("s2".to_string());
        assert!(!c.matches(&context));
    }
}
