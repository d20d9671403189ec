//! Pre-save validation of schedule and plan documents.
//!
//! The engine assumes validated input at selection/expansion time; this
//! module is the save-path gate. Blocking errors reject the document,
//! warnings are advisory.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::drivers::normalize_cron;
use crate::schema::{Schedule, SchedulePlan, ScheduleType, StudyStrategy};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"strategy.scheduleGroups[1].percentage"`.
    pub path: String,
    pub message: String,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a single [`Schedule`].
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut result = ValidationResult::new();
    check_schedule(schedule, "", &mut result);
    result
}

/// Validate a [`SchedulePlan`], including every contained schedule.
pub fn validate_plan(plan: &SchedulePlan) -> ValidationResult {
    let mut result = ValidationResult::new();
    match &plan.strategy {
        StudyStrategy::Simple { schedule } => {
            check_schedule(schedule, "strategy.schedule.", &mut result);
        }
        StudyStrategy::AbTest { schedule_groups } => {
            let total: u32 = schedule_groups.iter().map(|g| g.percentage).sum();
            if total != 100 {
                result.error(
                    "strategy.scheduleGroups",
                    format!("group percentages must sum to 100, got {total}"),
                );
            }
            for (i, group) in schedule_groups.iter().enumerate() {
                check_schedule(
                    &group.schedule,
                    &format!("strategy.scheduleGroups[{i}].schedule."),
                    &mut result,
                );
            }
        }
        StudyStrategy::Criteria { schedule_criteria } => {
            if schedule_criteria.is_empty() {
                result.error("strategy.scheduleCriteria", "at least one arm is required");
            }
            for (i, group) in schedule_criteria.iter().enumerate() {
                let path = format!("strategy.scheduleCriteria[{i}]");
                let criteria = &group.criteria;
                if let (Some(min), Some(max)) =
                    (criteria.min_app_version, criteria.max_app_version)
                {
                    if min > max {
                        result.error(
                            format!("{path}.criteria.minAppVersion"),
                            "minAppVersion cannot exceed maxAppVersion",
                        );
                    }
                }
                if criteria
                    .all_of_groups
                    .intersection(&criteria.none_of_groups)
                    .next()
                    .is_some()
                {
                    result.error(
                        format!("{path}.criteria"),
                        "a data group cannot be both required and prohibited",
                    );
                }
                // A catch-all arm shadows every arm after it.
                if criteria.is_empty() && i + 1 < schedule_criteria.len() {
                    result.warn(
                        format!("{path}.criteria"),
                        "empty criteria match every user; arms after this one are unreachable",
                    );
                }
                check_schedule(&group.schedule, &format!("{path}.schedule."), &mut result);
            }
        }
    }
    result
}

// ── Schedule checks ─────────────────────────────────────────────────

fn check_schedule(schedule: &Schedule, prefix: &str, result: &mut ValidationResult) {
    match schedule.schedule_type {
        ScheduleType::Recurring => {
            match (&schedule.interval, &schedule.cron_trigger) {
                (Some(_), Some(_)) => result.error(
                    format!("{prefix}interval"),
                    "interval and cronTrigger are mutually exclusive",
                ),
                (None, None) => result.error(
                    format!("{prefix}scheduleType"),
                    "a recurring schedule requires an interval or a cronTrigger",
                ),
                (Some(interval), None) => {
                    if interval.is_zero() {
                        result.error(format!("{prefix}interval"), "interval cannot be zero");
                    }
                }
                (None, Some(expression)) => {
                    if let Err(e) = cron::Schedule::from_str(&normalize_cron(expression)) {
                        result.error(
                            format!("{prefix}cronTrigger"),
                            format!("invalid cron expression: {e}"),
                        );
                    }
                }
            }
            // Unbounded live occurrences otherwise.
            if schedule.expires.is_none() {
                result.error(
                    format!("{prefix}expires"),
                    "a recurring schedule must set expires",
                );
            }
        }
        ScheduleType::Once | ScheduleType::Persistent => {
            if schedule.interval.is_some() || schedule.cron_trigger.is_some() {
                result.warn(
                    format!("{prefix}scheduleType"),
                    "interval/cronTrigger are ignored for non-recurring schedules",
                );
            }
        }
    }

    if let (Some(starts), Some(ends)) = (schedule.starts_on, schedule.ends_on) {
        if starts > ends {
            result.error(format!("{prefix}startsOn"), "startsOn is after endsOn");
        }
    }
    if schedule.sequence_period.is_some() && schedule.cron_trigger.is_none() {
        result.warn(
            format!("{prefix}sequencePeriod"),
            "sequencePeriod only caps cron schedules",
        );
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AbTestGroup, Criteria, CriteriaGroup};

    fn schedule(schedule_type: ScheduleType) -> Schedule {
        Schedule {
            label: None,
            schedule_type,
            event_id: None,
            delay: None,
            interval: None,
            cron_trigger: None,
            times: vec![],
            starts_on: None,
            ends_on: None,
            expires: None,
            sequence_period: None,
            activities: vec![],
        }
    }

    fn recurring_interval() -> Schedule {
        let mut s = schedule(ScheduleType::Recurring);
        s.interval = Some("P1D".parse().unwrap());
        s.expires = Some("P2D".parse().unwrap());
        s
    }

    #[test]
    fn valid_recurring_schedule_passes() {
        let result = validate_schedule(&recurring_interval());
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn recurring_without_rule_is_an_error() {
        let mut s = schedule(ScheduleType::Recurring);
        s.expires = Some("P1D".parse().unwrap());
        let result = validate_schedule(&s);
        assert!(!result.valid);
        assert!(result.errors[0].message.contains("requires an interval"));
    }

    #[test]
    fn recurring_with_both_rules_is_an_error() {
        let mut s = recurring_interval();
        s.cron_trigger = Some("0 0 10 * * *".to_string());
        let result = validate_schedule(&s);
        assert!(!result.valid);
        assert!(result.errors[0].message.contains("mutually exclusive"));
    }

    #[test]
    fn recurring_without_expires_is_an_error() {
        let mut s = recurring_interval();
        s.expires = None;
        let result = validate_schedule(&s);
        assert!(!result.valid);
        assert!(result.errors[0].path.ends_with("expires"));
    }

    #[test]
    fn malformed_cron_is_an_error() {
        let mut s = schedule(ScheduleType::Recurring);
        s.cron_trigger = Some("banana".to_string());
        s.expires = Some("P1D".parse().unwrap());
        let result = validate_schedule(&s);
        assert!(!result.valid);
        assert!(result.errors[0].path.ends_with("cronTrigger"));
    }

    #[test]
    fn inverted_validity_window_is_an_error() {
        let mut s = schedule(ScheduleType::Once);
        s.starts_on = Some("2015-05-01T00:00:00Z".parse().unwrap());
        s.ends_on = Some("2015-04-01T00:00:00Z".parse().unwrap());
        let result = validate_schedule(&s);
        assert!(!result.valid);
    }

    #[test]
    fn ab_weights_must_sum_to_100() {
        let plan = SchedulePlan {
            label: None,
            guid: None,
            strategy: StudyStrategy::AbTest {
                schedule_groups: vec![
                    AbTestGroup {
                        percentage: 50,
                        schedule: schedule(ScheduleType::Once),
                    },
                    AbTestGroup {
                        percentage: 40,
                        schedule: schedule(ScheduleType::Once),
                    },
                ],
            },
        };
        let result = validate_plan(&plan);
        assert!(!result.valid);
        assert!(result.errors[0].message.contains("sum to 100"));
    }

    #[test]
    fn criteria_version_bounds_checked() {
        let plan = SchedulePlan {
            label: None,
            guid: None,
            strategy: StudyStrategy::Criteria {
                schedule_criteria: vec![CriteriaGroup {
                    criteria: Criteria {
                        min_app_version: Some(10),
                        max_app_version: Some(5),
                        ..Default::default()
                    },
                    schedule: schedule(ScheduleType::Once),
                }],
            },
        };
        let result = validate_plan(&plan);
        assert!(!result.valid);
    }

    #[test]
    fn group_required_and_prohibited_is_an_error() {
        let plan = SchedulePlan {
            label: None,
            guid: None,
            strategy: StudyStrategy::Criteria {
                schedule_criteria: vec![CriteriaGroup {
                    criteria: Criteria {
                        all_of_groups: ["beta".to_string()].into(),
                        none_of_groups: ["beta".to_string()].into(),
                        ..Default::default()
                    },
                    schedule: schedule(ScheduleType::Once),
                }],
            },
        };
        let result = validate_plan(&plan);
        assert!(!result.valid);
    }

    #[test]
    fn early_catch_all_arm_warns() {
        let plan = SchedulePlan {
            label: None,
            guid: None,
            strategy: StudyStrategy::Criteria {
                schedule_criteria: vec![
                    CriteriaGroup {
                        criteria: Criteria::default(),
                        schedule: schedule(ScheduleType::Once),
                    },
                    CriteriaGroup {
                        criteria: Criteria {
                            min_app_version: Some(2),
                            ..Default::default()
                        },
                        schedule: schedule(ScheduleType::Once),
                    },
                ],
            },
        };
        let result = validate_plan(&plan);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("unreachable"));
    }

    #[test]
    fn valid_simple_plan_passes() {
        let plan = SchedulePlan {
            label: None,
            guid: None,
            strategy: StudyStrategy::Simple {
                schedule: recurring_interval(),
            },
        };
        assert!(validate_plan(&plan).valid);
    }
}
