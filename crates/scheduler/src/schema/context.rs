//! Per-request query parameters: the schedule context and its builder.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cohort_core::parse_zone;

use crate::error::SchedulerError;

/// Immutable per-request scheduling parameters.
///
/// Built via [`ScheduleContextBuilder`]; construction fails without a study
/// identifier. Event timestamps are held in UTC. The engine holds no state
/// between calls, so `now` is threaded explicitly rather than read from an
/// ambient clock.
#[derive(Debug, Clone)]
pub struct ScheduleContext {
    study_id: String,
    zone: Tz,
    now: DateTime<Utc>,
    starts_on: DateTime<Utc>,
    ends_on: Option<DateTime<Utc>>,
    events: HashMap<String, DateTime<Utc>>,
    minimum_per_schedule: usize,
    criteria: CriteriaContext,
}

impl ScheduleContext {
    pub fn builder() -> ScheduleContextBuilder {
        ScheduleContextBuilder::default()
    }

    pub fn study_id(&self) -> &str {
        &self.study_id
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Query window start; defaults to `now` when not set explicitly.
    pub fn starts_on(&self) -> DateTime<Utc> {
        self.starts_on
    }

    /// Query window far bound; absent means unbounded (drivers terminate
    /// via sequence-period/horizon heuristics instead).
    pub fn ends_on(&self) -> Option<DateTime<Utc>> {
        self.ends_on
    }

    pub fn events(&self) -> &HashMap<String, DateTime<Utc>> {
        &self.events
    }

    /// Minimum occurrences per schedule; 0 means no override.
    pub fn minimum_per_schedule(&self) -> usize {
        self.minimum_per_schedule
    }

    pub fn criteria(&self) -> &CriteriaContext {
        &self.criteria
    }
}

/// User attributes consulted only by the strategy resolver, never by
/// recurrence expansion.
#[derive(Debug, Clone, Default)]
pub struct CriteriaContext {
    pub health_code: Option<String>,
    pub user_id: Option<String>,
    pub app_version: Option<u32>,
    pub os_name: Option<String>,
    pub data_groups: HashSet<String>,
    pub substudy_ids: HashSet<String>,
    pub account_created_on: Option<DateTime<Utc>>,
}

// ── Builder ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ScheduleContextBuilder {
    study_id: Option<String>,
    zone_id: Option<String>,
    now: Option<DateTime<Utc>>,
    starts_on: Option<DateTime<Utc>>,
    ends_on: Option<DateTime<Utc>>,
    events: HashMap<String, DateTime<Utc>>,
    minimum_per_schedule: usize,
    criteria: CriteriaContext,
}

impl ScheduleContextBuilder {
    pub fn study(mut self, study_id: impl Into<String>) -> Self {
        self.study_id = Some(study_id.into());
        self
    }

    /// IANA zone id for the query, e.g. "America/Chicago". Defaults to UTC.
    pub fn zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn starts_on(mut self, starts_on: DateTime<Utc>) -> Self {
        self.starts_on = Some(starts_on);
        self
    }

    pub fn ends_on(mut self, ends_on: DateTime<Utc>) -> Self {
        self.ends_on = Some(ends_on);
        self
    }

    /// Record one life-cycle event timestamp (UTC).
    pub fn event(mut self, event_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        self.events.insert(event_id.into(), at);
        self
    }

    pub fn events(mut self, events: HashMap<String, DateTime<Utc>>) -> Self {
        self.events = events;
        self
    }

    pub fn minimum_per_schedule(mut self, minimum: usize) -> Self {
        self.minimum_per_schedule = minimum;
        self
    }

    pub fn criteria(mut self, criteria: CriteriaContext) -> Self {
        self.criteria = criteria;
        self
    }

    /// Finalize the context.
    ///
    /// Fails without a study identifier or with an unknown zone id.
    pub fn build(self) -> Result<ScheduleContext, SchedulerError> {
        let study_id = self
            .study_id
            .filter(|s| !s.trim().is_empty())
            .ok_or(SchedulerError::MissingStudyIdentifier)?;
        let zone = match self.zone_id {
            Some(id) => parse_zone(&id)?,
            None => Tz::UTC,
        };
        let now = self.now.unwrap_or_else(Utc::now);
        Ok(ScheduleContext {
            study_id,
            zone,
            now,
            starts_on: self.starts_on.unwrap_or(now),
            ends_on: self.ends_on,
            events: self.events,
            minimum_per_schedule: self.minimum_per_schedule,
            criteria: self.criteria,
        })
    }
}
