//! Event resolution: mapping a schedule's candidate event-id list to the
//! anchor timestamp recorded in the user's event history.
//!
//! A schedule names its trigger as a comma-separated, ordered list of event
//! ids. The first candidate present in the context's event map wins. A
//! schedule with no event id implicitly triggers on enrollment; once an
//! event-id list is declared there is no fallback to enrollment.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Implicit trigger for schedules that declare no event id.
pub const ENROLLMENT_EVENT: &str = "enrollment";

/// Split a declared event-id list into trimmed candidates, in declared order.
///
/// `None` or a blank string yields the single implicit `enrollment` candidate.
pub fn candidate_event_ids(event_id: Option<&str>) -> Vec<&str> {
    match event_id {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .collect(),
        _ => vec![ENROLLMENT_EVENT],
    }
}

/// Resolve the anchor timestamp for a schedule.
///
/// Candidates are tried in declared order; the first with a recorded
/// timestamp wins. Returns `None` when no candidate has fired, which the
/// caller treats as "nothing to schedule", not an error.
pub fn resolve_anchor(
    event_id: Option<&str>,
    events: &HashMap<String, DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    for candidate in candidate_event_ids(event_id) {
        if let Some(ts) = events.get(candidate) {
            debug!(event_id = %candidate, anchor = %ts, "resolved schedule anchor");
            return Some(*ts);
        }
    }
    None
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn event_map(entries: &[(&str, &str)]) -> HashMap<String, DateTime<Utc>> {
        entries
            .iter()
            .map(|(id, ts)| (id.to_string(), utc(ts)))
            .collect()
    }

    #[test]
    fn no_event_id_means_enrollment() {
        assert_eq!(candidate_event_ids(None), vec![ENROLLMENT_EVENT]);
        assert_eq!(candidate_event_ids(Some("")), vec![ENROLLMENT_EVENT]);
        assert_eq!(candidate_event_ids(Some("  ")), vec![ENROLLMENT_EVENT]);
    }

    #[test]
    fn candidates_are_split_and_trimmed_in_order() {
        assert_eq!(
            candidate_event_ids(Some("a, b ,c")),
            vec!["a", "b", "c"]
        );
        assert_eq!(candidate_event_ids(Some("a,,b")), vec!["a", "b"]);
    }

    #[test]
    fn first_present_candidate_wins() {
        let events = event_map(&[
            ("a", "2015-04-10T00:00:00Z"),
            ("b", "2015-04-11T00:00:00Z"),
        ]);
        assert_eq!(
            resolve_anchor(Some("a,b"), &events),
            Some(utc("2015-04-10T00:00:00Z"))
        );
    }

    #[test]
    fn later_candidate_used_when_earlier_missing() {
        let events = event_map(&[("b", "2015-04-11T00:00:00Z")]);
        assert_eq!(
            resolve_anchor(Some("a,b"), &events),
            Some(utc("2015-04-11T00:00:00Z"))
        );
    }

    #[test]
    fn no_fallback_to_enrollment_when_list_declared() {
        let events = event_map(&[("enrollment", "2015-04-01T00:00:00Z")]);
        assert_eq!(resolve_anchor(Some("a,b"), &events), None);
    }

    #[test]
    fn enrollment_resolves_when_no_event_id() {
        let events = event_map(&[("enrollment", "2015-04-01T00:00:00Z")]);
        assert_eq!(
            resolve_anchor(None, &events),
            Some(utc("2015-04-01T00:00:00Z"))
        );
    }

    #[test]
    fn unresolved_returns_none() {
        assert_eq!(resolve_anchor(None, &HashMap::new()), None);
    }
}
