//! Time-of-day expansion: turning one anchor instant into the declared
//! wall-clock times on the anchor's calendar day in the query zone.

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Expand an anchor across the declared times-of-day.
///
/// With no declared times the anchor itself is the single result. Otherwise
/// one instant is produced per declared time, on the calendar day containing
/// the anchor in `zone`, preserving declaration order. Duplicates are not
/// de-duplicated here; the caller owns that policy.
pub fn expand(anchor: DateTime<Utc>, times: &[NaiveTime], zone: Tz) -> Vec<DateTime<Utc>> {
    if times.is_empty() {
        return vec![anchor];
    }

    let local_date = anchor.with_timezone(&zone).date_naive();
    times
        .iter()
        .filter_map(|time| {
            let naive = local_date.and_time(*time);
            // A spring-forward gap has no earliest mapping; shift into the
            // hour after the transition, matching the zone's standard rules.
            let resolved = zone.from_local_datetime(&naive).earliest().or_else(|| {
                debug!(%naive, %zone, "local time falls in a DST gap, shifting forward");
                zone.from_local_datetime(&(naive + TimeDelta::hours(1)))
                    .earliest()
            });
            resolved.map(|dt| dt.with_timezone(&Utc))
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn empty_times_yields_anchor() {
        let anchor = utc("2015-04-12T08:31:00Z");
        assert_eq!(expand(anchor, &[], Tz::America__Chicago), vec![anchor]);
    }

    #[test]
    fn times_are_wall_clock_in_zone() {
        let anchor = utc("2015-04-12T08:31:00Z");
        // 10:00 UTC on the anchor's day.
        let got = expand(anchor, &[t("10:00")], Tz::UTC);
        assert_eq!(got, vec![utc("2015-04-12T10:00:00Z")]);

        // 10:00 Chicago is CDT (UTC-5) in April.
        let got = expand(anchor, &[t("10:00")], Tz::America__Chicago);
        assert_eq!(got, vec![utc("2015-04-12T15:00:00Z")]);
    }

    #[test]
    fn declaration_order_preserved() {
        let anchor = utc("2015-04-12T08:31:00Z");
        let got = expand(anchor, &[t("14:00"), t("08:00")], Tz::UTC);
        assert_eq!(
            got,
            vec![utc("2015-04-12T14:00:00Z"), utc("2015-04-12T08:00:00Z")]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let anchor = utc("2015-04-12T08:31:00Z");
        let got = expand(anchor, &[t("10:00"), t("10:00")], Tz::UTC);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], got[1]);
    }

    #[test]
    fn day_is_taken_in_the_query_zone() {
        // 2015-04-12T03:00Z is still 2015-04-11 in Los Angeles (UTC-7).
        let anchor = utc("2015-04-12T03:00:00Z");
        let got = expand(anchor, &[t("10:00")], Tz::America__Los_Angeles);
        assert_eq!(got, vec![utc("2015-04-11T17:00:00Z")]);
    }

    #[test]
    fn dst_gap_shifts_forward() {
        // 2015-03-08 02:30 does not exist in New York (clocks jump 02:00→03:00).
        let anchor = utc("2015-03-08T12:00:00Z");
        let got = expand(anchor, &[t("02:30")], Tz::America__New_York);
        assert_eq!(got.len(), 1);
        // Shifted to 03:30 EDT, i.e. 07:30 UTC.
        assert_eq!(got[0], utc("2015-03-08T07:30:00Z"));
    }
}
