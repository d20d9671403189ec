//! ISO-8601 period values with calendar-aware datetime arithmetic.
//!
//! Periods like `P1D`, `PT3H`, or `P1M2DT30M` drive schedule delays,
//! intervals, and expirations. Year/month components are calendar-aware
//! (adding `P1M` to Jan 31 clamps to Feb 28/29); week/day/time components
//! are fixed-length.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, TimeDelta, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CohortError;

/// A parsed ISO-8601 period. All components are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsoPeriod {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl IsoPeriod {
    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.weeks == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    /// Add this period to an instant.
    ///
    /// Calendar components (years, months) are applied first and clamp to
    /// month ends; then days/weeks; then the sub-day remainder.
    pub fn add_to<Tz: TimeZone>(&self, instant: DateTime<Tz>) -> Result<DateTime<Tz>, CohortError> {
        let months = self
            .years
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.months))
            .ok_or(CohortError::TimeOverflow)?;
        let days = u64::from(self.weeks) * 7 + u64::from(self.days);
        let remainder = TimeDelta::hours(i64::from(self.hours))
            + TimeDelta::minutes(i64::from(self.minutes))
            + TimeDelta::seconds(i64::from(self.seconds));

        instant
            .checked_add_months(Months::new(months))
            .and_then(|t| t.checked_add_days(Days::new(days)))
            .and_then(|t| t.checked_add_signed(remainder))
            .ok_or(CohortError::TimeOverflow)
    }
}

impl FromStr for IsoPeriod {
    type Err = CohortError;

    /// Parse strings like `P1D`, `PT3H`, `P1Y2M3W4DT5H6M7S`.
    ///
    /// `M` means months before the `T` designator and minutes after it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CohortError::InvalidPeriod(s.to_string());

        let raw = s.trim();
        let mut chars = raw.chars();
        if chars.next() != Some('P') {
            return Err(invalid());
        }

        let mut period = IsoPeriod::default();
        let mut in_time = false;
        let mut time_components = 0usize;
        let mut seen_any = false;
        let mut num_buf = String::new();

        for ch in chars {
            if ch.is_ascii_digit() {
                num_buf.push(ch);
                continue;
            }
            if ch == 'T' {
                if in_time || !num_buf.is_empty() {
                    return Err(invalid());
                }
                in_time = true;
                continue;
            }
            // Empty num_buf fails the parse here, covering e.g. "PD".
            let n: u32 = num_buf.parse().map_err(|_| invalid())?;
            num_buf.clear();
            match (in_time, ch) {
                (false, 'Y') => period.years = n,
                (false, 'M') => period.months = n,
                (false, 'W') => period.weeks = n,
                (false, 'D') => period.days = n,
                (true, 'H') => period.hours = n,
                (true, 'M') => period.minutes = n,
                (true, 'S') => period.seconds = n,
                _ => return Err(invalid()),
            }
            seen_any = true;
            if in_time {
                time_components += 1;
            }
        }

        // Reject trailing digits, a bare "P", and a trailing "T".
        if !num_buf.is_empty() || !seen_any || (in_time && time_components == 0) {
            return Err(invalid());
        }
        Ok(period)
    }
}

impl fmt::Display for IsoPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "PT0S");
        }
        write!(f, "P")?;
        if self.years > 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months > 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.weeks > 0 {
            write!(f, "{}W", self.weeks)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

impl Serialize for IsoPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
