//! Window clipping for candidate instants.

use chrono::{DateTime, Utc};

/// Drop candidates outside `[start, end]` (inclusive bounds). Ascending
/// order is preserved; nothing is ever reordered here.
pub(super) fn clip(
    candidates: Vec<DateTime<Utc>>,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Vec<DateTime<Utc>> {
    candidates
        .into_iter()
        .filter(|t| *t >= start && end.is_none_or(|e| *t <= e))
        .collect()
}
