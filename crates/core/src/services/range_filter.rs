use chrono::{Duration, NaiveDate};

use crate::models::range::TimeRange;
use crate::models::series::HistoricalPoint;

/// First date still inside `range` when looking back from `today`.
pub fn cutoff_date(range: TimeRange, today: NaiveDate) -> NaiveDate {
    today - Duration::days(range.days())
}

/// Points dated on or after `today - range.days()`, in their original order.
///
/// Recomputed on every call. An empty series gives an empty result.
pub fn filter_by_range(
    series: &[HistoricalPoint],
    range: TimeRange,
    today: NaiveDate,
) -> Vec<HistoricalPoint> {
    if series.is_empty() {
        return Vec::new();
    }
    let cutoff = cutoff_date(range, today);
    series
        .iter()
        .filter(|p| p.date >= cutoff)
        .cloned()
        .collect()
}
