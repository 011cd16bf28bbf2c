//! Calendar heat-map aggregation.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::day::local_date;
use crate::store::LogEntry;

/// Completion summary for one calendar day that has at least one log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    /// Local date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Distinct supplements logged that day.
    pub count: usize,
    /// Active goals at query time.
    pub total: usize,
    /// `count / total`, not capped at 1.0; 0 when there are no goals.
    pub ratio: f64,
}

/// Fraction of goals met, defined as 0 when there are no goals.
#[allow(clippy::cast_precision_loss)]
pub fn adherence_ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Groups logs by local date, counting distinct supplements per day.
///
/// The same `total_goals` is applied to every day. Days without logs are
/// absent from the output; rows are in date order.
pub fn aggregate_calendar(logs: &[LogEntry], total_goals: usize) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for log in logs {
        days.entry(local_date(log.taken_at))
            .or_default()
            .insert(log.supplement_id.as_str());
    }

    days.into_iter()
        .map(|(date, supplements)| {
            let count = supplements.len();
            CalendarDay {
                date,
                count,
                total: total_goals,
                ratio: adherence_ratio(count, total_goals),
            }
        })
        .collect()
}
