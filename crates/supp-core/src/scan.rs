//! Per-day log counts over a lookback window.
//!
//! Streaks, the weekly chart, and the most-missed ranking all need "how many
//! logs fell on each of the last N days". The per-day strategy asks the store
//! once per day; the batched strategy fetches the whole window in one range
//! query and buckets rows by local date. Both must produce identical output.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::{TimeRange, days_before, local_date};
use crate::engine::StatsError;
use crate::store::{ActiveGoal, IntakeStore};
use crate::types::SupplementId;

/// How per-day counts are gathered from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanStrategy {
    /// One count query per day.
    PerDay,
    /// One range query for the whole window.
    #[default]
    Batched,
}

/// Index of `date` in a newest-first window ending at `today`.
fn day_offset(today: NaiveDate, date: NaiveDate, days: usize) -> Option<usize> {
    let offset = usize::try_from((today - date).num_days()).ok()?;
    (offset < days).then_some(offset)
}

fn window(today: NaiveDate, days: usize) -> TimeRange {
    TimeRange::days(days_before(today, days.saturating_sub(1)), today)
}

/// Raw log counts for the `days` days ending at `today`, newest first.
///
/// Index 0 is today, index 1 yesterday, and so on.
pub fn daily_log_counts<S: IntakeStore>(
    store: &S,
    today: NaiveDate,
    days: usize,
    strategy: ScanStrategy,
) -> Result<Vec<usize>, StatsError> {
    if days == 0 {
        return Ok(Vec::new());
    }
    match strategy {
        ScanStrategy::PerDay => (0..days)
            .map(|offset| {
                let range = TimeRange::day(days_before(today, offset));
                store
                    .count_intake_logs(Some(range))
                    .map_err(StatsError::store)
            })
            .collect(),
        ScanStrategy::Batched => {
            let logs = store
                .list_intake_logs(window(today, days))
                .map_err(StatsError::store)?;
            let mut counts = vec![0; days];
            for log in &logs {
                if let Some(offset) = day_offset(today, local_date(log.taken_at), days) {
                    counts[offset] += 1;
                }
            }
            Ok(counts)
        }
    }
}

/// For each goal, how many of the `days` days ending at `today` had no log
/// for the goal's supplement. Output is parallel to `goals`.
pub fn missed_days<S: IntakeStore>(
    store: &S,
    goals: &[ActiveGoal],
    today: NaiveDate,
    days: usize,
    strategy: ScanStrategy,
) -> Result<Vec<usize>, StatsError> {
    if goals.is_empty() || days == 0 {
        return Ok(vec![0; goals.len()]);
    }
    match strategy {
        ScanStrategy::PerDay => goals
            .iter()
            .map(|goal| {
                let mut missed = 0;
                for offset in 0..days {
                    let range = TimeRange::day(days_before(today, offset));
                    let found = store
                        .count_supplement_logs(&goal.supplement_id, range)
                        .map_err(StatsError::store)?;
                    if found == 0 {
                        missed += 1;
                    }
                }
                Ok::<_, StatsError>(missed)
            })
            .collect(),
        ScanStrategy::Batched => {
            let logs = store
                .list_intake_logs(window(today, days))
                .map_err(StatsError::store)?;
            let mut taken: HashMap<&SupplementId, HashSet<usize>> = HashMap::new();
            for log in &logs {
                if let Some(offset) = day_offset(today, local_date(log.taken_at), days) {
                    taken.entry(&log.supplement_id).or_default().insert(offset);
                }
            }
            Ok(goals
                .iter()
                .map(|goal| days - taken.get(&goal.supplement_id).map_or(0, HashSet::len))
                .collect())
        }
    }
}
