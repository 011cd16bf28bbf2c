//! Ranking of the supplements skipped most often.

use serde::Serialize;

use crate::store::ActiveGoal;

/// A goal with at least one missed day in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedItem {
    pub name: String,
    pub icon: String,
    pub missed_count: usize,
    pub total_days: usize,
}

/// Ranks goals by missed days, highest first.
///
/// `missed` is parallel to `goals`. Goals with no missed days are dropped.
/// The sort is stable, so ties keep the store's goal order.
pub fn rank_most_missed(
    goals: &[ActiveGoal],
    missed: &[usize],
    window_days: usize,
    limit: usize,
) -> Vec<MissedItem> {
    let mut items: Vec<MissedItem> = goals
        .iter()
        .zip(missed)
        .filter(|&(_, &missed_count)| missed_count > 0)
        .map(|(goal, &missed_count)| MissedItem {
            name: goal.supplement_name.clone(),
            icon: goal.supplement_icon.clone(),
            missed_count,
            total_days: window_days,
        })
        .collect();

    items.sort_by_key(|item| std::cmp::Reverse(item.missed_count));
    items.truncate(limit);
    items
}
