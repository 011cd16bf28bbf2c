//! Weekly chart, completion rates, and the combined overview.
//!
//! Unlike the calendar, these rates divide the raw number of log rows by the
//! expected number of doses. A supplement logged twice in a day counts twice
//! here but once on the calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::day::days_before;
use crate::missed::MissedItem;

/// Language used for weekday labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-TW")]
    TraditionalChinese,
}

impl Locale {
    /// Short weekday name for chart labels.
    pub const fn weekday_label(self, weekday: Weekday) -> &'static str {
        match self {
            Self::English => match weekday {
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
                Weekday::Sun => "Sun",
            },
            Self::TraditionalChinese => match weekday {
                Weekday::Mon => "一",
                Weekday::Tue => "二",
                Weekday::Wed => "三",
                Weekday::Thu => "四",
                Weekday::Fri => "五",
                Weekday::Sat => "六",
                Weekday::Sun => "日",
            },
        }
    }
}

/// Raw log count for one day of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyChartDay {
    /// Local date, serialized as `YYYY-MM-DD`.
    pub day: NaiveDate,
    pub count: usize,
    pub label: String,
}

/// Everything the stats dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub weekly_rate: u32,
    pub monthly_rate: u32,
    pub current_streak: usize,
    pub longest_streak: usize,
    pub total_logs: usize,
    pub weekly_chart: Vec<WeeklyChartDay>,
    pub most_missed: Vec<MissedItem>,
}

/// Percentage of expected doses logged, rounded and clamped to `0..=100`.
///
/// Expected doses are `days * goals`; when that is zero the rate is 0.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn completion_rate(logs: usize, days: usize, goals: usize) -> u32 {
    let expected = days.saturating_mul(goals);
    if expected == 0 {
        return 0;
    }
    let percent = (logs as f64 / expected as f64 * 100.0).round();
    percent.min(100.0) as u32
}

/// Builds the chart from per-day counts ordered newest first (index 0 is
/// `today`). The chart itself runs oldest to newest.
pub fn weekly_chart(
    counts_newest_first: &[usize],
    today: NaiveDate,
    locale: Locale,
) -> Vec<WeeklyChartDay> {
    counts_newest_first
        .iter()
        .enumerate()
        .rev()
        .map(|(offset, &count)| {
            let day = days_before(today, offset);
            WeeklyChartDay {
                day,
                count,
                label: locale.weekday_label(day.weekday()).to_string(),
            }
        })
        .collect()
}
