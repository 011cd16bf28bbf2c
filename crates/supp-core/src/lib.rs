//! Core domain logic for the supplement tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Supplements, daily goals, and intake logs
//! - Local calendar-day boundaries
//! - The adherence engine: calendar heat-map, weekly/monthly completion
//!   rates, streaks, and the most-missed ranking
//!
//! Storage is abstracted behind [`IntakeStore`]; the engine only reads.

mod calendar;
pub mod day;
mod engine;
mod missed;
mod overview;
mod scan;
mod store;
mod streak;
mod supplement;
pub mod types;

#[cfg(test)]
mod testing;

pub use calendar::{CalendarDay, adherence_ratio, aggregate_calendar};
pub use day::TimeRange;
pub use engine::{AdherenceEngine, EngineConfig, StatsError, WEEK_DAYS};
pub use missed::{MissedItem, rank_most_missed};
pub use overview::{Locale, Overview, WeeklyChartDay, completion_rate, weekly_chart};
pub use scan::{ScanStrategy, daily_log_counts, missed_days};
pub use store::{ActiveGoal, IntakeStore, LogEntry};
pub use streak::{Streaks, compute_streaks};
pub use supplement::{DailyGoal, IntakeLog, Supplement};
pub use types::{Category, GoalId, LogId, SupplementId, TimeSlot, ValidationError};
