//! The adherence statistics engine.
//!
//! Every call recomputes its result from the store; nothing is cached between
//! calls and the store is never written. Queries issued by a single call are
//! not required to see one consistent snapshot.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::calendar::{CalendarDay, aggregate_calendar};
use crate::day::{TimeRange, local_midnight_to_utc, month_bounds};
use crate::missed::{MissedItem, rank_most_missed};
use crate::overview::{Locale, Overview, WeeklyChartDay, completion_rate, weekly_chart};
use crate::scan::{ScanStrategy, daily_log_counts, missed_days};
use crate::store::IntakeStore;
use crate::streak::{Streaks, compute_streaks};

/// Days covered by the weekly chart and weekly rate.
pub const WEEK_DAYS: usize = 7;

/// Errors raised while computing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The record store failed to answer a query. Not retried.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A caller-supplied parameter is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

impl StatsError {
    pub(crate) fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StoreUnavailable(Box::new(err))
    }
}

/// Tunables for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How far back streaks are scanned, today included.
    /// Default: 60.
    pub streak_window_days: usize,

    /// Window for counting missed days per goal, today included.
    /// Default: 14.
    pub missed_window_days: usize,

    /// Maximum entries in the most-missed ranking.
    /// Default: 5.
    pub most_missed_limit: usize,

    pub scan: ScanStrategy,
    pub locale: Locale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            streak_window_days: 60,
            missed_window_days: 14,
            most_missed_limit: 5,
            scan: ScanStrategy::default(),
            locale: Locale::default(),
        }
    }
}

/// Computes adherence statistics from an injected store handle.
#[derive(Debug)]
pub struct AdherenceEngine<'a, S> {
    store: &'a S,
    config: EngineConfig,
}

impl<'a, S: IntakeStore> AdherenceEngine<'a, S> {
    pub const fn new(store: &'a S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-day completion for every logged day of a month (`month` is 1-based).
    ///
    /// The current active-goal count is applied to every day, including
    /// past ones.
    pub fn calendar(&self, year: i32, month: u32) -> Result<Vec<CalendarDay>, StatsError> {
        let (first, next) = month_bounds(year, month)?;
        let total_goals = self
            .store
            .count_active_goals()
            .map_err(StatsError::store)?;
        let range = TimeRange::new(local_midnight_to_utc(first), local_midnight_to_utc(next));
        let logs = self
            .store
            .list_intake_logs(range)
            .map_err(StatsError::store)?;

        let days = aggregate_calendar(&logs, total_goals);
        debug!(
            year,
            month,
            logs = logs.len(),
            days = days.len(),
            total_goals,
            "computed calendar"
        );
        Ok(days)
    }

    /// The full dashboard as of `today`.
    pub fn overview(&self, today: NaiveDate) -> Result<Overview, StatsError> {
        let goal_count = self
            .store
            .count_active_goals()
            .map_err(StatsError::store)?;
        let total_logs = self
            .store
            .count_intake_logs(None)
            .map_err(StatsError::store)?;

        let chart = self.weekly_chart(today)?;
        let week_logs: usize = chart.iter().map(|day| day.count).sum();
        let weekly_rate = completion_rate(week_logs, WEEK_DAYS, goal_count);

        let monthly_rate = self.monthly_rate(today, goal_count)?;
        let streaks = self.streaks(today)?;
        let most_missed = self.most_missed(today)?;

        debug!(
            %today,
            goal_count,
            total_logs,
            weekly_rate,
            monthly_rate,
            current_streak = streaks.current,
            longest_streak = streaks.longest,
            "computed overview"
        );

        Ok(Overview {
            weekly_rate,
            monthly_rate,
            current_streak: streaks.current,
            longest_streak: streaks.longest,
            total_logs,
            weekly_chart: chart,
            most_missed,
        })
    }

    /// Raw log counts for the seven days ending `today`, oldest first.
    pub fn weekly_chart(&self, today: NaiveDate) -> Result<Vec<WeeklyChartDay>, StatsError> {
        let counts = daily_log_counts(self.store, today, WEEK_DAYS, self.config.scan)?;
        Ok(weekly_chart(&counts, today, self.config.locale))
    }

    /// Log rows from the 1st of the month through the end of `today`, against
    /// one dose per goal per elapsed day.
    pub fn monthly_rate(&self, today: NaiveDate, goal_count: usize) -> Result<u32, StatsError> {
        let month_start = today.with_day(1).unwrap_or(today);
        let month_logs = self
            .store
            .count_intake_logs(Some(TimeRange::days(month_start, today)))
            .map_err(StatsError::store)?;
        let days_elapsed = today.day() as usize;
        Ok(completion_rate(month_logs, days_elapsed, goal_count))
    }

    /// Current and longest streak over the streak window.
    pub fn streaks(&self, today: NaiveDate) -> Result<Streaks, StatsError> {
        let counts = daily_log_counts(
            self.store,
            today,
            self.config.streak_window_days,
            self.config.scan,
        )?;
        Ok(compute_streaks(&counts))
    }

    /// Active goals ranked by days without a log in the missed window.
    pub fn most_missed(&self, today: NaiveDate) -> Result<Vec<MissedItem>, StatsError> {
        let goals = self
            .store
            .list_active_goals_with_supplement()
            .map_err(StatsError::store)?;
        let window = self.config.missed_window_days;
        let missed = missed_days(self.store, &goals, today, window, self.config.scan)?;
        Ok(rank_most_missed(
            &goals,
            &missed,
            window,
            self.config.most_missed_limit,
        ))
    }
}
