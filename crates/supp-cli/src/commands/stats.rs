//! Adherence statistics reports.
//!
//! This module implements `supp stats overview` and `supp stats calendar`,
//! each with a human-readable and a JSON output format.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::Serialize;
use supp_core::{AdherenceEngine, CalendarDay, IntakeStore, Overview};
use supp_db::Database;

use crate::Config;

// ========== Formatting Helpers ==========

/// Generates a 10-character bar for a completion ratio.
/// Ratios above 1.0 fill the bar; nonzero ratios below 5% get a single block.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(ratio: f64) -> String {
    let filled = if ratio > 0.0 && ratio < 0.05 {
        1
    } else {
        (ratio.clamp(0.0, 1.0) * 10.0).round() as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(ratio: f64) -> u64 {
    (ratio.max(0.0) * 100.0).round() as u64
}

fn days(n: usize) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

fn local_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ========== Overview ==========

/// JSON overview structure.
#[derive(Debug, Serialize)]
pub struct JsonOverview {
    pub generated_at: String,
    pub timezone: String,
    pub date: NaiveDate,
    pub overview: Overview,
}

/// Formats the human-readable overview.
pub fn format_overview<W: Write>(
    writer: &mut W,
    overview: &Overview,
    today: NaiveDate,
) -> Result<()> {
    writeln!(writer, "ADHERENCE: {}", today.format("%A, %b %-d, %Y"))?;
    writeln!(writer)?;
    writeln!(writer, "Weekly rate:    {}%", overview.weekly_rate)?;
    writeln!(writer, "Monthly rate:   {}%", overview.monthly_rate)?;
    writeln!(writer, "Current streak: {}", days(overview.current_streak))?;
    writeln!(writer, "Longest streak: {}", days(overview.longest_streak))?;
    writeln!(writer, "Total logs:     {}", overview.total_logs)?;

    writeln!(writer)?;
    writeln!(writer, "THIS WEEK")?;
    writeln!(writer, "─────────")?;
    for day in &overview.weekly_chart {
        write!(writer, "{} {}  {}", day.label, day.day.format("%m-%d"), day.count)?;
        if day.count > 0 {
            write!(writer, "  {}", "█".repeat(day.count))?;
        }
        writeln!(writer)?;
    }

    writeln!(writer)?;
    let window = overview
        .most_missed
        .first()
        .map_or_else(String::new, |item| format!(" (last {} days)", item.total_days));
    let heading = format!("MOST MISSED{window}");
    writeln!(writer, "{heading}")?;
    writeln!(writer, "{}", "─".repeat(heading.chars().count()))?;
    if overview.most_missed.is_empty() {
        writeln!(writer, "(nothing missed)")?;
    }
    for item in &overview.most_missed {
        writeln!(
            writer,
            "{} {}  {}/{} days",
            item.icon, item.name, item.missed_count, item.total_days
        )?;
    }
    Ok(())
}

/// Runs the overview report.
pub fn overview<W: Write>(writer: &mut W, db: &Database, config: &Config, json: bool) -> Result<()> {
    overview_at(writer, db, config, json, Utc::now())
}

fn overview_at<W: Write>(
    writer: &mut W,
    db: &Database,
    config: &Config,
    json: bool,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let today = generated_at.with_timezone(&Local).date_naive();
    let engine = AdherenceEngine::new(db, config.engine_config());
    let overview = engine
        .overview(today)
        .context("failed to compute overview")?;

    if json {
        let report = JsonOverview {
            generated_at: generated_at.to_rfc3339(),
            timezone: local_timezone(),
            date: today,
            overview,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        format_overview(writer, &overview, today)?;
    }
    Ok(())
}

// ========== Calendar ==========

/// JSON calendar structure.
#[derive(Debug, Serialize)]
pub struct JsonCalendar {
    pub generated_at: String,
    pub timezone: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Formats the human-readable calendar.
pub fn format_calendar<W: Write>(
    writer: &mut W,
    first_of_month: NaiveDate,
    active_goals: usize,
    days: &[CalendarDay],
) -> Result<()> {
    writeln!(
        writer,
        "CALENDAR: {} ({active_goals} active goals)",
        first_of_month.format("%B %Y")
    )?;
    writeln!(writer)?;
    if days.is_empty() {
        writeln!(writer, "No intake logged this month.")?;
        return Ok(());
    }
    for day in days {
        writeln!(
            writer,
            "{}  {}/{}  {:>3}%  {}",
            day.date,
            day.count,
            day.total,
            percent(day.ratio),
            progress_bar(day.ratio)
        )?;
    }
    Ok(())
}

/// Runs the calendar report. Year and month default to the current ones.
pub fn calendar<W: Write>(
    writer: &mut W,
    db: &Database,
    config: &Config,
    year: Option<i32>,
    month: Option<u32>,
    json: bool,
) -> Result<()> {
    calendar_at(writer, db, config, year, month, json, Utc::now())
}

fn calendar_at<W: Write>(
    writer: &mut W,
    db: &Database,
    config: &Config,
    year: Option<i32>,
    month: Option<u32>,
    json: bool,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let today = generated_at.with_timezone(&Local).date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let engine = AdherenceEngine::new(db, config.engine_config());
    let days = engine
        .calendar(year, month)
        .context("failed to compute calendar")?;

    if json {
        let report = JsonCalendar {
            generated_at: generated_at.to_rfc3339(),
            timezone: local_timezone(),
            year,
            month,
            days,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("invalid month: {year}-{month}"))?;
    let active_goals = db.count_active_goals()?;
    format_calendar(writer, first_of_month, active_goals, &days)
}
