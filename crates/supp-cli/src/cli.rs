//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::goals::AddGoalArgs;
use crate::commands::log::TakeArgs;
use crate::commands::supplements::{AddArgs, EditArgs};

/// Supplement intake tracker.
///
/// Records which supplements you take each day and reports adherence:
/// completion rates, streaks, a monthly calendar, and what gets skipped most.
#[derive(Debug, Parser)]
#[command(name = "supp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage supplements.
    #[command(subcommand)]
    Supplements(SupplementsAction),

    /// Manage daily goals.
    #[command(subcommand)]
    Goals(GoalsAction),

    /// Record and review intake.
    #[command(subcommand)]
    Log(LogAction),

    /// Show adherence statistics.
    #[command(subcommand)]
    Stats(StatsAction),

    /// Replace all data with a demo dataset.
    Seed,
}

#[derive(Debug, Subcommand)]
pub enum SupplementsAction {
    /// List supplements in display order.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add a supplement.
    Add(AddArgs),
    /// Change fields of a supplement.
    Edit(EditArgs),
    /// Delete a supplement with its goals and intake history.
    Remove {
        /// Supplement ID.
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum GoalsAction {
    /// List goals by time slot.
    List {
        /// Include inactive goals.
        #[arg(long)]
        all: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add a daily goal for a supplement.
    Add(AddGoalArgs),
    /// Stop counting a goal toward adherence.
    Deactivate {
        /// Goal ID.
        id: String,
    },
    /// Count a goal toward adherence again.
    Activate {
        /// Goal ID.
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum LogAction {
    /// Record a dose taken now.
    Take(TakeArgs),
    /// List doses taken on a day.
    List {
        /// Local date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete a logged dose.
    Undo {
        /// Intake log ID.
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum StatsAction {
    /// Rates, streaks, the weekly chart, and most-missed supplements.
    Overview {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Per-day completion for a month.
    Calendar {
        /// Year. Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,

        /// Month (1-12). Defaults to the current month.
        #[arg(long)]
        month: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use supp_core::TimeSlot;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_log_take_with_slot() {
        let cli = Cli::parse_from(["supp", "log", "take", "abc", "--slot", "bedtime"]);
        let Some(Commands::Log(LogAction::Take(args))) = cli.command else {
            panic!("expected log take");
        };
        assert_eq!(args.supplement_id, "abc");
        assert_eq!(args.slot, Some(TimeSlot::Bedtime));
        assert_eq!(args.dose, None);
    }

    #[test]
    fn rejects_unknown_slot() {
        let result = Cli::try_parse_from(["supp", "log", "take", "abc", "--slot", "noon"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_calendar_month() {
        let cli = Cli::parse_from(["supp", "stats", "calendar", "--month", "5", "--json"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Stats(StatsAction::Calendar {
                year: None,
                month: Some(5),
                json: true,
            }))
        ));
    }
}
