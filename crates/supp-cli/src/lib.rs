//! Supplement tracker CLI library.
//!
//! This crate provides the CLI interface for the supplement tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, GoalsAction, LogAction, StatsAction, SupplementsAction};
pub use config::Config;
