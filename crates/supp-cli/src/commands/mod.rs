//! CLI subcommand implementations.

pub mod goals;
pub mod log;
pub mod seed;
pub mod stats;
pub mod supplements;
