use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use supp_cli::commands::{goals, log, seed, stats, supplements};
use supp_cli::{Cli, Commands, Config, GoalsAction, LogAction, StatsAction, SupplementsAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(supp_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = supp_db::Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut db, config) = open_database(cli.config.as_deref())?;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Supplements(action) => match action {
            SupplementsAction::List { json } => supplements::list(&mut out, &db, *json)?,
            SupplementsAction::Add(args) => supplements::add(&mut out, &mut db, args)?,
            SupplementsAction::Edit(args) => supplements::edit(&mut out, &mut db, args)?,
            SupplementsAction::Remove { id } => supplements::remove(&mut out, &mut db, id)?,
        },
        Commands::Goals(action) => match action {
            GoalsAction::List { all, json } => goals::list(&mut out, &db, *all, *json)?,
            GoalsAction::Add(args) => goals::add(&mut out, &mut db, args)?,
            GoalsAction::Deactivate { id } => goals::set_active(&mut out, &mut db, id, false)?,
            GoalsAction::Activate { id } => goals::set_active(&mut out, &mut db, id, true)?,
        },
        Commands::Log(action) => match action {
            LogAction::Take(args) => log::take(&mut out, &mut db, args)?,
            LogAction::List { date, json } => log::list(&mut out, &db, *date, *json)?,
            LogAction::Undo { id } => log::undo(&mut out, &mut db, id)?,
        },
        Commands::Stats(action) => match action {
            StatsAction::Overview { json } => stats::overview(&mut out, &db, &config, *json)?,
            StatsAction::Calendar { year, month, json } => {
                stats::calendar(&mut out, &db, &config, *year, *month, *json)?;
            }
        },
        Commands::Seed => seed::run(&mut out, &mut db)?,
    }

    Ok(())
}
