use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{events, history, import, members, record, status, summary, util};
use wl_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(wl_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = wl_db::Database::open(&config.database_path).with_context(|| {
        format!("failed to open {}", config.database_path.display())
    })?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output on stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();
    let now = Utc::now();

    match &cli.command {
        Some(Commands::Record(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            let user_id = util::resolve_user(args.member.user.as_ref(), &config)?;
            record::run(&mut stdout, &mut db, args, user_id, now)?;
        }
        Some(Commands::Import(args)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            import::run(io::stdin().lock(), &mut stdout, &mut db, args)?;
        }
        Some(Commands::Events(member)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user_id = util::resolve_user(member.user.as_ref(), &config)?;
            events::run(&mut stdout, &db, &user_id, member.project.as_ref())?;
        }
        Some(Commands::History { member, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user_id = util::resolve_user(member.user.as_ref(), &config)?;
            history::run(&mut stdout, &db, &user_id, member.project.as_ref(), *json)?;
        }
        Some(Commands::Status { member, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user_id = util::resolve_user(member.user.as_ref(), &config)?;
            status::run(&mut stdout, &db, &user_id, member.project.as_ref(), *json, now)?;
        }
        Some(Commands::Members { project }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            members::run(&mut stdout, &db, project.as_ref())?;
        }
        Some(Commands::Summary { project, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            summary::run(&mut stdout, &db, project, *json, now)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
