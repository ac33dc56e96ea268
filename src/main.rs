mod alert;
mod cli;
mod config;
mod db;
mod models;
mod prayer_times;
mod tui;
mod utils;

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::PreferenceRepo;
use prayer_times::AladhanClient;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    // The dashboard owns the terminal, so it logs to a file instead of stderr.
    init_logging(cli.command.is_none())?;

    if let Some(Commands::Config { init }) = cli.command {
        return handlers::handle_config(&config, init);
    }

    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    let city = match cli.city {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => PreferenceRepo::last_city(&conn, &config.location.default_city)?,
    };

    let client = AladhanClient::new(&config.api, &config.location.country)
        .context("Building HTTP client")?;

    match cli.command {
        Some(Commands::Times { json }) => {
            let now = chrono::Local::now().naive_local();
            handlers::handle_times(&conn, &client, &city, now, json)?;
        }
        Some(Commands::Config { .. }) => unreachable!(),
        None => {
            log::info!("Starting dashboard for {}", city);
            tui::app::run(
                conn,
                Arc::new(client),
                alert::from_config(&config.alert),
                &city,
                cli.muted || config.alert.muted,
                config.ui.tick_rate_ms,
            )?;
        }
    }

    Ok(())
}

fn init_logging(to_file: bool) -> Result<()> {
    let default_level = if to_file { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if to_file {
        let path = AppConfig::log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Opening log file {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
