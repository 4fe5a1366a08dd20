//! CLI entry point for the weather-fetch tool.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use strum::IntoEnumIterator;
use tracing::{debug, info};
use weather_fetch::{FetchRequest, Fetcher, HttpClient, StateCode};

mod app_config;
mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries progress lines and reports.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    if args.list_states {
        for code in StateCode::iter() {
            println!("{code}");
        }
        return Ok(());
    }

    let loaded = app_config::load_default_file_config()?;
    debug!(
        path = ?loaded.path,
        loaded = loaded.config.is_some(),
        "config resolved"
    );
    let settings = app_config::resolve_settings(
        args.data_dir.as_deref(),
        args.base_url.as_deref(),
        loaded.config.as_ref(),
    );

    // clap guarantees the state is present unless --list-states was given
    let code = args.state.as_deref().unwrap_or_default();
    let mut request = FetchRequest::for_code(code, &settings.data_dir)?;
    if let Some(tarname) = &args.tarname {
        request = request.with_tarname(tarname)?;
    }
    if let Some(parquet_name) = &args.parquet_name {
        request = request.with_parquet_name(parquet_name)?;
    }

    let client =
        HttpClient::new_with_timeouts(settings.connect_timeout_secs, settings.read_timeout_secs)?;
    let fetcher = Fetcher::new(client, &settings.base_url)?;

    info!(
        state = %request.state(),
        data_dir = %request.data_dir().display(),
        "fetching weather archive"
    );

    let result = if args.json || args.quiet {
        fetcher.run_with_output(&request, &mut io::sink()).await
    } else {
        fetcher.run(&request).await
    };

    let report = match result {
        Ok(report) => report,
        Err(err) if err.is_not_found() => {
            return Err(anyhow::Error::new(err).context(format!(
                "no archive named '{}' on the server for state {}",
                request.tarname(),
                request.state()
            )));
        }
        Err(err) => return Err(err.into()),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize fetch report")?
        );
    }

    Ok(())
}
