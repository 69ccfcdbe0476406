// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job trigger processor (jtp)
//!
//! Loads a processor config, starts every trigger once, and exits when each
//! has reported completion.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod lifecycle;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::lifecycle::{LifecycleError, Summary};

/// Exit code when the processor could not start
const EXIT_STARTUP: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "jtp", version, about = "Run job triggers once and report how they went")]
struct Args {
    /// Processor config file (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// How long to wait for every trigger to complete
    #[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
    timeout: Duration,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: failed to set up logging: {e}");
            return ExitCode::from(EXIT_STARTUP);
        }
    };

    match run(&args).await {
        Ok(summary) => {
            println!("{summary}");
            if summary.succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("failed to start processor: {e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_STARTUP)
        }
    }
}

async fn run(args: &Args) -> Result<Summary> {
    let config = jt_config::load_config(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let base_dir = args
        .config
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let workers = lifecycle::worker_factory(&config, &base_dir)?;
    let mut processor = lifecycle::startup(&config, workers)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    processor.start()?;
    info!(triggers = processor.triggers().len(), "triggers started");

    let summary = tokio::select! {
        summary = processor.wait(args.timeout) => summary,
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            processor.summary()
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
            processor.summary()
        }
    };

    processor.shutdown();
    info!(
        ok = summary.ok,
        failed = summary.failed,
        pending = summary.pending,
        "processor finished"
    );
    Ok(summary)
}

fn setup_logging(
    log_file: Option<&Path>,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| LifecycleError::BadLogPath(path.to_path_buf()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(log_file.is_none()))
        .init();

    Ok(guard)
}
