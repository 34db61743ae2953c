//! CLI entry point for the parfetch tool.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parfetch_core::{DownloadEngine, HttpClient, read_url_list};
use tracing::{debug, info};

mod app;
mod cli;

use app::progress_manager::ProgressLine;
use app::report::{write_configuration, write_failures};
use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let url_file = args.url_file().unwrap_or_else(|err| err.exit());
    let (output_dir, is_default_output) = args.output_dir();
    let config = args.fetch_config();

    let mut stdout = io::stdout();
    if is_default_output && !args.quiet {
        writeln!(
            stdout,
            " Using default output directory: {}",
            output_dir.display()
        )?;
    }

    let urls = read_url_list(url_file)
        .await
        .with_context(|| format!("cannot load URLs from {}", url_file.display()))?;

    tokio::fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("cannot create output directory {}", output_dir.display()))?;

    if !args.quiet {
        write_configuration(&mut stdout, url_file, &output_dir, &config)?;
        stdout.flush()?;
    }

    let engine = DownloadEngine::new(config)?;
    let client = HttpClient::with_timeout(config.timeout).context("cannot build HTTP client")?;
    let mut progress = ProgressLine::new(urls.len(), args.quiet);

    info!(urls = urls.len(), output_dir = %output_dir.display(), "Parfetch starting");
    let report = engine
        .run(urls, Arc::new(client), &output_dir, &mut progress)
        .await?;

    // The failure list is the point of the run, so it is printed even with -q.
    write_failures(&mut stdout, report.failed())?;
    stdout.flush()?;

    if report.is_complete_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
