//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};

use parfetch_core::{DEFAULT_CONCURRENCY, DEFAULT_MAX_ATTEMPTS, FetchConfig};

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "pardl-downloads";

/// Download files in parallel from a list of URLs in a file.
#[derive(Parser, Debug)]
#[command(name = "parfetch")]
#[command(author, version, about)]
#[command(
    after_help = "Exit status: 0 when every URL was downloaded, 1 when any URL failed, 2 on usage errors."
)]
pub struct Args {
    /// File containing newline-separated URLs
    #[arg(value_name = "URL_FILE")]
    pub url_file: Option<PathBuf>,

    /// Output directory path
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// File containing newline-separated URLs (overrides URL_FILE)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output directory path (overrides OUTPUT_DIR)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Maximum number of download attempts per URL
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Maximum number of parallel downloads
    #[arg(short = 'p', long, default_value_t = DEFAULT_CONCURRENCY as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub parallel: u32,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// The URL list file: `--input` wins over the positional argument.
    ///
    /// # Errors
    ///
    /// Returns a clap usage error when neither is given.
    pub fn url_file(&self) -> Result<&Path, clap::Error> {
        self.input
            .as_deref()
            .or(self.url_file.as_deref())
            .ok_or_else(|| {
                Self::command().error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "Input file is required. Use -i or provide it as the first argument.",
                )
            })
    }

    /// The output directory and whether it is the built-in default.
    #[must_use]
    pub fn output_dir(&self) -> (PathBuf, bool) {
        match self.output.as_ref().or(self.output_dir.as_ref()) {
            Some(dir) => (dir.clone(), false),
            None => (PathBuf::from(DEFAULT_OUTPUT_DIR), true),
        }
    }

    /// Fetch settings derived from the flags.
    #[must_use]
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new(
            self.max_attempts,
            usize::try_from(self.parallel).unwrap_or(usize::MAX),
        )
    }

    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
