//! Run configuration banner and final failure report.

use std::io::{self, Write};
use std::path::Path;

use parfetch_core::FetchConfig;

pub(crate) fn write_configuration(
    out: &mut impl Write,
    url_file: &Path,
    output_dir: &Path,
    config: &FetchConfig,
) -> io::Result<()> {
    writeln!(out, " URL file: {}", url_file.display())?;
    writeln!(out, " Output directory: {}", output_dir.display())?;
    writeln!(out, " Max attempts: {}", config.max_attempts)?;
    writeln!(out, " Parallel downloads: {}", config.max_concurrency)?;
    writeln!(out)
}

/// Lists each permanently failed URL on its own line; prints nothing else
/// when everything succeeded.
pub(crate) fn write_failures(out: &mut impl Write, failed: &[String]) -> io::Result<()> {
    writeln!(out)?;
    if failed.is_empty() {
        return Ok(());
    }
    writeln!(out, " FAILED TO DOWNLOAD:")?;
    for url in failed {
        writeln!(out, " {url}")?;
    }
    Ok(())
}
