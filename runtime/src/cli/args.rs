//! Command-line arguments and the run configuration derived from them.

use crate::cli::output;
use crate::pool::DEFAULT_WORKERS;
use clap::Parser;
use robots_census::report::DEFAULT_TOP_ROWS;
use std::path::{Path, PathBuf};

/// Aggregate robots.txt crawl permissions across a corpus of websites.
#[derive(Debug, Parser)]
#[command(name = "robots-census", version, about)]
pub struct Cli {
    /// JSON object (optionally gzip-compressed) mapping site ids to robots.txt text.
    pub input: PathBuf,

    /// Where the ranked report is saved. `.json` writes JSON, anything else CSV.
    pub output: PathBuf,

    /// Number of robots.txt documents parsed concurrently.
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,

    /// Rows shown in the terminal table before eliding the rest.
    #[arg(long, default_value_t = DEFAULT_TOP_ROWS)]
    pub top: usize,

    /// Print a JSON summary to stdout instead of the table.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress progress messages on stderr.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug-level logging.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Settings for one census run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub workers: usize,
    pub top: usize,
}

/// Format of the saved report, chosen by the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

impl Cli {
    /// Export the global flags so output helpers can read them anywhere.
    pub fn export_global_flags(&self) {
        let flags = [
            (self.json, output::JSON_ENV),
            (self.quiet, output::QUIET_ENV),
            (self.verbose, output::VERBOSE_ENV),
            (self.no_color, output::NO_COLOR_ENV),
        ];
        for (enabled, var) in flags {
            if enabled {
                std::env::set_var(var, "1");
            }
        }
    }

    pub fn config(&self) -> CensusConfig {
        CensusConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            workers: self.workers,
            top: self.top,
        }
    }
}

fn parse_workers(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
