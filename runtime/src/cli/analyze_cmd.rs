//! `robots-census <input> <output>`: run the census and report it.

use crate::census::{self, CensusOutcome, CensusReport};
use crate::cli::args::{CensusConfig, ReportFormat};
use crate::cli::output::{self, Styled};
use crate::corpus;
use crate::pool::ParsePool;
use anyhow::{Context, Result};
use robots_census::report::{render_csv, render_table};
use std::path::Path;

/// Run the census command.
pub async fn run(config: &CensusConfig) -> Result<CensusOutcome> {
    let s = Styled::new();

    let corpus = corpus::load(&config.input)?;

    if !output::is_json() {
        println!("Total URLs: {}", corpus.len());
        println!("URLs with robots.txt: {}", corpus.with_robots());
    }

    if output::is_verbose() && !output::is_quiet() {
        eprintln!("  Configuration:");
        eprintln!("    workers: {}", config.workers);
        eprintln!("    top:     {}", config.top);
    }

    let pool = ParsePool::new(config.workers);
    let outcome = census::run(&corpus, &pool).await?;
    let report = outcome.report();

    if output::is_json() {
        output::print_json(&serde_json::to_value(&report)?);
    } else {
        print_table(&s, &report, config.top);
    }

    write_report(&config.output, &report)?;

    if !output::is_quiet() {
        if !outcome.failures.is_empty() {
            eprintln!(
                "  {} {} site(s) failed to parse and were skipped.",
                s.warn_sym(),
                outcome.failures.len()
            );
            for failure in &outcome.failures {
                eprintln!("    {} {}", s.yellow(&failure.site), s.dim(&failure.reason));
            }
        }
        eprintln!(
            "  {} Report saved to {}",
            s.ok_sym(),
            config.output.display()
        );
    }

    Ok(outcome)
}

/// Print the ranked table with a highlighted header line.
fn print_table(s: &Styled, report: &CensusReport, top: usize) {
    let table = render_table(&report.rows, top);
    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        println!("{}", s.bold(header));
    }
    for line in lines {
        println!("{line}");
    }
}

/// Save the report as JSON or CSV depending on the output extension.
pub fn write_report(path: &Path, report: &CensusReport) -> Result<()> {
    let body = match ReportFormat::from_path(path) {
        ReportFormat::Json => serde_json::to_string_pretty(report)?,
        ReportFormat::Csv => render_csv(&report.rows),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory: {}", parent.display()))?;
    }

    std::fs::write(path, body)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}
