//! Ranked report rows and their table / CSV renderings.

use crate::stats::{AgentTally, CorpusStats};
use serde::Serialize;
use std::fmt::Write;

/// Rows shown in the terminal table before eliding the rest.
pub const DEFAULT_TOP_ROWS: usize = 16;

/// Printed in place of rows past the top-N cut.
pub const ELISION_MARKER: &str = "........";

const CSV_HEADER: [&str; 9] = [
    "agent",
    "observed",
    "observed_pct",
    "blocked_all",
    "blocked_all_pct",
    "blocked_some",
    "blocked_some_pct",
    "blocked_none",
    "blocked_none_pct",
];

/// One ranked agent with counts and percentages of the total site count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub agent: String,
    pub observed: u64,
    pub observed_pct: f64,
    pub blocked_all: u64,
    pub blocked_all_pct: f64,
    pub blocked_some: u64,
    pub blocked_some_pct: f64,
    pub blocked_none: u64,
    pub blocked_none_pct: f64,
}

impl ReportRow {
    pub fn new(agent: &str, tally: &AgentTally, total_sites: u64) -> Self {
        Self {
            agent: agent.to_string(),
            observed: tally.counter,
            observed_pct: percent(tally.counter, total_sites),
            blocked_all: tally.all,
            blocked_all_pct: percent(tally.all, total_sites),
            blocked_some: tally.some,
            blocked_some_pct: percent(tally.some, total_sites),
            blocked_none: tally.none,
            blocked_none_pct: percent(tally.none, total_sites),
        }
    }
}

/// Percentage of `total`, or 0 when there is nothing to divide by.
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Rows sorted by observed fraction, highest first. Ties go by agent name.
pub fn rank(stats: &CorpusStats, total_sites: u64) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = stats
        .iter()
        .map(|(agent, tally)| ReportRow::new(agent, tally, total_sites))
        .collect();
    // Fractions share a denominator, so raw counts give the same order.
    rows.sort_by(|a, b| b.observed.cmp(&a.observed).then_with(|| a.agent.cmp(&b.agent)));
    rows
}

pub fn table_header() -> String {
    format!(
        "{:<30} {:<10} {:>15} {:>15} {:>15}",
        "Agent", "Observed", "Blocked All", "Blocked Some", "Blocked None"
    )
}

pub fn table_row(row: &ReportRow) -> String {
    let blank = "";
    format!(
        "{:<20} {:>5} ({:5.1}%) {blank:>5}  {:>5} ({:5.1}%) {blank:>5}  {:>5} ({:5.1}%) {blank:>5}  {:>5} ({:5.1}%)",
        row.agent,
        row.observed,
        row.observed_pct,
        row.blocked_all,
        row.blocked_all_pct,
        row.blocked_some,
        row.blocked_some_pct,
        row.blocked_none,
        row.blocked_none_pct,
    )
}

/// Plain-text table of the first `top` rows, with an elision marker when
/// rows were cut.
pub fn render_table(rows: &[ReportRow], top: usize) -> String {
    let mut out = table_header();
    out.push('\n');
    for row in rows.iter().take(top) {
        out.push_str(&table_row(row));
        out.push('\n');
    }
    if rows.len() > top {
        out.push_str(ELISION_MARKER);
        out.push('\n');
    }
    out
}

/// All rows as CSV with a header line.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    write_csv_line(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));
    for row in rows {
        write_csv_line(
            &mut out,
            [
                row.agent.clone(),
                row.observed.to_string(),
                format!("{:.1}", row.observed_pct),
                row.blocked_all.to_string(),
                format!("{:.1}", row.blocked_all_pct),
                row.blocked_some.to_string(),
                format!("{:.1}", row.blocked_some_pct),
                row.blocked_none.to_string(),
                format!("{:.1}", row.blocked_none_pct),
            ],
        );
    }
    out
}

fn write_csv_line(out: &mut String, cells: impl IntoIterator<Item = String>) {
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if cell.contains([',', '"', '\n', '\r']) {
            let _ = write!(out, "\"{}\"", cell.replace('"', "\"\""));
        } else {
            out.push_str(&cell);
        }
    }
    out.push('\n');
}
