//! Census orchestration: parse the corpus in parallel, then fold the rule
//! sets into [`CorpusStats`] on a single thread.

use crate::corpus::Corpus;
use crate::pool::{ParsePool, SiteFailure};
use anyhow::Result;
use chrono::Utc;
use robots_census::report::rank;
use robots_census::{aggregate, tracked_agents, CorpusStats, ReportRow};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// Everything a census run produced.
#[derive(Debug, Clone)]
pub struct CensusOutcome {
    pub stats: CorpusStats,
    /// Sites in the input, failed ones included. Percentages use this total.
    pub total_sites: usize,
    pub sites_with_robots: usize,
    pub failures: Vec<SiteFailure>,
    pub sitemap_entries: usize,
    pub unmatched_lines: usize,
}

/// Serializable summary written to `.json` outputs.
#[derive(Debug, Clone, Serialize)]
pub struct CensusReport {
    pub generated_at: String,
    pub total_sites: usize,
    pub sites_with_robots: usize,
    pub tracked_agents: usize,
    pub sitemap_entries: usize,
    pub unmatched_lines: usize,
    pub failures: Vec<SiteFailure>,
    pub rows: Vec<ReportRow>,
}

impl CensusOutcome {
    pub fn tracked(&self) -> &BTreeSet<String> {
        self.stats.tracked()
    }

    /// Report rows ranked by observed fraction.
    pub fn rows(&self) -> Vec<ReportRow> {
        rank(&self.stats, self.total_sites as u64)
    }

    pub fn report(&self) -> CensusReport {
        CensusReport {
            generated_at: Utc::now().to_rfc3339(),
            total_sites: self.total_sites,
            sites_with_robots: self.sites_with_robots,
            tracked_agents: self.tracked().len(),
            sitemap_entries: self.sitemap_entries,
            unmatched_lines: self.unmatched_lines,
            failures: self.failures.clone(),
            rows: self.rows(),
        }
    }
}

/// Run the census over a corpus.
///
/// Sites without robots.txt count as empty rule sets. Sites whose parse
/// failed are excluded from every counter.
pub async fn run(corpus: &Corpus, pool: &ParsePool) -> Result<CensusOutcome> {
    info!(
        sites = corpus.len(),
        workers = pool.workers(),
        "parsing robots.txt documents"
    );
    let batch = pool.parse_all(corpus.documents()).await?;

    let tracked = tracked_agents(batch.parsed.values());
    let sites = corpus
        .missing()
        .map(|_| None)
        .chain(batch.parsed.values().map(Some));
    let stats = aggregate(sites, &tracked);

    let sitemap_entries = batch.parsed.values().map(|r| r.sitemaps.len()).sum();
    let unmatched_lines = batch.parsed.values().map(|r| r.errors.len()).sum();

    info!(
        tracked_agents = tracked.len(),
        folded = stats.sites(),
        failed = batch.failures.len(),
        "census complete"
    );

    Ok(CensusOutcome {
        stats,
        total_sites: corpus.len(),
        sites_with_robots: corpus.with_robots(),
        failures: batch.failures,
        sitemap_entries,
        unmatched_lines,
    })
}
