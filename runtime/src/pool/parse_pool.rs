//! Bounded worker pool for parsing robots.txt documents.
//!
//! Each document is parsed on a blocking thread, with at most `workers` in
//! flight. A panic while parsing one site is contained to that site and
//! reported as a [`SiteFailure`]. Sibling tasks keep running.

use anyhow::Result;
use robots_census::{parse, RuleSet};
use serde::Serialize;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Default number of concurrent parses.
pub const DEFAULT_WORKERS: usize = 10;

type ParseFn = dyn Fn(&str) -> RuleSet + Send + Sync;

/// A site whose robots.txt could not be parsed. It is left out of the census.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteFailure {
    pub site: String,
    pub reason: String,
}

/// Parsed rule sets keyed by site id, plus the sites that failed.
#[derive(Debug, Default)]
pub struct ParseBatch {
    pub parsed: BTreeMap<String, RuleSet>,
    pub failures: Vec<SiteFailure>,
}

/// Fans parse jobs out to blocking threads, bounded by a semaphore.
pub struct ParsePool {
    semaphore: Arc<Semaphore>,
    workers: usize,
    parser: Arc<ParseFn>,
}

impl ParsePool {
    /// Pool running the standard robots.txt parser.
    pub fn new(workers: usize) -> Self {
        Self::with_parser(workers, parse)
    }

    /// Pool running a custom parse function. `workers` is clamped to at least 1.
    pub fn with_parser<F>(workers: usize, parser: F) -> Self
    where
        F: Fn(&str) -> RuleSet + Send + Sync + 'static,
    {
        let workers = workers.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(workers)),
            workers,
            parser: Arc::new(parser),
        }
    }

    /// Maximum concurrent parses.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Free worker slots right now.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Parse every `(site, text)` pair. Completion order is irrelevant: results
    /// are keyed by site and failures are sorted by site.
    pub async fn parse_all<I, S, T>(&self, documents: I) -> Result<ParseBatch>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut tasks = JoinSet::new();

        for (site, text) in documents {
            let (site, text): (String, String) = (site.into(), text.into());
            let permit = Arc::clone(&self.semaphore)
                .acquire_owned()
                .await
                .map_err(|e| anyhow::anyhow!("semaphore closed: {}", e))?;
            let parser = Arc::clone(&self.parser);

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let outcome = catch_unwind(AssertUnwindSafe(|| parser(&text))).map_err(panic_reason);
                (site, outcome)
            });
        }

        let mut batch = ParseBatch::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((site, Ok(rules))) => {
                    debug!(site = %site, agents = rules.agent_count(), "parsed robots.txt");
                    batch.parsed.insert(site, rules);
                }
                Ok((site, Err(reason))) => {
                    warn!(site = %site, reason = %reason, "failed to parse robots.txt");
                    batch.failures.push(SiteFailure { site, reason });
                }
                Err(e) => warn!("parse task did not complete: {e}"),
            }
        }

        batch.failures.sort_by(|a, b| a.site.cmp(&b.site));
        Ok(batch)
    }
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "parser panicked".to_string()
    }
}
