//! Corpus-wide counters folded from per-site verdicts.

use crate::judge::Verdict;
use crate::rules::{RuleSet, RESERVED_AGENT_NAMES, WILDCARD};
use crate::site::resolve;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Synthetic row holding the strictest verdict across all agents per site.
pub const ALL_AGENTS_ROW: &str = "*All Agents*";

/// Counters for one report row.
///
/// `counter` is the number of sites naming the agent explicitly. The other
/// fields count sites by resolved verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgentTally {
    pub counter: u64,
    pub all: u64,
    pub some: u64,
    pub none: u64,
}

impl AgentTally {
    pub fn count(&self, verdict: Verdict) -> u64 {
        match verdict {
            Verdict::BlockedAll => self.all,
            Verdict::BlockedSome => self.some,
            Verdict::BlockedNone => self.none,
        }
    }

    fn record(&mut self, verdict: Verdict, named: bool) {
        match verdict {
            Verdict::BlockedAll => self.all += 1,
            Verdict::BlockedSome => self.some += 1,
            Verdict::BlockedNone => self.none += 1,
        }
        if named {
            self.counter += 1;
        }
    }

    fn merge(&mut self, other: &AgentTally) {
        self.counter += other.counter;
        self.all += other.all;
        self.some += other.some;
        self.none += other.none;
    }
}

/// Accumulator for a corpus run.
///
/// Seeded at construction with a row for every tracked agent, the wildcard
/// and [`ALL_AGENTS_ROW`]. Counters only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    #[serde(skip)]
    tracked: BTreeSet<String>,
    sites: u64,
    tallies: BTreeMap<String, AgentTally>,
}

impl CorpusStats {
    pub fn new(tracked: &BTreeSet<String>) -> Self {
        let tallies = tracked
            .iter()
            .map(String::as_str)
            .chain([WILDCARD, ALL_AGENTS_ROW])
            .map(|agent| (agent.to_string(), AgentTally::default()))
            .collect();

        Self {
            tracked: tracked.clone(),
            sites: 0,
            tallies,
        }
    }

    /// Fold one site into the counters.
    pub fn record(&mut self, rule_set: &RuleSet) {
        let verdicts = resolve(rule_set, &self.tracked);

        for (agent, verdict) in verdicts.iter() {
            self.tallies
                .entry(agent.to_string())
                .or_default()
                .record(verdict, rule_set.names(agent));
        }

        self.tallies
            .entry(ALL_AGENTS_ROW.to_string())
            .or_default()
            .record(verdicts.strictest(), true);
        self.sites += 1;
    }

    /// Combine counters from a disjoint set of sites over the same agents.
    pub fn merge(&mut self, other: &CorpusStats) {
        debug_assert_eq!(self.tracked, other.tracked);
        for (agent, tally) in &other.tallies {
            self.tallies.entry(agent.clone()).or_default().merge(tally);
        }
        self.sites += other.sites;
    }

    pub fn get(&self, agent: &str) -> Option<&AgentTally> {
        self.tallies.get(agent)
    }

    /// Rows in agent-name order, synthetic rows included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentTally)> {
        self.tallies.iter().map(|(agent, tally)| (agent.as_str(), tally))
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Number of sites folded so far.
    pub fn sites(&self) -> u64 {
        self.sites
    }

    pub fn tracked(&self) -> &BTreeSet<String> {
        &self.tracked
    }
}

/// Every agent named anywhere in the corpus, minus the wildcard and the
/// names reserved for site-level sections and synthetic rows.
pub fn tracked_agents<'a, I>(rule_sets: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a RuleSet>,
{
    rule_sets
        .into_iter()
        .flat_map(RuleSet::agents)
        .filter(|agent| is_trackable(agent))
        .map(str::to_string)
        .collect()
}

fn is_trackable(agent: &str) -> bool {
    agent != WILDCARD && agent != ALL_AGENTS_ROW && !RESERVED_AGENT_NAMES.contains(&agent)
}

/// Fold a corpus into counters. `None` stands for a site without robots.txt
/// and is counted as an empty rule set.
pub fn aggregate<'a, I>(sites: I, tracked: &BTreeSet<String>) -> CorpusStats
where
    I: IntoIterator<Item = Option<&'a RuleSet>>,
{
    let empty = RuleSet::default();
    let mut stats = CorpusStats::new(tracked);
    for rule_set in sites {
        stats.record(rule_set.unwrap_or(&empty));
    }
    debug!(
        sites = stats.sites(),
        agents = tracked.len(),
        "aggregated corpus statistics"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn scenario() -> Vec<(&'static str, Option<RuleSet>)> {
        vec![
            ("a.com", Some(parse("User-agent: *\nDisallow: /\n"))),
            ("b.com", Some(parse("User-agent: *\nDisallow:\n"))),
            ("c.com", None),
        ]
    }

    #[test]
    fn test_wildcard_only_corpus() {
        let sites = scenario();
        let stats = aggregate(sites.iter().map(|(_, r)| r.as_ref()), &BTreeSet::new());

        let star = stats.get(WILDCARD).unwrap();
        assert_eq!((star.all, star.some, star.none), (1, 0, 2));
        assert_eq!(star.counter, 2);

        let all_agents = stats.get(ALL_AGENTS_ROW).unwrap();
        assert_eq!(all_agents.counter, 3);
        assert_eq!(all_agents.all, 1);
        assert_eq!(all_agents.none, 2);
        assert_eq!(stats.sites(), 3);
    }

    #[test]
    fn test_counter_only_for_explicit_mentions() {
        let named = parse("User-agent: GPTBot\nDisallow: /private\nUser-agent: *\nDisallow: /\n");
        let unnamed = parse("User-agent: *\nDisallow: /\n");
        let tracked = tracked_agents([&named, &unnamed]);
        assert_eq!(tracked, BTreeSet::from(["GPTBot".to_string()]));

        let stats = aggregate([Some(&named), Some(&unnamed), None], &tracked);
        let gpt = stats.get("GPTBot").unwrap();
        assert_eq!(gpt.counter, 1);
        assert_eq!(gpt.some, 1);
        assert_eq!(gpt.all, 1);
        assert_eq!(gpt.none, 1);
        assert_eq!(stats.get(ALL_AGENTS_ROW).unwrap().all, 2);
    }

    #[test]
    fn test_rows_seeded_up_front() {
        let tracked = BTreeSet::from(["CCBot".to_string(), "GPTBot".to_string()]);
        let stats = CorpusStats::new(&tracked);

        assert_eq!(stats.len(), 4);
        assert_eq!(stats.get("CCBot"), Some(&AgentTally::default()));
        assert!(stats.get(WILDCARD).is_some());
        assert!(stats.get(ALL_AGENTS_ROW).is_some());
    }

    #[test]
    fn test_each_row_sums_to_site_count() {
        let docs = [
            parse("User-agent: CCBot\nDisallow: /\n"),
            parse("User-agent: GPTBot\nAllow: /\nDisallow: /\n"),
            parse("User-agent: *\nDisallow: /search\n"),
        ];
        let tracked = tracked_agents(&docs);
        let stats = aggregate(docs.iter().map(Some), &tracked);

        for (_, tally) in stats.iter() {
            assert_eq!(tally.all + tally.some + tally.none, 3);
        }
    }

    #[test]
    fn test_order_independent() {
        let docs = vec![
            parse("User-agent: CCBot\nDisallow: /\n\nUser-agent: *\nDisallow: /tmp\n"),
            parse("User-agent: GPTBot\nDisallow: /a\n"),
            parse("User-agent: *\nDisallow: /\n"),
            RuleSet::default(),
        ];
        let tracked = tracked_agents(&docs);

        let forward = aggregate(docs.iter().map(Some), &tracked);
        let reverse = aggregate(docs.iter().rev().map(Some), &tracked);
        let rotated = aggregate(docs.iter().cycle().skip(2).take(docs.len()).map(Some), &tracked);

        assert_eq!(forward, reverse);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_merge_matches_single_fold() {
        let docs = vec![
            parse("User-agent: CCBot\nDisallow: /\n"),
            parse("User-agent: GPTBot\nDisallow: /a\n"),
            parse("User-agent: *\nDisallow: /\n"),
        ];
        let tracked = tracked_agents(&docs);

        let whole = aggregate(docs.iter().map(Some), &tracked);
        let mut left = aggregate(docs[..1].iter().map(Some), &tracked);
        let right = aggregate(docs[1..].iter().map(Some), &tracked);
        left.merge(&right);

        assert_eq!(left, whole);
    }

    #[test]
    fn test_reserved_names_not_tracked() {
        let doc = parse(
            "User-agent: ERRORS\nDisallow: /\nUser-agent: Sitemaps\nUser-agent: *All Agents*\nUser-agent: *\n",
        );
        assert!(tracked_agents([&doc]).is_empty());
    }
}
