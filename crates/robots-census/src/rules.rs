//! Structured rule model for a single robots.txt document.

use crate::parser::Directive;
use serde::Serialize;
use std::collections::BTreeMap;

/// Agent name of the default group that applies to unnamed crawlers.
pub const WILDCARD: &str = "*";

/// Names that can never be tracked as crawlers. They mirror the site-level
/// sections of a rule set and would shadow them in reports.
pub const RESERVED_AGENT_NAMES: &[&str] = &["ERRORS", "Sitemaps"];

/// Raw directive values recorded for one user-agent, in appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentRules {
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub crawl_delay: Vec<String>,
}

impl AgentRules {
    /// Append a directive value. Duplicates are kept.
    pub fn push(&mut self, directive: Directive, value: impl Into<String>) {
        let list = match directive {
            Directive::Allow => &mut self.allow,
            Directive::Disallow => &mut self.disallow,
            Directive::CrawlDelay => &mut self.crawl_delay,
        };
        list.push(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.disallow.is_empty() && self.crawl_delay.is_empty()
    }
}

/// Parsed robots.txt: per-agent rules plus site-level sitemaps and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    agents: BTreeMap<String, AgentRules>,
    /// `Sitemap:` URLs, independent of any agent group.
    pub sitemaps: Vec<String>,
    /// One entry per line the parser could not place.
    pub errors: Vec<String>,
}

impl RuleSet {
    /// Rules for an agent named explicitly in the document.
    pub fn get(&self, agent: &str) -> Option<&AgentRules> {
        self.agents.get(agent)
    }

    /// Whether the document has a `User-agent:` line for this exact name.
    pub fn names(&self, agent: &str) -> bool {
        self.agents.contains_key(agent)
    }

    /// Record for `agent`, created empty on first reference.
    pub fn entry(&mut self, agent: &str) -> &mut AgentRules {
        self.agents.entry(agent.to_string()).or_default()
    }

    /// Agent names in sorted order, wildcard included.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// True when nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.sitemaps.is_empty() && self.errors.is_empty()
    }
}
