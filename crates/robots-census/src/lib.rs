//! Robots.txt census core: parse robots.txt documents, judge how hard each
//! crawler is blocked, and fold per-site judgements into corpus statistics.
//!
//! Everything here is pure and infallible. Loading corpora, running the
//! parser in parallel, and writing reports live in the runtime crate.

pub mod judge;
pub mod parser;
pub mod report;
pub mod rules;
pub mod site;
pub mod stats;

pub use judge::{judge, judge_rules, AgentJudgement, Verdict};
pub use parser::{parse, Directive};
pub use report::{rank, ReportRow};
pub use rules::{AgentRules, RuleSet, WILDCARD};
pub use site::{resolve, SiteVerdictMap};
pub use stats::{aggregate, tracked_agents, AgentTally, CorpusStats, ALL_AGENTS_ROW};
