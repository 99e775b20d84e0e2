//! Classify one agent's rules into a coarse access verdict.

use crate::rules::AgentRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of a site an agent is blocked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verdict {
    /// No effective restriction.
    #[serde(rename = "none")]
    BlockedNone,
    /// At least one non-root path is disallowed.
    #[serde(rename = "some")]
    BlockedSome,
    /// The site root `/` is disallowed.
    #[serde(rename = "all")]
    BlockedAll,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::BlockedAll, Verdict::BlockedSome, Verdict::BlockedNone];

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::BlockedNone => "none",
            Verdict::BlockedSome => "some",
            Verdict::BlockedAll => "all",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus the longest allow/disallow values, in characters.
///
/// The lengths are diagnostics only and never change the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentJudgement {
    pub verdict: Verdict,
    pub longest_allow: usize,
    pub longest_disallow: usize,
}

const NO_RULES: &[String] = &[];

/// Judge an agent's rules. `None` means the site never named the agent.
pub fn judge_rules(rules: Option<&AgentRules>) -> AgentJudgement {
    let (allow, disallow) = match rules {
        Some(rules) => (rules.allow.as_slice(), rules.disallow.as_slice()),
        None => (NO_RULES, NO_RULES),
    };

    // The "none" cases win over a root disallow, so Allow: / + Disallow: / is open.
    let verdict = if disallow.is_empty() || disallow == [""] || allow == disallow {
        Verdict::BlockedNone
    } else if disallow.iter().any(|path| path.trim() == "/") {
        Verdict::BlockedAll
    } else {
        Verdict::BlockedSome
    };

    AgentJudgement {
        verdict,
        longest_allow: longest(allow),
        longest_disallow: longest(disallow),
    }
}

/// Verdict for an agent's rules. `None` means the site never named the agent.
pub fn judge(rules: Option<&AgentRules>) -> Verdict {
    judge_rules(rules).verdict
}

fn longest(values: &[String]) -> usize {
    values
        .iter()
        .map(|value| value.chars().count())
        .max()
        .unwrap_or(0)
}
