//! Resolve every tracked agent's verdict for one site.

use crate::judge::{judge, Verdict};
use crate::rules::{RuleSet, WILDCARD};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Verdict per agent for one site, wildcard included under `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteVerdictMap {
    verdicts: BTreeMap<String, Verdict>,
}

impl SiteVerdictMap {
    pub fn get(&self, agent: &str) -> Option<Verdict> {
        self.verdicts.get(agent).copied()
    }

    pub fn wildcard(&self) -> Verdict {
        self.get(WILDCARD).unwrap_or(Verdict::BlockedNone)
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Verdict)> {
        self.verdicts.iter().map(|(agent, verdict)| (agent.as_str(), *verdict))
    }

    /// Most restrictive verdict across the map: `all` beats `some` beats `none`.
    pub fn strictest(&self) -> Verdict {
        let has = |wanted: Verdict| self.verdicts.values().any(|v| *v == wanted);
        if has(Verdict::BlockedAll) {
            Verdict::BlockedAll
        } else if has(Verdict::BlockedSome) {
            Verdict::BlockedSome
        } else {
            Verdict::BlockedNone
        }
    }
}

/// Resolve verdicts for the wildcard and every tracked agent.
///
/// Agents the site does not name inherit the wildcard verdict.
pub fn resolve(rule_set: &RuleSet, tracked: &BTreeSet<String>) -> SiteVerdictMap {
    let wildcard = judge(rule_set.get(WILDCARD));

    let mut verdicts = BTreeMap::new();
    verdicts.insert(WILDCARD.to_string(), wildcard);

    for agent in tracked {
        let verdict = match rule_set.get(agent) {
            Some(rules) => judge(Some(rules)),
            None => wildcard,
        };
        verdicts.insert(agent.clone(), verdict);
    }

    SiteVerdictMap { verdicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn tracked(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_named_agent_overrides_wildcard() {
        let rules = parse("User-agent: GPTBot\nDisallow: /private\nUser-agent: *\nDisallow: /\n");
        let map = resolve(&rules, &tracked(&["GPTBot"]));

        assert_eq!(map.get("GPTBot"), Some(Verdict::BlockedSome));
        assert_eq!(map.wildcard(), Verdict::BlockedAll);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_unnamed_agents_inherit_wildcard() {
        let rules = parse("User-agent: *\nDisallow: /cgi-bin\n");
        let map = resolve(&rules, &tracked(&["CCBot", "GPTBot", "anthropic-ai"]));

        assert_eq!(map.len(), 4);
        for (_, verdict) in map.iter() {
            assert_eq!(verdict, Verdict::BlockedSome);
        }
    }

    #[test]
    fn test_empty_rule_set_is_open() {
        let map = resolve(&RuleSet::default(), &tracked(&["GPTBot"]));
        assert_eq!(map.wildcard(), Verdict::BlockedNone);
        assert_eq!(map.get("GPTBot"), Some(Verdict::BlockedNone));
        assert_eq!(map.strictest(), Verdict::BlockedNone);
    }

    #[test]
    fn test_named_agent_with_no_rules_is_open_despite_wildcard() {
        // A bare User-agent line still counts as an explicit, empty group.
        let rules = parse("User-agent: GPTBot\n\nUser-agent: *\nDisallow: /\n");
        let map = resolve(&rules, &tracked(&["GPTBot"]));
        assert_eq!(map.get("GPTBot"), Some(Verdict::BlockedNone));
    }

    #[test]
    fn test_strictest_includes_wildcard() {
        let rules = parse("User-agent: *\nDisallow: /\n");
        let map = resolve(&rules, &BTreeSet::new());
        assert_eq!(map.len(), 1);
        assert_eq!(map.strictest(), Verdict::BlockedAll);
    }
}
