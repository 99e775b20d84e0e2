//! Parse robots.txt files into a [`RuleSet`] keyed by user-agent.
//!
//! The parser is best-effort. Each line ends up in an agent record, the
//! sitemap list, or the error list, and malformed input never fails the parse.
//!
//! Each `User-agent:` line starts a fresh group holding only that agent, so
//! consecutive `User-agent:` lines do not share the directives that follow.
//! Only the last agent before a directive block receives its rules.

use crate::rules::RuleSet;

const USER_AGENT_PREFIX: &str = "User-agent:";
const SITEMAP_PREFIX: &str = "sitemap:";

/// Per-agent directives the parser records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Allow,
    Disallow,
    CrawlDelay,
}

impl Directive {
    const ALL: [Directive; 3] = [Directive::Allow, Directive::Disallow, Directive::CrawlDelay];

    /// Case-sensitive line prefix, colon included.
    pub fn prefix(self) -> &'static str {
        match self {
            Directive::Allow => "Allow:",
            Directive::Disallow => "Disallow:",
            Directive::CrawlDelay => "Crawl-delay:",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|directive| line.starts_with(directive.prefix()))
    }
}

/// Parse a robots.txt document.
pub fn parse(txt: &str) -> RuleSet {
    let mut rules = RuleSet::default();
    let mut group: Vec<String> = Vec::new();

    for line in split_lines(txt) {
        let line = line.trim();

        if let Some(agent) = line.strip_prefix(USER_AGENT_PREFIX) {
            let agent = agent.trim();
            rules.entry(agent);
            group.clear();
            group.push(agent.to_string());
            continue;
        }

        // Directives outside a group fall through and end up as errors.
        if let Some(directive) = Directive::from_line(line).filter(|_| !group.is_empty()) {
            let value = value_after_colon(line);
            for agent in &group {
                rules.entry(agent).push(directive, value);
            }
        } else if has_prefix_ignore_case(line, SITEMAP_PREFIX) {
            rules.sitemaps.push(value_after_colon(line).to_string());
        } else if line.is_empty() || line.starts_with('#') {
            group.clear();
        } else {
            rules.errors.push(format!("Unmatched line: {line}"));
        }
    }

    rules
}

fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value.trim())
}

fn has_prefix_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on universal line boundaries. `\r\n` counts as a single break and a
/// trailing break does not yield an empty final line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                let line = &rest[..idx];
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_robots() {
        let txt = r#"
User-agent: *
Allow: /
Disallow: /admin
Disallow: /private/
Crawl-delay: 1.5

Sitemap: https://example.com/sitemap.xml
Sitemap: https://example.com/sitemap-blog.xml
"#;

        let rules = parse(txt);
        let star = rules.get("*").unwrap();
        assert_eq!(star.allow, vec!["/"]);
        assert_eq!(star.disallow, vec!["/admin", "/private/"]);
        assert_eq!(star.crawl_delay, vec!["1.5"]);
        assert_eq!(rules.sitemaps.len(), 2);
        assert!(rules.errors.is_empty());
    }

    #[test]
    fn test_user_agent_line_resets_group() {
        let txt = "User-agent: GPTBot\nUser-agent: CCBot\nDisallow: /\n";
        let rules = parse(txt);

        assert!(rules.names("GPTBot"));
        assert!(rules.get("GPTBot").unwrap().disallow.is_empty());
        assert_eq!(rules.get("CCBot").unwrap().disallow, vec!["/"]);
    }

    #[test]
    fn test_blank_line_orphans_directives() {
        let txt = "User-agent: *\n\nDisallow: /tmp\n";
        let rules = parse(txt);

        assert!(rules.get("*").unwrap().disallow.is_empty());
        assert_eq!(rules.errors, vec!["Unmatched line: Disallow: /tmp"]);
    }

    #[test]
    fn test_comment_clears_group() {
        let txt = "User-agent: *\n# closed\nAllow: /public\n";
        let rules = parse(txt);

        assert!(rules.get("*").unwrap().allow.is_empty());
        assert_eq!(rules.errors, vec!["Unmatched line: Allow: /public"]);
    }

    #[test]
    fn test_sitemap_ignores_group_and_case() {
        let txt = "User-agent: *\nSITEMAP: https://a.com/sitemap.xml\nDisallow: /x\n";
        let rules = parse(txt);

        assert_eq!(rules.sitemaps, vec!["https://a.com/sitemap.xml"]);
        // Sitemap lines do not close the group.
        assert_eq!(rules.get("*").unwrap().disallow, vec!["/x"]);
    }

    #[test]
    fn test_sitemap_value_keeps_url_colons() {
        let rules = parse("Sitemap: https://a.com:8443/map.xml");
        assert_eq!(rules.sitemaps, vec!["https://a.com:8443/map.xml"]);
        assert_eq!(rules.agent_count(), 0);
    }

    #[test]
    fn test_unmatched_lines_recorded_verbatim() {
        let txt = "user-agent: lower\nHost: example.com\nUser-agent: *\nNoindex: /x\n";
        let rules = parse(txt);

        assert_eq!(
            rules.errors,
            vec![
                "Unmatched line: user-agent: lower",
                "Unmatched line: Host: example.com",
                "Unmatched line: Noindex: /x",
            ]
        );
        assert!(!rules.names("lower"));
    }

    #[test]
    fn test_empty_disallow_value_kept() {
        let rules = parse("User-agent: *\nDisallow:\n");
        assert_eq!(rules.get("*").unwrap().disallow, vec![""]);
    }

    #[test]
    fn test_crlf_and_bare_cr_line_endings() {
        let crlf = parse("User-agent: *\r\nDisallow: /a\r\n");
        assert_eq!(crlf.get("*").unwrap().disallow, vec!["/a"]);
        assert!(crlf.errors.is_empty());

        let cr = parse("User-agent: *\rDisallow: /b\r");
        assert_eq!(cr.get("*").unwrap().disallow, vec!["/b"]);
    }

    #[test]
    fn test_repeated_agent_accumulates() {
        let txt = "User-agent: Bot\nDisallow: /a\n\nUser-agent: Bot\nDisallow: /a\nAllow: /b\n";
        let rules = parse(txt);
        let bot = rules.get("Bot").unwrap();

        assert_eq!(bot.disallow, vec!["/a", "/a"]);
        assert_eq!(bot.allow, vec!["/b"]);
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<_> = split_lines("a\r\nb\n\nc\u{2028}d\n").collect();
        assert_eq!(lines, vec!["a", "b", "", "c", "d"]);
        assert_eq!(split_lines("").count(), 0);
    }
}
