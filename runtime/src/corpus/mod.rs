//! Site corpus input: site id to raw robots.txt text.

pub mod error;
pub mod loader;

pub use error::CorpusError;
pub use loader::{load, parse_corpus};

use serde::Deserialize;
use std::collections::BTreeMap;

/// Sites to census. A missing or empty text means no robots.txt was observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    sites: BTreeMap<String, Option<String>>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Number of sites with a non-empty robots.txt.
    pub fn with_robots(&self) -> usize {
        self.documents().count()
    }

    /// Sites that have robots.txt text to parse.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sites.iter().filter_map(|(site, text)| match text.as_deref() {
            Some(text) if !text.is_empty() => Some((site.as_str(), text)),
            _ => None,
        })
    }

    /// Sites with no robots.txt observed.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.sites
            .iter()
            .filter(|(_, text)| text.as_deref().map_or(true, str::is_empty))
            .map(|(site, _)| site.as_str())
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            sites: iter
                .into_iter()
                .map(|(site, text)| (site.into(), Some(text.into())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_skip_empty_and_null() {
        let corpus: Corpus =
            serde_json::from_str(r#"{"a.com": "User-agent: *", "b.com": "", "c.com": null}"#)
                .unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.with_robots(), 1);
        assert_eq!(corpus.documents().next(), Some(("a.com", "User-agent: *")));
        assert_eq!(corpus.missing().collect::<Vec<_>>(), vec!["b.com", "c.com"]);
    }

    #[test]
    fn test_from_iter() {
        let corpus: Corpus = [("a.com", "x"), ("b.com", "")].into_iter().collect();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.with_robots(), 1);
    }
}
