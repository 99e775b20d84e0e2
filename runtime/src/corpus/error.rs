//! Fatal corpus loading errors. Any of these aborts the run before
//! aggregation starts.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress gzip corpus {}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus {} is not a JSON object of site to robots.txt text", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CorpusError {
    /// File the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            CorpusError::Read { path, .. }
            | CorpusError::Decompress { path, .. }
            | CorpusError::Json { path, .. } => path.as_path(),
        }
    }
}
