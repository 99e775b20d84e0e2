//! Read a corpus from disk, gzip-compressed or plain JSON.

use super::{Corpus, CorpusError};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Load a corpus file. Gzip is detected from the magic bytes, not the extension.
pub fn load(path: &Path) -> Result<Corpus, CorpusError> {
    let raw = std::fs::read(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let corpus = parse_corpus(path, &raw)?;
    info!(
        path = %path.display(),
        sites = corpus.len(),
        with_robots = corpus.with_robots(),
        "loaded corpus"
    );
    Ok(corpus)
}

/// Decode corpus bytes. `path` only labels errors.
pub fn parse_corpus(path: &Path, raw: &[u8]) -> Result<Corpus, CorpusError> {
    let json = if raw.starts_with(&GZIP_MAGIC) {
        debug!(path = %path.display(), "decompressing gzip corpus");
        let mut buf = Vec::new();
        GzDecoder::new(raw)
            .read_to_end(&mut buf)
            .map_err(|source| CorpusError::Decompress {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        raw.to_vec()
    };

    serde_json::from_slice(&json).map_err(|source| CorpusError::Json {
        path: path.to_path_buf(),
        source,
    })
}
