//! Parallel parsing of corpus documents.

pub mod parse_pool;

pub use parse_pool::{ParseBatch, ParsePool, SiteFailure, DEFAULT_WORKERS};
