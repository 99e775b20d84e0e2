//! Robots.txt census runner: corpus loading, bounded parallel parsing,
//! aggregation, and the command-line surface.

pub mod census;
pub mod cli;
pub mod corpus;
pub mod pool;
