//! CLI implementation for the robots-census binary.

pub mod analyze_cmd;
pub mod args;
pub mod output;
