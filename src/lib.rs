//! changeset-log-parser: Liquibase console output to changeset records
//!
//! This library scans the line-oriented output of a Liquibase run, extracts
//! every `path::id::author` changeset reference, and reconciles repeated
//! mentions into one ordered execution record per changeset.

pub mod changeset;
pub mod config;
pub mod output;
pub mod parser;
pub mod summary;

// Re-export commonly used types
pub use changeset::{ChangesetKey, ChangesetRecord};
pub use config::Config;
pub use parser::{Reconciler, match_line, parse_output};
pub use summary::ExecutionSummary;
