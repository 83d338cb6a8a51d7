//! Liquibase console output parsing
//!
//! Two stages: `line` recognizes a changeset reference in a single line,
//! `reconcile` collapses repeated mentions across the whole output.

pub mod line;
pub mod reconcile;

pub use line::match_line;
pub use reconcile::{Reconciler, parse_output};
