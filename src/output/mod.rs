//! Output reporters for different formats
//!
//! Supports a human-readable text listing and a JSON document.

use crate::changeset::ChangesetRecord;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Trait for output format reporters.
pub trait Reporter {
    /// Write records to the given output directory.
    /// The filename is determined by the reporter (e.g., "changesets.json").
    fn emit(&self, records: &[ChangesetRecord], output_dir: &Path) -> Result<(), ReportError>;
}

/// Text reporter also supports writing to stdout (for --format text).
pub struct TextReporter {
    pub use_stdout: bool,
}

impl TextReporter {
    pub fn new(use_stdout: bool) -> Self {
        Self { use_stdout }
    }
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Output format names accepted in config and on the command line.
pub const FORMATS: &[&str] = &["text", "json"];

pub mod json;
pub mod text;
