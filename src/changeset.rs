//! Changeset execution records
//!
//! A `ChangesetRecord` is one observation about a changeset parsed from a
//! single console line. Two records describe the same changeset when their
//! `(path, id, author)` composite keys are equal, regardless of status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed observation about a changeset's execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetRecord {
    /// Changelog file that declared the changeset. Empty when the line
    /// did not carry a path segment.
    pub path: String,

    /// The changeset's declared identifier.
    pub id: String,

    /// The changeset's declared author.
    pub author: String,

    /// `false` once a failure marker was observed for this changeset.
    pub successfully_executed: bool,
}

/// Borrowed composite key identifying a changeset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangesetKey<'a> {
    pub path: &'a str,
    pub id: &'a str,
    pub author: &'a str,
}

impl ChangesetRecord {
    /// Create a record for a successfully executed changeset.
    pub fn new(path: impl Into<String>, id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            id: id.into(),
            author: author.into(),
            successfully_executed: true,
        }
    }

    /// Create a record for a changeset that failed.
    pub fn failed(
        path: impl Into<String>,
        id: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self::new(path, id, author).with_status(false)
    }

    pub fn with_status(mut self, successfully_executed: bool) -> Self {
        self.successfully_executed = successfully_executed;
        self
    }

    pub fn key(&self) -> ChangesetKey<'_> {
        ChangesetKey {
            path: &self.path,
            id: &self.id,
            author: &self.author,
        }
    }

    /// True when both records refer to the same changeset, ignoring status.
    pub fn is_same_changeset(&self, other: &ChangesetRecord) -> bool {
        self.key() == other.key()
    }

    /// Render this record as a single console line carrying only its final
    /// status. Parsing the line yields an equal record.
    pub fn to_status_line(&self) -> String {
        if self.successfully_executed {
            format!("{self}: ChangeSet {self} ran successfully")
        } else {
            format!("{self}: {} failed", self.author)
        }
    }
}

impl fmt::Display for ChangesetKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.path, self.id, self.author)
    }
}

impl fmt::Display for ChangesetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key().fmt(f)
    }
}
