//! Aggregate counts over reconciled changeset records.

use crate::changeset::ChangesetRecord;
use serde::Serialize;

/// Success/failure totals for one Liquibase run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,

    /// Distinct non-empty changelog paths, in first-seen order.
    pub changelogs: Vec<String>,
}

impl ExecutionSummary {
    pub fn from_records(records: &[ChangesetRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.successfully_executed {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }

            if !record.path.is_empty() && !summary.changelogs.contains(&record.path) {
                summary.changelogs.push(record.path.clone());
            }
        }

        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// The records that did not execute successfully.
pub fn failed_records(records: &[ChangesetRecord]) -> Vec<&ChangesetRecord> {
    records.iter().filter(|r| !r.successfully_executed).collect()
}
