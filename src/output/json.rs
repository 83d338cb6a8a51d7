//! JSON reporter
//!
//! Writes `changesets.json`: the run summary plus every reconciled record,
//! for dashboards and build-result pages.

use crate::changeset::ChangesetRecord;
use crate::output::{JsonReporter, ReportError, Reporter};
use crate::summary::ExecutionSummary;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: ExecutionSummary,
    changesets: &'a [ChangesetRecord],
}

impl Reporter for JsonReporter {
    fn emit(&self, records: &[ChangesetRecord], output_dir: &Path) -> Result<(), ReportError> {
        std::fs::create_dir_all(output_dir)?;

        let report = JsonReport {
            summary: ExecutionSummary::from_records(records),
            changesets: records,
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;

        let path = output_dir.join("changesets.json");
        std::fs::write(path, json)?;

        Ok(())
    }
}
