//! Human-readable text output reporter
//!
//! One line per reconciled changeset followed by a summary:
//! ```text
//! OK     db/changelog.xml::create-users::alice
//! FAILED db/changelog.xml::add-index::bob
//! 2 changeset(s): 1 succeeded, 1 failed
//! ```

use crate::changeset::ChangesetRecord;
use crate::output::{ReportError, Reporter, TextReporter};
use crate::summary::ExecutionSummary;
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

fn format_record(record: &ChangesetRecord) -> String {
    let status = if record.successfully_executed {
        "OK"
    } else {
        "FAILED"
    };
    format!("{:<6} {}\n", status, record)
}

fn format_all(records: &[ChangesetRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&format_record(record));
    }

    let summary = ExecutionSummary::from_records(records);
    // Using write! on String is infallible, but we handle the result properly.
    let _ = writeln!(
        output,
        "{} changeset(s): {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    output
}

impl Reporter for TextReporter {
    /// Emit records as human-readable text.
    ///
    /// If `use_stdout` is true, writes to stdout. Otherwise writes
    /// `changesets.txt` to the given `output_dir`, creating it if needed.
    fn emit(&self, records: &[ChangesetRecord], output_dir: &Path) -> Result<(), ReportError> {
        let text = format_all(records);

        if self.use_stdout {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            handle.flush()?;
        } else {
            std::fs::create_dir_all(output_dir)?;
            let path = output_dir.join("changesets.txt");
            std::fs::write(path, text)?;
        }

        Ok(())
    }
}
