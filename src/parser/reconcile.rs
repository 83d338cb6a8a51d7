//! Changeset stream reconciliation
//!
//! Liquibase mentions the same changeset several times while it runs it
//! (an optimistic "running" line, then "ran" or "failed"). The reconciler
//! collapses consecutive mentions into one record, keeping first-seen order,
//! and lets a later failure override an earlier success. A later success
//! never un-fails an entry.

use crate::changeset::ChangesetRecord;
use crate::parser::line::match_line;
use tracing::{debug, trace};

/// Accumulates changeset records from console lines in order.
///
/// Only the most recently accepted record is compared against incoming
/// ones. A changeset that reappears after a different changeset is appended
/// again.
#[derive(Debug, Default)]
pub struct Reconciler {
    last: Option<ChangesetRecord>,
    records: Vec<ChangesetRecord>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one console line. Surrounding whitespace is trimmed; lines
    /// without a changeset reference are ignored.
    pub fn push_line(&mut self, line: &str) {
        if let Some(record) = match_line(line.trim()) {
            self.push(record);
        }
    }

    /// Feed one parsed record.
    pub fn push(&mut self, record: ChangesetRecord) {
        match &self.last {
            Some(last) if last.is_same_changeset(&record) => {
                if last.successfully_executed && !record.successfully_executed {
                    debug!(changeset = %record, "changeset failed after success, replacing entry");
                    self.records.pop();
                    self.records.push(record.clone());
                } else {
                    trace!(changeset = %record, "repeated changeset mention ignored");
                }
            }
            _ => {
                debug!(
                    changeset = %record,
                    success = record.successfully_executed,
                    "changeset observed"
                );
                self.records.push(record.clone());
            }
        }
        self.last = Some(record);
    }

    /// Records accepted so far, in first-seen order.
    pub fn records(&self) -> &[ChangesetRecord] {
        &self.records
    }

    pub fn finish(self) -> Vec<ChangesetRecord> {
        self.records
    }
}

/// Parse the complete output of a Liquibase run into reconciled records.
///
/// Lines are separated by `"\n"`; a trailing `"\r"` is removed by trimming.
pub fn parse_output(output: &str) -> Vec<ChangesetRecord> {
    let mut reconciler = Reconciler::new();
    for line in output.split('\n') {
        reconciler.push_line(line);
    }
    reconciler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_output("").is_empty());
    }

    #[test]
    fn test_single_successful_changeset() {
        let records = parse_output("a.xml::t1::kb: ChangeSet a.xml::t1::kb ran successfully in 5ms");
        assert_eq!(records, vec![ChangesetRecord::new("a.xml", "t1", "kb")]);
    }

    #[test]
    fn test_failure_after_success_replaces_entry() {
        let records = parse_output("a.xml::t1::kb: will run\na.xml::t1::kb: kb failed");
        assert_eq!(records, vec![ChangesetRecord::failed("a.xml", "t1", "kb")]);
    }

    #[test]
    fn test_success_after_failure_does_not_replace_entry() {
        let records = parse_output("a.xml::t1::kb: kb failed\na.xml::t1::kb: ran successfully");
        assert_eq!(records, vec![ChangesetRecord::failed("a.xml", "t1", "kb")]);
    }

    #[test]
    fn test_noise_lines_are_ignored() {
        let output = "\
a.xml::t1::kb: ran successfully
Liquibase: Update has been successful.
a.xml::t2::kb: ran successfully";
        let records = parse_output(output);
        assert_eq!(
            records,
            vec![
                ChangesetRecord::new("a.xml", "t1", "kb"),
                ChangesetRecord::new("a.xml", "t2", "kb"),
            ]
        );
    }

    #[test]
    fn test_repeated_mentions_collapse() {
        let output = "\
Running Changeset: a.xml::t1::kb
ChangeSet a.xml::t1::kb ran successfully in 5ms
a.xml::t1::kb: done
Running Changeset: a.xml::t2::jd
a.xml::t2::jd: jd failed";
        let records = parse_output(output);
        assert_eq!(
            records,
            vec![
                ChangesetRecord::new("a.xml", "t1", "kb"),
                ChangesetRecord::failed("a.xml", "t2", "jd"),
            ]
        );
    }

    #[test]
    fn test_unresolvable_reference_is_skipped() {
        let output = "a.xml::create users::kb ran\nerror in module::function";
        assert!(parse_output(output).is_empty());
    }

    #[test]
    fn test_non_adjacent_repeat_is_appended_again() {
        let output = "a.xml::t1::kb\na.xml::t2::kb\na.xml::t1::kb";
        let records = parse_output(output);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], records[2]);
    }

    #[test]
    fn test_failure_after_intermediate_repeat() {
        // fail, success (ignored), fail again: still a single failed entry.
        let output = "a.xml::t1::kb: kb failed\na.xml::t1::kb: ok\na.xml::t1::kb: kb failed";
        let records = parse_output(output);
        assert_eq!(records, vec![ChangesetRecord::failed("a.xml", "t1", "kb")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = parse_output("a.xml::t1::kb: ok\r\na.xml::t2::kb: ok\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "t2");
    }

    #[test]
    fn test_streaming_matches_batch() {
        let output = "a.xml::t1::kb: ok\nnoise\na.xml::t1::kb: kb failed\nb.xml::t9::jd";
        let mut reconciler = Reconciler::new();
        for line in output.lines() {
            reconciler.push_line(line);
        }
        assert_eq!(reconciler.records().len(), 2);
        assert_eq!(reconciler.finish(), parse_output(output));
    }

    #[test]
    fn test_snapshot_mixed_run() {
        let output = "\
Liquibase Community 4.25.0 by Liquibase
Running Changeset: db/changelog.xml::create-users::alice
ChangeSet db/changelog.xml::create-users::alice ran successfully in 12ms
Running Changeset: db/changelog.xml::add-index::bob
db/changelog.xml::add-index::bob: bob failed
Liquibase: Update has failed.";
        let records = parse_output(output);
        insta::assert_json_snapshot!(records, @r#"
        [
          {
            "path": "db/changelog.xml",
            "id": "create-users",
            "author": "alice",
            "successfullyExecuted": true
          },
          {
            "path": "db/changelog.xml",
            "id": "add-index",
            "author": "bob",
            "successfullyExecuted": false
          }
        ]
        "#);
    }

    fn record_strategy() -> impl Strategy<Value = ChangesetRecord> {
        (0..2usize, 0..3usize, 0..2usize, any::<bool>()).prop_map(|(p, i, a, ok)| {
            ChangesetRecord::new(
                ["a.xml", "db/b.yaml"][p],
                ["t1", "t2", "create-users"][i],
                ["kb", "jd"][a],
            )
            .with_status(ok)
        })
    }

    fn render(records: &[ChangesetRecord]) -> String {
        records
            .iter()
            .map(ChangesetRecord::to_status_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    proptest! {
        #[test]
        fn lines_without_delimiter_never_match(line in "[^:]*") {
            prop_assert!(match_line(&line).is_none());
        }

        #[test]
        fn three_segment_lines_match_exactly(
            path in "[a-z/._-]{0,12}",
            id in "[A-Za-z0-9_-]{1,12}",
            author in "[a-z]{1,8}",
        ) {
            let line = format!("{path}::{id}::{author}: ChangeSet ran");
            let record = match_line(&line);
            prop_assert_eq!(record, Some(ChangesetRecord::new(path, id, author)));
        }

        #[test]
        fn reconciling_twice_is_idempotent(
            records in prop::collection::vec(record_strategy(), 0..30)
        ) {
            let once = parse_output(&render(&records));
            let twice = parse_output(&render(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn output_preserves_first_appearance_order(
            records in prop::collection::vec(record_strategy(), 0..30)
        ) {
            let output = parse_output(&render(&records));

            let mut expected: Vec<String> = Vec::new();
            for record in &records {
                let key = record.to_string();
                if !expected.contains(&key) {
                    expected.push(key);
                }
            }
            let mut seen: Vec<String> = Vec::new();
            for record in &output {
                let key = record.to_string();
                if !seen.contains(&key) {
                    seen.push(key);
                }
            }
            prop_assert_eq!(seen, expected);
        }
    }
}
