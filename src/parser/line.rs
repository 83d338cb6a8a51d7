//! Single-line changeset matcher
//!
//! Liquibase identifies a changeset as `<changelog-path>::<id>::<author>`.
//! Console lines carry that triplet somewhere after arbitrary prefix content
//! (timestamps, log level, thread name):
//!
//! ```text
//! INFO 10:42:01 [main] ChangeSet db/changelog.xml::create-users::alice ran successfully in 12ms
//! db/changelog.xml::add-index::bob: bob failed
//! ```

use crate::changeset::ChangesetRecord;
use regex::Regex;
use std::sync::LazyLock;

const DELIMITER: &str = "::";

/// Three `::`-separated segments, none containing a colon. The path segment
/// may be empty.
static CHANGESET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:]*)::([^:]+)::([^:]+)").expect("Invalid changeset pattern")
});

/// Try to extract a changeset reference from one console line.
///
/// The first `::` in the line selects the whitespace-delimited token that is
/// matched against `path::id::author`. Returns `None` when the line has no
/// `::` or the token does not have the three-segment shape.
///
/// The record is marked failed when the line contains `"<author> failed"`.
///
/// Known limitations, kept for compatibility with existing report consumers:
/// - a path, id or author containing whitespace splits the token and the
///   line is skipped or mis-attributed;
/// - a colon inside a segment (e.g. `C:\changelog.xml`) prevents a match;
/// - the failure check is a plain substring search, so unrelated text that
///   happens to read `"<author> failed"` marks the changeset failed.
pub fn match_line(line: &str) -> Option<ChangesetRecord> {
    let delimiter = line.find(DELIMITER)?;
    let token = isolate_token(line, delimiter);

    let captures = CHANGESET_PATTERN.captures(token)?;
    let path = captures.get(1).map_or("", |m| m.as_str());
    let id = captures.get(2)?.as_str();
    let author = captures.get(3)?.as_str();

    let failed = line.contains(&format!("{author} failed"));

    Some(ChangesetRecord::new(path, id, author).with_status(!failed))
}

/// Slice out the whitespace-delimited token containing the byte offset
/// `delimiter`.
fn isolate_token(line: &str, delimiter: usize) -> &str {
    let start = line[..delimiter]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let end = line[delimiter..]
        .find(char::is_whitespace)
        .map_or(line.len(), |i| delimiter + i);
    &line[start..end]
}
