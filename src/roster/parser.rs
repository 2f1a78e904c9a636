//! Delimited-text roster parser.
//!
//! The first line is the header; every following line is one attendee.
//! Fields are comma separated and a double quote toggles a quoted span in
//! which commas are literal. Quote characters never reach the output and
//! every field is trimmed.

use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use super::record::{ExtraFields, Record};

/// Header label of the participation frame column.
pub const PARTICIPATION_FRAME: &str = "参加枠名";
/// Header label of the username column.
pub const USERNAME: &str = "ユーザー名";
/// Header label of the display name column.
pub const DISPLAY_NAME: &str = "表示名";
/// Header label of the enrollment date column.
pub const ENROLLMENT_DATE: &str = "利用開始日";
/// Header label of the comment column.
pub const COMMENT: &str = "コメント";
/// Header label of the participation status column.
pub const PARTICIPATION_STATUS: &str = "参加ステータス";
/// Header label of the attendance status column.
pub const ATTENDANCE_STATUS: &str = "出欠ステータス";
/// Header label of the attendance timestamp column.
pub const ATTENDANCE_TIMESTAMP: &str = "出席日時";

/// Columns every roster header must contain, in canonical order.
pub const REQUIRED_HEADERS: [&str; 8] = [
    PARTICIPATION_FRAME,
    USERNAME,
    DISPLAY_NAME,
    ENROLLMENT_DATE,
    COMMENT,
    PARTICIPATION_STATUS,
    ATTENDANCE_STATUS,
    ATTENDANCE_TIMESTAMP,
];

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Trims whitespace and byte order marks from both ends.
fn trim_field(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// The header row lacks one or more required columns.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Schema error: missing required column(s) {:?} at {}:{}", missing, file, line)]
pub struct SchemaError {
    /// Required columns absent from the header, in canonical order.
    pub missing: Vec<String>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SchemaError {
    /// Creates a new schema error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(missing: Vec<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            missing,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Splits one line into trimmed fields, honoring quoted spans.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            QUOTE => quoted = !quoted,
            DELIMITER if !quoted => {
                fields.push(trim_field(&current).to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(trim_field(&current).to_string());
    fields
}

/// Column positions resolved from one header row.
#[derive(Debug)]
struct ColumnLayout {
    participation_frame: usize,
    username: usize,
    display_name: usize,
    participation_status: usize,
    attendance_status: usize,
    extra: Vec<(usize, String)>,
}

impl ColumnLayout {
    /// Resolves positions, or reports every required column that is absent.
    fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let missing: Vec<String> = REQUIRED_HEADERS
            .iter()
            .filter(|required| !headers.iter().any(|h| h == *required))
            .map(|required| required.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(SchemaError::new(missing));
        }

        let position = |name: &str| headers.iter().position(|h| h == name).unwrap_or_default();
        let semantic = [
            PARTICIPATION_FRAME,
            USERNAME,
            DISPLAY_NAME,
            PARTICIPATION_STATUS,
            ATTENDANCE_STATUS,
        ];

        let mut extra: Vec<(usize, String)> = Vec::new();
        for (idx, name) in headers.iter().enumerate() {
            if name.is_empty() || semantic.contains(&name.as_str()) {
                continue;
            }
            if extra.iter().any(|(_, seen)| seen == name) {
                continue;
            }
            extra.push((idx, name.clone()));
        }

        Ok(Self {
            participation_frame: position(PARTICIPATION_FRAME),
            username: position(USERNAME),
            display_name: position(DISPLAY_NAME),
            participation_status: position(PARTICIPATION_STATUS),
            attendance_status: position(ATTENDANCE_STATUS),
            extra,
        })
    }

    /// Builds a record from one row; absent values become empty strings.
    fn record(&self, values: &[String]) -> Record {
        let value = |idx: usize| values.get(idx).cloned().unwrap_or_default();

        let mut extra = ExtraFields::new();
        for (idx, name) in &self.extra {
            extra.insert(name.clone(), value(*idx));
        }

        Record::new(
            value(self.participation_frame),
            value(self.username),
            value(self.display_name),
            value(self.participation_status),
            value(self.attendance_status),
        )
        .with_extra(extra)
    }
}

/// Parses roster text into records.
///
/// Text with fewer than two lines yields an empty roster without header
/// validation. Rows with fewer fields than [`REQUIRED_HEADERS`] are dropped.
///
/// # Errors
///
/// Returns [`SchemaError`] if the header lacks a required column.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse(text: &str) -> Result<Vec<Record>, SchemaError> {
    let lines: Vec<&str> = trim_field(text).lines().collect();
    if lines.len() < 2 {
        debug!(lines = lines.len(), "No data rows in input");
        return Ok(Vec::new());
    }

    let headers = split_fields(lines[0]);
    let layout = ColumnLayout::resolve(&headers).inspect_err(|e| {
        warn!(missing = ?e.missing, "Roster header rejected");
    })?;

    let mut roster = Vec::with_capacity(lines.len() - 1);
    let mut dropped = 0usize;

    for (offset, line) in lines.iter().enumerate().skip(1) {
        let values = split_fields(line);
        if values.len() < REQUIRED_HEADERS.len() {
            debug!(line = offset + 1, fields = values.len(), "Dropping short row");
            dropped += 1;
            continue;
        }
        roster.push(layout.record(&values));
    }

    info!(records = roster.len(), dropped, "Roster parsed");
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_fields() {
        assert_eq!(split_fields("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma_is_literal() {
        assert_eq!(split_fields("\"A, B\",user1"), vec!["A, B", "user1"]);
    }

    #[test]
    fn test_split_trailing_delimiter_yields_empty_field() {
        assert_eq!(split_fields("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_quotes_are_stripped_mid_field() {
        assert_eq!(split_fields("say \"hi\" there"), vec!["say hi there"]);
    }

    #[test]
    fn test_split_strips_byte_order_mark() {
        assert_eq!(split_fields("\u{feff}a,b \u{feff}"), vec!["a", "b"]);
    }

    #[test]
    fn test_layout_reports_all_missing_columns() {
        let headers: Vec<String> = ["参加枠名", "ユーザー名", "表示名"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let err = ColumnLayout::resolve(&headers).unwrap_err();
        assert_eq!(
            err.missing,
            vec!["利用開始日", "コメント", "参加ステータス", "出欠ステータス", "出席日時"]
        );
    }
}
