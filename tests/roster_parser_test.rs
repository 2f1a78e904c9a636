//! Tests for roster text parsing.

mod common;

use attendee_lottery::{REQUIRED_HEADERS, parse};
use common::{HEADER, roster, row};

#[test]
fn test_empty_input_yields_empty_roster() {
    assert!(parse("").expect("parse").is_empty());
    assert!(parse("   \n  ").expect("parse").is_empty());
}

#[test]
fn test_header_only_skips_validation() {
    assert!(parse("not,a,real,header").expect("parse").is_empty());
}

#[test]
fn test_missing_columns_rejected() {
    let text = "参加枠名,ユーザー名,表示名\nA,b,c";
    let err = parse(text).expect_err("schema error");
    assert_eq!(err.missing.len(), 5);
    assert!(err.missing.contains(&"出欠ステータス".to_string()));
    assert!(err.to_string().contains("Schema error"));
}

#[test]
fn test_semantic_fields_mapped_by_header_name() {
    let text = "出席日時,出欠ステータス,参加ステータス,コメント,利用開始日,表示名,ユーザー名,参加枠名\n\
                19:00,出席,参加,hello,2024-01-01,Alice,alice,一般枠";
    let records = parse(text).expect("parse");
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.participation_frame(), "一般枠");
    assert_eq!(r.username(), "alice");
    assert_eq!(r.display_name(), "Alice");
    assert_eq!(r.participation_status(), "参加");
    assert_eq!(r.attendance_status(), "出席");
}

#[test]
fn test_quoted_field_with_comma_is_one_field() {
    let text = format!(
        "{}\n\"A, B\",user1,User One,2024-01-01,,参加,出席,19:00",
        HEADER
    );
    let records = parse(&text).expect("parse");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].participation_frame(), "A, B");
    assert_eq!(records[0].username(), "user1");
}

#[test]
fn test_short_rows_dropped_silently() {
    let text = roster(&[
        row("一般枠", "kept", "出席"),
        "一般枠,short,Short".to_string(),
        String::new(),
        row("一般枠", "also_kept", "欠席"),
    ]);
    let records = parse(&text).expect("parse");
    let names: Vec<_> = records.iter().map(|r| r.username().as_str()).collect();
    assert_eq!(names, vec!["kept", "also_kept"]);
}

#[test]
fn test_extra_columns_preserved_in_source_order() {
    let text = format!(
        "{},メール\n一般枠,alice,,2024-01-01,よろしく,参加,出席,19:00,alice@example.com",
        HEADER
    );
    let records = parse(&text).expect("parse");
    let extra = records[0].extra();

    let keys: Vec<_> = extra.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["利用開始日", "コメント", "出席日時", "メール"]);
    assert_eq!(extra.get("コメント"), Some("よろしく"));
    assert_eq!(extra.get("メール"), Some("alice@example.com"));
    assert_eq!(records[0].label(), "alice");
}

#[test]
fn test_missing_trailing_values_default_to_empty() {
    let text = format!(
        "{},メール\n一般枠,alice,Alice,2024-01-01,,参加,出席,19:00",
        HEADER
    );
    let records = parse(&text).expect("parse");
    assert_eq!(records[0].extra().get("メール"), Some(""));
}

#[test]
fn test_crlf_line_endings() {
    let text = roster(&[row("一般枠", "a", "出席"), row("一般枠", "b", "出席")]).replace('\n', "\r\n");
    let records = parse(&text).expect("parse");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].username(), "b");
    assert_eq!(records[1].extra().get("出席日時"), Some("2024-02-01 19:00"));
}

#[test]
fn test_duplicate_usernames_are_kept() {
    let text = roster(&[row("一般枠", "dup", "出席"), row("一般枠", "dup", "出席")]);
    assert_eq!(parse(&text).expect("parse").len(), 2);
}

#[test]
fn test_required_header_count() {
    assert_eq!(REQUIRED_HEADERS.len(), 8);
}

#[test]
fn test_byte_order_mark_prefix_accepted() {
    let text = format!("\u{feff}{}", roster(&[row("一般枠", "alice", "出席")]));
    let records = parse(&text).expect("parse");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].participation_frame(), "一般枠");
    assert_eq!(records[0].username(), "alice");
}
