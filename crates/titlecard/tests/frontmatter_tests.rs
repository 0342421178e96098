//! Front matter parsing across the three header formats.

use chrono::{DateTime, FixedOffset, TimeZone};
use titlecard::{FrontMatter, FrontMatterError};

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 6, 7, 8, 9)
        .unwrap()
}

const YAML: &str = r#"---
title: "Rustで書くタイトルカード"
authors: ["Ann", "Bob"]
categories: ["Programming"]
tags: ["rust", "image", "cli"]
date: 2021-01-02T03:04:05+09:00
---

# Body
"#;

#[test]
fn test_yaml() {
    let fm = FrontMatter::parse(YAML, now()).unwrap();
    assert_eq!(fm.title, "Rustで書くタイトルカード");
    assert_eq!(fm.authors, "Ann, Bob");
    assert_eq!(fm.category, "Programming");
    assert_eq!(fm.tags, ["rust", "image", "cli"]);
    assert_eq!(fm.date.to_rfc3339(), "2021-01-02T03:04:05+09:00");
}

#[test]
fn test_toml_with_native_datetime() {
    let content = r#"+++
title = "Hello"
authors = "Ann"
categories = ["a", "b", "c"]
tags = ["t1", "t2", "t3", "t4", "t5"]
date = 2021-01-02T03:04:05Z
+++
body
"#;
    let fm = FrontMatter::parse(content, now()).unwrap();
    assert_eq!(fm.authors, "Ann");
    assert_eq!(fm.category, "a, b ...");
    assert_eq!(fm.tags, ["t1", "t2", "t3", "..."]);
    assert_eq!(fm.date.to_rfc3339(), "2021-01-02T03:04:05+00:00");
}

#[test]
fn test_toml_local_date() {
    let content = "+++\ntitle = \"t\"\nauthors = \"a\"\ncategories = [\"c\"]\ntags = [\"x\"]\nlastmod = 2022-03-04\n+++\n";
    let fm = FrontMatter::parse(content, now()).unwrap();
    assert_eq!(fm.date.to_rfc3339(), "2022-03-04T00:00:00+00:00");
}

#[test]
fn test_json() {
    let content = r#"{
  "title": "Hello",
  "authors": ["Ann", "Bob", "Cy"],
  "categories": ["one"],
  "tags": ["t"],
  "publishDate": "2020-12-31"
}

Body text.
"#;
    let fm = FrontMatter::parse(content, now()).unwrap();
    assert_eq!(fm.authors, "Ann et al.");
    assert_eq!(fm.date.to_rfc3339(), "2020-12-31T00:00:00+00:00");
}

#[test]
fn test_date_priority() {
    let content = "---\ntitle: t\nauthors: a\ncategories: [c]\ntags: [x]\npublishDate: 2020-01-01\nlastmod: 2021-01-01\ndate: 2022-01-01\n---\n";
    let fm = FrontMatter::parse(content, now()).unwrap();
    assert_eq!(fm.date.to_rfc3339(), "2022-01-01T00:00:00+00:00");
}

#[test]
fn test_missing_date_uses_now() {
    let content = "---\ntitle: t\nauthors: a\ncategories: [c]\ntags: [x]\n---\n";
    let fm = FrontMatter::parse(content, now()).unwrap();
    assert_eq!(fm.date, now());
}

#[test]
fn test_unparsable_date_is_error() {
    let content = "---\ntitle: t\nauthors: a\ncategories: [c]\ntags: [x]\ndate: yesterday\n---\n";
    let err = FrontMatter::parse(content, now()).unwrap_err();
    assert!(matches!(err, FrontMatterError::InvalidDate { key: "date", .. }));
}

#[test]
fn test_long_title_is_truncated() {
    let title = "x".repeat(100);
    let content = format!("---\ntitle: {title}\nauthors: a\ncategories: [c]\ntags: [x]\n---\n");
    let fm = FrontMatter::parse(&content, now()).unwrap();
    assert_eq!(fm.title, format!("{}...", "x".repeat(89)));
}

#[test]
fn test_wide_title_is_truncated_by_columns() {
    let title = "猫".repeat(50);
    let content = format!("---\ntitle: {title}\nauthors: a\ncategories: [c]\ntags: [x]\n---\n");
    let fm = FrontMatter::parse(&content, now()).unwrap();
    assert_eq!(fm.title, format!("{}...", "猫".repeat(44)));
}

#[test]
fn test_empty_items_are_ignored() {
    let content = "---\ntitle: t\nauthors: [\"\", \"Ann\"]\ncategories: [\"\", c]\ntags: [x, \"\"]\n---\n";
    let fm = FrontMatter::parse(content, now()).unwrap();
    assert_eq!(fm.authors, "Ann");
    assert_eq!(fm.category, "c");
    assert_eq!(fm.tags, ["x"]);
}

#[test]
fn test_missing_keys() {
    let cases = [
        ("---\nauthors: a\ncategories: [c]\ntags: [x]\n---\n", "title"),
        ("---\ntitle: \"\"\nauthors: a\ncategories: [c]\ntags: [x]\n---\n", "title"),
        ("---\ntitle: t\ncategories: [c]\ntags: [x]\n---\n", "authors"),
        ("---\ntitle: t\nauthors: a\ntags: [x]\n---\n", "categories"),
        ("---\ntitle: t\nauthors: a\ncategories: [c]\ntags: []\n---\n", "tags"),
    ];
    for (content, expected) in cases {
        match FrontMatter::parse(content, now()) {
            Err(FrontMatterError::Missing { key }) => assert_eq!(key, expected),
            other => panic!("expected missing {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_invalid_types() {
    let cases = [
        ("---\ntitle: [t]\nauthors: a\ncategories: [c]\ntags: [x]\n---\n", "title"),
        ("---\ntitle: t\nauthors: 3\ncategories: [c]\ntags: [x]\n---\n", "authors"),
        ("---\ntitle: t\nauthors: a\ncategories: c\ntags: [x]\n---\n", "categories"),
        ("---\ntitle: t\nauthors: a\ncategories: [c]\ntags: [1, 2]\n---\n", "tags"),
        ("---\ntitle: t\nauthors: a\ncategories: [c]\ntags: [x]\ndate: 5\n---\n", "date"),
    ];
    for (content, expected) in cases {
        match FrontMatter::parse(content, now()) {
            Err(FrontMatterError::InvalidType { key, .. }) => assert_eq!(key, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_no_front_matter() {
    let err = FrontMatter::parse("# Title\n\nJust text.\n", now()).unwrap_err();
    assert!(matches!(err, FrontMatterError::NoFrontMatter));
}

#[test]
fn test_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post.md");
    std::fs::write(&path, YAML).unwrap();
    let fm = FrontMatter::from_path(&path, now()).unwrap();
    assert_eq!(fm.authors, "Ann, Bob");

    let err = FrontMatter::from_path(dir.path().join("missing.md"), now()).unwrap_err();
    assert!(matches!(err, FrontMatterError::Io { .. }));
}
