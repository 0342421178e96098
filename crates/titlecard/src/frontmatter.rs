//! Markdown front matter.
//!
//! The header of a content file is read as YAML (between `---` lines), TOML
//! (between `+++` lines) or a JSON object at the top of the file, and the
//! fields a card needs are pulled out of it and shortened to fit.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

const KEY_TITLE: &str = "title";
const KEY_AUTHORS: &str = "authors";
const KEY_CATEGORIES: &str = "categories";
const KEY_TAGS: &str = "tags";
/// Date keys in priority order.
const DATE_KEYS: [&str; 3] = ["date", "lastmod", "publishDate"];

/// Display columns a title or author string may occupy before it is cut.
pub const MAX_TEXT_WIDTH: usize = 89;
const MAX_CATEGORIES: usize = 2;
const MAX_TAGS: usize = 3;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("no front matter found")]
    NoFrontMatter,

    #[error("front matter is not closed by a {0:?} line")]
    Unterminated(&'static str),

    #[error("front matter is not a key/value map")]
    NotAMap,

    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front matter key {key:?} is missing or empty")]
    Missing { key: &'static str },

    #[error("front matter key {key:?} has an invalid type: expected {expected}")]
    InvalidType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("failed to parse {key:?} value {value:?}: supported formats are RFC 3339 and YYYY-MM-DD")]
    InvalidDate { key: &'static str, value: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The parts of a document's front matter that appear on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    /// One name, two names joined by `", "`, or the first name and `et al.`
    pub authors: String,
    /// Up to two categories joined by `", "`, followed by `" ..."` if more.
    pub category: String,
    /// Up to three tags, followed by a `"..."` tag if more.
    pub tags: Vec<String>,
    pub date: DateTime<FixedOffset>,
}

impl FrontMatter {
    /// Read and parse the front matter of the file at `path`.
    ///
    /// `now` is used as the date when the header has none.
    pub fn from_path(
        path: impl AsRef<Path>,
        now: DateTime<FixedOffset>,
    ) -> Result<Self, FrontMatterError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FrontMatterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, now)
    }

    /// Parse the front matter at the top of `content`.
    pub fn parse(content: &str, now: DateTime<FixedOffset>) -> Result<Self, FrontMatterError> {
        let map = read_header(content)?;

        let title = required_string(&map, KEY_TITLE)?;
        let authors = match map.get(KEY_AUTHORS) {
            Some(Value::Array(_)) => join_authors(string_items(&map, KEY_AUTHORS)?),
            _ => required_string(&map, KEY_AUTHORS)?,
        };
        let category = join_categories(string_items(&map, KEY_CATEGORIES)?);
        let tags = limit_tags(string_items(&map, KEY_TAGS)?);
        let date = match content_date(&map)? {
            Some(date) => date,
            None => {
                tracing::warn!(
                    "front matter has none of {}; using the current time",
                    DATE_KEYS.join(", ")
                );
                now
            }
        };

        Ok(Self {
            title,
            authors,
            category,
            tags,
            date,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderFormat {
    Yaml,
    Toml,
    Json,
}

/// Locate the header and return its format and raw text.
fn split_header(content: &str) -> Result<(HeaderFormat, &str), FrontMatterError> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    if content.starts_with('{') {
        return Ok((HeaderFormat::Json, content));
    }

    let mut lines = content.split_inclusive('\n');
    let first = lines.next().ok_or(FrontMatterError::NoFrontMatter)?;
    let (format, delimiter) = match first.trim_end() {
        "---" => (HeaderFormat::Yaml, "---"),
        "+++" => (HeaderFormat::Toml, "+++"),
        _ => return Err(FrontMatterError::NoFrontMatter),
    };

    let start = first.len();
    let mut end = start;
    for line in lines {
        if line.trim_end() == delimiter {
            return Ok((format, &content[start..end]));
        }
        end += line.len();
    }
    Err(FrontMatterError::Unterminated(delimiter))
}

fn read_header(content: &str) -> Result<Map<String, Value>, FrontMatterError> {
    let (format, header) = split_header(content)?;
    let value = match format {
        HeaderFormat::Yaml => serde_yaml::from_str::<Value>(header)?,
        HeaderFormat::Toml => toml_to_json(toml::Value::Table(toml::from_str(header)?)),
        HeaderFormat::Json => serde_json::Deserializer::from_str(header)
            .into_iter::<Value>()
            .next()
            .ok_or(FrontMatterError::NoFrontMatter)??,
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(FrontMatterError::NotAMap),
    }
}

/// TOML datetimes become their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

fn required_string(map: &Map<String, Value>, key: &'static str) -> Result<String, FrontMatterError> {
    match map.get(key) {
        None | Some(Value::Null) => Err(FrontMatterError::Missing { key }),
        Some(Value::String(s)) if s.is_empty() => Err(FrontMatterError::Missing { key }),
        Some(Value::String(s)) => Ok(truncate_to_width(s, MAX_TEXT_WIDTH)),
        Some(_) => Err(FrontMatterError::InvalidType {
            key,
            expected: "string",
        }),
    }
}

/// Non-empty string items of an array; at least one is required.
fn string_items(map: &Map<String, Value>, key: &'static str) -> Result<Vec<String>, FrontMatterError> {
    let invalid = FrontMatterError::InvalidType {
        key,
        expected: "array of strings",
    };
    let items = match map.get(key) {
        None | Some(Value::Null) => return Err(FrontMatterError::Missing { key }),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(invalid),
    };

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) if s.is_empty() => {}
            Value::String(s) => strings.push(s.clone()),
            _ => return Err(invalid),
        }
    }
    if strings.is_empty() {
        return Err(FrontMatterError::Missing { key });
    }
    Ok(strings)
}

fn join_authors(authors: Vec<String>) -> String {
    match authors.len() {
        0 | 1 => authors.concat(),
        2 => authors.join(", "),
        _ => format!("{} et al.", authors[0]),
    }
}

fn join_categories(categories: Vec<String>) -> String {
    if categories.len() > MAX_CATEGORIES {
        format!("{} ...", categories[..MAX_CATEGORIES].join(", "))
    } else {
        categories.join(", ")
    }
}

fn limit_tags(mut tags: Vec<String>) -> Vec<String> {
    if tags.len() > MAX_TAGS {
        tags.truncate(MAX_TAGS);
        tags.push("...".to_string());
    }
    tags
}

/// The first date key that is present, parsed.
fn content_date(map: &Map<String, Value>) -> Result<Option<DateTime<FixedOffset>>, FrontMatterError> {
    for key in DATE_KEYS {
        match map.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => {
                return parse_date(s).map(Some).ok_or_else(|| FrontMatterError::InvalidDate {
                    key,
                    value: s.clone(),
                });
            }
            Some(_) => {
                return Err(FrontMatterError::InvalidType {
                    key,
                    expected: "date string",
                });
            }
        }
    }
    Ok(None)
}

/// RFC 3339, or a date / local datetime taken as UTC.
fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().fixed_offset());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc().fixed_offset())
}

/// Cut `s` to at most `max` display columns, appending `...` if anything
/// was cut. Wide East Asian characters take two columns.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            out.push_str("...");
            break;
        }
        out.push(c);
        width += w;
    }
    out
}
