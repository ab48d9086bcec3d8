//! Data model for accessibility audit results.
//!
//! Findings arrive as JSON produced by an external accessibility checker. The
//! types here are lenient on input: missing or `null` string fields become
//! empty strings, numbers and booleans become their text, any other
//! wrong-typed value becomes empty, and unknown fields are carried through
//! untouched, so a
//! `results.json` snapshot written by the reporter reads back the same way the
//! checker produced it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Severity bucket of a finding.
///
/// # Examples
///
/// ```
/// use audit_report_core::Severity;
///
/// assert_eq!(Severity::from_level("error"), Some(Severity::Error));
/// assert_eq!(Severity::from_level("ERROR"), None);
/// assert_eq!(Severity::Notice.to_string(), "notice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Notice,
}

impl Severity {
    /// Maps a raw `level` string onto a bucket.
    ///
    /// Only the exact lowercase names are recognised. Anything else returns
    /// `None` and is left out of every count.
    pub fn from_level(level: &str) -> Option<Self> {
        match level {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "notice" => Some(Self::Notice),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Notice => "notice",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issue reported by the accessibility checker.
///
/// `note_codes` is derived from `code` by
/// [`classify`](crate::classify::classify) and is overwritten every time the
/// finding is classified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Dot-delimited diagnostic code, e.g.
    /// `WCAG2AA.Principle1.Guideline1_1.1_1_1.H37`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    /// Kind label assigned by the checker.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: String,
    /// Raw severity text. See [`Finding::severity`].
    #[serde(default, deserialize_with = "null_as_empty")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// HTML snippet of the offending element.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub context: String,
    /// CSS selector of the offending element.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selector: String,
    /// Page the finding was reported on.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Guideline sub-clauses embedded in `code`.
    #[serde(default, deserialize_with = "strings_or_empty")]
    pub note_codes: Vec<String>,
    /// Checker fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Finding {
    /// Creates a finding with the fields the reporter interprets.
    pub fn new(code: impl Into<String>, level: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            level: level.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_location(mut self, context: impl Into<String>, selector: impl Into<String>) -> Self {
        self.context = context.into();
        self.selector = selector.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Severity bucket, or `None` when `level` is not recognised.
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_level(&self.level)
    }
}

/// Findings reported for a single page, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageBatch {
    pub url: String,
    #[serde(default)]
    pub results: Vec<Finding>,
}

/// The persisted history: one inner sequence per processed page, in
/// processing order.
pub type History = Vec<Vec<Finding>>;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?))
}

fn strings_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn value_as_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
