use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// One scalar cell of a tabular record.
///
/// Ingest applies dynamic typing: cells that parse as numbers become
/// `Number`, empty cells become `Null`, everything else stays `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric coercion: numbers pass through, numeric-looking text parses,
    /// anything else (including null) is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Null => None,
        }
    }

    /// Text coercion: numbers render with their natural display form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(format!("{}", n))),
            Value::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// One row from either dataset, mapped by field name.
///
/// Records are immutable once loaded; the matching core only reads them.
/// Column order lives on the owning [`Dataset`], not on each row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing fields and explicit nulls both read as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }
}

/// A loaded dataset: header order plus rows, tagged with a source label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            label: label.into(),
            headers,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One candidate pairing produced by the engine.
///
/// Borrows the originating records; the engine does not own their lifecycle.
/// `match_detail` is present only when the identity match came from a partial
/// strategy (normalized-unequal strings with partial matching enabled).
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    pub record_a: &'a Record,
    pub record_b: &'a Record,
    /// Absolute difference of the two amounts; `None` when either side's
    /// amount field is missing or non-numeric.
    pub amount_difference: Option<f64>,
    pub amount_matched: bool,
    pub identity_matched: bool,
    pub match_detail: Option<String>,
}
