//! Extraction output units: hits, per-attribute groupings and the outcome

use crate::attribute::{AttributeDefinition, SourceField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized attribute value.
///
/// Untagged in JSON so numbers serialize as numbers, booleans as booleans
/// and everything else as strings - the shape legacy consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Numeric value (post unit-conversion)
    Number(f64),
    /// Presence flag
    Flag(bool),
    /// Text value
    Text(String),
}

impl AttributeValue {
    /// Borrow the text payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical string form used in dedup keys and storage columns.
    ///
    /// Whole floats render without a trailing `.0` (47.0 renders as `47`),
    /// matching how values appear in listing text.
    pub fn key_text(&self) -> String {
        match self {
            AttributeValue::Number(n) => format_number(*n),
            AttributeValue::Flag(b) => b.to_string(),
            AttributeValue::Text(s) => s.clone(),
        }
    }
}

/// Render a float without a redundant trailing `.0`
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Flag(b)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key_text())
    }
}

/// One matched occurrence of an attribute in a text field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionHit {
    /// Exact matched substring
    pub raw_value: String,

    /// Value after normalization, unit conversion and dictionary resolution
    pub normalized_value: AttributeValue,

    /// Unit after conversion, when the attribute is unit-bearing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Combined confidence (0..1), rounded to 3 decimals
    pub confidence: f64,

    /// Field the hit came from
    pub source_field: SourceField,

    /// Rule id that produced the hit
    pub rule_name: String,

    /// Match start offset into the field text
    pub start: usize,

    /// Match end offset into the field text
    pub end: usize,

    /// Surrounding text for audit
    pub context_window: String,

    /// Canonical dictionary entry name, when resolved through a dictionary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_match: Option<String>,
}

/// All deduplicated hits for one attribute.
///
/// Never present in an outcome with an empty `values` list; attributes that
/// matched nothing are omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeExtraction {
    /// Attribute slug
    pub slug: String,

    /// The definition the hits were evaluated under
    pub definition: AttributeDefinition,

    /// Deduplicated hits, highest-confidence instance per canonical value
    pub values: Vec<ExtractionHit>,
}

/// Run metadata stamped onto every outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMeta {
    /// Raw rule-hit volume before deduplication
    pub total_matches: usize,

    /// Attributes that survived with at least one value
    pub total_attributes: usize,

    /// Labels of every scanned field segment, in scan order
    pub fields_evaluated: Vec<String>,

    /// When the run happened; anchors downstream provenance timestamps
    pub generated_at: DateTime<Utc>,

    /// Taxonomy version the run was evaluated against
    pub version: String,
}

/// The typed result of one extraction run. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Per-attribute extractions, only attributes with at least one value
    pub attributes: Vec<AttributeExtraction>,

    /// Run metadata
    pub meta: OutcomeMeta,
}

impl ExtractionOutcome {
    /// Look up an attribute's extraction by slug
    pub fn attribute(&self, slug: &str) -> Option<&AttributeExtraction> {
        self.attributes.iter().find(|a| a.slug == slug)
    }
}
