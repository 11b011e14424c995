//! Source-weighted confidence scoring.
//!
//! Product names are curated and high-signal; free-text descriptions are
//! noisier; inferred/programmatic values are treated conservatively.

use partlex_domain::SourceField;

/// Weight applied to a field label the weight table does not know.
///
/// Reachable only through the string-labelled legacy path; every
/// [`SourceField`] variant has an explicit weight.
pub const UNKNOWN_FIELD_WEIGHT: f64 = 0.75;

/// Reliability weight of a source field
pub fn source_field_weight(field: SourceField) -> f64 {
    match field {
        SourceField::Name => 1.0,
        SourceField::SpecSheet => 0.95,
        SourceField::Bullet => 0.85,
        SourceField::Description => 0.9,
        SourceField::ManualEntry => 1.0,
        SourceField::Inferred => 0.7,
    }
}

/// Reliability weight for a string field label (legacy snapshot path)
pub fn weight_for_label(label: &str) -> f64 {
    SourceField::parse(label)
        .map(source_field_weight)
        .unwrap_or(UNKNOWN_FIELD_WEIGHT)
}

/// Combine an attribute's base confidence with a source-field weight.
///
/// Clamped to 1.0 and rounded to 3 decimal places.
pub fn score(default_confidence: f64, field: SourceField) -> f64 {
    round3((default_confidence * source_field_weight(field)).min(1.0))
}

fn round3(n: f64) -> f64 {
    (n * 1000.0).round() / 1000.0
}
