//! Value resolution: capture extraction, normalization, unit conversion and
//! dictionary canonicalization.
//!
//! Per-match failures here are locally absorbed - an unparseable numeric
//! capture or an unknown unit pair falls back to the raw value instead of
//! dropping the match. Downstream consumers filter by confidence; losing a
//! hit outright is worse than keeping an unresolved one.

use crate::context::{Canonicalizer, CompiledAttribute, CompiledRule, ExtractionContext};
use partlex_domain::{AttributeValue, DataType, Normalise};
use regex::Captures;

/// Chars of surrounding text kept on each side of a match for audit
const CONTEXT_RADIUS: usize = 40;

/// A single resolved regex match, before confidence scoring
#[derive(Debug, Clone)]
pub(crate) struct ResolvedMatch {
    pub raw_value: String,
    pub normalized_value: AttributeValue,
    pub unit: Option<String>,
    pub dictionary_match: Option<String>,
    pub start: usize,
    pub end: usize,
    pub context_window: String,
}

/// Resolve one capture set into a typed, canonicalized value
pub(crate) fn resolve_match(
    attr: &CompiledAttribute,
    context: &ExtractionContext,
    compiled: &CompiledRule,
    caps: &Captures<'_>,
    field_text: &str,
) -> ResolvedMatch {
    let whole = caps
        .get(0)
        .expect("capture group 0 always participates in a match");

    // Captured value: named group, then group 1, then the whole match
    let value_capture = caps
        .name(&compiled.rule.capture_group)
        .or_else(|| caps.get(1))
        .unwrap_or(whole);
    let raw_value = value_capture.as_str().to_string();

    let captured_unit = caps
        .name(&compiled.rule.unit_capture_group)
        .map(|m| m.as_str().trim().to_string())
        .filter(|u| !u.is_empty());

    let mut normalized = apply_normalise(compiled.rule.normalise, &raw_value);

    let definition = &attr.definition;
    let mut unit = captured_unit.clone();
    if definition.data_type == DataType::Number {
        if let Some(canonical_unit) = &definition.unit {
            let (converted, converted_unit) =
                convert_unit(normalized, captured_unit, canonical_unit);
            normalized = converted;
            unit = converted_unit;
        }
    }

    let mut dictionary_match = None;
    if let AttributeValue::Text(text) = &normalized {
        let (canonical, matched) = canonicalize(attr.canonicalizer, attr, context, text);
        normalized = canonical;
        dictionary_match = matched;
    }

    // A hit on a boolean attribute is a presence signal; the matched token
    // stays available in raw_value.
    if definition.data_type == DataType::Boolean {
        normalized = AttributeValue::Flag(true);
    }

    ResolvedMatch {
        raw_value,
        normalized_value: normalized,
        unit,
        dictionary_match,
        start: whole.start(),
        end: whole.end(),
        context_window: context_window(field_text, whole.start(), whole.end()),
    }
}

/// Apply the rule's normalization mode to a captured string
fn apply_normalise(normalise: Normalise, raw: &str) -> AttributeValue {
    let trimmed = raw.trim();
    match normalise {
        Normalise::Uppercase => AttributeValue::Text(trimmed.to_uppercase()),
        Normalise::Lowercase => AttributeValue::Text(trimmed.to_lowercase()),
        Normalise::Titlecase => AttributeValue::Text(titlecase(trimmed)),
        Normalise::Numeric => match trimmed.replace(',', ".").parse::<f64>() {
            Ok(n) if n.is_finite() => AttributeValue::Number(n),
            // A failed parse is a normalization no-op, not an error
            _ => AttributeValue::Text(trimmed.to_string()),
        },
        Normalise::None => AttributeValue::Text(trimmed.to_string()),
    }
}

/// Lowercase, then capitalize each word's first letter
fn titlecase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            for upper in ch.to_uppercase() {
                out.push(upper);
            }
        } else {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        }
    }
    out
}

/// Convert a captured unit to the attribute's canonical unit.
///
/// The table is deliberately closed: cm -> mm and inches/tum -> mm. An
/// unrecognized pair passes the value through unmodified with the captured
/// unit - no silent scaling assumption.
fn convert_unit(
    value: AttributeValue,
    captured_unit: Option<String>,
    canonical_unit: &str,
) -> (AttributeValue, Option<String>) {
    let Some(captured) = captured_unit else {
        // No unit token in the text: report the canonical unit
        return (value, Some(canonical_unit.to_string()));
    };

    let n = match value {
        AttributeValue::Number(n) => n,
        other => return (other, Some(captured)),
    };

    let from = captured.to_lowercase();
    let to = canonical_unit.to_lowercase();

    if from == to {
        return (AttributeValue::Number(n), Some(canonical_unit.to_string()));
    }

    match (from.as_str(), to.as_str()) {
        ("cm", "mm") => (AttributeValue::Number(n * 10.0), Some(canonical_unit.to_string())),
        ("in" | "inch" | "\"" | "tum", "mm") => (
            AttributeValue::Number(round2(n * 25.4)),
            Some(canonical_unit.to_string()),
        ),
        _ => (AttributeValue::Number(n), Some(captured)),
    }
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Canonicalize a text value through the attribute's configured strategy
fn canonicalize(
    canonicalizer: Canonicalizer,
    attr: &CompiledAttribute,
    context: &ExtractionContext,
    text: &str,
) -> (AttributeValue, Option<String>) {
    match canonicalizer {
        Canonicalizer::Brand => match context.resolve_brand(text) {
            Some(canonical) => (
                AttributeValue::Text(canonical.to_string()),
                Some(canonical.to_string()),
            ),
            None => (AttributeValue::Text(text.trim().to_string()), None),
        },
        Canonicalizer::Model => match context.resolve_model(text) {
            Some(canonical) => (
                AttributeValue::Text(canonical.to_string()),
                Some(canonical.to_string()),
            ),
            // Last-resort canonicalization for unknown models
            None => (AttributeValue::Text(text.trim().to_uppercase()), None),
        },
        Canonicalizer::EnumSet => {
            let key = text.trim().to_lowercase();
            let resolved = attr
                .enum_lookup
                .get(&key)
                .map(String::as_str)
                .or_else(|| context.resolve_enum_fallback(&key));
            match resolved {
                Some(canonical) => (AttributeValue::Text(canonical.to_string()), None),
                None => (AttributeValue::Text(text.trim().to_string()), None),
            }
        }
        Canonicalizer::Literal => (AttributeValue::Text(text.trim().to_string()), None),
    }
}

/// Surrounding text for audit, clamped to char boundaries
fn context_window(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(CONTEXT_RADIUS);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + CONTEXT_RADIUS).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from..to].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_normalise_comma_decimal() {
        assert_eq!(
            apply_normalise(Normalise::Numeric, "4,7"),
            AttributeValue::Number(4.7)
        );
    }

    #[test]
    fn test_numeric_normalise_failure_keeps_string() {
        assert_eq!(
            apply_normalise(Normalise::Numeric, "n/a"),
            AttributeValue::Text("n/a".to_string())
        );
    }

    #[test]
    fn test_titlecase() {
        assert_eq!(titlecase("cast IRON plate"), "Cast Iron Plate");
    }

    #[test]
    fn test_cm_to_mm() {
        let (value, unit) =
            convert_unit(AttributeValue::Number(4.7), Some("cm".to_string()), "mm");
        assert_eq!(value, AttributeValue::Number(47.0));
        assert_eq!(unit.as_deref(), Some("mm"));
    }

    #[test]
    fn test_inch_to_mm_rounds_to_two_decimals() {
        let (value, unit) =
            convert_unit(AttributeValue::Number(1.5), Some("tum".to_string()), "mm");
        assert_eq!(value, AttributeValue::Number(38.1));
        assert_eq!(unit.as_deref(), Some("mm"));

        let (value, _) = convert_unit(AttributeValue::Number(0.33), Some("\"".to_string()), "mm");
        assert_eq!(value, AttributeValue::Number(8.38));
    }

    #[test]
    fn test_identical_units_case_insensitive() {
        let (value, unit) = convert_unit(AttributeValue::Number(6.0), Some("v".to_string()), "V");
        assert_eq!(value, AttributeValue::Number(6.0));
        assert_eq!(unit.as_deref(), Some("V"));
    }

    #[test]
    fn test_unknown_unit_pair_passes_through() {
        let (value, unit) =
            convert_unit(AttributeValue::Number(70.0), Some("hk".to_string()), "mm");
        assert_eq!(value, AttributeValue::Number(70.0));
        assert_eq!(unit.as_deref(), Some("hk"));
    }

    #[test]
    fn test_missing_unit_assumes_canonical() {
        let (value, unit) = convert_unit(AttributeValue::Number(47.0), None, "mm");
        assert_eq!(value, AttributeValue::Number(47.0));
        assert_eq!(unit.as_deref(), Some("mm"));
    }

    #[test]
    fn test_context_window_char_boundaries() {
        // Clamp points landing inside a multi-byte char must not panic:
        // with 3-byte chars, 60 - 40 = 20 is not a char boundary.
        let text = "€".repeat(40);
        let window = context_window(&text, 60, 63);
        assert!(window.starts_with('€'));
        assert!(window.ends_with('€'));
    }
}
