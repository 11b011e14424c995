//! Legacy snapshot builders.
//!
//! Pure projections of an extraction outcome (or manual input) into the
//! flattened slug -> entry shape older consumers read off the variant
//! record. The quirks here are load-bearing: multi-enum attributes snapshot
//! the full value list while everything else snapshots the single top
//! value, and manual entries keep the single-value/array dual shape.

use chrono::{DateTime, Utc};
use partlex_domain::{
    AttributeValue, DataType, ExtractionHit, ExtractionOutcome, ManualAttributeInput, SourceField,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source tag on extraction-produced snapshot entries
pub const EXTRACTION_SOURCE: &str = "extraction-service";

/// Source tag on manual snapshot entries
pub const MANUAL_SOURCE: &str = "manual";

/// A flattened snapshot, keyed by attribute slug
pub type Snapshot = BTreeMap<String, SnapshotEntry>;

/// Scalar-or-list snapshot value.
///
/// Multi-enum attributes store the full list; everything else a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    /// Single top value
    Single(AttributeValue),
    /// Full value list (multi-enum display)
    Many(Vec<AttributeValue>),
}

/// Rule/dictionary provenance carried on extraction entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Rule id that produced the top value
    pub rule: String,
    /// Dictionary entry the top value resolved through, if any
    pub dictionary: Option<String>,
}

/// One flattened snapshot entry.
///
/// Field names serialize in the camelCase shape the legacy consumers
/// expect; absent optionals are omitted rather than null, except `unit`
/// which is always present (null when unknown).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    /// Display value
    pub value: SnapshotValue,

    /// Full value array, only on manual entries with more than one value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<AttributeValue>>,

    /// Unit of the display value
    pub unit: Option<String>,

    /// Confidence of the display value
    pub confidence: f64,

    /// `extraction-service` or `manual`
    pub source: String,

    /// Field the display value came from (extraction entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field: Option<SourceField>,

    /// Whether the entry came from an extraction run
    pub extracted: bool,

    /// Extraction run timestamp (extraction entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<DateTime<Utc>>,

    /// Manual edit timestamp (manual entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Rule/dictionary provenance (extraction entries only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
}

/// Project an extraction outcome into the flattened legacy shape.
///
/// Per attribute the single highest-confidence value becomes the display
/// value (ties keep the first-seen); multi-enum attributes instead carry
/// the full list of normalized values.
pub fn build_extraction_snapshot(outcome: &ExtractionOutcome) -> Snapshot {
    let mut snapshot = Snapshot::new();

    for attribute in &outcome.attributes {
        let Some(top) = top_value(&attribute.values) else {
            continue;
        };

        let value = if attribute.definition.data_type == DataType::MultiEnum {
            SnapshotValue::Many(
                attribute
                    .values
                    .iter()
                    .map(|hit| hit.normalized_value.clone())
                    .collect(),
            )
        } else {
            SnapshotValue::Single(top.normalized_value.clone())
        };

        snapshot.insert(
            attribute.slug.clone(),
            SnapshotEntry {
                value,
                values: None,
                unit: top.unit.clone(),
                confidence: top.confidence,
                source: EXTRACTION_SOURCE.to_string(),
                source_field: Some(top.source_field),
                extracted: true,
                extracted_at: Some(outcome.meta.generated_at),
                updated_at: None,
                metadata: Some(SnapshotMetadata {
                    rule: top.rule_name.clone(),
                    dictionary: top.dictionary_match.clone(),
                }),
            },
        );
    }

    snapshot
}

/// Project manual attribute inputs into the flattened legacy shape.
///
/// A single supplied value is stored directly as `value` with `values`
/// absent; multiple values store the first as `value` and the full array
/// as `values`. Manual entries are always tagged `source: "manual"`.
pub fn build_manual_snapshot(
    inputs: &[ManualAttributeInput],
    timestamp: DateTime<Utc>,
) -> Snapshot {
    let mut snapshot = Snapshot::new();

    for input in inputs {
        let Some(first) = input.values.first() else {
            continue;
        };

        let values = if input.values.len() > 1 {
            Some(input.values.iter().map(|v| v.value.clone()).collect())
        } else {
            None
        };

        snapshot.insert(
            input.slug.clone(),
            SnapshotEntry {
                value: SnapshotValue::Single(first.value.clone()),
                values,
                unit: first.unit.clone(),
                confidence: first.confidence.unwrap_or(1.0),
                source: MANUAL_SOURCE.to_string(),
                source_field: None,
                extracted: false,
                extracted_at: None,
                updated_at: Some(timestamp),
                metadata: None,
            },
        );
    }

    snapshot
}

/// Highest-confidence hit, ties broken by first-seen during the scan
fn top_value(hits: &[ExtractionHit]) -> Option<&ExtractionHit> {
    let mut top: Option<&ExtractionHit> = None;
    for hit in hits {
        match top {
            Some(best) if hit.confidence > best.confidence => top = Some(hit),
            None => top = Some(hit),
            _ => {}
        }
    }
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use partlex_domain::{ManualValue, SourceField};

    fn hit(value: AttributeValue, confidence: f64, rule: &str) -> ExtractionHit {
        ExtractionHit {
            raw_value: value.key_text(),
            normalized_value: value,
            unit: None,
            confidence,
            source_field: SourceField::Name,
            rule_name: rule.to_string(),
            start: 0,
            end: 0,
            context_window: String::new(),
            dictionary_match: None,
        }
    }

    #[test]
    fn test_top_value_ties_keep_first() {
        let hits = vec![
            hit(AttributeValue::Text("a".into()), 0.8, "first"),
            hit(AttributeValue::Text("b".into()), 0.8, "second"),
            hit(AttributeValue::Text("c".into()), 0.9, "third"),
        ];
        assert_eq!(top_value(&hits).unwrap().rule_name, "third");

        let tied = &hits[..2];
        assert_eq!(top_value(tied).unwrap().rule_name, "first");
    }

    #[test]
    fn test_manual_single_value_shape() {
        let ts = Utc::now();
        let inputs = vec![ManualAttributeInput {
            slug: "brand.oem".to_string(),
            values: vec![ManualValue {
                value: AttributeValue::Text("Honda".into()),
                unit: None,
                confidence: Some(0.8),
            }],
        }];

        let snapshot = build_manual_snapshot(&inputs, ts);
        let entry = &snapshot["brand.oem"];

        assert_eq!(
            entry.value,
            SnapshotValue::Single(AttributeValue::Text("Honda".into()))
        );
        assert!(entry.values.is_none());
        assert!(entry.unit.is_none());
        assert_eq!(entry.confidence, 0.8);
        assert_eq!(entry.source, MANUAL_SOURCE);
        assert!(!entry.extracted);
        assert_eq!(entry.updated_at, Some(ts));

        // Legacy JSON shape: `values` omitted, `unit` explicit null
        let json = serde_json::to_value(entry).unwrap();
        assert!(json.get("values").is_none());
        assert!(json.get("unit").unwrap().is_null());
        assert_eq!(json["source"], "manual");
        assert_eq!(json["extracted"], false);
    }

    #[test]
    fn test_manual_multi_value_shape() {
        let inputs = vec![ManualAttributeInput {
            slug: "compatibility.model".to_string(),
            values: vec![
                ManualValue {
                    value: AttributeValue::Text("Transport".into()),
                    unit: None,
                    confidence: None,
                },
                ManualValue {
                    value: AttributeValue::Text("Compact".into()),
                    unit: None,
                    confidence: None,
                },
            ],
        }];

        let snapshot = build_manual_snapshot(&inputs, Utc::now());
        let entry = &snapshot["compatibility.model"];

        // First value is the display value, the full array rides along
        assert_eq!(
            entry.value,
            SnapshotValue::Single(AttributeValue::Text("Transport".into()))
        );
        assert_eq!(
            entry.values,
            Some(vec![
                AttributeValue::Text("Transport".into()),
                AttributeValue::Text("Compact".into()),
            ])
        );
        assert_eq!(entry.confidence, 1.0);
    }

    #[test]
    fn test_manual_empty_values_skipped() {
        let inputs = vec![ManualAttributeInput {
            slug: "brand.oem".to_string(),
            values: Vec::new(),
        }];
        assert!(build_manual_snapshot(&inputs, Utc::now()).is_empty());
    }
}
