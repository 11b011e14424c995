//! Extraction input units

use serde::{Deserialize, Serialize};

/// The input unit of an extraction run: one product listing's text fields
/// plus its category labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionTarget {
    /// Product name/title (required)
    pub name: String,

    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Bullet points, in listing order
    #[serde(default)]
    pub bullets: Vec<String>,

    /// Spec-sheet lines, in listing order
    #[serde(default)]
    pub spec_sheet: Vec<String>,

    /// Category labels used to gate category-scoped attributes
    #[serde(default)]
    pub categories: Vec<String>,

    /// Existing flattened snapshot. Carried for the persistence layer's
    /// merge; the evaluator never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_attributes: Option<serde_json::Value>,
}

impl ExtractionTarget {
    /// Create a target with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// One operator-supplied value for a manual attribute entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualValue {
    /// The value as entered
    pub value: crate::outcome::AttributeValue,

    /// Unit, when the attribute is unit-bearing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Operator confidence; defaults to 1.0 when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Operator-supplied override for one attribute.
///
/// Manual entries are source-tagged `manual` in storage and are never
/// overwritten by extraction runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualAttributeInput {
    /// Attribute slug
    pub slug: String,

    /// Values, in operator-entered order
    pub values: Vec<ManualValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::AttributeValue;

    #[test]
    fn test_target_json_defaults() {
        let target: ExtractionTarget =
            serde_json::from_str(r#"{"name":"Cylinderkit 70cc"}"#).unwrap();
        assert_eq!(target.name, "Cylinderkit 70cc");
        assert!(target.description.is_none());
        assert!(target.bullets.is_empty());
        assert!(target.categories.is_empty());
    }

    #[test]
    fn test_manual_value_optional_confidence() {
        let value: ManualValue = serde_json::from_str(r#"{"value":"Honda"}"#).unwrap();
        assert_eq!(value.value, AttributeValue::Text("Honda".to_string()));
        assert!(value.confidence.is_none());
    }
}
