//! Attribute definitions - the unit of the taxonomy

use serde::{Deserialize, Serialize};

/// Where an attribute may be evaluated.
///
/// `universal` attributes run against every target; `category` attributes are
/// gated by the target's category labels (slugified, see [`crate::slugify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Evaluated for every target
    Universal,
    /// Evaluated only when a target category matches `category_applicability`
    Category,
}

impl Scope {
    /// Scope name as stored downstream
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Universal => "universal",
            Scope::Category => "category",
        }
    }
}

/// Data type of an attribute's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Free text
    String,
    /// Numeric, optionally unit-bearing
    Number,
    /// Presence flag
    Boolean,
    /// Single value from a closed vocabulary
    Enum,
    /// Multiple simultaneous values from a closed vocabulary
    MultiEnum,
}

impl DataType {
    /// Type name as stored downstream
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::Enum => "enum",
            DataType::MultiEnum => "multi_enum",
        }
    }
}

/// Editorial importance of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Must be present for a listing to be considered complete
    Critical,
    /// Strongly expected
    High,
    /// Nice to have
    Medium,
    /// Informational only
    Low,
}

impl Importance {
    /// Importance name as stored downstream
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Critical => "critical",
            Importance::High => "high",
            Importance::Medium => "medium",
            Importance::Low => "low",
        }
    }
}

/// A text field of a target that an attribute may be evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceField {
    /// Product name/title
    Name,
    /// Long description
    Description,
    /// Bullet point
    Bullet,
    /// Spec-sheet line
    SpecSheet,
    /// Operator-entered value
    ManualEntry,
    /// Programmatic, non-text-scan assignment. Bypasses the `source_fields`
    /// eligibility check entirely.
    Inferred,
}

impl SourceField {
    /// Field name as stored downstream
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceField::Name => "name",
            SourceField::Description => "description",
            SourceField::Bullet => "bullet",
            SourceField::SpecSheet => "spec_sheet",
            SourceField::ManualEntry => "manual_entry",
            SourceField::Inferred => "inferred",
        }
    }

    /// Parse a field from its storage name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(SourceField::Name),
            "description" => Some(SourceField::Description),
            "bullet" => Some(SourceField::Bullet),
            "spec_sheet" => Some(SourceField::SpecSheet),
            "manual_entry" => Some(SourceField::ManualEntry),
            "inferred" => Some(SourceField::Inferred),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case/number normalization applied to a captured value before
/// canonicalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalise {
    /// Case-fold to uppercase
    Uppercase,
    /// Case-fold to lowercase
    Lowercase,
    /// Lowercase, then capitalize each word's first letter
    Titlecase,
    /// Parse as a float; comma decimal separators are accepted. A failed
    /// parse keeps the original string - never drops the match.
    Numeric,
    /// Leave the capture as-is
    #[default]
    None,
}

/// A declarative regex rule.
///
/// The pattern stays source text here; the engine compiles it once at
/// context-creation time and always scans for all non-overlapping matches,
/// never just the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexRule {
    /// Rule id, recorded on every hit for provenance
    pub name: String,

    /// Regex source text with named capture groups
    pub pattern: String,

    /// Flag characters (`i` for case-insensitive); mapped to inline
    /// modifiers at compile time
    #[serde(default)]
    pub flags: String,

    /// Named group holding the value (default `value`)
    #[serde(default = "default_capture_group")]
    pub capture_group: String,

    /// Named group holding a unit token (default `unit`)
    #[serde(default = "default_unit_capture_group")]
    pub unit_capture_group: String,

    /// Normalization applied to the captured value
    #[serde(default)]
    pub normalise: Normalise,
}

fn default_capture_group() -> String {
    "value".to_string()
}

fn default_confidence() -> f64 {
    0.6
}

fn default_unit_capture_group() -> String {
    "unit".to_string()
}

impl RegexRule {
    /// Create a rule with default capture groups and no flags
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            flags: String::new(),
            capture_group: default_capture_group(),
            unit_capture_group: default_unit_capture_group(),
            normalise: Normalise::None,
        }
    }

    /// Set the flag characters
    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = flags.into();
        self
    }

    /// Set the normalization mode
    pub fn with_normalise(mut self, normalise: Normalise) -> Self {
        self.normalise = normalise;
        self
    }
}

/// One canonical enum value with its accepted surface forms.
///
/// Within a single attribute a case-folded synonym maps to exactly one
/// canonical value; collisions across attributes are fine since each
/// attribute owns its own lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDefinition {
    /// Canonical value
    pub value: String,

    /// Alternate surface forms that normalize to `value`
    #[serde(default)]
    pub synonyms: Vec<String>,

    /// Free-form editorial notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EnumValueDefinition {
    /// Create an enum value with synonyms
    pub fn new<I, S>(value: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: value.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
            notes: None,
        }
    }
}

/// Advisory numeric bounds for a number attribute.
///
/// The engine itself does not enforce these; they exist for admin tooling
/// and data-quality checks downstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericValidation {
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Step between valid values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Whether only integers are valid
    #[serde(default)]
    pub integer: bool,
}

/// An attribute definition - the unit of the taxonomy.
///
/// The `slug` is immutable and globally unique; it is the join key to all
/// downstream storage. Definitions are loaded once at context-creation time
/// and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Globally unique identifier, e.g. `cylinder.diameter`
    pub slug: String,

    /// Human-readable label
    pub label: String,

    /// What this attribute captures
    #[serde(default)]
    pub description: String,

    /// Universal or category-gated
    pub scope: Scope,

    /// Value type
    pub data_type: DataType,

    /// Editorial importance
    pub importance: Importance,

    /// Canonical unit for number attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Category labels this attribute applies to; only meaningful when
    /// `scope` is `Category`
    #[serde(default)]
    pub category_applicability: Vec<String>,

    /// Text fields this attribute may be evaluated against
    pub source_fields: Vec<SourceField>,

    /// Ordered rule list; all rules run against every eligible field
    pub regex: Vec<RegexRule>,

    /// Closed vocabulary for enum/multi_enum attributes
    #[serde(default)]
    pub enum_values: Vec<EnumValueDefinition>,

    /// Base confidence before source-field weighting (0..1). Definitions
    /// serialized without one fall back to 0.6.
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,

    /// Advisory numeric constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validations: Option<NumericValidation>,
}
