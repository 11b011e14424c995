//! Brand and vehicle-model dictionaries, and the taxonomy root

use crate::attribute::AttributeDefinition;
use serde::{Deserialize, Serialize};

/// A brand dictionary entry.
///
/// Maps a canonical brand name plus its surface forms; optionally links the
/// brand to a vehicle make for compatibility resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandEntry {
    /// Canonical brand name
    pub canonical: String,

    /// Alternate spellings seen in listings
    #[serde(default)]
    pub synonyms: Vec<String>,

    /// Vehicle make this brand belongs to, when the brand is itself a
    /// vehicle manufacturer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    /// Where this entry was sourced from
    #[serde(default)]
    pub sources: Vec<String>,

    /// Editorial notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BrandEntry {
    /// Create an entry with synonyms and no make link
    pub fn new<I, S>(canonical: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical: canonical.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
            make: None,
            sources: Vec::new(),
            notes: None,
        }
    }

    /// Create an entry with no synonyms
    pub fn named(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            synonyms: Vec::new(),
            make: None,
            sources: Vec::new(),
            notes: None,
        }
    }

    /// Link the brand to a vehicle make
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }
}

/// Which listing field a model dictionary entry was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// Seen in product names
    Name,
    /// Seen in descriptions
    Description,
    /// Curated by an operator
    Manual,
}

/// A vehicle-model dictionary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Surface form as seen in listing text
    pub raw: String,

    /// Canonical model name
    pub canonical_model: String,

    /// Vehicle make the model belongs to
    pub make: String,

    /// Where the surface form was observed
    pub source: ModelSource,
}

impl ModelEntry {
    /// Create a curated model entry
    pub fn new(
        raw: impl Into<String>,
        canonical_model: impl Into<String>,
        make: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            canonical_model: canonical_model.into(),
            make: make.into(),
            source: ModelSource::Manual,
        }
    }
}

/// The versioned taxonomy root handed to the context compiler.
///
/// Any change to regex patterns, enum synonyms or dictionaries requires
/// bumping `version` so downstream consumers can detect re-extraction needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Version string carried into every outcome's metadata
    pub version: String,

    /// Attribute definitions
    pub attributes: Vec<AttributeDefinition>,

    /// Brand dictionary
    #[serde(default)]
    pub brands: Vec<BrandEntry>,

    /// Vehicle-model dictionary
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}
