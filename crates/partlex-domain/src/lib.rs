//! Partlex Domain Layer
//!
//! This crate contains the data model shared by the extraction engine, the
//! shipped taxonomy and the persistence adapter. It is deliberately free of
//! runtime machinery: no compiled regexes, no lookup maps, no I/O. Everything
//! here is plain serializable data, so a taxonomy can be versioned, diffed and
//! shipped independent of the regex engine that executes it.
//!
//! ## Key Concepts
//!
//! - **AttributeDefinition**: one taxonomy entry - what to look for, where,
//!   and how to type/normalize what was found
//! - **RegexRule**: a declarative pattern with named capture groups; rules are
//!   data here and only become matchers inside the engine's context
//! - **Dictionaries**: brand and vehicle-model synonym tables used for
//!   canonicalization
//! - **ExtractionTarget / ExtractionOutcome**: the input and output units of
//!   an extraction run
//! - **Slug**: the immutable, globally unique join key between taxonomy,
//!   outcomes and durable storage

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod dictionary;
pub mod outcome;
pub mod slug;
pub mod target;

// Re-exports for convenience
pub use attribute::{
    AttributeDefinition, DataType, EnumValueDefinition, Importance, Normalise, NumericValidation,
    RegexRule, Scope, SourceField,
};
pub use dictionary::{BrandEntry, ModelEntry, ModelSource, Taxonomy};
pub use outcome::{
    AttributeExtraction, AttributeValue, ExtractionHit, ExtractionOutcome, OutcomeMeta,
};
pub use slug::slugify;
pub use target::{ExtractionTarget, ManualAttributeInput, ManualValue};
