//! Partlex Extraction Engine
//!
//! Turns free-text product listings into structured, typed, unit-normalized,
//! confidence-scored attributes by running a compiled taxonomy of regex
//! rules and dictionaries over a target's text fields.
//!
//! # Architecture
//!
//! ```text
//! Taxonomy --compile once--> ExtractionContext
//! Target + Context -> evaluator -> resolver -> confidence -> dedup -> ExtractionOutcome
//! ```
//!
//! The engine is fully synchronous, single-threaded and stateless across
//! calls. The compiled [`ExtractionContext`] is immutable and safe to share
//! across a worker pool; all blocking I/O lives in the persistence adapter
//! (`partlex-store`), never here.
//!
//! # Example
//!
//! ```no_run
//! use partlex_engine::{extract_attributes, ExtractionContext};
//! use partlex_domain::ExtractionTarget;
//!
//! # fn example() -> Result<(), partlex_engine::EngineError> {
//! let taxonomy = partlex_taxonomy::taxonomy();
//! let context = ExtractionContext::compile(&taxonomy)?;
//!
//! let target = ExtractionTarget {
//!     name: "Cylinder Baotian/Kymco/GY6 70cc 47mm".to_string(),
//!     categories: vec!["Cylinder".to_string()],
//!     ..Default::default()
//! };
//!
//! let outcome = extract_attributes(&target, &context, None);
//! for attribute in &outcome.attributes {
//!     println!("{}: {} value(s)", attribute.slug, attribute.values.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod confidence;
mod context;
mod dedup;
mod error;
mod evaluator;
mod resolver;
mod snapshot;


pub use confidence::{score, source_field_weight, weight_for_label, UNKNOWN_FIELD_WEIGHT};
pub use context::{Canonicalizer, CompiledAttribute, CompiledRule, ExtractionContext};
pub use error::EngineError;
pub use evaluator::{extract_attributes, ExtractOptions};
pub use snapshot::{
    build_extraction_snapshot, build_manual_snapshot, Snapshot, SnapshotEntry, SnapshotMetadata,
    SnapshotValue, EXTRACTION_SOURCE, MANUAL_SOURCE,
};
