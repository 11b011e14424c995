//! Vehicle-model dictionary.
//!
//! `raw` is the surface form as it appears in listing text; lookups in the
//! engine are case-insensitive on both the raw and the canonical form.

use partlex_domain::{ModelEntry, ModelSource};

/// All curated model entries
pub fn entries() -> Vec<ModelEntry> {
    vec![
        seen_in_names("transport", "Transport", "Sachs"),
        seen_in_names("compact", "Compact", "MCB"),
        seen_in_names("florett", "Florett", "Kreidler"),
        seen_in_names("maxi", "Maxi", "Puch"),
        seen_in_names("dakota", "Dakota", "Puch"),
        seen_in_names("fs1", "FS1", "Yamaha"),
        ModelEntry::new("fs-1", "FS1", "Yamaha"),
        seen_in_names("ciao", "Ciao", "Piaggio"),
    ]
}

fn seen_in_names(raw: &str, canonical: &str, make: &str) -> ModelEntry {
    ModelEntry {
        raw: raw.to_string(),
        canonical_model: canonical.to_string(),
        make: make.to_string(),
        source: ModelSource::Name,
    }
}
