//! Hit deduplication.
//!
//! Collapses multiple hits for the same attribute and canonical value into
//! one record: strictly higher confidence wins, ties keep the first-seen hit
//! (stable, order-preserving). `multi_enum` intentionally keeps one record
//! per distinct value, so a compatibility attribute can carry many models at
//! once.

use partlex_domain::{DataType, ExtractionHit};
use std::collections::HashMap;

/// Dedup key for a hit. The key shape varies by data type:
/// numbers include the unit, enums and strings fold case, booleans use the
/// flag itself.
pub(crate) fn dedup_key(data_type: DataType, slug: &str, hit: &ExtractionHit) -> String {
    match data_type {
        DataType::Number => format!(
            "{}:{}:{}",
            slug,
            hit.normalized_value.key_text(),
            hit.unit.as_deref().unwrap_or("")
        ),
        DataType::Boolean => format!("{}:{}", slug, hit.normalized_value.key_text()),
        DataType::String | DataType::Enum | DataType::MultiEnum => {
            format!("{}:{}", slug, hit.normalized_value.key_text().to_lowercase())
        }
    }
}

/// Collapse hits to at most one per distinct (attribute, canonical value)
pub(crate) fn collapse(data_type: DataType, slug: &str, hits: Vec<ExtractionHit>) -> Vec<ExtractionHit> {
    let mut order: Vec<String> = Vec::with_capacity(hits.len());
    let mut best: HashMap<String, ExtractionHit> = HashMap::with_capacity(hits.len());

    for hit in hits {
        let key = dedup_key(data_type, slug, &hit);
        match best.get_mut(&key) {
            Some(existing) => {
                if hit.confidence > existing.confidence {
                    *existing = hit;
                }
            }
            None => {
                order.push(key.clone());
                best.insert(key, hit);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| best.remove(&key))
        .collect()
}
