//! Partlex Shipped Taxonomy
//!
//! The declarative rule set for the mopeds/MC aftermarket catalog: attribute
//! definitions with their regex rule tables, enum vocabularies and the brand
//! and vehicle-model dictionaries. Pure data - the extraction engine compiles
//! it into runtime lookups at context-creation time.
//!
//! Any change to a pattern, a synonym or a dictionary entry must bump
//! [`VERSION`]; the version string travels on every outcome and is the
//! contract downstream consumers use to decide when re-extraction is due.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attributes;
mod brands;
mod models;

use partlex_domain::Taxonomy;

/// Taxonomy version carried into every extraction outcome
pub const VERSION: &str = "2026.08";

/// Assemble the shipped taxonomy
pub fn taxonomy() -> Taxonomy {
    Taxonomy {
        version: VERSION.to_string(),
        attributes: attributes::definitions(),
        brands: brands::entries(),
        models: models::entries(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partlex_domain::{DataType, Scope};
    use std::collections::HashSet;

    #[test]
    fn test_slugs_are_unique() {
        let taxonomy = taxonomy();
        let mut seen = HashSet::new();
        for def in &taxonomy.attributes {
            assert!(seen.insert(def.slug.clone()), "duplicate slug {}", def.slug);
        }
    }

    #[test]
    fn test_category_scope_has_applicability() {
        for def in taxonomy().attributes {
            if def.scope == Scope::Category {
                assert!(
                    !def.category_applicability.is_empty(),
                    "{} is category-scoped but lists no categories",
                    def.slug
                );
            }
        }
    }

    #[test]
    fn test_enum_synonyms_unique_within_attribute() {
        for def in taxonomy().attributes {
            let mut seen = HashSet::new();
            for ev in &def.enum_values {
                for key in std::iter::once(&ev.value).chain(ev.synonyms.iter()) {
                    assert!(
                        seen.insert(key.to_lowercase()),
                        "{}: synonym '{}' maps to more than one canonical value",
                        def.slug,
                        key
                    );
                }
            }
        }
    }

    #[test]
    fn test_enum_values_only_on_enum_types() {
        for def in taxonomy().attributes {
            if !def.enum_values.is_empty() {
                assert!(
                    matches!(def.data_type, DataType::Enum | DataType::MultiEnum),
                    "{} carries enum values but is not an enum type",
                    def.slug
                );
            }
        }
    }

    #[test]
    fn test_confidences_in_range() {
        for def in taxonomy().attributes {
            assert!(
                def.default_confidence > 0.0 && def.default_confidence <= 1.0,
                "{} default confidence out of range",
                def.slug
            );
        }
    }

    #[test]
    fn test_every_attribute_has_rules() {
        for def in taxonomy().attributes {
            assert!(!def.regex.is_empty(), "{} has no regex rules", def.slug);
            assert!(
                !def.source_fields.is_empty(),
                "{} has no source fields",
                def.slug
            );
        }
    }

    #[test]
    fn test_brand_synonyms_resolve_uniquely() {
        let mut seen = HashSet::new();
        for brand in taxonomy().brands {
            for key in std::iter::once(&brand.canonical).chain(brand.synonyms.iter()) {
                assert!(
                    seen.insert(key.to_lowercase()),
                    "brand synonym '{}' maps to more than one canonical entry",
                    key
                );
            }
        }
    }

    #[test]
    fn test_model_raws_resolve_uniquely() {
        let mut seen = HashSet::new();
        for model in taxonomy().models {
            assert!(
                seen.insert(model.raw.to_lowercase()),
                "model raw form '{}' maps to more than one canonical model",
                model.raw
            );
        }
    }
}
