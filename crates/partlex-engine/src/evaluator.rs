//! Field evaluation - the extraction entry point.
//!
//! Fields are scanned in a fixed, deterministic order: name, description,
//! bullets in listing order, spec-sheet lines in listing order, then any
//! options-supplied inferred texts. Every rule of every eligible attribute
//! runs against every field, collecting all non-overlapping matches.

use crate::confidence;
use crate::context::{CompiledAttribute, ExtractionContext};
use crate::dedup;
use crate::resolver;
use chrono::Utc;
use partlex_domain::{
    slugify, AttributeExtraction, ExtractionHit, ExtractionOutcome, ExtractionTarget, OutcomeMeta,
    Scope, SourceField,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Per-call evaluation options
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Category labels considered in addition to the target's own
    pub extra_categories: Vec<String>,

    /// Programmatically supplied texts scanned as the synthetic `inferred`
    /// field, which bypasses the per-attribute source-field check
    pub inferred_texts: Vec<String>,
}

/// Run an extraction over a target with a compiled context.
///
/// Pure over its inputs apart from reading the wall clock for
/// `meta.generated_at`: the same taxonomy and target always produce the
/// same attributes and values.
pub fn extract_attributes(
    target: &ExtractionTarget,
    context: &ExtractionContext,
    options: Option<&ExtractOptions>,
) -> ExtractionOutcome {
    let category_keys: HashSet<String> = target
        .categories
        .iter()
        .chain(options.iter().flat_map(|o| o.extra_categories.iter()))
        .map(|label| slugify(label))
        .filter(|key| !key.is_empty())
        .collect();

    let mut segments: Vec<(SourceField, String, &str)> =
        vec![(SourceField::Name, "name".to_string(), target.name.as_str())];
    if let Some(description) = &target.description {
        segments.push((
            SourceField::Description,
            "description".to_string(),
            description.as_str(),
        ));
    }
    for (i, bullet) in target.bullets.iter().enumerate() {
        segments.push((SourceField::Bullet, format!("bullet[{}]", i), bullet.as_str()));
    }
    for (i, line) in target.spec_sheet.iter().enumerate() {
        segments.push((
            SourceField::SpecSheet,
            format!("spec_sheet[{}]", i),
            line.as_str(),
        ));
    }
    if let Some(options) = options {
        for (i, text) in options.inferred_texts.iter().enumerate() {
            segments.push((
                SourceField::Inferred,
                format!("inferred[{}]", i),
                text.as_str(),
            ));
        }
    }

    let mut slug_order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<ExtractionHit>> = HashMap::new();
    let mut fields_evaluated: Vec<String> = Vec::new();
    let mut total_matches = 0usize;

    for (field, label, text) in segments {
        if text.trim().is_empty() {
            continue;
        }

        let eligible: Vec<&CompiledAttribute> = context
            .attributes
            .iter()
            .filter(|attr| should_evaluate(attr, field, &category_keys))
            .collect();

        // A field nothing is eligible for is skipped without being recorded
        if eligible.is_empty() {
            continue;
        }
        fields_evaluated.push(label);

        for attr in eligible {
            for compiled in &attr.rules {
                for caps in compiled.matcher.captures_iter(text) {
                    let resolved = resolver::resolve_match(attr, context, compiled, &caps, text);
                    let hit = ExtractionHit {
                        raw_value: resolved.raw_value,
                        normalized_value: resolved.normalized_value,
                        unit: resolved.unit,
                        confidence: confidence::score(attr.definition.default_confidence, field),
                        source_field: field,
                        rule_name: compiled.rule.name.clone(),
                        start: resolved.start,
                        end: resolved.end,
                        context_window: resolved.context_window,
                        dictionary_match: resolved.dictionary_match,
                    };

                    total_matches += 1;
                    let slug = &attr.definition.slug;
                    grouped
                        .entry(slug.clone())
                        .or_insert_with(|| {
                            slug_order.push(slug.clone());
                            Vec::new()
                        })
                        .push(hit);
                }
            }
        }
    }

    debug!(
        raw_hits = total_matches,
        attributes = slug_order.len(),
        "field evaluation complete"
    );

    // Collapse per attribute; attributes whose hit list dedups to empty are
    // dropped from the outcome entirely.
    let mut attributes = Vec::with_capacity(slug_order.len());
    for slug in slug_order {
        let hits = grouped.remove(&slug).unwrap_or_default();
        if let Some(attr) = context
            .attributes
            .iter()
            .find(|a| a.definition.slug == slug)
        {
            let values = dedup::collapse(attr.definition.data_type, &slug, hits);
            if values.is_empty() {
                continue;
            }
            attributes.push(AttributeExtraction {
                slug,
                definition: attr.definition.clone(),
                values,
            });
        }
    }

    info!(
        total_matches,
        total_attributes = attributes.len(),
        version = %context.version,
        "extraction complete"
    );

    ExtractionOutcome {
        meta: OutcomeMeta {
            total_matches,
            total_attributes: attributes.len(),
            fields_evaluated,
            generated_at: Utc::now(),
            version: context.version.clone(),
        },
        attributes,
    }
}

/// Decide whether an attribute runs against a field.
///
/// The synthetic `inferred` field bypasses the source-field check; category
/// scope requires at least one of the target's category keys to appear in
/// the attribute's applicability set, and targets with no categories skip
/// category-scoped attributes entirely.
fn should_evaluate(
    attr: &CompiledAttribute,
    field: SourceField,
    category_keys: &HashSet<String>,
) -> bool {
    if field != SourceField::Inferred && !attr.definition.source_fields.contains(&field) {
        return false;
    }

    if attr.definition.scope == Scope::Category {
        if category_keys.is_empty() {
            return false;
        }
        if !category_keys.iter().any(|key| attr.category_keys.contains(key)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ExtractionContext {
        ExtractionContext::compile(&partlex_taxonomy::taxonomy()).unwrap()
    }

    fn attr<'a>(context: &'a ExtractionContext, slug: &str) -> &'a CompiledAttribute {
        context
            .attributes
            .iter()
            .find(|a| a.definition.slug == slug)
            .unwrap()
    }

    #[test]
    fn test_source_field_gating() {
        let context = context();
        let material = attr(&context, "material.primary");
        let keys = HashSet::new();
        // material.primary does not list `name` as a source field
        assert!(!should_evaluate(material, SourceField::Name, &keys));
        assert!(should_evaluate(material, SourceField::Description, &keys));
    }

    #[test]
    fn test_inferred_bypasses_source_fields() {
        let context = context();
        let material = attr(&context, "material.primary");
        assert!(should_evaluate(material, SourceField::Inferred, &HashSet::new()));
    }

    #[test]
    fn test_category_scope_requires_matching_key() {
        let context = context();
        let diameter = attr(&context, "cylinder.diameter");

        assert!(!should_evaluate(diameter, SourceField::Name, &HashSet::new()));

        let wrong: HashSet<String> = [slugify("Avgassystem")].into_iter().collect();
        assert!(!should_evaluate(diameter, SourceField::Name, &wrong));

        let right: HashSet<String> = [slugify("Cylinder")].into_iter().collect();
        assert!(should_evaluate(diameter, SourceField::Name, &right));
    }

    #[test]
    fn test_fields_evaluated_labels() {
        let context = context();
        let target = ExtractionTarget {
            name: "Cylinderkit 70cc".to_string(),
            description: Some("Komplett kit".to_string()),
            bullets: vec!["47mm borr".to_string(), "".to_string()],
            spec_sheet: vec!["Material: aluminium".to_string()],
            categories: vec!["Cylinder".to_string()],
            legacy_attributes: None,
        };

        let outcome = extract_attributes(&target, &context, None);
        assert_eq!(
            outcome.meta.fields_evaluated,
            vec!["name", "description", "bullet[0]", "spec_sheet[0]"]
        );
    }

    #[test]
    fn test_empty_fields_are_not_recorded() {
        let context = context();
        let target = ExtractionTarget::named("Cylinderkit 70cc 47mm");
        let outcome = extract_attributes(&target, &context, None);
        assert_eq!(outcome.meta.fields_evaluated, vec!["name"]);
    }

    #[test]
    fn test_extra_categories_from_options() {
        let context = context();
        let target = ExtractionTarget::named("Cylinder 47mm");
        let options = ExtractOptions {
            extra_categories: vec!["Cylinder".to_string()],
            inferred_texts: Vec::new(),
        };

        let gated = extract_attributes(&target, &context, None);
        assert!(gated.attribute("cylinder.diameter").is_none());

        let open = extract_attributes(&target, &context, Some(&options));
        assert!(open.attribute("cylinder.diameter").is_some());
    }

    #[test]
    fn test_inferred_texts_are_scanned() {
        let context = context();
        let target = ExtractionTarget::named("Packbox");
        let options = ExtractOptions {
            extra_categories: Vec::new(),
            inferred_texts: vec!["aluminium".to_string()],
        };

        let outcome = extract_attributes(&target, &context, Some(&options));
        let material = outcome.attribute("material.primary").unwrap();
        assert_eq!(material.values[0].source_field, SourceField::Inferred);
        // 0.7 * 0.7 inferred weight
        assert_eq!(material.values[0].confidence, 0.49);
        assert!(outcome
            .meta
            .fields_evaluated
            .contains(&"inferred[0]".to_string()));
    }
}
