//! Extraction context - the compiled form of a taxonomy.
//!
//! Compilation happens once; the resulting context is immutable and safe to
//! share across any number of parallel extraction calls.

use crate::error::EngineError;
use partlex_domain::{slugify, AttributeDefinition, DataType, RegexRule, Taxonomy};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// How a resolved value is canonicalized.
///
/// Selected per attribute at compile time: dictionary-backed slugs come from
/// a registration table, everything else falls out of the data type. Adding
/// a new dictionary-backed attribute is one line in [`DICTIONARY_BACKED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonicalizer {
    /// Resolve through the brand dictionary
    Brand,
    /// Resolve through the vehicle-model dictionary
    Model,
    /// Resolve through the attribute's own enum vocabulary
    EnumSet,
    /// Keep the normalized value as-is
    Literal,
}

/// Slug-keyed canonicalization registrations
const DICTIONARY_BACKED: &[(&str, Canonicalizer)] = &[
    ("brand.oem", Canonicalizer::Brand),
    ("brand.manufacturer", Canonicalizer::Brand),
    ("compatibility.model", Canonicalizer::Model),
];

fn canonicalizer_for(definition: &AttributeDefinition) -> Canonicalizer {
    if let Some((_, c)) = DICTIONARY_BACKED
        .iter()
        .find(|(slug, _)| *slug == definition.slug)
    {
        return *c;
    }
    match definition.data_type {
        DataType::Enum | DataType::MultiEnum => Canonicalizer::EnumSet,
        _ => Canonicalizer::Literal,
    }
}

/// A rule together with its compiled matcher.
///
/// The declarative rule is kept alongside so provenance (rule name, capture
/// group names) stays available at evaluation time.
#[derive(Debug)]
pub struct CompiledRule {
    /// The rule as declared in the taxonomy
    pub rule: RegexRule,
    /// Compiled matcher; always scanned exhaustively via `captures_iter`
    pub matcher: Regex,
}

/// An attribute definition compiled for evaluation
#[derive(Debug)]
pub struct CompiledAttribute {
    /// The definition as declared in the taxonomy
    pub definition: AttributeDefinition,
    /// Compiled rules, in declaration order
    pub rules: Vec<CompiledRule>,
    /// Slugified `category_applicability` labels
    pub category_keys: HashSet<String>,
    /// Case-folded synonym -> canonical value for enum attributes
    pub enum_lookup: HashMap<String, String>,
    /// Canonicalization strategy for resolved values
    pub canonicalizer: Canonicalizer,
}

/// The compiled, immutable runtime form of a taxonomy.
///
/// Construct one per taxonomy version with [`ExtractionContext::compile`] and
/// pass it by reference into every extraction call. Nothing here is mutated
/// after construction, so a single context can back a whole worker pool.
#[derive(Debug)]
pub struct ExtractionContext {
    /// Taxonomy version the context was compiled from
    pub version: String,
    /// Compiled attributes, in taxonomy order
    pub attributes: Vec<CompiledAttribute>,
    brand_lookup: HashMap<String, String>,
    model_lookup: HashMap<String, String>,
    enum_fallback: HashMap<String, String>,
}

impl ExtractionContext {
    /// Compile a taxonomy into a context.
    ///
    /// Deterministic and side-effect-free; compiling the same taxonomy twice
    /// yields functionally identical contexts. The first invalid pattern
    /// aborts compilation - malformed rules must be caught here, in tests
    /// and CI, not during evaluation.
    pub fn compile(taxonomy: &Taxonomy) -> Result<Self, EngineError> {
        let mut attributes = Vec::with_capacity(taxonomy.attributes.len());
        let mut enum_fallback: HashMap<String, String> = HashMap::new();

        for definition in &taxonomy.attributes {
            let mut rules = Vec::with_capacity(definition.regex.len());
            for rule in &definition.regex {
                let matcher = compile_rule(rule).map_err(|e| EngineError::InvalidRule {
                    slug: definition.slug.clone(),
                    rule: rule.name.clone(),
                    source: Box::new(e),
                })?;
                rules.push(CompiledRule {
                    rule: rule.clone(),
                    matcher,
                });
            }

            let category_keys = definition
                .category_applicability
                .iter()
                .map(|label| slugify(label))
                .collect();

            let mut enum_lookup = HashMap::new();
            for ev in &definition.enum_values {
                enum_lookup.insert(ev.value.to_lowercase(), ev.value.clone());
                for synonym in &ev.synonyms {
                    enum_lookup.insert(synonym.to_lowercase(), ev.value.clone());
                }
            }
            for (key, canonical) in &enum_lookup {
                enum_fallback
                    .entry(key.clone())
                    .or_insert_with(|| canonical.clone());
            }

            attributes.push(CompiledAttribute {
                canonicalizer: canonicalizer_for(definition),
                definition: definition.clone(),
                rules,
                category_keys,
                enum_lookup,
            });
        }

        let mut brand_lookup = HashMap::new();
        for brand in &taxonomy.brands {
            brand_lookup.insert(brand.canonical.to_lowercase(), brand.canonical.clone());
            for synonym in &brand.synonyms {
                brand_lookup.insert(synonym.to_lowercase(), brand.canonical.clone());
            }
        }

        let mut model_lookup = HashMap::new();
        for model in &taxonomy.models {
            model_lookup.insert(model.raw.to_lowercase(), model.canonical_model.clone());
            model_lookup.insert(
                model.canonical_model.to_lowercase(),
                model.canonical_model.clone(),
            );
        }

        debug!(
            version = %taxonomy.version,
            attributes = attributes.len(),
            brands = brand_lookup.len(),
            models = model_lookup.len(),
            "compiled extraction context"
        );

        Ok(Self {
            version: taxonomy.version.clone(),
            attributes,
            brand_lookup,
            model_lookup,
            enum_fallback,
        })
    }

    /// Resolve a brand surface form to its canonical entry
    pub(crate) fn resolve_brand(&self, raw: &str) -> Option<&str> {
        self.brand_lookup
            .get(&raw.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Resolve a model surface form (raw or canonical) to its canonical model
    pub(crate) fn resolve_model(&self, raw: &str) -> Option<&str> {
        self.model_lookup
            .get(&raw.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Cross-attribute enum fallback lookup
    pub(crate) fn resolve_enum_fallback(&self, raw: &str) -> Option<&str> {
        self.enum_fallback
            .get(&raw.trim().to_lowercase())
            .map(String::as_str)
    }
}

/// Compile one rule, mapping flag characters to inline modifiers.
///
/// `g` is accepted and ignored: exhaustive scanning is inherent to how the
/// engine runs matchers (`captures_iter`), not a per-rule choice.
fn compile_rule(rule: &RegexRule) -> Result<Regex, regex::Error> {
    let mut modifiers = String::new();
    for flag in rule.flags.chars() {
        match flag {
            'i' | 'm' | 's' => modifiers.push(flag),
            _ => {}
        }
    }

    let pattern = if modifiers.is_empty() {
        rule.pattern.clone()
    } else {
        format!("(?{}){}", modifiers, rule.pattern)
    };

    Regex::new(&pattern)
}
