//! Integration tests for the variant attribute store

use chrono::Utc;
use partlex_domain::{
    AttributeValue, ExtractionTarget, ManualAttributeInput, ManualValue, Taxonomy,
};
use partlex_engine::{extract_attributes, ExtractionContext};
use partlex_store::{StoreError, VariantStore};

fn cylinder_kit_outcome(
    context: &ExtractionContext,
) -> partlex_domain::ExtractionOutcome {
    let target = ExtractionTarget {
        name: "Cylinder Baotian/Kymco/GY6 70cc 47mm".to_string(),
        description: Some("Komplett cylinderkit med 47 mm borr och 70 cc volym.".to_string()),
        categories: vec!["Cylinder".to_string()],
        ..Default::default()
    };
    extract_attributes(&target, context, None)
}

fn store_with_catalog(taxonomy: &Taxonomy) -> (VariantStore, i64) {
    let mut store = VariantStore::in_memory().unwrap();
    store.sync_definitions(taxonomy).unwrap();
    let variant_id = store.create_variant("Cylinderkit 70cc").unwrap();
    (store, variant_id)
}

#[test]
fn test_persist_extraction_inserts_rows() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();
    let (mut store, variant_id) = store_with_catalog(&taxonomy);

    let outcome = cylinder_kit_outcome(&context);
    let summary = store
        .persist_extraction_result(variant_id, &outcome, true)
        .unwrap();

    assert_eq!(summary.attributes_written, outcome.attributes.len());
    assert!(summary.skipped_slugs.is_empty());

    let rows = store.attribute_rows(variant_id).unwrap();
    assert_eq!(rows.len(), summary.rows_inserted);

    let diameter = rows
        .iter()
        .find(|r| r.slug == "cylinder.diameter")
        .unwrap();
    assert_eq!(diameter.value_number, Some(47.0));
    assert_eq!(diameter.unit.as_deref(), Some("mm"));
    assert_eq!(diameter.source, "extracted");
    assert_eq!(diameter.confidence, "0.900");
    assert_eq!(diameter.source_field.as_deref(), Some("name"));
}

#[test]
fn test_reextraction_replaces_extracted_rows() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();
    let (mut store, variant_id) = store_with_catalog(&taxonomy);

    let outcome = cylinder_kit_outcome(&context);
    store
        .persist_extraction_result(variant_id, &outcome, false)
        .unwrap();
    let first_count = store.attribute_rows(variant_id).unwrap().len();

    // Running the same extraction again must not duplicate rows
    store
        .persist_extraction_result(variant_id, &outcome, false)
        .unwrap();
    assert_eq!(store.attribute_rows(variant_id).unwrap().len(), first_count);
}

#[test]
fn test_manual_rows_survive_reextraction() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();
    let (mut store, variant_id) = store_with_catalog(&taxonomy);

    let inputs = vec![ManualAttributeInput {
        slug: "brand.oem".to_string(),
        values: vec![ManualValue {
            value: AttributeValue::Text("Honda".to_string()),
            unit: None,
            confidence: Some(0.8),
        }],
    }];
    store
        .persist_manual_attributes(variant_id, &inputs, &[], Utc::now())
        .unwrap();

    let outcome = cylinder_kit_outcome(&context);
    store
        .persist_extraction_result(variant_id, &outcome, true)
        .unwrap();

    let rows = store.attribute_rows(variant_id).unwrap();
    let manual: Vec<_> = rows.iter().filter(|r| r.source == "manual").collect();
    assert_eq!(manual.len(), 1);
    assert_eq!(manual[0].slug, "brand.oem");
    assert_eq!(manual[0].value_text.as_deref(), Some("Honda"));

    // The extraction also wrote its own brand.oem rows, tagged extracted
    assert!(rows
        .iter()
        .any(|r| r.slug == "brand.oem" && r.source == "extracted"));
}

#[test]
fn test_clear_slugs_removes_manual_values() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let (mut store, variant_id) = store_with_catalog(&taxonomy);

    let inputs = vec![
        ManualAttributeInput {
            slug: "brand.oem".to_string(),
            values: vec![ManualValue {
                value: AttributeValue::Text("Honda".to_string()),
                unit: None,
                confidence: None,
            }],
        },
        ManualAttributeInput {
            slug: "thread.size".to_string(),
            values: vec![ManualValue {
                value: AttributeValue::Text("M10X1.25".to_string()),
                unit: None,
                confidence: None,
            }],
        },
    ];
    store
        .persist_manual_attributes(variant_id, &inputs, &[], Utc::now())
        .unwrap();

    // Operator clears brand.oem, keeps thread.size
    let keep = vec![ManualAttributeInput {
        slug: "thread.size".to_string(),
        values: vec![ManualValue {
            value: AttributeValue::Text("M10X1.25".to_string()),
            unit: None,
            confidence: None,
        }],
    }];
    store
        .persist_manual_attributes(variant_id, &keep, &["brand.oem".to_string()], Utc::now())
        .unwrap();

    let rows = store.attribute_rows(variant_id).unwrap();
    assert!(!rows.iter().any(|r| r.slug == "brand.oem"));
    assert!(rows.iter().any(|r| r.slug == "thread.size"));

    let snapshot = store.variant_snapshot(variant_id).unwrap().unwrap();
    assert!(snapshot.get("brand.oem").is_none());
    assert!(snapshot.get("thread.size").is_some());
}

#[test]
fn test_snapshot_merge_is_non_destructive() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();
    let (mut store, variant_id) = store_with_catalog(&taxonomy);

    // A manual entry lands first and writes its snapshot key
    let inputs = vec![ManualAttributeInput {
        slug: "electrical.voltage".to_string(),
        values: vec![ManualValue {
            value: AttributeValue::Number(6.0),
            unit: Some("V".to_string()),
            confidence: None,
        }],
    }];
    store
        .persist_manual_attributes(variant_id, &inputs, &[], Utc::now())
        .unwrap();

    // An extraction run for unrelated attributes merges over it
    let outcome = cylinder_kit_outcome(&context);
    store
        .persist_extraction_result(variant_id, &outcome, true)
        .unwrap();

    let snapshot = store.variant_snapshot(variant_id).unwrap().unwrap();
    let voltage = snapshot.get("electrical.voltage").unwrap();
    assert_eq!(voltage["source"], "manual");
    assert_eq!(voltage["value"], 6.0);

    let diameter = snapshot.get("cylinder.diameter").unwrap();
    assert_eq!(diameter["source"], "extraction-service");
    assert_eq!(diameter["value"], 47.0);
    assert_eq!(diameter["unit"], "mm");
}

#[test]
fn test_missing_catalog_entry_is_skipped_not_fatal() {
    let mut taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();

    // Materialize a catalog without kit.complete
    taxonomy.attributes.retain(|d| d.slug != "kit.complete");
    let (mut store, variant_id) = store_with_catalog(&taxonomy);

    let outcome = cylinder_kit_outcome(&context);
    assert!(outcome.attribute("kit.complete").is_some());

    let summary = store
        .persist_extraction_result(variant_id, &outcome, false)
        .unwrap();
    assert_eq!(summary.skipped_slugs, vec!["kit.complete".to_string()]);
    assert!(summary.attributes_written > 0);

    let rows = store.attribute_rows(variant_id).unwrap();
    assert!(!rows.iter().any(|r| r.slug == "kit.complete"));
    assert!(rows.iter().any(|r| r.slug == "cylinder.diameter"));
}

#[test]
fn test_unknown_variant_aborts_without_writes() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();
    let mut store = VariantStore::in_memory().unwrap();
    store.sync_definitions(&taxonomy).unwrap();

    let outcome = cylinder_kit_outcome(&context);
    let err = store
        .persist_extraction_result(999, &outcome, true)
        .unwrap_err();
    assert!(matches!(err, StoreError::VariantNotFound(999)));
    assert!(store.attribute_rows(999).unwrap().is_empty());
}

#[test]
fn test_store_survives_reopen() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partlex.db");

    let variant_id = {
        let mut store = VariantStore::open(&path).unwrap();
        store.sync_definitions(&taxonomy).unwrap();
        let variant_id = store.create_variant("Cylinderkit 70cc").unwrap();
        let outcome = cylinder_kit_outcome(&context);
        store
            .persist_extraction_result(variant_id, &outcome, true)
            .unwrap();
        variant_id
    };

    let store = VariantStore::open(&path).unwrap();
    let rows = store.attribute_rows(variant_id).unwrap();
    assert!(rows.iter().any(|r| r.slug == "cylinder.diameter"));
    assert!(store.variant_snapshot(variant_id).unwrap().is_some());
}

#[test]
fn test_sync_definitions_is_idempotent() {
    let taxonomy = partlex_taxonomy::taxonomy();
    let mut store = VariantStore::in_memory().unwrap();

    let first = store.sync_definitions(&taxonomy).unwrap();
    let second = store.sync_definitions(&taxonomy).unwrap();
    assert_eq!(first, second);
}
