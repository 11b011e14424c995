//! Partlex Persistence Adapter
//!
//! Merges extraction outcomes and manual attribute edits into a SQLite
//! store: a fact table keyed by `(variant, definition, value tuple, source)`,
//! an attribute-definition catalog keyed by slug, and a denormalized legacy
//! snapshot column on the variant record.
//!
//! # Write contract
//!
//! - Extraction runs delete-then-reinsert rows where `source = 'extracted'`
//!   for the attribute slugs present in the outcome
//! - Manual runs do the same for `source = 'manual'`, plus an explicit
//!   clear list for attributes the operator emptied
//! - Every call runs inside a single transaction - partial writes are never
//!   left visible to readers
//! - Slugs with no catalog entry are skipped with a warning, never a crash:
//!   an outcome touching 50 attributes where one slug is missing still
//!   persists the other 49
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe and the adapter does no internal
//! locking. Concurrent calls for different variants are independent;
//! callers must serialize writes to the same variant.

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use partlex_domain::{AttributeValue, ExtractionOutcome, ManualAttributeInput, Taxonomy};
use partlex_engine::{build_extraction_snapshot, build_manual_snapshot, Snapshot};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Snapshot column serialization error
    #[error("snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Variant does not exist
    #[error("variant not found: {0}")]
    VariantNotFound(i64),
}

/// Outcome of one persistence call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistSummary {
    /// Attributes whose rows were replaced
    pub attributes_written: usize,

    /// Value rows inserted
    pub rows_inserted: usize,

    /// Slugs skipped because the catalog has no entry for them
    pub skipped_slugs: Vec<String>,
}

/// One fact-table row, read back for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAttribute {
    /// Attribute slug (joined from the catalog)
    pub slug: String,
    /// Text value, when the value is textual
    pub value_text: Option<String>,
    /// Numeric value, when the value is numeric
    pub value_number: Option<f64>,
    /// Boolean value, when the value is a flag
    pub value_boolean: Option<bool>,
    /// Unit of the value
    pub unit: Option<String>,
    /// `extracted` or `manual`
    pub source: String,
    /// Confidence as a fixed-point decimal string
    pub confidence: String,
    /// Field the value came from
    pub source_field: Option<String>,
}

/// Source tag on rows written by extraction runs
const SOURCE_EXTRACTED: &str = "extracted";

/// Source tag on rows written by manual edits
const SOURCE_MANUAL: &str = "manual";

/// SQLite-backed variant attribute store
pub struct VariantStore {
    conn: Connection,
}

impl VariantStore {
    /// Open (or create) a store at the given database path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (useful for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Create a variant record, returning its id
    pub fn create_variant(&self, name: &str) -> Result<i64, StoreError> {
        self.conn
            .execute("INSERT INTO variants (name) VALUES (?1)", params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Upsert the attribute-definition catalog from a taxonomy.
    ///
    /// Idempotent; returns the number of definitions synced. Slugs are the
    /// stable key - labels and metadata follow the taxonomy on re-sync.
    pub fn sync_definitions(&mut self, taxonomy: &Taxonomy) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        for definition in &taxonomy.attributes {
            tx.execute(
                "INSERT INTO attribute_definitions (slug, label, data_type, scope, importance, unit)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(slug) DO UPDATE SET
                 label = excluded.label, data_type = excluded.data_type,
                 scope = excluded.scope, importance = excluded.importance,
                 unit = excluded.unit",
                params![
                    &definition.slug,
                    &definition.label,
                    definition.data_type.as_str(),
                    definition.scope.as_str(),
                    definition.importance.as_str(),
                    definition.unit.as_deref(),
                ],
            )?;
        }
        tx.commit()?;

        debug!(
            definitions = taxonomy.attributes.len(),
            version = %taxonomy.version,
            "definition catalog synced"
        );
        Ok(taxonomy.attributes.len())
    }

    /// Persist an extraction outcome for a variant.
    ///
    /// Replaces all rows with `source = 'extracted'` for the slugs present
    /// in the outcome, then optionally merges the flattened legacy snapshot
    /// into the variant record without touching keys from other runs. Runs
    /// in a single transaction.
    pub fn persist_extraction_result(
        &mut self,
        variant_id: i64,
        outcome: &ExtractionOutcome,
        merge_snapshot: bool,
    ) -> Result<PersistSummary, StoreError> {
        let tx = self.conn.transaction()?;
        ensure_variant(&tx, variant_id)?;

        let mut summary = PersistSummary::default();

        for attribute in &outcome.attributes {
            let Some(definition_id) = definition_id(&tx, &attribute.slug)? else {
                warn!(slug = %attribute.slug, "no catalog entry; skipping attribute");
                summary.skipped_slugs.push(attribute.slug.clone());
                continue;
            };

            tx.execute(
                "DELETE FROM variant_attributes
                 WHERE variant_id = ?1 AND attribute_definition_id = ?2 AND source = ?3",
                params![variant_id, definition_id, SOURCE_EXTRACTED],
            )?;

            for hit in &attribute.values {
                let (value_text, value_number, value_boolean) = split_value(&hit.normalized_value);
                let provenance = serde_json::json!({
                    "raw": hit.raw_value,
                    "rule": hit.rule_name,
                    "context": hit.context_window,
                    "dictionaryMatch": hit.dictionary_match,
                });

                tx.execute(
                    "INSERT INTO variant_attributes
                     (variant_id, attribute_definition_id, value_text, value_number,
                      value_boolean, unit, source, confidence, source_field, recorded_at, provenance)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        variant_id,
                        definition_id,
                        value_text,
                        value_number,
                        value_boolean,
                        hit.unit.as_deref(),
                        SOURCE_EXTRACTED,
                        format!("{:.3}", hit.confidence),
                        hit.source_field.as_str(),
                        outcome.meta.generated_at.to_rfc3339(),
                        provenance.to_string(),
                    ],
                )?;
                summary.rows_inserted += 1;
            }
            summary.attributes_written += 1;
        }

        if merge_snapshot {
            let snapshot = build_extraction_snapshot(outcome);
            merge_snapshot_column(&tx, variant_id, &snapshot, &[])?;
        }

        tx.commit()?;

        info!(
            variant_id,
            attributes = summary.attributes_written,
            rows = summary.rows_inserted,
            skipped = summary.skipped_slugs.len(),
            "extraction result persisted"
        );
        Ok(summary)
    }

    /// Persist manual attribute edits for a variant.
    ///
    /// Symmetric to [`Self::persist_extraction_result`] but scoped to
    /// `source = 'manual'` rows. `clear_slugs` removes manual values for
    /// attributes not present in the new input (an operator clearing a
    /// field); cleared slugs are also deleted from the legacy snapshot
    /// before the new entries merge in.
    pub fn persist_manual_attributes(
        &mut self,
        variant_id: i64,
        inputs: &[ManualAttributeInput],
        clear_slugs: &[String],
        timestamp: DateTime<Utc>,
    ) -> Result<PersistSummary, StoreError> {
        let tx = self.conn.transaction()?;
        ensure_variant(&tx, variant_id)?;

        let mut summary = PersistSummary::default();

        for slug in clear_slugs {
            let Some(definition_id) = definition_id(&tx, slug)? else {
                continue;
            };
            tx.execute(
                "DELETE FROM variant_attributes
                 WHERE variant_id = ?1 AND attribute_definition_id = ?2 AND source = ?3",
                params![variant_id, definition_id, SOURCE_MANUAL],
            )?;
        }

        for input in inputs {
            let Some(definition_id) = definition_id(&tx, &input.slug)? else {
                warn!(slug = %input.slug, "no catalog entry; skipping attribute");
                summary.skipped_slugs.push(input.slug.clone());
                continue;
            };

            tx.execute(
                "DELETE FROM variant_attributes
                 WHERE variant_id = ?1 AND attribute_definition_id = ?2 AND source = ?3",
                params![variant_id, definition_id, SOURCE_MANUAL],
            )?;

            for value in &input.values {
                let (value_text, value_number, value_boolean) = split_value(&value.value);
                tx.execute(
                    "INSERT INTO variant_attributes
                     (variant_id, attribute_definition_id, value_text, value_number,
                      value_boolean, unit, source, confidence, source_field, recorded_at, provenance)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                    params![
                        variant_id,
                        definition_id,
                        value_text,
                        value_number,
                        value_boolean,
                        value.unit.as_deref(),
                        SOURCE_MANUAL,
                        format!("{:.3}", value.confidence.unwrap_or(1.0)),
                        "manual_entry",
                        timestamp.to_rfc3339(),
                        Option::<String>::None,
                    ],
                )?;
                summary.rows_inserted += 1;
            }
            summary.attributes_written += 1;
        }

        let snapshot = build_manual_snapshot(inputs, timestamp);
        merge_snapshot_column(&tx, variant_id, &snapshot, clear_slugs)?;

        tx.commit()?;

        info!(
            variant_id,
            attributes = summary.attributes_written,
            rows = summary.rows_inserted,
            cleared = clear_slugs.len(),
            "manual attributes persisted"
        );
        Ok(summary)
    }

    /// Read back a variant's legacy snapshot column
    pub fn variant_snapshot(&self, variant_id: i64) -> Result<Option<serde_json::Value>, StoreError> {
        let raw: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT attribute_snapshot FROM variants WHERE id = ?1",
                params![variant_id],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(Some(text)) => Ok(Some(serde_json::from_str(&text)?)),
            _ => Ok(None),
        }
    }

    /// Read back all fact rows for a variant, joined with their slugs
    pub fn attribute_rows(&self, variant_id: i64) -> Result<Vec<StoredAttribute>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT d.slug, va.value_text, va.value_number, va.value_boolean,
                    va.unit, va.source, va.confidence, va.source_field
             FROM variant_attributes va
             JOIN attribute_definitions d ON d.id = va.attribute_definition_id
             WHERE va.variant_id = ?1
             ORDER BY va.id",
        )?;

        let rows = stmt
            .query_map(params![variant_id], |row| {
                Ok(StoredAttribute {
                    slug: row.get(0)?,
                    value_text: row.get(1)?,
                    value_number: row.get(2)?,
                    value_boolean: row.get(3)?,
                    unit: row.get(4)?,
                    source: row.get(5)?,
                    confidence: row.get(6)?,
                    source_field: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

/// Resolve a slug to its durable catalog id
fn definition_id(tx: &Transaction<'_>, slug: &str) -> Result<Option<i64>, StoreError> {
    let id = tx
        .query_row(
            "SELECT id FROM attribute_definitions WHERE slug = ?1",
            params![slug],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn ensure_variant(tx: &Transaction<'_>, variant_id: i64) -> Result<(), StoreError> {
    let exists: Option<i64> = tx
        .query_row(
            "SELECT id FROM variants WHERE id = ?1",
            params![variant_id],
            |row| row.get(0),
        )
        .optional()?;
    match exists {
        Some(_) => Ok(()),
        None => Err(StoreError::VariantNotFound(variant_id)),
    }
}

/// Split a value across the fact table's typed columns
fn split_value(value: &AttributeValue) -> (Option<String>, Option<f64>, Option<bool>) {
    match value {
        AttributeValue::Text(s) => (Some(s.clone()), None, None),
        AttributeValue::Number(n) => (None, Some(*n), None),
        AttributeValue::Flag(b) => (None, None, Some(*b)),
    }
}

/// Merge a snapshot into the variant's denormalized JSON column.
///
/// Existing keys not touched by this run survive; `clear_slugs` keys are
/// deleted before the new entries spread over.
fn merge_snapshot_column(
    tx: &Transaction<'_>,
    variant_id: i64,
    snapshot: &Snapshot,
    clear_slugs: &[String],
) -> Result<(), StoreError> {
    let current: Option<Option<String>> = tx
        .query_row(
            "SELECT attribute_snapshot FROM variants WHERE id = ?1",
            params![variant_id],
            |row| row.get(0),
        )
        .optional()?;

    let mut merged = match current {
        Some(Some(text)) => serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.as_object().cloned())
            .unwrap_or_default(),
        _ => serde_json::Map::new(),
    };

    for slug in clear_slugs {
        merged.remove(slug);
    }
    for (slug, entry) in snapshot {
        merged.insert(slug.clone(), serde_json::to_value(entry)?);
    }

    tx.execute(
        "UPDATE variants SET attribute_snapshot = ?1 WHERE id = ?2",
        params![serde_json::Value::Object(merged).to_string(), variant_id],
    )?;

    Ok(())
}
