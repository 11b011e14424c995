//! Partlex command-line interface.
//!
//! Thin operator surface over the extraction engine and the store: run a
//! listing through the shipped taxonomy, inspect the taxonomy, or persist
//! an outcome into a store database.

mod cli;

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use cli::{Cli, Command, ExtractArgs, PersistArgs, TargetArgs};
use partlex_domain::ExtractionTarget;
use partlex_engine::{build_extraction_snapshot, extract_attributes, ExtractionContext};
use partlex_store::VariantStore;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract(args) => extract(args),
        Command::Attributes => attributes(),
        Command::Persist(args) => persist(args),
    }
}

/// Build the extraction target from a JSON file or inline flags
fn load_target(args: &TargetArgs) -> Result<ExtractionTarget> {
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading target file {path}"))?;
        let target = serde_json::from_str(&text)
            .with_context(|| format!("parsing target file {path}"))?;
        return Ok(target);
    }

    let Some(name) = &args.name else {
        bail!("either --file or --name is required");
    };

    Ok(ExtractionTarget {
        name: name.clone(),
        description: args.description.clone(),
        bullets: args.bullets.clone(),
        spec_sheet: args.spec_sheet.clone(),
        categories: args.categories.clone(),
        legacy_attributes: None,
    })
}

fn extract(args: ExtractArgs) -> Result<()> {
    let target = load_target(&args.target)?;
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy)?;

    let outcome = extract_attributes(&target, &context, None);
    if args.snapshot {
        let snapshot = build_extraction_snapshot(&outcome);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }
    Ok(())
}

fn attributes() -> Result<()> {
    let taxonomy = partlex_taxonomy::taxonomy();

    println!(
        "{:<24} {:<10} {:<10} {:>5}  label",
        "slug", "type", "scope", "rules"
    );
    for definition in &taxonomy.attributes {
        println!(
            "{:<24} {:<10} {:<10} {:>5}  {}",
            definition.slug,
            definition.data_type.as_str(),
            definition.scope.as_str(),
            definition.regex.len(),
            definition.label
        );
    }
    println!(
        "\n{} attributes, taxonomy version {}",
        taxonomy.attributes.len(),
        taxonomy.version
    );
    Ok(())
}

fn persist(args: PersistArgs) -> Result<()> {
    let target = load_target(&args.target)?;
    let taxonomy = partlex_taxonomy::taxonomy();
    let context = ExtractionContext::compile(&taxonomy)?;
    let outcome = extract_attributes(&target, &context, None);

    let mut store = VariantStore::open(&args.db)
        .with_context(|| format!("opening store database {}", args.db))?;
    store.sync_definitions(&taxonomy)?;

    let variant_id = match (args.variant_id, &args.variant_name) {
        (Some(id), _) => id,
        (None, Some(name)) => store.create_variant(name)?,
        (None, None) => store.create_variant(&target.name)?,
    };

    let summary = store.persist_extraction_result(variant_id, &outcome, true)?;
    println!(
        "variant {}: {} attributes, {} rows",
        variant_id, summary.attributes_written, summary.rows_inserted
    );
    if !summary.skipped_slugs.is_empty() {
        println!(
            "skipped (no catalog entry): {}",
            summary.skipped_slugs.join(", ")
        );
    }
    Ok(())
}
