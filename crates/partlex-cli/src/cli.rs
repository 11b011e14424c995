//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};

/// Partlex CLI - run attribute extractions against product listings.
#[derive(Debug, Parser)]
#[command(name = "partlex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract attributes from a listing and print the outcome as JSON
    Extract(ExtractArgs),

    /// List the shipped taxonomy's attribute definitions
    Attributes,

    /// Extract and persist the result into a store database
    Persist(PersistArgs),
}

/// Target input, from a JSON file or inline flags.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Path to a JSON-encoded extraction target
    #[arg(short, long, conflicts_with = "name")]
    pub file: Option<String>,

    /// Product name (inline target)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Product description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Bullet point (repeatable)
    #[arg(short, long = "bullet")]
    pub bullets: Vec<String>,

    /// Spec-sheet line (repeatable)
    #[arg(short, long = "spec")]
    pub spec_sheet: Vec<String>,

    /// Category label (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the flattened legacy snapshot instead of the full outcome
    #[arg(long)]
    pub snapshot: bool,
}

/// Arguments for the persist command.
#[derive(Debug, Args)]
pub struct PersistArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Store database path
    #[arg(long, env = "PARTLEX_DB")]
    pub db: String,

    /// Existing variant id to persist into
    #[arg(long, conflicts_with = "variant_name")]
    pub variant_id: Option<i64>,

    /// Create a new variant with this name and persist into it
    #[arg(long)]
    pub variant_name: Option<String>,
}
