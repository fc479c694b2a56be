// Command-line JSON validation

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use json_validation::{SchemaStore, ValidateError};

#[derive(Parser)]
#[command(name = "validate-json")]
#[command(about = "Validate a JSON document against a schema", version)]
struct Args {
    /// Path to the schema document
    schema: PathBuf,

    /// Path to the JSON document to validate
    input: PathBuf,

    /// Root name used in reported paths
    #[arg(long, default_value = "root")]
    root: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "validate_json=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Exit codes: 0 valid, 1 invalid document, 2 schema or usage problem
    if let Err(error) = run() {
        eprintln!("Error: {:#}", error);
        process::exit(2);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let store = SchemaStore::load(&args.schema)
        .with_context(|| format!("Failed to load schema {}", args.schema.display()))?;

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input {}", args.input.display()))?;
    let document: Value = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse input {}", args.input.display()))?;

    debug!(schema = %args.schema.display(), input = %args.input.display(), "validating document");

    match store.validate_named(&document, &args.root) {
        Ok(()) => {
            println!("✓ Validation successful");
            println!("  Input: {}", args.input.display());
            println!("  Schema: {}", args.schema.display());
            Ok(())
        }
        Err(ValidateError::Validation(error)) => {
            eprintln!("✖ {}", error);
            process::exit(1);
        }
        Err(ValidateError::Schema(error)) => Err(error).context("Schema is invalid"),
    }
}
