use anyhow::{Context, Result};
use std::path::PathBuf;

use hapbench::fixtures::read_container_table;
use hapbench::loader::default_strategies;

/// Columns listed before the schema preview is cut off
const SCHEMA_PREVIEW: usize = 8;

/// Display information about a container fixture
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let (manifest, batches) =
        read_container_table(&file).context("Failed to read container")?;

    println!("hapbench Container Information");
    println!("==============================");
    println!("File: {}", file.display());
    println!();

    println!("Manifest:");
    println!("  Format version: {}", manifest.format_version);
    println!("  Table: {} ({})", manifest.table_name, manifest.table_entry);
    println!("  Shape: {} rows x {} columns", manifest.num_rows, manifest.num_columns);
    match manifest.generator_seed {
        Some(seed) => println!("  Generator seed: {}", seed),
        None => println!("  Generator seed: <unknown>"),
    }
    println!("  Run: {}", manifest.run_id);
    println!("  Created: {}", manifest.created_at.to_rfc3339());
    println!();

    println!("Table:");
    println!("  Record batches: {}", batches.len());
    if let Some(first) = batches.first() {
        let schema = first.schema();
        println!("  Schema columns: {}", schema.fields().len());
        for (i, field) in schema.fields().iter().take(SCHEMA_PREVIEW).enumerate() {
            println!("  {:3}. {} ({})", i + 1, field.name(), field.data_type());
        }
        if schema.fields().len() > SCHEMA_PREVIEW {
            println!("       ... {} more", schema.fields().len() - SCHEMA_PREVIEW);
        }
    }

    Ok(())
}

/// List the built-in strategies and their capabilities
pub fn strategies() -> Result<()> {
    for strategy in default_strategies() {
        println!("{:<26} {}", strategy.name(), strategy.capabilities());
    }
    Ok(())
}
