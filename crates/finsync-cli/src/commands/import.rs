//! Import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use finsync_core::import::import_csv;

use super::open_store;

pub fn cmd_import(data_path: &Path, file: &Path) -> Result<()> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    println!("📥 Importing {}...", file.display());

    let store = open_store(data_path);
    let stats = import_csv(csv_file, &store)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!();
    println!("✅ Import complete!");
    println!("   Imported: {}", stats.imported);
    println!("   Skipped (duplicates): {}", stats.skipped);

    Ok(())
}
