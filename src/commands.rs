// src/commands.rs
//! Command handlers for the apndb CLI

use anyhow::{Context, Result};
use apndb::{Config, DEFAULT_CONFIG_PATH, MergedDatabase, render_report};
use std::path::Path;
use tracing::info;

/// Merge both databases and print the sorted carrier report to stdout
pub fn cmd_report(android_db: &Path, mbpi_db: &Path) -> Result<()> {
    let config = Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))
        .context("Failed to load configuration")?;

    let merged = MergedDatabase::from_files(android_db, mbpi_db, &config).with_context(|| {
        format!(
            "Failed to merge {} into {}",
            android_db.display(),
            mbpi_db.display()
        )
    })?;

    let stats = merged.stats();
    info!(
        "Merged database: {} APNs in {} carriers ({} conflicts, {} incomplete)",
        stats.accepted,
        merged.carriers().len(),
        stats.conflicts,
        stats.invalid
    );

    for line in render_report(&merged) {
        println!("{}", line);
    }

    Ok(())
}
