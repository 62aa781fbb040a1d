//! Catalog commands - list and render sections from a catalog export

use super::load_config;
use crate::cli::OutputArgs;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sectionlab_core::catalog::Catalog;
use sectionlab_core::preview::{Mode, detect};
use std::path::Path;

/// One row of `catalog list`
#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    slug: &'a str,
    title: &'a str,
    category: &'a str,
    mode: Mode,
    likes: usize,
    bookmarks: usize,
}

/// Render the code of the section with `slug`
pub fn run_render(
    catalog: &Path,
    slug: &str,
    config: Option<&Path>,
    output: &OutputArgs,
) -> Result<()> {
    let catalog = Catalog::from_file(catalog)?;
    let record = catalog.get(slug)?;
    tracing::info!("rendering catalog section '{}'", record.slug);

    let config = load_config(config)?;
    super::render::emit(&record.code, config, output)
}

/// List every section in the catalog
pub fn run_list(catalog: &Path, json: bool) -> Result<()> {
    let catalog = Catalog::from_file(catalog)?;
    let entries: Vec<CatalogEntry<'_>> = catalog
        .iter()
        .map(|record| CatalogEntry {
            slug: &record.slug,
            title: &record.title,
            category: &record.category,
            mode: detect(&record.code),
            likes: record.likes.len(),
            bookmarks: record.saved_by.len(),
        })
        .collect();

    if json {
        print_json(&entries)?;
        return Ok(());
    }

    if entries.is_empty() {
        println!("{} Catalog is empty", "→".cyan());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{} {} [{}] {} ({} likes, {} saved)",
            entry.slug.bold(),
            entry.title,
            entry.category,
            entry.mode.to_string().cyan(),
            entry.likes,
            entry.bookmarks
        );
    }

    println!("\n{} {} sections", "✓".green().bold(), entries.len());
    Ok(())
}
