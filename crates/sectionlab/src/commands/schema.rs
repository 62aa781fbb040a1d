//! Schema command - show the defaults a preview would use

use super::read_source;
use crate::output::{print_json, print_text};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use sectionlab_core::preview::{SchemaDefaults, SchemaDescriptor, Segments, SettingsMap};
use std::path::Path;

pub fn run(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let segments = Segments::extract(&source);

    let (name, defaults) = match segments.schema {
        Some(segment) => {
            let schema = SchemaDescriptor::parse(segment).context("invalid schema JSON")?;
            let defaults = SchemaDefaults {
                settings: schema.settings_map(),
                blocks: schema.block_defaults(),
            };
            (schema.name, defaults)
        }
        None => (None, SchemaDefaults::default()),
    };

    if json {
        print_json(&json!({
            "name": name,
            "settings": defaults.settings,
            "blocks": defaults.blocks,
        }))?;
        return Ok(());
    }

    if segments.schema.is_none() {
        println!("{} No schema block found", "→".cyan());
        return Ok(());
    }

    if let Some(name) = &name {
        println!("{} {}", "Schema:".bold(), name);
    }

    println!("{}", "Settings".bold());
    render_settings(&defaults.settings, "  ")?;

    println!("{}", "Blocks".bold());
    if defaults.blocks.is_empty() {
        print_text("  (none)")?;
    }
    for kind in defaults.blocks.types() {
        println!("  {}", kind.cyan());
        if let Some(settings) = defaults.blocks.get(kind) {
            render_settings(settings, "    ")?;
        }
    }

    Ok(())
}

fn render_settings(settings: &SettingsMap, indent: &str) -> Result<()> {
    if settings.is_empty() {
        print_text(&format!("{indent}(no defaults)"))?;
    }
    for (id, value) in settings.iter() {
        print_text(&format!("{indent}{id} = {value}"))?;
    }
    Ok(())
}
