//! Render command - write a standalone preview document

use super::{load_config, read_source};
use crate::cli::OutputArgs;
use crate::output::print_document;
use anyhow::{Context, Result};
use colored::Colorize;
use sectionlab_core::preview::render_frame;
use sectionlab_core::{PreviewConfig, PreviewEngine};
use std::path::Path;

/// Render a template file (or stdin)
pub fn run(input: &Path, config: Option<&Path>, output: &OutputArgs) -> Result<()> {
    let source = read_source(input)?;
    let config = load_config(config)?;
    emit(&source, config, output)
}

/// Render `source` and write the document where `output` asks
pub(crate) fn emit(source: &str, config: PreviewConfig, output: &OutputArgs) -> Result<()> {
    let engine = PreviewEngine::new(config);
    let document = engine.render(source);
    let mode = document.mode;
    tracing::info!("rendered {} mode preview ({} bytes)", mode, document.html.len());

    let content = if output.frame {
        render_frame(&document, output.class.as_deref())
    } else {
        document.html
    };

    match &output.out {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!(
                "{} Rendered {} preview to {}",
                "✓".green().bold(),
                mode,
                path.display()
            );
        }
        None => print_document(&content)?,
    }

    Ok(())
}
