//! CLI command implementations

pub mod catalog;
pub mod detect;
pub mod render;
pub mod schema;

use anyhow::{Context, Result};
use sectionlab_core::PreviewConfig;
use std::io::Read;
use std::path::Path;

/// Read a template from a file, or from stdin when the path is `-`
pub(crate) fn read_source(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read template from stdin")?;
        return Ok(source);
    }

    std::fs::read_to_string(input)
        .with_context(|| format!("failed to read template '{}'", input.display()))
}

/// Load the preview configuration, falling back to defaults
pub(crate) fn load_config(path: Option<&Path>) -> Result<PreviewConfig> {
    match path {
        Some(path) => {
            tracing::info!("loading configuration from {}", path.display());
            Ok(PreviewConfig::from_file(path)?)
        }
        None => Ok(PreviewConfig::default()),
    }
}
