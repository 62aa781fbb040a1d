//! Detect command - print the authoring mode

use super::read_source;
use crate::output::{print_json, print_text};
use anyhow::Result;
use serde_json::json;
use sectionlab_core::preview::detect;
use std::path::Path;

pub fn run(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let mode = detect(&source);

    if json {
        print_json(&json!({
            "mode": mode,
            "label": mode.label(),
        }))?;
    } else {
        print_text(mode.as_str())?;
    }

    Ok(())
}
