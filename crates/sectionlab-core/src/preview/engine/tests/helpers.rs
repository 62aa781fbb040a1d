//! Shared test helpers for mock renderer tests

use crate::config::PreviewConfig;
use crate::preview::engine::MockRenderer;
use crate::preview::schema::SchemaDefaults;

/// Section with one setting and a single `card` block type
pub(super) const CARD_SCHEMA: &str = r#"{
    "name": "Cards",
    "settings": [
        { "type": "text", "id": "heading", "default": "Featured" },
        { "type": "image_picker", "id": "image" }
    ],
    "blocks": [
        { "type": "card", "name": "Card", "settings": [ { "id": "title", "default": "Hi" } ] }
    ]
}"#;

/// Section with `card` and `quote` block types
pub(super) const MIXED_SCHEMA: &str = r#"{
    "blocks": [
        { "type": "card", "settings": [ { "id": "title", "default": "Hi" } ] },
        { "type": "quote", "settings": [ { "id": "text", "default": "So good" } ] }
    ]
}"#;

/// Render markup against a schema with the default configuration
pub(super) fn render_with(schema: &str, markup: &str) -> String {
    render_with_config(schema, markup, &PreviewConfig::default())
}

pub(super) fn render_with_config(schema: &str, markup: &str, config: &PreviewConfig) -> String {
    let defaults = SchemaDefaults::from_segment(Some(schema));
    MockRenderer::new(&defaults, config).render(markup, "").markup
}

/// Render markup without any schema
pub(super) fn render(markup: &str) -> String {
    let defaults = SchemaDefaults::default();
    let config = PreviewConfig::default();
    MockRenderer::new(&defaults, &config).render(markup, "").markup
}

/// Resolve control flow only, keeping every other token
pub(super) fn resolve(markup: &str) -> String {
    let defaults = SchemaDefaults::default();
    let config = PreviewConfig::default();
    MockRenderer::new(&defaults, &config).resolve(markup)
}
