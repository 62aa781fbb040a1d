//! Preview module - mock rendering of section snippets
//!
//! Turns a user-authored snippet into a standalone HTML document that can
//! be loaded into a sandboxed frame, without a real templating runtime.
//!
//! ## Modes
//!
//! - **Component**: a function component, mounted by an in-browser runtime
//! - **Style**: a bare stylesheet, applied to a demo skeleton
//! - **Markup**: HTML with templating tags, mock-rendered here
//!
//! ## Markup pipeline
//!
//! 1. Split off stylesheets, script and schema ([`segments`])
//! 2. Read setting and block defaults from the schema ([`schema`])
//! 3. Resolve `if`/`unless`/`case` and simulate `section.blocks` loops ([`engine`])
//! 4. Substitute known references, strip everything unresolved
//! 5. Assemble the document
//!
//! Rendering never fails: problems degrade the preview instead.

mod assemble;
pub mod detect;
pub mod engine;
pub mod frame;
pub mod schema;
pub mod segments;

pub use detect::{Mode, TemplateKind, detect};
pub use frame::render_frame;
pub use schema::{BlockDefaultsMap, SchemaDefaults, SchemaDescriptor, SettingsMap};
pub use segments::Segments;

use crate::config::PreviewConfig;
use engine::MockRenderer;

/// A self-contained preview document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Mode the source was rendered in
    pub mode: Mode,
    /// Complete HTML document
    pub html: String,
    /// Stylesheet placed in the document (markup mode only)
    pub css: String,
    /// Script placed in the document (markup mode only)
    pub script: String,
}

/// Preview engine with its configuration
#[derive(Debug, Clone, Default)]
pub struct PreviewEngine {
    config: PreviewConfig,
}

impl PreviewEngine {
    /// Create a new preview engine
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Render a template source into a preview document
    pub fn render(&self, source: &str) -> RenderedDocument {
        let kind = TemplateKind::classify(source);
        tracing::debug!("rendering preview in {} mode", kind.mode());

        match kind {
            TemplateKind::Component(source) => RenderedDocument {
                mode: Mode::Component,
                html: assemble::component_document(source, &self.config.cdn),
                css: String::new(),
                script: String::new(),
            },
            TemplateKind::Style(source) => RenderedDocument {
                mode: Mode::Style,
                html: assemble::style_document(source),
                css: String::new(),
                script: String::new(),
            },
            TemplateKind::Markup(source) => self.render_markup(source),
        }
    }

    fn render_markup(&self, source: &str) -> RenderedDocument {
        let segments = Segments::extract(source);
        let defaults = SchemaDefaults::from_segment(segments.schema);

        let output = MockRenderer::new(&defaults, &self.config).render(&segments.markup, &segments.css);
        let html = assemble::markup_document(
            &output.markup,
            &output.css,
            segments.script,
            &self.config.cdn,
        );

        RenderedDocument {
            mode: Mode::Markup,
            html,
            css: output.css,
            script: segments.script.to_string(),
        }
    }
}

/// Convenience function to render with the default configuration
pub fn render(source: &str) -> RenderedDocument {
    PreviewEngine::default().render(source)
}
