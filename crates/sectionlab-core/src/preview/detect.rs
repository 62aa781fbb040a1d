//! Authoring mode detection
//!
//! Heuristic, not a parser: a handful of substring checks decide how a
//! snippet is previewed. Anything ambiguous is treated as markup.

use serde::Serialize;
use std::fmt;

/// Markers of a component-function snippet
const COMPONENT_MARKERS: [&str; 3] = ["import React", "export default function", "return ("];

/// How a snippet is previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Component function body rendered by a UI runtime
    Component,
    /// Bare stylesheet applied to a demo skeleton
    Style,
    /// HTML with templating tags
    Markup,
}

impl Mode {
    /// Badge label shown over the preview frame
    pub fn label(self) -> &'static str {
        match self {
            Mode::Component => "React Mode",
            Mode::Style => "CSS Mode",
            Mode::Markup => "Liquid Mode",
        }
    }

    /// Stable lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Component => "component",
            Mode::Style => "style",
            Mode::Markup => "markup",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a template source
pub fn detect(source: &str) -> Mode {
    if COMPONENT_MARKERS
        .iter()
        .any(|marker| source.contains(marker))
    {
        Mode::Component
    } else if !source.contains('<')
        && source.contains('{')
        && source.contains(':')
        && !source.contains("schema")
    {
        Mode::Style
    } else {
        Mode::Markup
    }
}

/// A template source tagged with its detected mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind<'a> {
    Component(&'a str),
    Style(&'a str),
    Markup(&'a str),
}

impl<'a> TemplateKind<'a> {
    /// Detect the mode once and tag the source with it
    pub fn classify(source: &'a str) -> Self {
        match detect(source) {
            Mode::Component => TemplateKind::Component(source),
            Mode::Style => TemplateKind::Style(source),
            Mode::Markup => TemplateKind::Markup(source),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            TemplateKind::Component(_) => Mode::Component,
            TemplateKind::Style(_) => Mode::Style,
            TemplateKind::Markup(_) => Mode::Markup,
        }
    }

    pub fn source(&self) -> &'a str {
        match self {
            TemplateKind::Component(s) | TemplateKind::Style(s) | TemplateKind::Markup(s) => s,
        }
    }
}
