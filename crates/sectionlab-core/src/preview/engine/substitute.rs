//! Variable substitution and terminal cleanup
//!
//! Runs after control flow is resolved. Known references become their
//! defaults or fixed placeholders; every other `{{ }}` / `{% %}` token is
//! stripped so the output is always displayable markup.

use super::tokenize::{Token, TokenKind, rewrite_tokens};
use crate::config::PreviewConfig;
use crate::config::consts::placeholders;
use crate::preview::schema::SettingsMap;

const SECTION_SETTINGS: &str = "section.settings.";
const SECTION_ID: &str = "section.id";

/// Substitutes section-level references in resolved markup and CSS
pub(crate) struct Substituter<'a> {
    settings: &'a SettingsMap,
    config: &'a PreviewConfig,
}

impl<'a> Substituter<'a> {
    pub fn new(settings: &'a SettingsMap, config: &'a PreviewConfig) -> Self {
        Self { settings, config }
    }

    /// Resolve `{{ section.settings.<key> }}` to its default
    ///
    /// `None` when `expr` is not a plain settings reference. A reference
    /// without a default resolves to the empty string.
    fn setting(&self, expr: &str) -> Option<String> {
        expr.strip_prefix(SECTION_SETTINGS)
            .filter(|key| !key.is_empty() && !key.contains(['|', ' ']))
            .map(|key| self.settings.get(key).unwrap_or_default().to_string())
    }

    /// Substitute settings references in a stylesheet, leaving other tags as authored
    pub fn stylesheet(&self, css: &str) -> String {
        rewrite_tokens(css, |token| match &token.kind {
            TokenKind::Output { expr } => self.setting(expr),
            TokenKind::Tag { .. } => None,
        })
    }

    /// Substitute every known reference in markup and strip the rest
    pub fn markup(&self, html: &str) -> String {
        rewrite_tokens(html, |token| Some(self.replace_token(token)))
    }

    fn replace_token(&self, token: &Token) -> String {
        match &token.kind {
            TokenKind::Output { expr } => self.replace_output(expr),
            TokenKind::Tag { name, args } => replace_tag(name, args),
        }
    }

    fn replace_output(&self, expr: &str) -> String {
        if let Some(value) = self.setting(expr) {
            return value;
        }
        if expr == SECTION_ID {
            return self.config.preview.section_id.clone();
        }

        let (subject, filters) = split_filters(expr);
        if filters.first() == Some(&"asset_url") && filters.len() == 1 && is_quoted(subject) {
            return self.config.placeholders.asset_url.clone();
        }
        if filters.iter().any(|filter| filter_name(filter) == "image_url") {
            return self.config.placeholders.image_url.clone();
        }
        String::new()
    }
}

fn replace_tag(name: &str, args: &str) -> String {
    match name {
        "render" if args.starts_with(['\'', '"']) => placeholders::RENDERED_SNIPPET.to_string(),
        "form" => placeholders::FORM_OPEN.to_string(),
        "endform" => placeholders::FORM_CLOSE.to_string(),
        _ => String::new(),
    }
}

/// Split `subject | filter: args | filter` into the subject and filter list
fn split_filters(expr: &str) -> (&str, Vec<&str>) {
    let mut parts = expr.split('|').map(str::trim);
    let subject = parts.next().unwrap_or_default();
    (subject, parts.collect())
}

/// Name part of `filter: args`
fn filter_name(filter: &str) -> &str {
    filter.split(':').next().unwrap_or_default().trim()
}

/// A single- or double-quoted string literal
fn is_quoted(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SettingsMap {
        let mut map = SettingsMap::default();
        map.insert("heading".to_string(), "Welcome".to_string());
        map.insert("accent".to_string(), "#ff0000".to_string());
        map
    }

    #[test]
    fn test_settings_replaced_in_markup() {
        let settings = settings();
        let config = PreviewConfig::default();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.markup("<h1>{{ section.settings.heading }}</h1><p>{{section.settings.none}}</p>"),
            "<h1>Welcome</h1><p></p>"
        );
    }

    #[test]
    fn test_settings_replaced_in_css_other_tags_kept() {
        let settings = settings();
        let config = PreviewConfig::default();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.stylesheet(".a { color: {{ section.settings.accent }}; } .b { color: {{ section.settings.none }}; } {{ other }}"),
            ".a { color: #ff0000; } .b { color: ; } {{ other }}"
        );
    }

    #[test]
    fn test_placeholder_urls() {
        let settings = SettingsMap::default();
        let config = PreviewConfig::default();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.markup("<img src=\"{{ 'hero.png' | asset_url }}\">"),
            "<img src=\"https://placehold.co/600x400/EEE/31343C?text=Asset\">"
        );
        assert_eq!(
            sub.markup("<img src=\"{{ section.settings.image | image_url: width: 800 }}\">"),
            "<img src=\"https://placehold.co/600x400/EEE/31343C?text=Image\">"
        );
    }

    #[test]
    fn test_section_id_replaced_literals_stripped() {
        let settings = SettingsMap::default();
        let config = PreviewConfig::default();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.markup("<section id=\"s-{{ section.id }}\" class=\"{{ 'card' }}\">"),
            "<section id=\"s-custom-preview-123\" class=\"\">"
        );
        assert_eq!(sub.markup("<p>{{ \"hello\" }}</p>"), "<p></p>");
    }

    #[test]
    fn test_render_and_form_tags() {
        let settings = SettingsMap::default();
        let config = PreviewConfig::default();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.markup("{% render 'icon', name: 'cart' %}{% form 'contact' %}<input>{% endform %}"),
            "<!-- Rendered Snippet --><form onsubmit=\"event.preventDefault();\"><input></form>"
        );
    }

    #[test]
    fn test_everything_else_stripped() {
        let settings = SettingsMap::default();
        let config = PreviewConfig::default();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.markup("a{{ product.title | upcase }}b{% assign x = 1 %}c{%- increment n -%}d"),
            "abcd"
        );
    }

    #[test]
    fn test_configured_placeholders() {
        let settings = SettingsMap::default();
        let mut config = PreviewConfig::default();
        config.preview.section_id = "hero-7".to_string();
        config.placeholders.image_url = "/img.png".to_string();
        let sub = Substituter::new(&settings, &config);
        assert_eq!(
            sub.markup("{{ section.id }} {{ image | image_url }}"),
            "hero-7 /img.png"
        );
    }
}
