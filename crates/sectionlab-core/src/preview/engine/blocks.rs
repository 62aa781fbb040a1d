//! Block loop simulation utilities
//!
//! `{% for block in section.blocks %}` has no real data at mock time, so a
//! fixed number of items is synthesized from the block types the schema
//! declares.

use super::tokenize::{TokenKind, rewrite_tokens};
use crate::preview::schema::{BlockDefaultsMap, SettingsMap};

/// One synthesized loop item
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockItem<'a> {
    pub kind: &'a str,
    pub id: String,
}

/// Synthesize `cycles` passes over every declared block type
///
/// Items come out one full pass at a time (every type for cycle 1, then
/// every type for cycle 2, ...). The id embeds the item's position in the
/// whole list.
pub(crate) fn simulate_blocks(blocks: &BlockDefaultsMap, cycles: usize) -> Vec<BlockItem<'_>> {
    (0..cycles)
        .flat_map(|_| blocks.types())
        .enumerate()
        .map(|(index, kind)| BlockItem {
            kind,
            id: format!("block-{}-{}", kind, index),
        })
        .collect()
}

/// Specialize a loop body for one synthesized item
///
/// - `<var>.type` / `<var>.id` become quoted literals everywhere, tags included
/// - `{{ <var>.settings.<key> }}` becomes the block type's default, or
///   nothing when the key has no default
pub(crate) fn specialize_body(
    body: &str,
    var: &str,
    item: &BlockItem<'_>,
    defaults: &SettingsMap,
) -> String {
    let body = replace_accessor(body, &format!("{}.type", var), &format!("'{}'", item.kind));
    let body = replace_accessor(&body, &format!("{}.id", var), &format!("'{}'", item.id));

    let settings_prefix = format!("{}.settings.", var);
    rewrite_tokens(&body, |token| match &token.kind {
        TokenKind::Output { expr } => expr
            .strip_prefix(settings_prefix.as_str())
            .filter(|key| is_identifier(key))
            .map(|key| defaults.get(key).unwrap_or_default().to_string()),
        TokenKind::Tag { .. } => None,
    })
}

/// Replace `accessor` wherever it stands alone as a dotted identifier path
fn replace_accessor(text: &str, accessor: &str, replacement: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(accessor) {
        let start = pos + offset;
        let end = start + accessor.len();

        let before_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_path_char(c));
        let after_ok = text[end..].chars().next().is_none_or(|c| !is_path_char(c));

        output.push_str(&text[pos..start]);
        if before_ok && after_ok {
            output.push_str(replacement);
        } else {
            output.push_str(accessor);
        }
        pos = end;
    }

    output.push_str(&text[pos..]);
    output
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(types: &[(&str, &[(&str, &str)])]) -> BlockDefaultsMap {
        let mut map = BlockDefaultsMap::default();
        for (kind, defaults) in types {
            let mut settings = SettingsMap::default();
            for (id, value) in *defaults {
                settings.insert(id.to_string(), value.to_string());
            }
            map.insert(kind.to_string(), settings);
        }
        map
    }

    #[test]
    fn test_simulate_cycles_through_every_type() {
        let map = blocks(&[("card", &[]), ("quote", &[])]);
        let items = simulate_blocks(&map, 4);
        let kinds: Vec<&str> = items.iter().map(|item| item.kind).collect();
        assert_eq!(
            kinds,
            vec!["card", "quote", "card", "quote", "card", "quote", "card", "quote"]
        );
        assert_eq!(items[0].id, "block-card-0");
        assert_eq!(items[3].id, "block-quote-3");
        assert_eq!(items[7].id, "block-quote-7");
    }

    #[test]
    fn test_simulate_without_types_is_empty() {
        assert!(simulate_blocks(&BlockDefaultsMap::default(), 4).is_empty());
    }

    #[test]
    fn test_specialize_settings() {
        let map = blocks(&[("card", &[("title", "Hi")])]);
        let item = BlockItem {
            kind: "card",
            id: "block-card-0".to_string(),
        };
        let defaults = map.get("card").unwrap();

        let out = specialize_body(
            "<li>{{ block.settings.title }}|{{block.settings.missing}}</li>",
            "block",
            &item,
            defaults,
        );
        assert_eq!(out, "<li>Hi|</li>");
    }

    #[test]
    fn test_specialize_type_and_id_inside_tags() {
        let item = BlockItem {
            kind: "card",
            id: "block-card-2".to_string(),
        };
        let out = specialize_body(
            r#"{% if block.type == "card" %}<div id="{{ block.id }}"></div>{% endif %}"#,
            "block",
            &item,
            &SettingsMap::default(),
        );
        assert_eq!(
            out,
            r#"{% if 'card' == "card" %}<div id="{{ 'block-card-2' }}"></div>{% endif %}"#
        );
    }

    #[test]
    fn test_specialize_respects_identifier_boundaries() {
        let item = BlockItem {
            kind: "card",
            id: "block-card-0".to_string(),
        };
        let out = specialize_body(
            "{{ subblock.type }} {{ block.types }} {{ block.settings.type }}",
            "block",
            &item,
            &SettingsMap::default(),
        );
        assert_eq!(out, "{{ subblock.type }} {{ block.types }} ");
    }

    #[test]
    fn test_specialize_leaves_filtered_settings_for_cleanup() {
        let map = blocks(&[("card", &[("title", "Hi")])]);
        let item = BlockItem {
            kind: "card",
            id: "block-card-0".to_string(),
        };
        let out = specialize_body(
            "{{ block.settings.title | upcase }}",
            "block",
            &item,
            map.get("card").unwrap(),
        );
        assert_eq!(out, "{{ block.settings.title | upcase }}");
    }
}
