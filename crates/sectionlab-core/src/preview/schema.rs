//! Schema block parsing
//!
//! The `{% schema %}` block carries a JSON object declaring section
//! settings and block types with their defaults. Only `id`/`default` (and
//! `type` for blocks) matter for previews; every other authoring field is
//! accepted and ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single `settings[]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingDecl {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub default: Option<Value>,
}

/// A single `blocks[]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDecl {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: Vec<SettingDecl>,
}

/// Parsed schema block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: Vec<SettingDecl>,
    #[serde(default)]
    pub blocks: Vec<BlockDecl>,
}

impl SchemaDescriptor {
    /// Parse schema JSON
    ///
    /// Malformed JSON is an error. Well-formed JSON of the wrong shape
    /// degrades entry by entry: unusable `settings`/`blocks` entries are
    /// skipped instead of rejecting the whole schema.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    fn from_value(value: &Value) -> Self {
        Self {
            name: value.get("name").and_then(Value::as_str).map(str::to_string),
            settings: lenient_entries(value.get("settings")),
            blocks: lenient_entries(value.get("blocks")),
        }
    }

    /// Section-level defaults
    pub fn settings_map(&self) -> SettingsMap {
        SettingsMap::from_decls(&self.settings)
    }

    /// Per-block-type defaults, in declaration order
    pub fn block_defaults(&self) -> BlockDefaultsMap {
        let mut map = BlockDefaultsMap::default();
        for block in &self.blocks {
            if let Some(kind) = &block.kind {
                map.insert(kind.clone(), SettingsMap::from_decls(&block.settings));
            }
        }
        map
    }
}

/// Deserialize each array element on its own, skipping the ones that fail
fn lenient_entries<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Embed a JSON default as text, without type coercion
pub(crate) fn stringify_default(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Setting id → default value, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMap {
    entries: Vec<(String, String)>,
}

impl SettingsMap {
    fn from_decls(decls: &[SettingDecl]) -> Self {
        let mut map = Self::default();
        for decl in decls {
            if let (Some(id), Some(default)) = (&decl.id, &decl.default)
                && let Some(value) = stringify_default(default)
            {
                map.insert(id.clone(), value);
            }
        }
        map
    }

    /// Insert a default, replacing an earlier entry with the same id
    pub fn insert(&mut self, id: String, value: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for SettingsMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Block type → that type's SettingsMap, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDefaultsMap {
    entries: Vec<(String, SettingsMap)>,
}

impl BlockDefaultsMap {
    /// Insert a block type, replacing an earlier declaration of the same type
    pub fn insert(&mut self, kind: String, defaults: SettingsMap) {
        match self.entries.iter_mut().find(|(key, _)| *key == kind) {
            Some(entry) => entry.1 = defaults,
            None => self.entries.push((kind, defaults)),
        }
    }

    pub fn get(&self, kind: &str) -> Option<&SettingsMap> {
        self.entries
            .iter()
            .find(|(key, _)| key == kind)
            .map(|(_, defaults)| defaults)
    }

    /// Declared block types in order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(kind, _)| kind.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BlockDefaultsMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(kind, defaults)| (kind, defaults)))
    }
}

/// Defaults extracted from a schema block for one render call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDefaults {
    pub settings: SettingsMap,
    pub blocks: BlockDefaultsMap,
}

impl SchemaDefaults {
    /// Build defaults from the schema segment, if any
    ///
    /// Parse failures are logged and yield empty defaults.
    pub fn from_segment(segment: Option<&str>) -> Self {
        let Some(json) = segment else {
            return Self::default();
        };

        match SchemaDescriptor::parse(json) {
            Ok(schema) => Self {
                settings: schema.settings_map(),
                blocks: schema.block_defaults(),
            },
            Err(e) => {
                tracing::warn!("Schema parse error: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "name": "Feature grid",
        "settings": [
            { "type": "text", "id": "heading", "label": "Heading", "default": "Our features" },
            { "type": "range", "id": "columns", "default": 3 },
            { "type": "checkbox", "id": "show_badge", "default": true },
            { "type": "text", "id": "subtitle", "label": "No default" },
            { "type": "header", "content": "Layout" }
        ],
        "blocks": [
            {
                "type": "card",
                "name": "Card",
                "settings": [
                    { "type": "text", "id": "title", "default": "Hi" },
                    { "type": "image_picker", "id": "image" }
                ]
            },
            { "type": "quote" }
        ]
    }"#;

    #[test]
    fn test_parse_settings_skips_entries_without_default() {
        let schema = SchemaDescriptor::parse(SCHEMA).unwrap();
        assert_eq!(schema.name.as_deref(), Some("Feature grid"));

        let settings = schema.settings_map();
        assert_eq!(settings.len(), 3);
        assert_eq!(settings.get("heading"), Some("Our features"));
        assert_eq!(settings.get("subtitle"), None);
    }

    #[test]
    fn test_defaults_embedded_without_coercion() {
        let settings = SchemaDescriptor::parse(SCHEMA).unwrap().settings_map();
        assert_eq!(settings.get("columns"), Some("3"));
        assert_eq!(settings.get("show_badge"), Some("true"));
    }

    #[test]
    fn test_settings_keep_declaration_order() {
        let settings = SchemaDescriptor::parse(SCHEMA).unwrap().settings_map();
        let ids: Vec<&str> = settings.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["heading", "columns", "show_badge"]);
    }

    #[test]
    fn test_block_defaults() {
        let blocks = SchemaDescriptor::parse(SCHEMA).unwrap().block_defaults();
        assert_eq!(blocks.types().collect::<Vec<_>>(), vec!["card", "quote"]);

        let card = blocks.get("card").unwrap();
        assert_eq!(card.get("title"), Some("Hi"));
        assert_eq!(card.get("image"), None);
        assert!(blocks.get("quote").unwrap().is_empty());
    }

    #[test]
    fn test_null_default_treated_as_absent() {
        let schema = SchemaDescriptor::parse(r#"{"settings":[{"id":"a","default":null}]}"#).unwrap();
        assert!(schema.settings_map().is_empty());
    }

    #[test]
    fn test_wrongly_typed_entries_are_skipped() {
        let json = r#"{
            "settings": [ 42, { "id": "ok", "default": "yes" }, { "id": 7, "default": "no" } ],
            "blocks": { "not": "an array" }
        }"#;
        let schema = SchemaDescriptor::parse(json).unwrap();
        assert_eq!(schema.settings_map().get("ok"), Some("yes"));
        assert_eq!(schema.settings_map().len(), 1);
        assert!(schema.block_defaults().is_empty());
    }

    #[test]
    fn test_block_without_type_is_skipped() {
        let json = r#"{"blocks":[{"settings":[{"id":"a","default":"b"}]},{"type":"slide"}]}"#;
        let blocks = SchemaDescriptor::parse(json).unwrap().block_defaults();
        assert_eq!(blocks.types().collect::<Vec<_>>(), vec!["slide"]);
    }

    #[test]
    fn test_invalid_json_degrades_to_empty_defaults() {
        let defaults = SchemaDefaults::from_segment(Some("{ not json"));
        assert_eq!(defaults, SchemaDefaults::default());
    }

    #[test]
    fn test_missing_segment_yields_empty_defaults() {
        assert_eq!(SchemaDefaults::from_segment(None), SchemaDefaults::default());
    }

    #[test]
    fn test_serializes_as_ordered_objects() {
        let defaults = SchemaDefaults::from_segment(Some(SCHEMA));
        let json = serde_json::to_string(&defaults).unwrap();
        assert!(json.starts_with(r#"{"settings":{"heading":"Our features","columns":"3""#));
        assert!(json.contains(r#""blocks":{"card":{"title":"Hi"},"quote":{}}"#));
    }

    #[test]
    fn test_non_object_schema_yields_empty_defaults() {
        let defaults = SchemaDefaults::from_segment(Some("[1, 2, 3]"));
        assert!(defaults.settings.is_empty());
        assert!(defaults.blocks.is_empty());
    }
}
