use serde::{Deserialize, Serialize};
use std::path::Path;

use super::consts::{blocks, cdn, placeholders};
use crate::error::{Result, SectionlabError};

/// sectionlab.toml schema - preview rendering knobs
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewConfig {
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub placeholders: PlaceholderConfig,
    #[serde(default)]
    pub cdn: CdnConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewSettings {
    /// Passes over the declared block types in a simulated blocks loop
    #[serde(default = "default_loop_cycles")]
    pub loop_cycles: usize,
    /// Literal substituted for `{{ section.id }}`
    #[serde(default = "default_section_id")]
    pub section_id: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            loop_cycles: default_loop_cycles(),
            section_id: default_section_id(),
        }
    }
}

fn default_loop_cycles() -> usize {
    blocks::LOOP_CYCLES
}

fn default_section_id() -> String {
    placeholders::SECTION_ID.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceholderConfig {
    #[serde(default = "default_asset_url")]
    pub asset_url: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            asset_url: default_asset_url(),
            image_url: default_image_url(),
        }
    }
}

fn default_asset_url() -> String {
    placeholders::ASSET_URL.to_string()
}

fn default_image_url() -> String {
    placeholders::IMAGE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CdnConfig {
    #[serde(default = "default_tailwind")]
    pub tailwind: String,
    #[serde(default = "default_react")]
    pub react: String,
    #[serde(default = "default_react_dom")]
    pub react_dom: String,
    #[serde(default = "default_babel")]
    pub babel: String,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            tailwind: default_tailwind(),
            react: default_react(),
            react_dom: default_react_dom(),
            babel: default_babel(),
        }
    }
}

fn default_tailwind() -> String {
    cdn::TAILWIND.to_string()
}

fn default_react() -> String {
    cdn::REACT.to_string()
}

fn default_react_dom() -> String {
    cdn::REACT_DOM.to_string()
}

fn default_babel() -> String {
    cdn::BABEL.to_string()
}

impl PreviewConfig {
    /// sectionlab.toml を読み込む
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SectionlabError::ConfigParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SectionlabError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.preview.loop_cycles == 0 {
            return Err(SectionlabError::ConfigInvalidValue {
                field: "preview.loop_cycles".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// sectionlab.toml に書き込む
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SectionlabError::Generic(format!("TOML error: {}", e)))?;

        std::fs::write(path.as_ref(), content).map_err(SectionlabError::IoError)?;

        Ok(())
    }
}
