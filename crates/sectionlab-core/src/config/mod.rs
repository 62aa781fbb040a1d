//! Preview configuration (`sectionlab.toml`) and engine constants

pub mod consts;
pub mod model;

pub use model::{CdnConfig, PlaceholderConfig, PreviewConfig, PreviewSettings};
