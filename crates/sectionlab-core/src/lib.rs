// Core modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod preview;

// Re-export commonly used types
pub use config::PreviewConfig;
pub use error::{Result, SectionlabError};
pub use preview::{Mode, PreviewEngine, RenderedDocument, render};
