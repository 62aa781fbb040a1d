use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionlabError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to read '{path}': {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID: failed to parse sectionlab.toml: {0}")]
    ConfigInvalid(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Catalog errors
    #[error("CATALOG_READ_ERROR: failed to read '{path}': {reason}")]
    CatalogReadError { path: PathBuf, reason: String },

    #[error("CATALOG_INVALID: {0}")]
    CatalogInvalid(String),

    #[error("SECTION_NOT_FOUND: section '{0}' not found")]
    SectionNotFound(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for SectionlabError {
    fn from(err: serde_json::Error) -> Self {
        SectionlabError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SectionlabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_codes() {
        let err = SectionlabError::SectionNotFound("hero".to_string());
        assert_eq!(err.to_string(), "SECTION_NOT_FOUND: section 'hero' not found");

        let err = SectionlabError::ConfigInvalidValue {
            field: "preview.loop_cycles".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert!(err.to_string().starts_with("CONFIG_INVALID_VALUE: preview.loop_cycles"));
    }

    #[test]
    fn test_json_error_converts_to_generic() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SectionlabError = json_err.into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
