//! Read-only catalog loaded from a JSON export

use std::path::Path;

use super::model::{SectionRecord, ToggleOutcome};
use crate::error::{Result, SectionlabError};

/// Section records keyed by slug
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<SectionRecord>,
}

impl Catalog {
    pub fn new(records: Vec<SectionRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of section records
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SectionlabError::CatalogReadError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_json(&content)
    }

    /// Parse a JSON array of section records
    pub fn from_json(content: &str) -> Result<Self> {
        let records: Vec<SectionRecord> = serde_json::from_str(content)
            .map_err(|e| SectionlabError::CatalogInvalid(e.to_string()))?;
        Ok(Self::new(records))
    }

    pub fn find(&self, slug: &str) -> Option<&SectionRecord> {
        self.records.iter().find(|record| record.slug == slug)
    }

    /// Like [`Catalog::find`], failing with `SECTION_NOT_FOUND`
    pub fn get(&self, slug: &str) -> Result<&SectionRecord> {
        self.find(slug)
            .ok_or_else(|| SectionlabError::SectionNotFound(slug.to_string()))
    }

    fn get_mut(&mut self, slug: &str) -> Result<&mut SectionRecord> {
        self.records
            .iter_mut()
            .find(|record| record.slug == slug)
            .ok_or_else(|| SectionlabError::SectionNotFound(slug.to_string()))
    }

    /// Toggle `user_id`'s like on a section
    pub fn toggle_like(&mut self, slug: &str, user_id: &str) -> Result<ToggleOutcome> {
        Ok(self.get_mut(slug)?.toggle_like(user_id))
    }

    /// Toggle `user_id`'s bookmark on a section
    pub fn toggle_bookmark(&mut self, slug: &str, user_id: &str) -> Result<ToggleOutcome> {
        Ok(self.get_mut(slug)?.toggle_bookmark(user_id))
    }

    /// Sections bookmarked by `user_id`
    pub fn saved_by<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a SectionRecord> {
        self.records
            .iter()
            .filter(move |record| record.is_saved_by(user_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"slug": "hero", "name": "Hero", "category": "Hero", "code": "<h1>Hero</h1>"},
        {"slug": "grid", "title": "Grid", "category": "Product", "code": ".grid { display: grid; }", "saved_by": ["u1"]}
    ]"#;

    #[test]
    fn test_find_and_get() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("grid").unwrap().title, "Grid");
        assert!(catalog.find("missing").is_none());

        let err = catalog.get("missing").unwrap_err();
        assert!(matches!(err, SectionlabError::SectionNotFound(slug) if slug == "missing"));
    }

    #[test]
    fn test_toggles_through_catalog() {
        let mut catalog = Catalog::from_json(CATALOG).unwrap();

        let outcome = catalog.toggle_like("hero", "u1").unwrap();
        assert!(outcome.flag);
        assert_eq!(outcome.count, 1);

        let outcome = catalog.toggle_bookmark("grid", "u1").unwrap();
        assert!(!outcome.flag);
        assert_eq!(outcome.count, 0);

        assert!(catalog.toggle_like("missing", "u1").is_err());
    }

    #[test]
    fn test_saved_by() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let saved: Vec<&str> = catalog.saved_by("u1").map(|r| r.slug.as_str()).collect();
        assert_eq!(saved, vec!["grid"]);
    }

    #[test]
    fn test_invalid_catalog() {
        let err = Catalog::from_json(r#"{"slug": "not-an-array"}"#).unwrap_err();
        assert!(matches!(err, SectionlabError::CatalogInvalid(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        assert!(!catalog.is_empty());

        let err = Catalog::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().starts_with("CATALOG_READ_ERROR"));
    }
}
