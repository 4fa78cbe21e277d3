//! Catalog configuration.

use serde::{Deserialize, Serialize};

use crate::proxy::ProxyOptions;
use crate::storage::TripleStore;
use crate::{Error, Result};

/// Bases and read behaviour for a catalog.
///
/// Unset bases fall back in this order: the subject base defaults to the
/// store's graph base, and the predicate base defaults to the subject base.
///
/// ```
/// use rdf_view::CatalogConfig;
///
/// let config = CatalogConfig::from_json(r#"{ "subject_base": "http://example.com/" }"#).unwrap();
/// assert!(config.collapse_singular);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub subject_base: Option<String>,
    pub predicate_base: Option<String>,
    pub collapse_singular: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            subject_base: None,
            predicate_base: None,
            collapse_singular: true,
        }
    }
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject_base(mut self, base: impl Into<String>) -> Self {
        self.subject_base = Some(base.into());
        self
    }

    pub fn predicate_base(mut self, base: impl Into<String>) -> Self {
        self.predicate_base = Some(base.into());
        self
    }

    pub fn collapse_singular(mut self, collapse: bool) -> Self {
        self.collapse_singular = collapse;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Fill unset bases from `store`, returning `(subject base, proxy options)`.
    pub(crate) fn resolve(&self, store: &dyn TripleStore) -> (Option<String>, ProxyOptions) {
        let subject_base = self.subject_base.clone().or_else(|| store.graph_base());
        let predicate_base = self.predicate_base.clone().or_else(|| subject_base.clone());
        let options = ProxyOptions {
            predicate_base,
            collapse_singular: self.collapse_singular,
        };
        (subject_base, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_fall_back_to_store() {
        let store = MemoryStore::new().with_base("http://example.com/");
        let (subject, options) = CatalogConfig::new().resolve(&store);
        assert_eq!(subject.as_deref(), Some("http://example.com/"));
        assert_eq!(options.predicate_base.as_deref(), Some("http://example.com/"));
        assert!(options.collapse_singular);
    }

    #[test]
    fn test_bases_are_independent() {
        let store = MemoryStore::new();
        let config = CatalogConfig::new()
            .subject_base("http://example.com/")
            .predicate_base("http://example.com/ns#");
        let (subject, options) = config.resolve(&store);
        assert_eq!(subject.as_deref(), Some("http://example.com/"));
        assert_eq!(options.predicate_base.as_deref(), Some("http://example.com/ns#"));
    }

    #[test]
    fn test_from_json() {
        let config = CatalogConfig::from_json(r#"{"predicate_base": "urn:p:", "collapse_singular": false}"#).unwrap();
        assert_eq!(config.subject_base, None);
        assert_eq!(config.predicate_base.as_deref(), Some("urn:p:"));
        assert!(!config.collapse_singular);

        assert!(matches!(CatalogConfig::from_json("{"), Err(Error::ConfigError(_))));
    }
}
