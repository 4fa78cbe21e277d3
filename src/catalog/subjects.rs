//! Writable catalog with separate subject and predicate bases.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use super::GraphCatalog;
use crate::builder::Builder;
use crate::config::CatalogConfig;
use crate::model::{GraphNode, ResolutionKey, Structure, Triple, Value};
use crate::proxy::NodeProxy;
use crate::storage::TripleStore;
use crate::{Error, Result};

/// A catalog whose subjects can be assigned whole.
///
/// Subject keys resolve against the subject base; every proxy it hands out
/// resolves property keys against the predicate base. Assigning to a key
/// with no matching node creates it: string keys name a URI node, node keys
/// name themselves.
pub struct SubjectCatalog {
    catalog: GraphCatalog,
}

impl SubjectCatalog {
    pub fn new(
        store: Arc<dyn TripleStore>,
        subject_base: Option<&str>,
        predicate_base: Option<&str>,
    ) -> Self {
        let config = CatalogConfig {
            subject_base: subject_base.map(str::to_owned),
            predicate_base: predicate_base.map(str::to_owned),
            ..CatalogConfig::default()
        };
        Self::with_config(store, config)
    }

    pub fn with_config(store: Arc<dyn TripleStore>, config: CatalogConfig) -> Self {
        Self { catalog: GraphCatalog::with_config(store, config) }
    }

    /// Read-only view over the same session.
    pub fn catalog(&self) -> &GraphCatalog {
        &self.catalog
    }

    pub fn subject_base(&self) -> Option<&str> {
        self.catalog.base()
    }

    pub fn predicate_base(&self) -> Option<&str> {
        self.catalog.predicate_base()
    }

    pub fn store(&self) -> &dyn TripleStore {
        self.catalog.store()
    }

    // ========================================================================
    // Read (same contract as GraphCatalog)
    // ========================================================================

    pub fn distinct_nodes(&self) -> Result<Vec<GraphNode>> {
        self.catalog.distinct_nodes()
    }

    pub fn len(&self) -> Result<usize> {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.catalog.is_empty()
    }

    pub fn proxies(&self) -> Result<Vec<NodeProxy>> {
        self.catalog.proxies()
    }

    pub fn get_names(&self) -> Result<BTreeSet<String>> {
        self.catalog.get_names()
    }

    pub fn get(&self, key: impl Into<ResolutionKey>) -> Result<NodeProxy> {
        self.catalog.get(key)
    }

    pub fn get_member(&self, name: &str) -> Result<NodeProxy> {
        self.catalog.get_member(name)
    }

    pub fn try_get(&self, key: impl Into<ResolutionKey>) -> Result<Option<NodeProxy>> {
        self.catalog.try_get(key)
    }

    pub fn contains_key(&self, key: impl Into<ResolutionKey>) -> Result<bool> {
        self.catalog.contains_key(key)
    }

    // ========================================================================
    // Write
    // ========================================================================

    /// Replace everything known about a subject.
    ///
    /// - `Null` (or an empty structure) leaves it cleared,
    /// - a `Structure` is built onto it field by field,
    /// - a proxy has its outgoing edges copied onto it.
    ///
    /// The new edges are fully planned before the old ones are retracted.
    /// Any failure, including a `TypeError` for other values, leaves the
    /// subject as it was.
    pub fn set(&self, key: impl Into<ResolutionKey>, value: impl Into<Value>) -> Result<()> {
        let subject = self.catalog.subject(&key.into())?;
        let pending = self.plan(&subject, value.into())?;
        let created = !self.catalog.exists(&subject)?;
        let removed = self.store().retract_matching(Some(&subject), None, None)?;
        let added = self.builder().commit(pending)?;
        debug!(%subject, created, removed, added, "subject set");
        Ok(())
    }

    /// Named assignment; requires a subject base.
    pub fn set_member(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.catalog.require_base()?;
        self.set(name, value)
    }

    /// Like `set`, without retracting existing edges first.
    pub fn add(&self, key: impl Into<ResolutionKey>, value: impl Into<Value>) -> Result<()> {
        let subject = self.catalog.subject(&key.into())?;
        let pending = self.plan(&subject, value.into())?;
        let added = self.builder().commit(pending)?;
        debug!(%subject, added, "subject extended");
        Ok(())
    }

    /// True when the subject has every edge `fields` describes.
    ///
    /// Fields holding structures never match, and neither does a structure
    /// that describes no edges.
    pub fn contains(&self, key: impl Into<ResolutionKey>, fields: &Structure) -> Result<bool> {
        let subject = self.catalog.subject(&key.into())?;
        let Some(triples) = self.builder().lookup_structure(fields, &subject)? else {
            return Ok(false);
        };
        if triples.is_empty() {
            return Ok(false);
        }
        for t in &triples {
            let found = self
                .store()
                .match_pattern(Some(&t.subject), Some(&t.predicate), Some(&t.object))?;
            if found.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Retract every edge with the subject. Returns whether any existed.
    pub fn remove(&self, key: impl Into<ResolutionKey>) -> Result<bool> {
        let subject = self.catalog.subject(&key.into())?;
        let removed = self.store().retract_matching(Some(&subject), None, None)?;
        debug!(%subject, removed, "subject removed");
        Ok(removed > 0)
    }

    /// Retract only the edges `fields` describes. Returns whether any went.
    pub fn remove_value(&self, key: impl Into<ResolutionKey>, fields: &Structure) -> Result<bool> {
        let subject = self.catalog.subject(&key.into())?;
        let Some(triples) = self.builder().lookup_structure(fields, &subject)? else {
            return Ok(false);
        };
        let mut removed = 0;
        for triple in &triples {
            if self.store().retract(triple)? {
                removed += 1;
            }
        }
        debug!(%subject, removed, "subject edges removed");
        Ok(removed > 0)
    }

    /// Retract every edge in the graph. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.store().retract_matching(None, None, None)?;
        debug!(removed, "catalog cleared");
        Ok(removed)
    }

    fn builder(&self) -> Builder<'_> {
        Builder::new(self.store(), self.predicate_base())
    }

    /// Edges assigning `value` to `subject` would assert.
    fn plan(&self, subject: &GraphNode, value: Value) -> Result<Vec<Triple>> {
        let mut pending = Vec::new();
        match value {
            Value::Null => {}
            Value::Map(structure) => {
                self.builder().plan_structure(&structure, subject, &mut pending)?;
            }
            Value::Proxy(source) => {
                pending.extend(
                    self.store()
                        .match_pattern(Some(source.node()), None, None)?
                        .into_iter()
                        .map(|t| Triple::new(subject.clone(), t.predicate, t.object)),
                );
            }
            other => {
                return Err(Error::TypeError {
                    expected: "structure".into(),
                    got: other.type_name().into(),
                })
            }
        }
        Ok(pending)
    }
}

impl std::fmt::Debug for SubjectCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectCatalog")
            .field("subject_base", &self.subject_base())
            .field("predicate_base", &self.predicate_base())
            .finish()
    }
}
