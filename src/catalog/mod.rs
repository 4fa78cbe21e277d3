//! # Catalogs
//!
//! Whole-graph facades keyed by subject identity.
//!
//! | Catalog | Writes | Bases |
//! |---------|--------|-------|
//! | `GraphCatalog` | no | one base for subjects and predicates |
//! | `SubjectCatalog` | yes, creating subjects on demand | independent subject and predicate bases |
//!
//! Every proxy a catalog hands out belongs to the catalog's session, so the
//! same node always comes back as the same instance.

mod subjects;

use std::collections::BTreeSet;
use std::sync::Arc;

use hashbrown::HashSet;

use crate::config::CatalogConfig;
use crate::model::{GraphNode, ResolutionKey};
use crate::proxy::{NodeProxy, Session};
use crate::storage::TripleStore;
use crate::uri;
use crate::{Error, Result};

pub use subjects::SubjectCatalog;

/// Read-only view of every non-literal node in a graph.
pub struct GraphCatalog {
    session: Arc<Session>,
    subject_base: Option<String>,
}

impl GraphCatalog {
    /// Catalog using the store's graph base for subjects and predicates.
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self::with_config(store, CatalogConfig::default())
    }

    pub fn with_base(store: Arc<dyn TripleStore>, base: impl Into<String>) -> Self {
        Self::with_config(store, CatalogConfig::new().subject_base(base))
    }

    pub fn with_config(store: Arc<dyn TripleStore>, config: CatalogConfig) -> Self {
        let (subject_base, options) = config.resolve(store.as_ref());
        Self {
            session: Session::new(store, options),
            subject_base,
        }
    }

    /// Base used to resolve and name subjects.
    pub fn base(&self) -> Option<&str> {
        self.subject_base.as_deref()
    }

    /// Base handed to every proxy for its predicates.
    pub fn predicate_base(&self) -> Option<&str> {
        self.session.options.predicate_base.as_deref()
    }

    pub fn store(&self) -> &dyn TripleStore {
        self.session.store.as_ref()
    }

    /// Number of proxies created so far.
    pub fn cached_proxies(&self) -> usize {
        self.session.cached()
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// Every blank or URI node used as a subject or object, first
    /// appearance first.
    pub fn distinct_nodes(&self) -> Result<Vec<GraphNode>> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for triple in self.store().match_pattern(None, None, None)? {
            for node in [triple.subject, triple.object] {
                if !node.is_literal() && seen.insert(node.clone()) {
                    nodes.push(node);
                }
            }
        }
        Ok(nodes)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.distinct_nodes()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store().match_pattern(None, None, None)?.is_empty())
    }

    /// Proxies for `distinct_nodes`, in the same order.
    pub fn proxies(&self) -> Result<Vec<NodeProxy>> {
        Ok(self
            .distinct_nodes()?
            .into_iter()
            .map(|node| self.session.proxy(node))
            .collect())
    }

    /// Display names of the URI nodes, relativized against the subject base.
    pub fn get_names(&self) -> Result<BTreeSet<String>> {
        let base = self.base();
        Ok(self
            .distinct_nodes()?
            .iter()
            .filter_map(GraphNode::as_uri)
            .map(|iri| uri::relativize(iri, base))
            .collect())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// The proxy for an existing node. Fails `NotFound` when the graph has
    /// no edge touching it.
    pub fn get(&self, key: impl Into<ResolutionKey>) -> Result<NodeProxy> {
        let node = self.subject(&key.into())?;
        if !self.exists(&node)? {
            return Err(Error::NotFound(node.to_string()));
        }
        Ok(self.session.proxy(node))
    }

    /// Named lookup; requires a subject base.
    pub fn get_member(&self, name: &str) -> Result<NodeProxy> {
        self.require_base()?;
        self.get(name)
    }

    pub fn try_get(&self, key: impl Into<ResolutionKey>) -> Result<Option<NodeProxy>> {
        match self.get(key) {
            Ok(proxy) => Ok(Some(proxy)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn contains_key(&self, key: impl Into<ResolutionKey>) -> Result<bool> {
        let node = self.subject(&key.into())?;
        self.exists(&node)
    }

    pub(crate) fn require_base(&self) -> Result<()> {
        match self.subject_base {
            Some(_) => Ok(()),
            None => Err(Error::NoBaseConfigured),
        }
    }

    /// Resolve a key to a subject node. Literals cannot be subjects.
    pub(crate) fn subject(&self, key: &ResolutionKey) -> Result<GraphNode> {
        let prefixes = self.store().prefixes();
        let node = uri::resolve_node(key, self.base(), &prefixes)?;
        if node.is_literal() {
            return Err(Error::UnsupportedKeyType(node.kind_name()));
        }
        Ok(node)
    }

    pub(crate) fn exists(&self, node: &GraphNode) -> Result<bool> {
        let store = self.store();
        Ok(!store.match_pattern(Some(node), None, None)?.is_empty()
            || !store.match_pattern(None, None, Some(node))?.is_empty())
    }
}

impl std::fmt::Debug for GraphCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCatalog")
            .field("subject_base", &self.subject_base)
            .field("predicate_base", &self.predicate_base())
            .field("cached_proxies", &self.cached_proxies())
            .finish()
    }
}
