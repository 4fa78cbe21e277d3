//! Identity cache: one proxy slot per graph node, per session.
//!
//! A `Session` is what a catalog (or a standalone proxy) shares with every
//! proxy it hands out. The cache is an arena: slots are appended and never
//! removed, and a `ProxyId` is the slot index. Proxies hold the session, not
//! each other, so cyclic graphs never produce reference cycles.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::trace;

use crate::model::GraphNode;
use crate::storage::TripleStore;
use super::NodeProxy;

/// Index of a slot in a session's identity cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyId(usize);

impl ProxyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Options every proxy of a session shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOptions {
    /// Base for resolving and naming predicates.
    pub predicate_base: Option<String>,
    /// Return a bare value when a property has exactly one edge.
    pub collapse_singular: bool,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self { predicate_base: None, collapse_singular: true }
    }
}

impl ProxyOptions {
    pub fn with_predicate_base(base: Option<String>) -> Self {
        Self { predicate_base: base, ..Self::default() }
    }
}

#[derive(Default)]
pub(crate) struct IdentityCache {
    slots: Vec<GraphNode>,
    index: HashMap<GraphNode, ProxyId>,
}

impl IdentityCache {
    fn lookup(&self, node: &GraphNode) -> Option<ProxyId> {
        self.index.get(node).copied()
    }

    fn intern(&mut self, node: &GraphNode) -> ProxyId {
        if let Some(id) = self.lookup(node) {
            return id;
        }
        let id = ProxyId(self.slots.len());
        self.slots.push(node.clone());
        self.index.insert(node.clone(), id);
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Shared state behind every proxy handed out by one catalog.
pub(crate) struct Session {
    pub(crate) store: Arc<dyn TripleStore>,
    pub(crate) options: ProxyOptions,
    cache: RwLock<IdentityCache>,
}

impl Session {
    pub(crate) fn new(store: Arc<dyn TripleStore>, options: ProxyOptions) -> Arc<Self> {
        Arc::new(Self {
            store,
            options,
            cache: RwLock::new(IdentityCache::default()),
        })
    }

    /// The proxy for `node`, created on first request.
    pub(crate) fn proxy(self: &Arc<Self>, node: GraphNode) -> NodeProxy {
        let existing = self.cache.read().lookup(&node);
        let id = match existing {
            Some(id) => id,
            None => {
                let id = self.cache.write().intern(&node);
                trace!(%node, slot = id.index(), "proxy slot created");
                id
            }
        };
        NodeProxy::from_parts(Arc::clone(self), id, node)
    }

    pub(crate) fn cached(&self) -> usize {
        self.cache.read().len()
    }
}
