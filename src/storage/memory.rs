//! In-memory triple store.
//!
//! This is the reference implementation of `TripleStore`.
//! Triples live in insertion order behind a single `RwLock`, with a hashed
//! membership set so assert/retract stay idempotent.
//!
//! ## Limitations
//!
//! - **No persistence**: dropping the last handle drops the graph.
//! - **Linear scans**: `match_pattern` walks every triple. Fine for tests and
//!   small embedded graphs, not for large datasets.
//!
//! Clones share the same underlying graph.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashbrown::HashSet;
use parking_lot::RwLock;

use crate::model::{GraphNode, Triple};
use crate::Result;
use super::{NamespaceMap, TripleStore};

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory RDF graph.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    table: RwLock<TripleTable>,
    namespaces: RwLock<NamespaceMap>,
    base: RwLock<Option<String>>,
    next_blank_id: AtomicU64,
}

#[derive(Default)]
struct TripleTable {
    ordered: Vec<Triple>,
    members: HashSet<Triple>,
    /// Every blank label ever asserted; minted labels avoid these.
    blank_labels: HashSet<String>,
}

impl MemoryStore {
    /// Empty graph with the `rdf`, `rdfs` and `xsd` prefixes registered.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                table: RwLock::new(TripleTable::default()),
                namespaces: RwLock::new(NamespaceMap::standard()),
                base: RwLock::new(None),
                next_blank_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let store = Self::new();
        {
            let mut table = store.inner.table.write();
            for triple in triples {
                table.insert(triple);
            }
        }
        store
    }

    pub fn with_base(self, base: impl Into<String>) -> Self {
        self.set_base(Some(base.into()));
        self
    }

    pub fn with_prefix(self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.add_prefix(prefix, namespace);
        self
    }

    pub fn set_base(&self, base: Option<String>) {
        *self.inner.base.write() = base;
    }

    pub fn add_prefix(&self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.inner.namespaces.write().add(prefix, namespace);
    }

    pub fn len(&self) -> usize {
        self.inner.table.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.table.read().ordered.is_empty()
    }

    /// Snapshot of all triples in insertion order.
    pub fn triples(&self) -> Vec<Triple> {
        self.inner.table.read().ordered.clone()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.inner.table.read().members.contains(triple)
    }

    /// Same set of triples, ignoring order. Blank labels must match exactly.
    pub fn same_triples(&self, other: &MemoryStore) -> bool {
        let a = self.inner.table.read();
        let b = other.inner.table.read();
        a.members == b.members
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("triples", &self.len())
            .field("base", &*self.inner.base.read())
            .finish()
    }
}

impl TripleTable {
    fn insert(&mut self, triple: Triple) -> bool {
        if self.members.contains(&triple) {
            return false;
        }
        for node in [&triple.subject, &triple.object] {
            if let GraphNode::Blank(label) = node {
                self.blank_labels.insert(label.clone());
            }
        }
        self.members.insert(triple.clone());
        self.ordered.push(triple);
        true
    }

    fn remove(&mut self, triple: &Triple) -> bool {
        if !self.members.remove(triple) {
            return false;
        }
        self.ordered.retain(|t| t != triple);
        true
    }
}

// ============================================================================
// TripleStore impl
// ============================================================================

impl TripleStore for MemoryStore {
    fn match_pattern(
        &self,
        subject: Option<&GraphNode>,
        predicate: Option<&GraphNode>,
        object: Option<&GraphNode>,
    ) -> Result<Vec<Triple>> {
        let table = self.inner.table.read();
        Ok(table
            .ordered
            .iter()
            .filter(|t| t.matches(subject, predicate, object))
            .cloned()
            .collect())
    }

    fn assert(&self, triple: Triple) -> Result<bool> {
        Ok(self.inner.table.write().insert(triple))
    }

    fn retract(&self, triple: &Triple) -> Result<bool> {
        Ok(self.inner.table.write().remove(triple))
    }

    fn create_blank_node(&self) -> Result<GraphNode> {
        let table = self.inner.table.read();
        loop {
            let id = self.inner.next_blank_id.fetch_add(1, Ordering::Relaxed);
            let label = format!("genid{id}");
            if !table.blank_labels.contains(&label) {
                return Ok(GraphNode::Blank(label));
            }
        }
    }

    fn prefixes(&self) -> NamespaceMap {
        self.inner.namespaces.read().clone()
    }

    fn graph_base(&self) -> Option<String> {
        self.inner.base.read().clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
