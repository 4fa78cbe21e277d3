//! # NodeProxy
//!
//! The object view of one graph node. Reads resolve a key to a predicate,
//! match `(node, predicate, ?)` and convert each object: literals through
//! the coercion engine, everything else into the session's cached proxy.
//! Writes go through the graph builder.
//!
//! ```text
//! get("name")  ──► resolve ──► match(node, p, ?) ──► [Value] ──► Property
//! set("name", v) ─► resolve ──► decompose v ──► retract(node, p, ?) ──► assert
//! ```
//!
//! Proxies handed out by the same catalog share a session. Within a session
//! each node has exactly one proxy slot, so reaching a node along two paths
//! yields the same instance (`NodeProxy::same_instance`).

mod cache;
mod collection;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::builder::{ensure_subject, Builder};
use crate::coerce;
use crate::model::{GraphNode, ResolutionKey, Triple, Value};
use crate::storage::TripleStore;
use crate::uri;
use crate::{Error, Result};

pub use cache::{ProxyId, ProxyOptions};
pub use collection::{Property, PropertyCollection};
pub(crate) use cache::Session;

/// Mixed into the hash so a proxy never hashes like its bare node.
const PROXY_HASH_TAG: u8 = 0x70;

/// Object view of a single graph node.
///
/// Cheap to clone; clones are the same instance. Equality, hashing and
/// ordering look only at the wrapped node.
#[derive(Clone)]
pub struct NodeProxy {
    session: Arc<Session>,
    id: ProxyId,
    node: GraphNode,
}

impl NodeProxy {
    /// Standalone proxy with its own identity cache.
    ///
    /// Literal nodes cannot carry edges and fail with `TypeError`.
    pub fn new(
        store: Arc<dyn TripleStore>,
        node: GraphNode,
        predicate_base: Option<&str>,
    ) -> Result<Self> {
        Self::with_options(store, node, ProxyOptions::with_predicate_base(predicate_base.map(str::to_owned)))
    }

    pub fn with_options(store: Arc<dyn TripleStore>, node: GraphNode, options: ProxyOptions) -> Result<Self> {
        ensure_subject(&node)?;
        Ok(Session::new(store, options).proxy(node))
    }

    pub(crate) fn from_parts(session: Arc<Session>, id: ProxyId, node: GraphNode) -> Self {
        Self { session, id, node }
    }

    pub fn node(&self) -> &GraphNode {
        &self.node
    }

    pub fn id(&self) -> ProxyId {
        self.id
    }

    pub fn predicate_base(&self) -> Option<&str> {
        self.session.options.predicate_base.as_deref()
    }

    pub fn options(&self) -> &ProxyOptions {
        &self.session.options
    }

    pub fn store(&self) -> &dyn TripleStore {
        self.session.store.as_ref()
    }

    /// Reference identity: the same slot of the same identity cache.
    pub fn same_instance(a: &NodeProxy, b: &NodeProxy) -> bool {
        Arc::ptr_eq(&a.session, &b.session) && a.id == b.id
    }

    fn builder(&self) -> Builder<'_> {
        Builder::new(self.store(), self.predicate_base())
    }

    fn require_base(&self) -> Result<()> {
        match self.predicate_base() {
            Some(_) => Ok(()),
            None => Err(Error::NoBaseConfigured),
        }
    }

    fn predicate(&self, key: impl Into<ResolutionKey>) -> Result<GraphNode> {
        self.builder().predicate(&key.into())
    }

    // ========================================================================
    // Read
    // ========================================================================

    /// Read a property. No edges is an empty collection, not an error.
    pub fn get(&self, key: impl Into<ResolutionKey>) -> Result<Property> {
        let predicate = self.predicate(key)?;
        let values = self.read(&predicate)?;
        Ok(Property::from_collection(values, self.session.options.collapse_singular))
    }

    /// Named read; the name resolves against the predicate base.
    pub fn get_member(&self, name: &str) -> Result<Property> {
        self.require_base()?;
        self.get(name)
    }

    /// `None` when the property has no edges.
    pub fn try_get(&self, key: impl Into<ResolutionKey>) -> Result<Option<Property>> {
        let property = self.get(key)?;
        Ok((!property.is_empty()).then_some(property))
    }

    fn read(&self, predicate: &GraphNode) -> Result<PropertyCollection> {
        let triples = self.store().match_pattern(Some(&self.node), Some(predicate), None)?;
        Ok(triples
            .into_iter()
            .map(|t| object_value(&self.session, t.object))
            .collect())
    }

    pub fn contains_key(&self, key: impl Into<ResolutionKey>) -> Result<bool> {
        let predicate = self.predicate(key)?;
        Ok(!self.store().match_pattern(Some(&self.node), Some(&predicate), None)?.is_empty())
    }

    /// True when every object `value` decomposes to is already present.
    /// Structures are never contained.
    pub fn contains(&self, key: impl Into<ResolutionKey>, value: impl Into<Value>) -> Result<bool> {
        let builder = self.builder();
        let predicate = builder.predicate(&key.into())?;
        let Some(objects) = builder.lookup_objects(&value.into())? else {
            return Ok(false);
        };
        if objects.is_empty() {
            return Ok(false);
        }
        for object in &objects {
            if self.store().match_pattern(Some(&self.node), Some(&predicate), Some(object))?.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Distinct predicates of the outgoing edges, in storage order.
    pub fn predicates(&self) -> Result<Vec<GraphNode>> {
        let mut seen = hashbrown::HashSet::new();
        Ok(self
            .store()
            .match_pattern(Some(&self.node), None, None)?
            .into_iter()
            .map(|t| t.predicate)
            .filter(|p| seen.insert(p.clone()))
            .collect())
    }

    /// Number of distinct predicates.
    pub fn len(&self) -> Result<usize> {
        Ok(self.predicates()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store().match_pattern(Some(&self.node), None, None)?.is_empty())
    }

    /// Every property as `(predicate, values)`, grouped in storage order.
    pub fn entries(&self) -> Result<Vec<(GraphNode, PropertyCollection)>> {
        let mut grouped: Vec<(GraphNode, Vec<Value>)> = Vec::new();
        for triple in self.store().match_pattern(Some(&self.node), None, None)? {
            let value = object_value(&self.session, triple.object);
            match grouped.iter_mut().find(|(p, _)| *p == triple.predicate) {
                Some((_, values)) => values.push(value),
                None => grouped.push((triple.predicate, vec![value])),
            }
        }
        Ok(grouped
            .into_iter()
            .map(|(p, values)| (p, values.into_iter().collect()))
            .collect())
    }

    /// Display names of the outgoing predicates, relativized against the
    /// predicate base when one is set.
    pub fn get_names(&self) -> Result<BTreeSet<String>> {
        let base = self.predicate_base();
        Ok(self
            .predicates()?
            .iter()
            .filter_map(GraphNode::as_uri)
            .map(|iri| uri::relativize(iri, base))
            .collect())
    }

    // ========================================================================
    // Write
    // ========================================================================

    /// Replace a property: retract `(node, p, ?)`, then assert the
    /// decomposition of `value`. `Null` just removes the property.
    ///
    /// The whole value is planned before the old edges are retracted, so a
    /// failing value leaves the property and the graph untouched.
    pub fn set(&self, key: impl Into<ResolutionKey>, value: impl Into<Value>) -> Result<()> {
        let builder = self.builder();
        let predicate = builder.predicate(&key.into())?;
        let mut pending = Vec::new();
        builder.plan_property(&self.node, &predicate, &value.into(), &mut pending)?;
        let removed = self.store().retract_matching(Some(&self.node), Some(&predicate), None)?;
        let added = builder.commit(pending)?;
        debug!(subject = %self.node, %predicate, removed, added, "property set");
        Ok(())
    }

    /// Named write; requires a predicate base.
    pub fn set_member(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.require_base()?;
        self.set(name, value)
    }

    /// Assert the decomposition of `value` without retracting anything.
    pub fn add(&self, key: impl Into<ResolutionKey>, value: impl Into<Value>) -> Result<()> {
        let builder = self.builder();
        let predicate = builder.predicate(&key.into())?;
        let mut pending = Vec::new();
        builder.plan_property(&self.node, &predicate, &value.into(), &mut pending)?;
        let added = builder.commit(pending)?;
        debug!(subject = %self.node, %predicate, added, "property values added");
        Ok(())
    }

    /// Remove a property. Returns whether it had any edges.
    pub fn remove(&self, key: impl Into<ResolutionKey>) -> Result<bool> {
        let predicate = self.predicate(key)?;
        let removed = self.store().retract_matching(Some(&self.node), Some(&predicate), None)?;
        debug!(subject = %self.node, %predicate, removed, "property removed");
        Ok(removed > 0)
    }

    /// Remove the edges `value` decomposes to. Returns whether any went.
    pub fn remove_value(&self, key: impl Into<ResolutionKey>, value: impl Into<Value>) -> Result<bool> {
        let builder = self.builder();
        let predicate = builder.predicate(&key.into())?;
        let Some(objects) = builder.lookup_objects(&value.into())? else {
            return Ok(false);
        };
        let mut removed = 0;
        for object in objects {
            let triple = Triple::new(self.node.clone(), predicate.clone(), object);
            if self.store().retract(&triple)? {
                removed += 1;
            }
        }
        debug!(subject = %self.node, %predicate, removed, "property values removed");
        Ok(removed > 0)
    }

    /// Retract every outgoing edge. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.store().retract_matching(Some(&self.node), None, None)?;
        debug!(subject = %self.node, removed, "node cleared");
        Ok(removed)
    }
}

/// Literal objects become values; other nodes become session proxies.
pub(crate) fn object_value(session: &Arc<Session>, node: GraphNode) -> Value {
    match node {
        GraphNode::Literal(literal) => coerce::literal_to_value(&literal),
        other => Value::Proxy(session.proxy(other)),
    }
}

// ============================================================================
// Identity traits
// ============================================================================

impl PartialEq for NodeProxy {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for NodeProxy {}

impl Hash for NodeProxy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        PROXY_HASH_TAG.hash(state);
        self.node.hash(state);
    }
}

impl PartialOrd for NodeProxy {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeProxy {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node.cmp(&other.node)
    }
}

impl fmt::Debug for NodeProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeProxy")
            .field("node", &self.node)
            .field("id", &self.id)
            .finish()
    }
}

impl fmt::Display for NodeProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, Structure};
    use crate::storage::MemoryStore;
    use crate::vocab::xsd;
    use std::hash::DefaultHasher;

    const BASE: &str = "http://example.com/";

    fn setup() -> (MemoryStore, NodeProxy) {
        let store = MemoryStore::new();
        let proxy = NodeProxy::new(Arc::new(store.clone()), GraphNode::uri("urn:s"), Some(BASE)).unwrap();
        (store, proxy)
    }

    #[test]
    fn test_set_then_get() {
        let (_, s) = setup();
        s.set("name", "Ada").unwrap();
        assert_eq!(s.get("name").unwrap(), Property::Single(Value::from("Ada")));
        assert!(s.get("missing").unwrap().is_empty());
        assert_eq!(s.try_get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_replaces() {
        let (store, s) = setup();
        s.set("p", vec![1, 2]).unwrap();
        assert_eq!(s.get("p").unwrap().len(), 2);
        s.set("p", 3).unwrap();
        assert_eq!(s.get("p").unwrap(), Property::Single(Value::Long(3)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_null_removes_property() {
        let (store, s) = setup();
        s.set("p", true).unwrap();
        s.set("p", Value::Null).unwrap();
        assert!(store.is_empty());
        assert!(s.is_empty().unwrap());
    }

    #[test]
    fn test_add_keeps_existing() {
        let (_, s) = setup();
        s.set("p", "a").unwrap();
        s.add("p", "b").unwrap();
        s.add("p", "b").unwrap();
        let values = s.get("p").unwrap().into_collection();
        assert_eq!(values.to_vec(), vec![Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn test_named_access_requires_base() {
        let store: Arc<dyn TripleStore> = Arc::new(MemoryStore::new());
        let s = NodeProxy::new(store, GraphNode::uri("urn:s"), None).unwrap();
        assert!(matches!(s.get_member("p"), Err(Error::NoBaseConfigured)));
        assert!(matches!(s.set_member("p", 1), Err(Error::NoBaseConfigured)));
        assert!(matches!(s.get("p"), Err(Error::RelativeWithoutBase(_))));

        s.set("http://example.com/p", 1).unwrap();
        assert_eq!(s.get("http://example.com/p").unwrap(), Property::Single(Value::Long(1)));
    }

    #[test]
    fn test_reference_values_share_identity() {
        let (_, s) = setup();
        s.set("self", &s).unwrap();
        let read = s.get("self").unwrap();
        let target = read.as_single().and_then(Value::as_proxy).unwrap();
        assert!(NodeProxy::same_instance(target, &s));
    }

    #[test]
    fn test_nested_structure_read_back() {
        let (_, s) = setup();
        s.set("address", Structure::new().field("city", "Paris")).unwrap();
        let address = s.get("address").unwrap();
        let nested = address.as_single().and_then(Value::as_proxy).unwrap();
        assert!(nested.node().is_blank());
        assert_eq!(nested.get("city").unwrap(), Property::Single(Value::from("Paris")));
    }

    #[test]
    fn test_contains_and_remove_value() {
        let (_, s) = setup();
        s.set("p", vec![1, 2]).unwrap();
        assert!(s.contains("p", 1).unwrap());
        assert!(s.contains("p", vec![1, 2]).unwrap());
        assert!(!s.contains("p", 3).unwrap());
        assert!(!s.contains("p", Structure::new()).unwrap());

        assert!(s.remove_value("p", 1).unwrap());
        assert!(!s.remove_value("p", 1).unwrap());
        assert_eq!(s.get("p").unwrap(), Property::Single(Value::Long(2)));
    }

    #[test]
    fn test_remove_and_clear() {
        let (store, s) = setup();
        s.set("p", 1).unwrap();
        s.set("q", 2).unwrap();
        assert!(s.contains_key("p").unwrap());
        assert!(s.remove("p").unwrap());
        assert!(!s.remove("p").unwrap());
        assert!(!s.contains_key("p").unwrap());
        assert_eq!(s.clear().unwrap(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_names_and_entries() {
        let (store, s) = setup();
        s.set("a", 1).unwrap();
        s.add("b", vec!["x", "y"]).unwrap();
        store
            .assert(Triple::new(
                GraphNode::uri("urn:s"),
                GraphNode::uri("http://other.org/c"),
                GraphNode::literal(Literal::typed("1", xsd::INTEGER)),
            ))
            .unwrap();

        let names: Vec<String> = s.get_names().unwrap().into_iter().collect();
        assert_eq!(names, vec!["a", "b", "http://other.org/c"]);
        assert_eq!(s.len().unwrap(), 3);

        let entries = s.entries().unwrap();
        assert_eq!(entries[1].0, GraphNode::uri("http://example.com/b"));
        assert_eq!(entries[1].1.len(), 2);
        assert_eq!(entries[2].1[0], Value::Integer(1));
    }

    #[test]
    fn test_no_collapse_option() {
        let store: Arc<dyn TripleStore> = Arc::new(MemoryStore::new());
        let options = ProxyOptions { predicate_base: Some(BASE.into()), collapse_singular: false };
        let s = NodeProxy::with_options(store, GraphNode::uri("urn:s"), options).unwrap();
        s.set("p", 1).unwrap();
        let prop = s.get("p").unwrap();
        assert!(!prop.is_single());
        assert_eq!(prop.len(), 1);
    }

    #[test]
    fn test_equality_hash_and_order() {
        let store: Arc<dyn TripleStore> = Arc::new(MemoryStore::new());
        let a1 = NodeProxy::new(Arc::clone(&store), GraphNode::uri("urn:a"), None).unwrap();
        let a2 = NodeProxy::new(Arc::clone(&store), GraphNode::uri("urn:a"), Some(BASE)).unwrap();
        let blank = NodeProxy::new(store, GraphNode::blank("b"), None).unwrap();

        assert_eq!(a1, a2);
        assert!(!NodeProxy::same_instance(&a1, &a2));

        let hash = |v: &dyn Fn(&mut DefaultHasher)| {
            let mut h = DefaultHasher::new();
            v(&mut h);
            h.finish()
        };
        assert_eq!(hash(&|h| a1.hash(h)), hash(&|h| a2.hash(h)));
        assert_ne!(hash(&|h| a1.hash(h)), hash(&|h| a1.node().hash(h)));

        assert!(blank < a1);
        assert!(None < Some(blank.clone()));
        assert!(Some(blank) <= Some(a1));
    }

    #[test]
    fn test_literal_node_is_not_a_proxy() {
        let store: Arc<dyn TripleStore> = Arc::new(MemoryStore::new());
        let err = NodeProxy::new(store, GraphNode::literal(Literal::plain("x")), Some(BASE)).unwrap_err();
        assert!(matches!(err, Error::TypeError { ref got, .. } if got == "LITERAL"));
    }

    #[test]
    fn test_failed_set_keeps_old_value() {
        let (store, s) = setup();
        s.set("p", 1).unwrap();
        let value = Value::List(vec![
            Value::Map(Structure::new().field("x", 1)),
            Value::Map(Structure::new().field("http:///", 1)),
        ]);
        assert!(matches!(s.set("p", value), Err(Error::MalformedIdentifier(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(s.get("p").unwrap(), Property::Single(Value::Long(1)));
    }

    #[test]
    fn test_failed_add_asserts_nothing() {
        let (store, s) = setup();
        let value = Value::List(vec![Value::from("a"), Value::Map(Structure::new().field("http:///", 1))]);
        assert!(s.add("p", value).is_err());
        assert!(store.is_empty());
    }
}
