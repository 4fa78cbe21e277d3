//! # Graph Builder
//!
//! Turns native values into graph edges. Used by every write path:
//! `NodeProxy::set`/`add`, `SubjectCatalog::set`, and the public [`build`].
//!
//! ## Value decomposition
//!
//! | Value | Object node(s) |
//! |-------|----------------|
//! | `Null` | none |
//! | scalar | one literal (see `coerce::value_to_literal`) |
//! | `Uri` | one URI node |
//! | `Node` | that node, unchanged |
//! | `Proxy` | the proxy's node (reference edge, nothing is copied) |
//! | `List` | the decomposition of each element, flattened |
//! | `Map` | a fresh blank node, built recursively from the structure |
//!
//! Structures are owned trees, so recursion always terminates; graph cycles
//! can only be expressed through `Proxy` or `Node` references, which are
//! never re-entered.
//!
//! ## Plan, then commit
//!
//! Writes happen in two phases. Planning resolves every field name and
//! converts every value into a list of pending triples, minting blank node
//! identifiers along the way but never asserting or retracting. Only a
//! complete plan is committed, so a malformed field anywhere in a value
//! leaves the graph exactly as it was.

use tracing::{debug, trace};

use crate::coerce;
use crate::model::{GraphNode, ResolutionKey, Structure, Triple, Value};
use crate::storage::{NamespaceMap, TripleStore};
use crate::uri;
use crate::{Error, Result};

/// Populate `target` with one edge set per field of `structure`.
///
/// Field names resolve against `predicate_base` like property keys do.
/// Existing edges of `target` are left alone. Nothing is asserted unless
/// every field resolves.
pub fn build(
    store: &dyn TripleStore,
    structure: &Structure,
    target: &GraphNode,
    predicate_base: Option<&str>,
) -> Result<()> {
    Builder::new(store, predicate_base).build(structure, target)?;
    Ok(())
}

pub(crate) struct Builder<'a> {
    store: &'a dyn TripleStore,
    predicate_base: Option<&'a str>,
    prefixes: NamespaceMap,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(store: &'a dyn TripleStore, predicate_base: Option<&'a str>) -> Self {
        Self {
            store,
            predicate_base,
            prefixes: store.prefixes(),
        }
    }

    /// Resolve a property key to its predicate node.
    pub(crate) fn predicate(&self, key: &ResolutionKey) -> Result<GraphNode> {
        let iri = uri::resolve(key, self.predicate_base, &self.prefixes)?;
        self.store.create_uri_node(&iri)
    }

    // ========================================================================
    // Planning
    // ========================================================================

    /// Plan `(subject, predicate, o)` for every object of `value`.
    ///
    /// Nested structures contribute their own edges to `pending` first.
    pub(crate) fn plan_property(
        &self,
        subject: &GraphNode,
        predicate: &GraphNode,
        value: &Value,
        pending: &mut Vec<Triple>,
    ) -> Result<()> {
        ensure_subject(subject)?;
        let mut objects = Vec::new();
        self.collect_objects(value, &mut objects, pending)?;
        pending.extend(
            objects
                .into_iter()
                .map(|object| Triple::new(subject.clone(), predicate.clone(), object)),
        );
        Ok(())
    }

    /// Plan one edge set per field of `structure` on `target`.
    pub(crate) fn plan_structure(
        &self,
        structure: &Structure,
        target: &GraphNode,
        pending: &mut Vec<Triple>,
    ) -> Result<()> {
        ensure_subject(target)?;
        for (name, value) in structure.iter() {
            let predicate = self.predicate(&ResolutionKey::from(name))?;
            self.plan_property(target, &predicate, value, pending)?;
        }
        Ok(())
    }

    fn collect_objects(
        &self,
        value: &Value,
        out: &mut Vec<GraphNode>,
        pending: &mut Vec<Triple>,
    ) -> Result<()> {
        match value {
            Value::Null => {}
            Value::Proxy(proxy) => out.push(proxy.node().clone()),
            Value::Node(node) => out.push(node.clone()),
            Value::Uri(url) => out.push(self.store.create_uri_node(url.as_str())?),
            Value::List(items) => {
                for item in items {
                    self.collect_objects(item, out, pending)?;
                }
            }
            Value::Map(structure) => {
                let blank = self.store.create_blank_node()?;
                trace!(node = %blank, fields = structure.len(), "planning nested structure");
                self.plan_structure(structure, &blank, pending)?;
                out.push(blank);
            }
            scalar => out.push(self.literal(scalar)?),
        }
        Ok(())
    }

    /// Object nodes for `value` without touching the store.
    ///
    /// `None` when the value holds a structure: those always mint fresh
    /// nodes, so they can never match an existing edge.
    pub(crate) fn lookup_objects(&self, value: &Value) -> Result<Option<Vec<GraphNode>>> {
        let mut out = Vec::new();
        if self.collect_existing(value, &mut out)? {
            Ok(Some(out))
        } else {
            Ok(None)
        }
    }

    fn collect_existing(&self, value: &Value, out: &mut Vec<GraphNode>) -> Result<bool> {
        match value {
            Value::Null => {}
            Value::Map(_) => return Ok(false),
            Value::List(items) => {
                for item in items {
                    if !self.collect_existing(item, out)? {
                        return Ok(false);
                    }
                }
            }
            Value::Proxy(proxy) => out.push(proxy.node().clone()),
            Value::Node(node) => out.push(node.clone()),
            Value::Uri(url) => out.push(self.store.create_uri_node(url.as_str())?),
            scalar => out.push(self.literal(scalar)?),
        }
        Ok(true)
    }

    /// Existing edges `structure` describes on `subject`, one per field
    /// object. `None` when some field holds a structure.
    pub(crate) fn lookup_structure(
        &self,
        structure: &Structure,
        subject: &GraphNode,
    ) -> Result<Option<Vec<Triple>>> {
        let mut triples = Vec::new();
        for (name, value) in structure.iter() {
            let predicate = self.predicate(&ResolutionKey::from(name))?;
            let Some(objects) = self.lookup_objects(value)? else {
                return Ok(None);
            };
            triples.extend(
                objects
                    .into_iter()
                    .map(|object| Triple::new(subject.clone(), predicate.clone(), object)),
            );
        }
        Ok(Some(triples))
    }

    fn literal(&self, value: &Value) -> Result<GraphNode> {
        let literal = coerce::value_to_literal(value).ok_or_else(|| Error::TypeError {
            expected: "scalar".into(),
            got: value.type_name().into(),
        })?;
        self.store
            .create_literal_node(&literal.lexical, literal.datatype(), literal.language.as_deref())
    }

    // ========================================================================
    // Commit
    // ========================================================================

    /// Assert a finished plan. Returns edges added.
    pub(crate) fn commit(&self, pending: Vec<Triple>) -> Result<usize> {
        let mut added = 0;
        for triple in pending {
            if self.store.assert(triple)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Plan and commit every field of `structure` on `target`. Returns edges added.
    pub(crate) fn build(&self, structure: &Structure, target: &GraphNode) -> Result<usize> {
        let mut pending = Vec::new();
        self.plan_structure(structure, target, &mut pending)?;
        let added = self.commit(pending)?;
        debug!(node = %target, fields = structure.len(), added, "structure built");
        Ok(added)
    }
}

/// Literals cannot carry outgoing edges.
pub(crate) fn ensure_subject(node: &GraphNode) -> Result<()> {
    if node.is_literal() {
        return Err(Error::TypeError {
            expected: "subject node".into(),
            got: node.kind_name().into(),
        });
    }
    Ok(())
}
