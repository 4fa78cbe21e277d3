//! # Triple Store Trait
//!
//! This is THE contract between the projection engine and any triple
//! storage. The engine consumes only these primitives; pattern matching,
//! persistence and prefix bookkeeping all live behind this seam.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory reference store for testing/embedding |

pub mod memory;
pub mod namespace;

use crate::model::{GraphNode, Literal, Triple};
use crate::Result;

pub use memory::MemoryStore;
pub use namespace::NamespaceMap;

// ============================================================================
// TripleStore Trait
// ============================================================================

/// The storage collaborator.
///
/// All calls are synchronous. `assert`/`retract` are idempotent and report
/// whether they changed the store. Iteration order of `match_pattern` must
/// be stable for an unchanged store but is otherwise unspecified.
pub trait TripleStore: Send + Sync + 'static {
    // ========================================================================
    // Query
    // ========================================================================

    /// Pattern query. `None` positions are wildcards.
    fn match_pattern(
        &self,
        subject: Option<&GraphNode>,
        predicate: Option<&GraphNode>,
        object: Option<&GraphNode>,
    ) -> Result<Vec<Triple>>;

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add an edge. Returns true if it was not already present.
    fn assert(&self, triple: Triple) -> Result<bool>;

    /// Remove an edge. Returns true if it existed.
    fn retract(&self, triple: &Triple) -> Result<bool>;

    /// Retract every edge matching the pattern, returning how many went.
    ///
    /// Default: match, then retract each.
    fn retract_matching(
        &self,
        subject: Option<&GraphNode>,
        predicate: Option<&GraphNode>,
        object: Option<&GraphNode>,
    ) -> Result<usize> {
        let mut removed = 0;
        for triple in self.match_pattern(subject, predicate, object)? {
            if self.retract(&triple)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    // ========================================================================
    // Node factory
    // ========================================================================

    fn create_uri_node(&self, iri: &str) -> Result<GraphNode> {
        Ok(GraphNode::uri(iri))
    }

    /// Mint an anonymous node no other edge refers to yet.
    fn create_blank_node(&self) -> Result<GraphNode>;

    fn create_literal_node(
        &self,
        lexical: &str,
        datatype: Option<&str>,
        language: Option<&str>,
    ) -> Result<GraphNode> {
        Ok(GraphNode::Literal(Literal {
            lexical: lexical.to_owned(),
            datatype: datatype.map(str::to_owned),
            language: language.map(str::to_owned),
        }))
    }

    // ========================================================================
    // Naming context
    // ========================================================================

    /// Snapshot of the prefix table.
    fn prefixes(&self) -> NamespaceMap;

    /// Default base when none is supplied explicitly.
    fn graph_base(&self) -> Option<String>;
}
