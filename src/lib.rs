//! # rdf-view: Object Views over RDF Graphs
//!
//! Read and write an RDF graph as if its nodes were plain objects.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `TripleStore` is the only contract with storage
//! 2. **Clean DTOs**: `GraphNode`, `Triple`, `Value` cross all boundaries
//! 3. **Resolution is pure**: key → identifier is a function of key, base and prefixes
//! 4. **One proxy per node**: catalogs cache proxies, so identity is stable across paths
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rdf_view::{MemoryStore, Property, Structure, SubjectCatalog, Value};
//!
//! # fn example() -> rdf_view::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let people = SubjectCatalog::new(
//!     store,
//!     Some("http://example.com/people/"),
//!     Some("http://example.com/schema#"),
//! );
//!
//! people.set("ada", Structure::new().field("name", "Ada").field("born", 1815))?;
//!
//! let ada = people.get("ada")?;
//! assert_eq!(ada.get("name")?, Property::Single(Value::from("Ada")));
//! ada.set("born", Value::Null)?;
//! assert!(!ada.contains_key("born")?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Layers
//!
//! | Module | Role |
//! |--------|------|
//! | `uri` | key resolution and name relativization |
//! | `coerce` | literal ⇄ native value conversion |
//! | `proxy` | `NodeProxy`, the per-node view, and its identity cache |
//! | `builder` | value decomposition into edges |
//! | `catalog` | `GraphCatalog` / `SubjectCatalog`, whole-graph views |
//! | `storage` | `TripleStore` trait and the in-memory store |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod vocab;
pub mod uri;
pub mod coerce;
pub mod storage;
pub mod proxy;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    GraphNode, Literal, Triple, Value, IsoDuration,
    Structure, ResolutionKey,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{TripleStore, MemoryStore, NamespaceMap};

// ============================================================================
// Re-exports: Views
// ============================================================================

pub use proxy::{NodeProxy, Property, PropertyCollection, ProxyId, ProxyOptions};
pub use catalog::{GraphCatalog, SubjectCatalog};
pub use config::CatalogConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Relative identifier without a base: {0}")]
    RelativeWithoutBase(String),

    #[error("Named access requires a base identifier")]
    NoBaseConfigured,

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(&'static str),

    #[error("Expected a single key, got {0}")]
    MultiKeyUnsupported(usize),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
