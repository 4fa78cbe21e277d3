//! # Graph and Object Model
//!
//! Pure data on both sides of the projection: graph nodes and triples on
//! the storage side, native values and builder structures on the object side.
//!
//! Design rule: no storage access here. This module is plain data.

pub mod node;
pub mod value;
pub mod structure;
pub mod key;

pub use node::{GraphNode, Literal, Triple};
pub use value::{IsoDuration, Value};
pub use structure::Structure;
pub use key::ResolutionKey;
