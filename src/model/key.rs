//! ResolutionKey: every way a caller can name a subject or predicate.

use url::Url;

use super::{GraphNode, Value};
use crate::proxy::NodeProxy;

/// An index into a node or catalog.
///
/// String keys are interpreted by the URI resolver (absolute, `prefix:local`,
/// root-relative `/x`, or base-relative `x`). `Relative` carries an explicit
/// relative reference and never goes through prefix expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionKey {
    Str(String),
    Uri(Url),
    Relative(String),
    Node(GraphNode),
    /// A raw value; only identifier-like values (strings, URIs, nodes,
    /// proxies) are accepted by the resolver.
    Value(Value),
    /// Multi-component index; only exactly one component is accepted.
    Composite(Vec<ResolutionKey>),
}

impl ResolutionKey {
    pub fn relative(reference: impl Into<String>) -> Self {
        ResolutionKey::Relative(reference.into())
    }

    pub fn composite(keys: impl IntoIterator<Item = ResolutionKey>) -> Self {
        ResolutionKey::Composite(keys.into_iter().collect())
    }
}

impl From<&str> for ResolutionKey { fn from(v: &str) -> Self { ResolutionKey::Str(v.to_owned()) } }
impl From<String> for ResolutionKey { fn from(v: String) -> Self { ResolutionKey::Str(v) } }
impl From<&String> for ResolutionKey { fn from(v: &String) -> Self { ResolutionKey::Str(v.clone()) } }
impl From<Url> for ResolutionKey { fn from(v: Url) -> Self { ResolutionKey::Uri(v) } }
impl From<&Url> for ResolutionKey { fn from(v: &Url) -> Self { ResolutionKey::Uri(v.clone()) } }
impl From<GraphNode> for ResolutionKey { fn from(v: GraphNode) -> Self { ResolutionKey::Node(v) } }
impl From<&GraphNode> for ResolutionKey { fn from(v: &GraphNode) -> Self { ResolutionKey::Node(v.clone()) } }
impl From<&NodeProxy> for ResolutionKey { fn from(v: &NodeProxy) -> Self { ResolutionKey::Node(v.node().clone()) } }
impl From<NodeProxy> for ResolutionKey { fn from(v: NodeProxy) -> Self { ResolutionKey::Node(v.node().clone()) } }
impl From<Value> for ResolutionKey { fn from(v: Value) -> Self { ResolutionKey::Value(v) } }
