//! Prefix table: `prefix -> absolute namespace identifier`.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::vocab::{rdf, xsd};

const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Namespace prefixes known to a store.
///
/// The empty prefix is allowed and expands `:local` names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMap {
    prefixes: HashMap<String, String>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `rdf`, `rdfs` and `xsd` pre-registered.
    pub fn standard() -> Self {
        let mut map = Self::new();
        map.add("rdf", rdf::NAMESPACE);
        map.add("rdfs", RDFS_NAMESPACE);
        map.add("xsd", xsd::NAMESPACE);
        map
    }

    /// Register (or replace) a prefix.
    pub fn add(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.prefixes.remove(prefix)
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    /// Expand `prefix:local` if the prefix is registered.
    ///
    /// A local part starting with `//` is an authority, never a local name.
    pub fn expand(&self, qname: &str) -> Option<String> {
        let (prefix, local) = qname.split_once(':')?;
        if local.starts_with("//") {
            return None;
        }
        self.get(prefix).map(|ns| format!("{ns}{local}"))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
