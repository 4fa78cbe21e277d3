//! # URI Resolver
//!
//! Pure functions between resolution keys and absolute identifiers.
//!
//! String keys are tried in this order:
//!
//! 1. `prefix:local` where `prefix` is registered in the prefix table
//! 2. absolute identifier (has a scheme), in its normalized form
//! 3. root-relative (`/x`) or base-relative (`x`), combined with the base
//!
//! A base ending in `#` is a hash base: relative names are appended to it
//! instead of replacing its last path segment, so `s` against
//! `http://example.com/#` is `http://example.com/#s`.
//!
//! Opaque bases such as `urn:` have no path to join against and are
//! appended to the same way.
//!
//! `relativize` is the inverse used for display names only.

use url::{ParseError, Url};

use crate::model::{GraphNode, ResolutionKey, Value};
use crate::storage::NamespaceMap;
use crate::{Error, Result};

/// Resolve a key to an absolute identifier.
///
/// Keys naming a blank or literal node have no identifier and fail with
/// `UnsupportedKeyType`.
pub fn resolve(key: &ResolutionKey, base: Option<&str>, prefixes: &NamespaceMap) -> Result<String> {
    match resolve_node(key, base, prefixes)? {
        GraphNode::Uri(iri) => Ok(iri),
        other => Err(Error::UnsupportedKeyType(other.kind_name())),
    }
}

/// Resolve a key to a graph node.
///
/// Node keys (and proxies) pass through unchanged, whatever their kind.
pub fn resolve_node(
    key: &ResolutionKey,
    base: Option<&str>,
    prefixes: &NamespaceMap,
) -> Result<GraphNode> {
    match key {
        ResolutionKey::Str(s) => resolve_str(s, base, prefixes).map(GraphNode::Uri),
        ResolutionKey::Uri(url) => Ok(GraphNode::Uri(url.as_str().to_owned())),
        ResolutionKey::Relative(reference) => resolve_relative(reference, base).map(GraphNode::Uri),
        ResolutionKey::Node(node) => Ok(node.clone()),
        ResolutionKey::Value(value) => match value {
            Value::String(s) => resolve_str(s, base, prefixes).map(GraphNode::Uri),
            Value::Uri(url) => Ok(GraphNode::Uri(url.as_str().to_owned())),
            Value::Node(node) => Ok(node.clone()),
            Value::Proxy(proxy) => Ok(proxy.node().clone()),
            other => Err(Error::UnsupportedKeyType(other.type_name())),
        },
        ResolutionKey::Composite(keys) => match keys.as_slice() {
            [single] => resolve_node(single, base, prefixes),
            _ => Err(Error::MultiKeyUnsupported(keys.len())),
        },
    }
}

/// Resolve a string key: prefixed name, absolute identifier, or relative reference.
///
/// Results are in the normalized form of the `url` crate, so a string key
/// and a `Url` key naming the same identifier resolve identically.
pub fn resolve_str(s: &str, base: Option<&str>, prefixes: &NamespaceMap) -> Result<String> {
    if let Some(expanded) = prefixes.expand(s) {
        return Url::parse(&expanded)
            .map(String::from)
            .map_err(|_| Error::MalformedIdentifier(s.to_owned()));
    }

    match Url::parse(s) {
        Ok(url) => Ok(url.into()),
        Err(ParseError::RelativeUrlWithoutBase) => resolve_relative(s, base),
        Err(_) => Err(Error::MalformedIdentifier(s.to_owned())),
    }
}

/// Combine a relative reference with `base`.
pub fn resolve_relative(reference: &str, base: Option<&str>) -> Result<String> {
    let base = base.ok_or_else(|| Error::RelativeWithoutBase(reference.to_owned()))?;
    let base_url = Url::parse(base).map_err(|_| Error::MalformedIdentifier(base.to_owned()))?;

    if appends(base, &base_url) && !reference.starts_with(['/', '#', '?']) {
        let joined = format!("{base}{reference}");
        return Url::parse(&joined)
            .map(String::from)
            .map_err(|_| Error::MalformedIdentifier(reference.to_owned()));
    }

    base_url
        .join(reference)
        .map(String::from)
        .map_err(|_| Error::MalformedIdentifier(reference.to_owned()))
}

/// Display name for `absolute` relative to `base`.
///
/// Returns the suffix after the base when that suffix resolves back to the
/// same identifier; otherwise the identifier unchanged.
pub fn relativize(absolute: &str, base: Option<&str>) -> String {
    let Some(base) = base else {
        return absolute.to_owned();
    };
    match absolute.strip_prefix(base) {
        Some(rest) if !rest.is_empty() && round_trips(rest, base, absolute) => rest.to_owned(),
        _ => absolute.to_owned(),
    }
}

fn round_trips(name: &str, base: &str, absolute: &str) -> bool {
    // Names that parse on their own would be read back as absolute identifiers.
    if Url::parse(name).is_ok() {
        return false;
    }
    resolve_relative(name, Some(base)).is_ok_and(|resolved| resolved == absolute)
}

/// Hash bases and opaque bases (`urn:`) take relative names as suffixes.
fn appends(base: &str, base_url: &Url) -> bool {
    base.ends_with('#') || base_url.cannot_be_a_base()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "http://example.com/";

    fn prefixes() -> NamespaceMap {
        let mut map = NamespaceMap::new();
        map.add("ex", "http://example.com/");
        map
    }

    #[test]
    fn test_absolute_passes_through() {
        let iri = resolve_str("http://example.com/s", None, &prefixes()).unwrap();
        assert_eq!(iri, "http://example.com/s");
        assert_eq!(resolve_str("urn:s1", None, &prefixes()).unwrap(), "urn:s1");
    }

    #[test]
    fn test_string_and_url_keys_agree() {
        let p = prefixes();
        let url = Url::parse("http://example.org").unwrap();
        let from_str = resolve(&ResolutionKey::from("http://example.org"), None, &p).unwrap();
        let from_url = resolve(&ResolutionKey::from(url), None, &p).unwrap();
        assert_eq!(from_str, "http://example.org/");
        assert_eq!(from_str, from_url);

        assert_eq!(resolve_str("HTTP://Example.COM/a/../b", None, &p).unwrap(), "http://example.com/b");
    }

    #[test]
    fn test_prefixed_names() {
        assert_eq!(resolve_str("ex:s", None, &prefixes()).unwrap(), "http://example.com/s");

        let mut with_default = prefixes();
        with_default.add("", "http://example.com/");
        assert_eq!(resolve_str(":s", None, &with_default).unwrap(), "http://example.com/s");
    }

    #[test]
    fn test_unregistered_prefix_is_absolute() {
        assert_eq!(resolve_str("other:s", None, &prefixes()).unwrap(), "other:s");
    }

    #[test]
    fn test_relative_and_root_relative() {
        let base = Some("http://example.com/a/b");
        assert_eq!(resolve_str("c", base, &prefixes()).unwrap(), "http://example.com/a/c");
        assert_eq!(resolve_str("/c", base, &prefixes()).unwrap(), "http://example.com/c");
    }

    #[test]
    fn test_hash_base_appends() {
        let base = Some("http://example.com/x#");
        assert_eq!(resolve_str("predicate1", base, &prefixes()).unwrap(), "http://example.com/x#predicate1");
    }

    #[test]
    fn test_opaque_base_appends() {
        let base = Some("urn:");
        assert_eq!(resolve_str("p1", base, &prefixes()).unwrap(), "urn:p1");
        assert_eq!(relativize("urn:p1", base), "p1");
        assert_eq!(resolve_str("s", Some("urn:example:"), &prefixes()).unwrap(), "urn:example:s");
    }

    #[test]
    fn test_relative_without_base() {
        let err = resolve_str("s", None, &prefixes()).unwrap_err();
        assert!(matches!(err, Error::RelativeWithoutBase(_)));

        let err = resolve(&ResolutionKey::relative("predicate1"), None, &prefixes()).unwrap_err();
        assert!(matches!(err, Error::RelativeWithoutBase(_)));
    }

    #[test]
    fn test_malformed() {
        let err = resolve_str("http:///", Some(BASE), &prefixes()).unwrap_err();
        assert!(matches!(err, Error::MalformedIdentifier(_)));
    }

    #[test]
    fn test_key_kinds() {
        let p = prefixes();
        let url = Url::parse("http://example.com/s").unwrap();
        assert_eq!(resolve(&ResolutionKey::from(url), None, &p).unwrap(), "http://example.com/s");
        assert_eq!(
            resolve(&ResolutionKey::from(GraphNode::uri("urn:x")), None, &p).unwrap(),
            "urn:x"
        );
        assert!(matches!(
            resolve(&ResolutionKey::from(Value::Integer(0)), Some(BASE), &p),
            Err(Error::UnsupportedKeyType("INTEGER"))
        ));
        assert!(matches!(
            resolve(&ResolutionKey::from(GraphNode::blank("b")), Some(BASE), &p),
            Err(Error::UnsupportedKeyType("BLANK"))
        ));
    }

    #[test]
    fn test_composite_keys() {
        let p = prefixes();
        let single = ResolutionKey::composite([ResolutionKey::from("s")]);
        assert_eq!(resolve(&single, Some(BASE), &p).unwrap(), "http://example.com/s");

        let pair = ResolutionKey::composite([
            ResolutionKey::from(Value::Integer(0)),
            ResolutionKey::from(Value::Integer(0)),
        ]);
        assert!(matches!(resolve(&pair, Some(BASE), &p), Err(Error::MultiKeyUnsupported(2))));
    }

    #[test]
    fn test_relativize() {
        assert_eq!(relativize("http://example.com/#predicate1", Some("http://example.com/#")), "predicate1");
        assert_eq!(relativize("http://example.com/s", Some(BASE)), "s");
        assert_eq!(relativize("http://example.com/s", Some("http://example2.com/")), "http://example.com/s");
        assert_eq!(relativize("http://example.com/s", None), "http://example.com/s");
        assert_eq!(relativize(BASE, Some(BASE)), BASE);
    }

    #[test]
    fn test_relativize_requires_round_trip() {
        // "b" against ".../a" would resolve to ".../b", not ".../ab".
        assert_eq!(relativize("http://example.com/ab", Some("http://example.com/a")), "http://example.com/ab");
    }

    proptest! {
        #[test]
        fn relativized_names_resolve_back(local in "[a-z][a-z0-9]{0,12}") {
            let p = NamespaceMap::new();
            for base in ["http://example.com/", "http://example.com/ns#", "http://example.com/a/"] {
                let absolute = format!("{base}{local}");
                let name = relativize(&absolute, Some(base));
                prop_assert_eq!(&name, &local);
                prop_assert_eq!(resolve_str(&name, Some(base), &p).unwrap(), absolute);
            }
        }
    }
}
