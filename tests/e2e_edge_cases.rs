//! Edge cases: literal fallback, name relativization and error boundaries.

use std::sync::Arc;

use rdf_view::vocab::xsd;
use rdf_view::{
    Error, GraphCatalog, GraphNode, Literal, MemoryStore, NodeProxy, Property, ResolutionKey,
    SubjectCatalog, Triple, TripleStore, Value,
};

const HASH_BASE: &str = "http://example.com/#";

fn proxy_over(triples: Vec<Triple>, base: Option<&str>) -> NodeProxy {
    let store: Arc<dyn TripleStore> = Arc::new(MemoryStore::from_triples(triples));
    NodeProxy::new(store, GraphNode::uri("http://example.com/s"), base).unwrap()
}

fn edge(predicate: &str, object: GraphNode) -> Triple {
    Triple::new(GraphNode::uri("http://example.com/s"), GraphNode::uri(predicate), object)
}

// ============================================================================
// 1. Literal fallback never fails
// ============================================================================

#[test]
fn test_unknown_datatype_reads_as_lexical() {
    let s = proxy_over(
        vec![edge(
            "http://example.com/#p",
            GraphNode::literal(Literal::typed("x", "http://example.com/datatype")),
        )],
        Some(HASH_BASE),
    );
    assert_eq!(s.get("p").unwrap(), Property::Single(Value::from("x")));
}

#[test]
fn test_malformed_numeric_reads_as_lexical() {
    let s = proxy_over(
        vec![
            edge("http://example.com/#i", GraphNode::literal(Literal::typed("abc", xsd::INTEGER))),
            edge("http://example.com/#d", GraphNode::literal(Literal::typed("1.2.3", xsd::DOUBLE))),
            edge("http://example.com/#t", GraphNode::literal(Literal::typed("noon", xsd::DATE_TIME))),
        ],
        Some(HASH_BASE),
    );
    assert_eq!(s.get("i").unwrap(), Property::Single(Value::from("abc")));
    assert_eq!(s.get("d").unwrap(), Property::Single(Value::from("1.2.3")));
    assert_eq!(s.get("t").unwrap(), Property::Single(Value::from("noon")));
}

// ============================================================================
// 2. Name relativization
// ============================================================================

#[test]
fn test_predicate_names_relative_to_hash_base() {
    let s = proxy_over(
        vec![
            edge("http://example.com/#predicate1", GraphNode::literal(Literal::plain("o"))),
            edge("http://example2.com/predicate2", GraphNode::literal(Literal::plain("o"))),
        ],
        Some(HASH_BASE),
    );
    let names: Vec<String> = s.get_names().unwrap().into_iter().collect();
    assert_eq!(names, vec!["http://example2.com/predicate2", "predicate1"]);
    assert_eq!(s.get_member("predicate1").unwrap(), Property::Single(Value::from("o")));
}

#[test]
fn test_names_without_base_are_absolute() {
    let s = proxy_over(
        vec![edge("http://example.com/#predicate1", GraphNode::literal(Literal::plain("o")))],
        None,
    );
    let names: Vec<String> = s.get_names().unwrap().into_iter().collect();
    assert_eq!(names, vec!["http://example.com/#predicate1"]);
}

// ============================================================================
// 3. Error boundaries
// ============================================================================

#[test]
fn test_unsupported_key_type() {
    let s = proxy_over(vec![], Some(HASH_BASE));
    assert!(matches!(s.get(Value::Integer(0)), Err(Error::UnsupportedKeyType(_))));
    assert!(matches!(s.set(Value::Bool(true), 1), Err(Error::UnsupportedKeyType(_))));
    assert!(matches!(s.get(GraphNode::blank("b")), Err(Error::UnsupportedKeyType(_))));
}

#[test]
fn test_relative_key_without_base() {
    let s = proxy_over(vec![], None);
    assert!(matches!(s.get(ResolutionKey::relative("p")), Err(Error::RelativeWithoutBase(_))));
    assert!(matches!(s.set("/p", 1), Err(Error::RelativeWithoutBase(_))));
}

#[test]
fn test_named_access_without_base() {
    let s = proxy_over(vec![], None);
    assert!(matches!(s.get_member("p"), Err(Error::NoBaseConfigured)));

    let catalog = GraphCatalog::new(Arc::new(MemoryStore::new()));
    assert!(matches!(catalog.get_member("s"), Err(Error::NoBaseConfigured)));
}

#[test]
fn test_malformed_identifier() {
    let s = proxy_over(vec![], Some(HASH_BASE));
    assert!(matches!(s.get("http:///"), Err(Error::MalformedIdentifier(_))));
}

#[test]
fn test_multi_key_index() {
    let s = proxy_over(vec![], Some(HASH_BASE));
    let key = ResolutionKey::composite([ResolutionKey::from("a"), ResolutionKey::from("b")]);
    assert!(matches!(s.get(key), Err(Error::MultiKeyUnsupported(2))));
}

#[test]
fn test_missing_subject_is_not_found() {
    let catalog = GraphCatalog::with_base(Arc::new(MemoryStore::new()), "http://example.com/");
    assert!(matches!(catalog.get("nobody"), Err(Error::NotFound(_))));
}

#[test]
fn test_scalar_subject_assignment_is_a_type_error() {
    let catalog = SubjectCatalog::new(
        Arc::new(MemoryStore::new()),
        Some("http://example.com/"),
        Some(HASH_BASE),
    );
    let err = catalog.set("s", "just a string").unwrap_err();
    assert!(matches!(err, Error::TypeError { .. }));
    assert_eq!(err.to_string(), "Type error: expected structure, got STRING");
}

#[test]
fn test_missing_property_is_empty_not_error() {
    let s = proxy_over(vec![], Some(HASH_BASE));
    let property = s.get("absent").unwrap();
    assert!(property.is_empty());
    assert_eq!(s.try_get("absent").unwrap(), None);
    assert!(!s.remove("absent").unwrap());
}
