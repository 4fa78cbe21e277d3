//! JSON export: a snapshot of a proxy and everything reachable from it.
//!
//! ```text
//! NodeProxy → to_json() → {"@id": "...", "name": "Ada", "knows": {"@id": "..."}}
//! ```
//!
//! Property names are the proxy's display names. Single-edge properties are
//! bare values, others are arrays. Each node reachable through a reference
//! is inlined the first time it is met; later (or cyclic) references render
//! as `{"@id": ...}` only. A predicate whose display name would start with
//! `@` is written under its absolute identifier.

use std::io::Write;

use hashbrown::HashSet;
use serde_json::{Map, Number, Value as Json};

use crate::model::{GraphNode, Value};
use crate::proxy::NodeProxy;
use crate::uri;
use crate::Result;

/// Render `proxy` as a JSON object.
pub fn to_json(proxy: &NodeProxy) -> Result<Json> {
    let mut visited = HashSet::new();
    render_node(proxy, &mut visited)
}

/// Write the pretty-printed JSON rendering of `proxy`.
pub fn write_json(proxy: &NodeProxy, writer: &mut dyn Write) -> Result<()> {
    let json = to_json(proxy)?;
    writeln!(writer, "{json:#}")?;
    Ok(())
}

fn render_node(proxy: &NodeProxy, visited: &mut HashSet<GraphNode>) -> Result<Json> {
    let mut object = Map::new();
    object.insert("@id".into(), Json::String(node_id(proxy.node())));
    if !visited.insert(proxy.node().clone()) {
        return Ok(Json::Object(object));
    }

    let base = proxy.predicate_base();
    for (predicate, values) in proxy.entries()? {
        let name = match predicate.as_uri() {
            Some(iri) => property_name(iri, base),
            None => predicate.to_string(),
        };
        let mut rendered = Vec::with_capacity(values.len());
        for value in &values {
            rendered.push(render_value(value, visited)?);
        }
        let json = if rendered.len() == 1 {
            rendered.swap_remove(0)
        } else {
            Json::Array(rendered)
        };
        object.insert(name, json);
    }
    Ok(Json::Object(object))
}

fn render_value(value: &Value, visited: &mut HashSet<GraphNode>) -> Result<Json> {
    let json = match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::UnsignedByte(b) => Json::from(*b),
        Value::Integer(i) => Json::from(*i),
        Value::Long(l) => Json::from(*l),
        Value::Float(f) => float(f64::from(*f)),
        Value::Double(d) => float(*d),
        Value::Proxy(p) => render_node(p, visited)?,
        Value::Node(n) => reference(n),
        Value::Uri(u) => {
            let mut object = Map::new();
            object.insert("@id".into(), Json::String(u.to_string()));
            Json::Object(object)
        }
        Value::List(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(render_value(item, visited)?);
            }
            Json::Array(rendered)
        }
        Value::Map(structure) => {
            let mut object = Map::new();
            for (name, field) in structure.iter() {
                object.insert(name.to_owned(), render_value(field, visited)?);
            }
            Json::Object(object)
        }
        Value::String(s) => Json::String(s.clone()),
        // Decimals keep their exact digits as strings.
        Value::Decimal(d) => Json::String(d.to_plain_string()),
        Value::Date(d) => Json::String(d.to_string()),
        Value::Time(t) => Json::String(t.to_string()),
        Value::DateTime(dt) => Json::String(dt.to_rfc3339()),
        Value::Duration(d) => Json::String(d.to_string()),
    };
    Ok(json)
}

/// Non-finite numbers have no JSON form.
fn float(v: f64) -> Json {
    match Number::from_f64(v) {
        Some(n) => Json::Number(n),
        None => Json::String(v.to_string()),
    }
}

/// Display name of a predicate. Names starting with `@` are keywords of the
/// rendering, so those predicates keep their absolute identifier.
fn property_name(iri: &str, base: Option<&str>) -> String {
    let name = uri::relativize(iri, base);
    if name.starts_with('@') {
        iri.to_owned()
    } else {
        name
    }
}

fn reference(node: &GraphNode) -> Json {
    let mut object = Map::new();
    object.insert("@id".into(), Json::String(node_id(node)));
    Json::Object(object)
}

fn node_id(node: &GraphNode) -> String {
    match node {
        GraphNode::Uri(iri) => iri.clone(),
        GraphNode::Blank(label) => format!("_:{label}"),
        GraphNode::Literal(literal) => literal.lexical.clone(),
    }
}
