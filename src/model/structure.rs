//! Structure: the explicit builder input for nested values.

use std::collections::{BTreeMap, HashMap};

use super::Value;

/// An ordered list of `(field name, value)` pairs.
///
/// Field names are resolved to predicates the same way property keys are:
/// absolute URIs, `prefix:local` names and base-relative names all work.
/// Order is preserved, so edges are asserted in field order. Repeated field
/// names are allowed and contribute one edge set each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    fields: Vec<(String, Value)>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field append.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Structure
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Structure {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Structure {
    fn from(map: BTreeMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

/// Field order follows the map's iteration order.
impl<V: Into<Value>> From<HashMap<String, V>> for Structure {
    fn from(map: HashMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_kept() {
        let s = Structure::new().field("b", 1).field("a", 2).field("b", 3);
        let names: Vec<&str> = s.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
        assert_eq!(s.get("b"), Some(&Value::Integer(1)));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_from_map() {
        let mut map = BTreeMap::new();
        map.insert("p".to_string(), "o");
        let s = Structure::from(map);
        assert_eq!(s.get("p"), Some(&Value::from("o")));
    }
}
