//! Property read results.

use std::ops::Index;

use smallvec::SmallVec;

use crate::model::Value;

/// Snapshot of the converted objects of one property, in storage order.
///
/// Taken at read time; later writes to the graph do not show up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyCollection {
    values: SmallVec<[Value; 1]>,
}

impl PropertyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.values.to_vec()
    }
}

impl Index<usize> for PropertyCollection {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl FromIterator<Value> for PropertyCollection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl IntoIterator for PropertyCollection {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; 1]>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyCollection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Result of reading a property.
///
/// With collapsing enabled (the default), a property with exactly one edge
/// reads as `Single`. Zero or several edges always read as `Collection`.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Single(Value),
    Collection(PropertyCollection),
}

impl Property {
    pub(crate) fn from_collection(values: PropertyCollection, collapse: bool) -> Self {
        if collapse && values.len() == 1 {
            let mut values = values.into_iter();
            if let Some(only) = values.next() {
                return Property::Single(only);
            }
            return Property::Collection(PropertyCollection::new());
        }
        Property::Collection(values)
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Property::Single(_))
    }

    pub fn as_single(&self) -> Option<&Value> {
        match self {
            Property::Single(v) => Some(v),
            Property::Collection(_) => None,
        }
    }

    pub fn as_collection(&self) -> Option<&PropertyCollection> {
        match self {
            Property::Collection(c) => Some(c),
            Property::Single(_) => None,
        }
    }

    /// Number of underlying edges.
    pub fn len(&self) -> usize {
        match self {
            Property::Single(_) => 1,
            Property::Collection(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Always a collection, whether or not it was collapsed.
    pub fn into_collection(self) -> PropertyCollection {
        match self {
            Property::Single(v) => std::iter::once(v).collect(),
            Property::Collection(c) => c,
        }
    }

    /// `Single` as itself, `Collection` as `Value::List`.
    pub fn into_value(self) -> Value {
        match self {
            Property::Single(v) => v,
            Property::Collection(c) => Value::List(c.to_vec()),
        }
    }
}
