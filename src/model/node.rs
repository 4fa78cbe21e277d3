//! Graph nodes and triples.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value: lexical form plus optional datatype and language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    /// Plain literal without datatype or language.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self { lexical: lexical.into(), datatype: None, language: None }
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }
}

/// An opaque graph vertex.
///
/// Equality, hashing and ordering are by kind and value. The variant order
/// gives the total order used everywhere in the crate: blank < literal < URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum GraphNode {
    /// Anonymous node, identified by a store-local label.
    Blank(String),
    Literal(Literal),
    /// Node identified by an absolute URI.
    Uri(String),
}

impl GraphNode {
    pub fn uri(iri: impl Into<String>) -> Self {
        GraphNode::Uri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        GraphNode::Blank(label.into())
    }

    pub fn literal(literal: Literal) -> Self {
        GraphNode::Literal(literal)
    }

    pub fn is_uri(&self) -> bool { matches!(self, GraphNode::Uri(_)) }
    pub fn is_blank(&self) -> bool { matches!(self, GraphNode::Blank(_)) }
    pub fn is_literal(&self) -> bool { matches!(self, GraphNode::Literal(_)) }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            GraphNode::Uri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            GraphNode::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphNode::Blank(_) => "BLANK",
            GraphNode::Literal(_) => "LITERAL",
            GraphNode::Uri(_) => "URI",
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphNode::Uri(iri) => write!(f, "<{iri}>"),
            GraphNode::Blank(label) => write!(f, "_:{label}"),
            GraphNode::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical.replace('\\', "\\\\").replace('"', "\\\""))?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")
        } else {
            Ok(())
        }
    }
}

/// A subject–predicate–object edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: GraphNode,
    pub predicate: GraphNode,
    pub object: GraphNode,
}

impl Triple {
    pub fn new(subject: GraphNode, predicate: GraphNode, object: GraphNode) -> Self {
        Self { subject, predicate, object }
    }

    /// Does this triple match the pattern? `None` positions are wildcards.
    pub fn matches(
        &self,
        subject: Option<&GraphNode>,
        predicate: Option<&GraphNode>,
        object: Option<&GraphNode>,
    ) -> bool {
        subject.map_or(true, |s| *s == self.subject)
            && predicate.map_or(true, |p| *p == self.predicate)
            && object.map_or(true, |o| *o == self.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
