//! RDF term and triple model.
//!
//! Only the subset needed to describe workflows is modelled: IRIs and
//! literals (plain or datatyped). Blank nodes and language tags never occur
//! in exported workflows.

mod graph;

use derive_more::{Deref, Display, From, Into};

pub use self::graph::Graph;
use crate::vocab;

/// An absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Deref, Display, From, Into)]
#[display("{_0}")]
pub struct Iri(String);

impl Iri {
    /// Creates an IRI from any string-like value.
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Returns the IRI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Self(iri.to_owned())
    }
}

/// A literal value with an optional datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Datatype IRI; `None` for plain literals.
    pub datatype: Option<Iri>,
}

impl Literal {
    /// Creates a plain literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: None,
        }
    }

    /// Creates an `xsd:integer` literal.
    pub fn integer(value: impl Into<i64>) -> Self {
        Self {
            lexical: value.into().to_string(),
            datatype: Some(Iri::from(vocab::XSD_INTEGER)),
        }
    }

    /// Creates an `xsd:integer` literal from a collection size.
    pub fn count(value: usize) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Some(Iri::from(vocab::XSD_INTEGER)),
        }
    }
}

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From)]
pub enum Term {
    /// A resource.
    Iri(Iri),
    /// A literal value.
    Literal(Literal),
}

impl Term {
    /// Returns the IRI if this term is a resource.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }

    /// Returns the literal if this term is a literal.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Iri(_) => None,
            Self::Literal(literal) => Some(literal),
        }
    }
}

/// A subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject resource.
    pub subject: Iri,
    /// Predicate.
    pub predicate: Iri,
    /// Object.
    pub object: Term,
}

impl Triple {
    /// Creates a new triple.
    pub fn new(
        subject: impl Into<Iri>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literal_is_typed() {
        let literal = Literal::integer(2);
        assert_eq!(literal.lexical, "2");
        assert_eq!(literal.datatype.as_deref().map(String::as_str), Some(vocab::XSD_INTEGER));
        assert_eq!(Literal::count(0).lexical, "0");
    }

    #[test]
    fn test_term_accessors() {
        let iri = Term::from(Iri::from("urn:x"));
        assert_eq!(iri.as_iri().map(Iri::as_str), Some("urn:x"));
        assert!(iri.as_literal().is_none());

        let literal = Term::from(Literal::plain("x"));
        assert!(literal.as_iri().is_none());
    }
}
