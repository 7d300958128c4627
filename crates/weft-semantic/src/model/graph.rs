//! Insertion-ordered set of triples.

use indexmap::IndexSet;
use indexmap::set::Iter;

use super::{Iri, Term, Triple};

/// A set of triples that iterates in insertion order.
///
/// Adding a triple that is already present is a no-op, so the same graph is
/// always serialized to the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Builds and inserts a triple from its parts.
    pub fn add(
        &mut self,
        subject: impl Into<Iri>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
    ) -> &mut Self {
        self.insert(Triple::new(subject, predicate, object));
        self
    }

    /// Returns whether the graph contains the triple.
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Returns the objects of all triples with the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject.as_str() == subject && t.predicate.as_str() == predicate)
            .map(|t| &t.object)
    }

    /// Returns the number of triples using the given predicate.
    pub fn count_predicate(&self, predicate: &str) -> usize {
        self.triples
            .iter()
            .filter(|t| t.predicate.as_str() == predicate)
            .count()
    }

    /// Returns the number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates over the triples in insertion order.
    pub fn iter(&self) -> Iter<'_, Triple> {
        self.triples.iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type IntoIter = Iter<'a, Triple>;
    type Item = &'a Triple;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}
