//! N-Triples serialization.
//!
//! Each triple is written on its own line as `<s> <p> <o> .`. Literal strings
//! escape backslash, double quote, newline, carriage return and tab. IRIs
//! percent-encode characters that are not allowed inside `<...>`.

use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::model::{Graph, Iri, Literal, Term, Triple};

/// Escapes a string for use inside a quoted N-Triples literal.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Percent-encodes characters that may not appear inside an IRI reference.
///
/// `\uXXXX` escapes are not used: SPARQL decodes them before parsing, so an
/// escaped space would still end the IRI inside an update request.
pub fn escape_iri(value: &str) -> Cow<'_, str> {
    let forbidden =
        |c: char| c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\');
    if !value.contains(forbidden) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if forbidden(c) {
            // Forbidden characters are all ASCII; writing into a String cannot fail.
            let _ = write!(escaped, "%{:02X}", c as u32);
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

struct IriRef<'a>(&'a Iri);

impl fmt::Display for IriRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", escape_iri(self.0.as_str()))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.lexical))?;
        match &self.datatype {
            Some(datatype) => write!(f, "^^{}", IriRef(datatype)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => fmt::Display::fmt(&IriRef(iri), f),
            Self::Literal(literal) => fmt::Display::fmt(literal, f),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} .",
            IriRef(&self.subject),
            IriRef(&self.predicate),
            self.object
        )
    }
}

/// Serializes a graph to N-Triples, one line per triple, in insertion order.
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{triple}");
    }
    out
}

impl Graph {
    /// Serializes the graph to N-Triples.
    pub fn to_ntriples(&self) -> String {
        to_ntriples(self)
    }
}
