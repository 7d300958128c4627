//! Free-form workflow metadata.

use derive_more::{Deref, DerefMut, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the owning user is recorded.
pub const AUTHOR_KEY: &str = "author";

/// Free-form metadata attached to a workflow.
///
/// The author is assigned by the persistence layer, never by the compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[derive(Deref, DerefMut, From, Into)]
#[serde(transparent)]
pub struct WorkflowMetadata(Map<String, Value>);

impl WorkflowMetadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the owning user, if recorded.
    pub fn author(&self) -> Option<&str> {
        self.0.get(AUTHOR_KEY).and_then(Value::as_str)
    }

    /// Records the owning user.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.0
            .insert(AUTHOR_KEY.to_owned(), Value::String(author.into()));
    }

    /// Returns whether every `key = value` pair in `filter` is present.
    ///
    /// Values are compared as strings, so `{"retries": "3"}` matches a stored
    /// number `3`.
    pub fn matches<'a, I>(&self, filter: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        filter.into_iter().all(|(key, expected)| match self.0.get(key) {
            Some(Value::String(s)) => s == expected,
            Some(other) => other.to_string() == expected,
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_author_roundtrip() {
        let mut metadata = WorkflowMetadata::new();
        assert_eq!(metadata.author(), None);

        metadata.set_author("alice");
        assert_eq!(metadata.author(), Some("alice"));
        assert_eq!(metadata.get(AUTHOR_KEY), Some(&json!("alice")));
    }

    #[test]
    fn test_matches_filter() {
        let metadata: WorkflowMetadata =
            serde_json::from_value(json!({"label": "nightly", "retries": 3})).unwrap();

        assert!(metadata.matches([("label", "nightly")]));
        assert!(metadata.matches([("label", "nightly"), ("retries", "3")]));
        assert!(!metadata.matches([("label", "weekly")]));
        assert!(!metadata.matches([("missing", "x")]));
        assert!(metadata.matches(std::iter::empty::<(&str, &str)>()));
    }
}
