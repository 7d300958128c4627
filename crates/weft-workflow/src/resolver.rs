//! Connector-level link index.
//!
//! [`LinkIndex`] answers "which output feeds this input?" for every linked
//! `(operator, input connector)` pair of a workflow. It is a plain map build
//! over the links in declaration order: when two links target the same input,
//! the later one wins. Overwritten link IDs are recorded and logged so callers
//! can surface them, but the index never rejects a workflow.

use std::collections::HashMap;

use crate::TRACING_TARGET;
use crate::definition::{Link, OperatorId, Workflow};

/// One side of a link: an operator and one of its connector IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Operator ID.
    pub operator: OperatorId,
    /// Connector ID on that operator.
    pub connector: String,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(operator: impl Into<OperatorId>, connector: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            connector: connector.into(),
        }
    }
}

/// Index of `to_operator -> to_connector -> (from_operator, from_connector)`.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    entries: HashMap<OperatorId, HashMap<String, Endpoint>>,
    overwritten: Vec<String>,
}

impl LinkIndex {
    /// Builds the index from a workflow's links.
    pub fn build(workflow: &Workflow) -> Self {
        Self::from_links(&workflow.links)
    }

    /// Builds the index from `(link id, link)` pairs, in iteration order.
    pub fn from_links<'a, I>(links: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Link)>,
    {
        let mut index = Self::default();

        for (link_id, link) in links {
            tracing::debug!(
                target: TRACING_TARGET,
                link_id = %link_id,
                from = %format_args!("{}-{}", link.from_operator, link.from_connector),
                to = %format_args!("{}-{}", link.to_operator, link.to_connector),
                "found link"
            );

            let source = Endpoint::new(link.from_operator.clone(), link.from_connector.clone());
            let previous = index
                .entries
                .entry(link.to_operator.clone())
                .or_default()
                .insert(link.to_connector.clone(), source);

            if let Some(previous) = previous {
                tracing::warn!(
                    target: TRACING_TARGET,
                    link_id = %link_id,
                    to_operator = %link.to_operator,
                    to_connector = %link.to_connector,
                    replaced_operator = %previous.operator,
                    replaced_connector = %previous.connector,
                    "input connector has more than one incoming link, keeping the last"
                );
                index.overwritten.push(link_id.clone());
            }
        }

        index
    }

    /// Returns the source feeding `(operator, connector)`, if linked.
    pub fn resolve(&self, operator: &str, connector: &str) -> Option<&Endpoint> {
        self.entries.get(operator)?.get(connector)
    }

    /// Returns all linked inputs of an operator, keyed by input connector ID.
    pub fn incoming(&self, operator: &str) -> Option<&HashMap<String, Endpoint>> {
        self.entries.get(operator)
    }

    /// Returns the number of linked input connectors.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Returns whether no input connector is linked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the IDs of links that replaced an earlier link to the same input.
    pub fn overwritten(&self) -> &[String] {
        &self.overwritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow_with_links(links: &[(&str, Link)]) -> Workflow {
        let mut workflow = Workflow::new();
        for (id, link) in links {
            workflow.add_link(*id, link.clone());
        }
        workflow
    }

    #[test]
    fn test_empty_index() {
        let index = LinkIndex::build(&Workflow::new());
        assert!(index.is_empty());
        assert_eq!(index.resolve("op_1", "in_0"), None);
    }

    #[test]
    fn test_resolve_linked_input() {
        let workflow = workflow_with_links(&[("0", Link::new("op_0", "out_0", "op_1", "in_0"))]);
        let index = LinkIndex::build(&workflow);

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.resolve("op_1", "in_0"),
            Some(&Endpoint::new("op_0", "out_0"))
        );
        assert_eq!(index.resolve("op_1", "in_1"), None);
        assert_eq!(index.resolve("op_0", "in_0"), None);
    }

    #[test]
    fn test_duplicate_destination_keeps_last() {
        let workflow = workflow_with_links(&[
            ("a", Link::new("op_0", "out_0", "op_2", "in_0")),
            ("b", Link::new("op_1", "out_0", "op_2", "in_0")),
        ]);
        let index = LinkIndex::build(&workflow);

        assert_eq!(index.len(), 1);
        assert_eq!(
            index.resolve("op_2", "in_0"),
            Some(&Endpoint::new("op_1", "out_0"))
        );
        assert_eq!(index.overwritten(), ["b".to_string()]);
    }

    #[test]
    fn test_incoming_groups_by_operator() {
        let workflow = workflow_with_links(&[
            ("0", Link::new("op_0", "out_0", "op_2", "left")),
            ("1", Link::new("op_1", "out_0", "op_2", "right")),
        ]);
        let index = LinkIndex::build(&workflow);

        let incoming = index.incoming("op_2").unwrap();
        assert_eq!(incoming.len(), 2);
        assert_eq!(incoming["right"].operator.as_str(), "op_1");
        assert!(index.overwritten().is_empty());
    }
}
