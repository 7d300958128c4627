//! RDF export error types.

use thiserror::Error;

/// Result type for RDF export.
pub type ExportResult<T> = Result<T, ExportError>;

/// Structural gaps that make a workflow impossible to export.
///
/// Export is all-or-nothing: the first gap aborts it and no partial graph is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// An operator or one of its connectors lacks a `definition.uri`.
    #[error("{entity} has no definition uri")]
    MissingDefinition {
        /// Human-readable path to the offending entity.
        entity: String,
    },
}

impl ExportError {
    pub(crate) fn missing_operator_definition(operator: &str) -> Self {
        Self::MissingDefinition {
            entity: format!("operator '{operator}'"),
        }
    }

    pub(crate) fn missing_connector_definition(
        operator: &str,
        direction: &str,
        connector: &str,
    ) -> Self {
        Self::MissingDefinition {
            entity: format!("{direction} connector '{connector}' of operator '{operator}'"),
        }
    }
}

impl From<ExportError> for weft_core::Error {
    fn from(err: ExportError) -> Self {
        weft_core::Error::invalid_input()
            .with_message(err.to_string())
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use weft_core::ErrorKind;

    use super::*;

    #[test]
    fn test_missing_definition_message() {
        let err = ExportError::missing_connector_definition("op_1", "output", "out_0");
        assert_eq!(
            err.to_string(),
            "output connector 'out_0' of operator 'op_1' has no definition uri"
        );

        let err: weft_core::Error = err.into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
