//! Ontology namespaces and terms used by the workflow export.

/// Default namespace of workflow nodes.
pub const TITAN: &str = "http://www.ontologies.khaos.uma.es/titan/#";
/// BIGOWL ontology namespace.
pub const BIGOWL: &str = "http://www.ontologies.khaos.uma.es/bigowl#";
/// DMOP ontology namespace.
pub const DMOP: &str = "http://www.e-lico.eu/ontologies/dmo/DMOP/DMOP.owl#";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `xsd:integer`.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// `dmop:Workflow`, the class of every exported workflow node.
pub const WORKFLOW: &str = "http://www.e-lico.eu/ontologies/dmo/DMOP/DMOP.owl#Workflow";

pub const NUM_TASK: &str = "http://www.ontologies.khaos.uma.es/bigowl#numTask";
pub const HAS_TASK: &str = "http://www.ontologies.khaos.uma.es/bigowl#hasTask";
pub const HAS_NAME: &str = "http://www.ontologies.khaos.uma.es/bigowl#hasName";
pub const NUMBER_OF_INPUTS: &str = "http://www.ontologies.khaos.uma.es/bigowl#numberOfInputs";
pub const NUMBER_OF_OUTPUTS: &str = "http://www.ontologies.khaos.uma.es/bigowl#numberOfOutputs";
pub const SPECIFIES_INPUT_CLASS: &str =
    "http://www.ontologies.khaos.uma.es/bigowl#specifiesInputClass";
pub const SPECIFIES_OUTPUT_CLASS: &str =
    "http://www.ontologies.khaos.uma.es/bigowl#specifiesOutputClass";
pub const HAS_COMPONENT: &str = "http://www.ontologies.khaos.uma.es/bigowl#hasComponent";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_live_in_their_namespaces() {
        for term in [
            NUM_TASK,
            HAS_TASK,
            HAS_NAME,
            NUMBER_OF_INPUTS,
            NUMBER_OF_OUTPUTS,
            SPECIFIES_INPUT_CLASS,
            SPECIFIES_OUTPUT_CLASS,
            HAS_COMPONENT,
        ] {
            assert!(term.starts_with(BIGOWL), "{term}");
        }
        assert!(WORKFLOW.starts_with(DMOP));
    }
}
