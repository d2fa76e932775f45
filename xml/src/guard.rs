//! Validation of element and attribute names against the RDF/XML grammar,
//! run before any semantic interpretation.

use crate::error::RdfXmlError;
use crate::identity::is_nc_name;
use crate::tree::XmlElement;
use crate::vocab::*;
use crate::ValidationMode;

/// Syntactic terms of the RDF vocabulary that may not name a node or
/// property element.
const RESERVED_ELEMENT_NAMES: [&str; 11] = [
    RDF_ABOUT,
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_BAG_ID,
    RDF_DATATYPE,
    RDF_ID,
    RDF_LI,
    RDF_NODE_ID,
    RDF_PARSE_TYPE,
    RDF_RDF,
    RDF_RESOURCE,
];

pub(crate) fn check_node_element_name(name: &str) -> Result<(), RdfXmlError> {
    if RESERVED_ELEMENT_NAMES.contains(&name) {
        return Err(RdfXmlError::structural_violation(format!(
            "Invalid node element tag name: {}",
            name
        )));
    }
    Ok(())
}

/// `rdf:li` is rewritten by the container expansion before this check runs.
pub(crate) fn check_property_element_name(name: &str) -> Result<(), RdfXmlError> {
    if RESERVED_ELEMENT_NAMES.contains(&name) || name == RDF_DESCRIPTION || name == RDF_LI {
        return Err(RdfXmlError::structural_violation(format!(
            "Invalid property element tag name: {}",
            name
        )));
    }
    Ok(())
}

/// How the content of a property element is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RdfParseType {
    Default,
    Collection,
    Literal,
    Resource,
    /// Unknown values; handled like `Literal` per the grammar's
    /// `parseTypeOtherPropertyElt` production.
    Other,
}

/// The syntactic attributes of one element, each validated and sorted into
/// its grammar role. `id` and `node_id` are NCName-checked raw values;
/// IRI-valued attributes are resolved later against the element's own scope.
pub(crate) struct ElementAttributes {
    pub id: Option<String>,
    pub node_id: Option<String>,
    pub about: Option<String>,
    pub resource: Option<String>,
    pub datatype: Option<String>,
    pub type_attr: Option<String>,
    pub parse_type: RdfParseType,
    /// Non-syntactic attributes, kept as (predicate IRI, literal value).
    pub property: Vec<(String, String)>,
}

pub(crate) fn classify_attributes(
    element: &XmlElement,
    mode: ValidationMode,
) -> Result<ElementAttributes, RdfXmlError> {
    let mut attributes = ElementAttributes {
        id: None,
        node_id: None,
        about: None,
        resource: None,
        datatype: None,
        type_attr: None,
        parse_type: RdfParseType::Default,
        property: Vec::default(),
    };
    for attribute in &element.attributes {
        if attribute.qname.starts_with("xml") {
            // xmlns declarations are already resolved into expanded names and
            // xml:base/xml:lang are part of the scope
            continue;
        }
        let value = attribute.value.clone();
        match attribute.name.as_str() {
            RDF_ID => {
                if !is_nc_name(&value) {
                    return Err(RdfXmlError::invalid_identifier("ID", value));
                }
                attributes.id = Some(value);
            }
            RDF_NODE_ID => {
                if !is_nc_name(&value) {
                    return Err(RdfXmlError::invalid_identifier("nodeID", value));
                }
                attributes.node_id = Some(value);
            }
            RDF_ABOUT => attributes.about = Some(value),
            RDF_RESOURCE => attributes.resource = Some(value),
            RDF_DATATYPE => attributes.datatype = Some(value),
            RDF_TYPE => attributes.type_attr = Some(value),
            RDF_PARSE_TYPE => {
                attributes.parse_type = match value.as_str() {
                    "Collection" => RdfParseType::Collection,
                    "Literal" => RdfParseType::Literal,
                    "Resource" => RdfParseType::Resource,
                    _ => RdfParseType::Other,
                };
            }
            RDF_ABOUT_EACH => {
                return Err(RdfXmlError::obsolete_construct("rdf:aboutEach"));
            }
            RDF_ABOUT_EACH_PREFIX => {
                return Err(RdfXmlError::obsolete_construct("rdf:aboutEachPrefix"));
            }
            RDF_BAG_ID => {
                return Err(RdfXmlError::obsolete_construct("rdf:bagID"));
            }
            RDF_LI | RDF_RDF | RDF_DESCRIPTION => {
                return Err(RdfXmlError::structural_violation(format!(
                    "{} is not a valid attribute",
                    attribute.name
                )));
            }
            name if name.starts_with(RDF_NAMESPACE) => {
                if mode == ValidationMode::Strict {
                    return Err(RdfXmlError::structural_violation(format!(
                        "Unexpected attribute {} in the RDF namespace",
                        name
                    )));
                }
                attributes.property.push((name.to_owned(), value));
            }
            name => attributes.property.push((name.to_owned(), value)),
        }
    }
    Ok(attributes)
}
