//! Locating `rdf:RDF` roots anywhere in a document, RDF/XML being allowed to
//! be embedded in unrelated XML.

use crate::error::RdfXmlError;
use crate::scope::ScopeContext;
use crate::tree::{XmlElement, XmlNode};
use crate::vocab::RDF_RDF;
use crate::ValidationMode;

/// Collects every `rdf:RDF` element of the tree in document order, each
/// paired with the scope derived along its ancestor path (so `xml:base` and
/// `xml:lang` on enclosing non-RDF elements still apply).
pub(crate) fn find_rdf_roots<'t>(
    element: &'t XmlElement,
    parent_scope: &ScopeContext,
    mode: ValidationMode,
    roots: &mut Vec<(&'t XmlElement, ScopeContext)>,
) -> Result<(), RdfXmlError> {
    let scope = parent_scope.derived_for(element, mode)?;
    if element.name == RDF_RDF {
        roots.push((element, scope));
        return Ok(());
    }
    for child in &element.children {
        if let XmlNode::Element(child) = child {
            find_rdf_roots(child, &scope, mode, roots)?;
        }
    }
    Ok(())
}
