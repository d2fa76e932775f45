//! Subject and object identity: blank-node labels and `rdf:about` /
//! `rdf:ID` / `rdf:nodeID` resolution.

use crate::error::RdfXmlError;
use crate::model::{OwnedBlankNode, OwnedNamedNode, OwnedNamedOrBlankNode};
use std::collections::HashMap;

/// The blank nodes of one parsing session.
///
/// `rdf:nodeID` strings map to a stable generated label, so two occurrences
/// of the same string inside the session yield the same blank node while
/// labels can never clash with a nodeID picked by the document. The table is
/// owned by one parser instance and never shared.
#[derive(Default)]
pub(crate) struct BlankNodeTable {
    counter: usize,
    by_node_id: HashMap<String, String>,
}

impl BlankNodeTable {
    /// A blank node nothing else in the session can refer to.
    pub fn fresh(&mut self) -> OwnedBlankNode {
        OwnedBlankNode {
            id: self.fresh_label(),
        }
    }

    /// The blank node a `rdf:nodeID` value designates, created on first use.
    pub fn for_node_id(&mut self, node_id: &str) -> OwnedBlankNode {
        if let Some(label) = self.by_node_id.get(node_id) {
            return OwnedBlankNode { id: label.clone() };
        }
        let label = self.fresh_label();
        self.by_node_id.insert(node_id.to_owned(), label.clone());
        OwnedBlankNode { id: label }
    }

    fn fresh_label(&mut self) -> String {
        self.counter += 1;
        format!("lode{:08}", self.counter)
    }
}

/// Resolves a node element's identity from its already-resolved identifying
/// attributes. More than one of them on the same element has no defined
/// precedence and is rejected.
pub(crate) fn node_identity(
    table: &mut BlankNodeTable,
    id_attr: Option<&OwnedNamedNode>,
    node_id_attr: Option<&OwnedBlankNode>,
    about_attr: Option<&OwnedNamedNode>,
) -> Result<OwnedNamedOrBlankNode, RdfXmlError> {
    match (id_attr, node_id_attr, about_attr) {
        (Some(id_attr), None, None) => Ok(id_attr.clone().into()),
        (None, Some(node_id_attr), None) => Ok(node_id_attr.clone().into()),
        (None, None, Some(about_attr)) => Ok(about_attr.clone().into()),
        (None, None, None) => Ok(table.fresh().into()),
        (Some(_), Some(_), _) => Err(RdfXmlError::structural_violation(
            "Not both rdf:ID and rdf:nodeID could be set at the same time",
        )),
        (_, Some(_), Some(_)) => Err(RdfXmlError::structural_violation(
            "Not both rdf:nodeID and rdf:about could be set at the same time",
        )),
        (Some(_), _, Some(_)) => Err(RdfXmlError::structural_violation(
            "Not both rdf:ID and rdf:about could be set at the same time",
        )),
    }
}

/// Validates an XML 1.0 NCName: a Name without any colon.
pub(crate) fn is_nc_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c != ':' && is_name_start_char(c) => (),
        _ => return false,
    }
    chars.all(|c| c != ':' && is_name_char(c))
}

fn is_name_start_char(c: char) -> bool {
    // NameStartChar ::= ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF]
    //                 | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F]
    //                 | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD]
    //                 | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    // NameChar ::= NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}
