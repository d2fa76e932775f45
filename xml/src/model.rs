//! Owned counterparts of the borrowing `lodestone_api` model, used to carry
//! resolved identities through the recursive translation.

use lodestone_api::model::{BlankNode, NamedNode, NamedOrBlankNode};

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct OwnedNamedNode {
    pub iri: String,
}

impl<'a> From<&'a OwnedNamedNode> for NamedNode<'a> {
    fn from(node: &'a OwnedNamedNode) -> Self {
        Self { iri: &node.iri }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) struct OwnedBlankNode {
    pub id: String,
}

impl<'a> From<&'a OwnedBlankNode> for BlankNode<'a> {
    fn from(node: &'a OwnedBlankNode) -> Self {
        Self { id: &node.id }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub(crate) enum OwnedNamedOrBlankNode {
    NamedNode(OwnedNamedNode),
    BlankNode(OwnedBlankNode),
}

impl<'a> From<&'a OwnedNamedOrBlankNode> for NamedOrBlankNode<'a> {
    fn from(node: &'a OwnedNamedOrBlankNode) -> Self {
        match node {
            OwnedNamedOrBlankNode::NamedNode(node) => NamedOrBlankNode::NamedNode(node.into()),
            OwnedNamedOrBlankNode::BlankNode(node) => NamedOrBlankNode::BlankNode(node.into()),
        }
    }
}

impl From<OwnedNamedNode> for OwnedNamedOrBlankNode {
    fn from(node: OwnedNamedNode) -> Self {
        OwnedNamedOrBlankNode::NamedNode(node)
    }
}

impl From<OwnedBlankNode> for OwnedNamedOrBlankNode {
    fn from(node: OwnedBlankNode) -> Self {
        OwnedNamedOrBlankNode::BlankNode(node)
    }
}
