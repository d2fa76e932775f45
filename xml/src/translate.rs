//! The recursive core: walks node and property elements, expands containers
//! and emits reification quads for statements carrying `rdf:ID`.

use crate::error::RdfXmlError;
use crate::guard::{
    check_node_element_name, check_property_element_name, classify_attributes, ElementAttributes,
    RdfParseType,
};
use crate::identity::{node_identity, BlankNodeTable};
use crate::model::{OwnedBlankNode, OwnedNamedNode, OwnedNamedOrBlankNode};
use crate::scope::ScopeContext;
use crate::tree::{serialize_children, XmlElement, XmlNode};
use crate::vocab::*;
use crate::ValidationMode;
use lodestone_api::model::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term, Triple};
use std::collections::HashSet;

/// One parsing session: the blank-node table, the `rdf:ID` values already
/// used, and the validation mode. Owned by a parser instance and shared by
/// every `rdf:RDF` root of its document.
pub(crate) struct Translator {
    bnodes: BlankNodeTable,
    seen_ids: HashSet<String>,
    mode: ValidationMode,
}

impl Translator {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            bnodes: BlankNodeTable::default(),
            seen_ids: HashSet::default(),
            mode,
        }
    }

    pub fn fresh_blank_node(&mut self) -> OwnedBlankNode {
        self.bnodes.fresh()
    }

    /// Translates the children of one `rdf:RDF` element, whose scope is
    /// already derived.
    pub fn rdf_element<E: From<RdfXmlError>>(
        &mut self,
        element: &XmlElement,
        scope: &ScopeContext,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        // The attribute guard applies to rdf:RDF too: obsolete attributes and
        // invalid identifiers stay fatal even when the element is the root
        classify_attributes(element, self.mode)?;
        if self.mode == ValidationMode::Strict {
            for attribute in &element.attributes {
                if !attribute.qname.starts_with("xml") {
                    return Err(RdfXmlError::structural_violation(format!(
                        "Unexpected attribute {} on rdf:RDF",
                        attribute.qname
                    ))
                    .into());
                }
            }
        }
        for child in element.element_children()? {
            self.node_element(child, scope, on_triple)?;
        }
        Ok(())
    }

    /// Translates a node element and returns its resolved identity.
    pub fn node_element<E: From<RdfXmlError>>(
        &mut self,
        element: &XmlElement,
        parent_scope: &ScopeContext,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<OwnedNamedOrBlankNode, E> {
        let scope = parent_scope.derived_for(element, self.mode)?;
        check_node_element_name(&element.name)?;
        let attributes = classify_attributes(element, self.mode)?;
        self.check_misplaced_property_attributes(&attributes, element)?;

        let id_attr = self.resolve_id(&attributes.id, &scope)?;
        let node_id_attr = attributes
            .node_id
            .as_deref()
            .map(|node_id| self.bnodes.for_node_id(node_id));
        let about_attr = match &attributes.about {
            Some(about) => Some(OwnedNamedNode {
                iri: scope.resolve(about)?.into_inner(),
            }),
            None => None,
        };
        let subject = node_identity(
            &mut self.bnodes,
            id_attr.as_ref(),
            node_id_attr.as_ref(),
            about_attr.as_ref(),
        )?;

        self.emit_property_attributes(&subject, &attributes.property, &scope, on_triple)?;
        if let Some(type_attr) = &attributes.type_attr {
            let type_iri = scope.resolve(type_attr)?;
            on_triple(Triple {
                subject: (&subject).into(),
                predicate: NamedNode { iri: RDF_TYPE },
                object: NamedNode {
                    iri: type_iri.as_str(),
                }
                .into(),
            })?;
        }
        if element.name != RDF_DESCRIPTION {
            on_triple(Triple {
                subject: (&subject).into(),
                predicate: NamedNode { iri: RDF_TYPE },
                object: NamedNode { iri: &element.name }.into(),
            })?;
        }

        let mut li_counter = 0;
        for child in element.element_children()? {
            self.property_element(child, &scope, &subject, &mut li_counter, on_triple)?;
        }
        Ok(subject)
    }

    fn property_element<E: From<RdfXmlError>>(
        &mut self,
        element: &XmlElement,
        node_scope: &ScopeContext,
        subject: &OwnedNamedOrBlankNode,
        li_counter: &mut usize,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let scope = node_scope.derived_for(element, self.mode)?;
        // Container expansion: each rdf:li becomes the next membership
        // property of this node, starting at rdf:_1
        let predicate = if element.name == RDF_LI {
            *li_counter += 1;
            OwnedNamedNode {
                iri: membership_property(*li_counter),
            }
        } else {
            check_property_element_name(&element.name)?;
            OwnedNamedNode {
                iri: element.name.clone(),
            }
        };

        let attributes = classify_attributes(element, self.mode)?;
        if attributes.about.is_some() && self.mode == ValidationMode::Strict {
            return Err(RdfXmlError::structural_violation(
                "rdf:about is not allowed on a property element",
            )
            .into());
        }
        let id_attr = self.resolve_id(&attributes.id, &scope)?;

        // rdf:ID is the only attribute the grammar allows next to rdf:parseType
        if attributes.parse_type != RdfParseType::Default
            && self.mode == ValidationMode::Strict
            && !attributes.property.is_empty()
        {
            return Err(RdfXmlError::structural_violation(format!(
                "Property attributes are not allowed on {} with rdf:parseType",
                element.qname
            ))
            .into());
        }

        match attributes.parse_type {
            RdfParseType::Resource => {
                if attributes.resource.is_some()
                    || attributes.node_id.is_some()
                    || attributes.datatype.is_some()
                {
                    return Err(RdfXmlError::structural_violation(format!(
                        "rdf:parseType=\"Resource\" does not allow other object attributes on {}",
                        element.qname
                    ))
                    .into());
                }
                let object = self.bnodes.fresh();
                self.emit_with_reification(
                    subject,
                    &predicate,
                    BlankNode { id: &object.id }.into(),
                    id_attr.as_ref(),
                    on_triple,
                )?;
                // The content is a fresh set of property elements describing
                // the new blank node
                let object: OwnedNamedOrBlankNode = object.into();
                let mut nested_li_counter = 0;
                for child in element.element_children()? {
                    self.property_element(child, &scope, &object, &mut nested_li_counter, on_triple)?;
                }
            }
            RdfParseType::Literal | RdfParseType::Other => {
                let value = serialize_children(element)?;
                self.emit_with_reification(
                    subject,
                    &predicate,
                    Literal::Typed {
                        value: &value,
                        datatype: NamedNode {
                            iri: RDF_XML_LITERAL,
                        },
                    }
                    .into(),
                    id_attr.as_ref(),
                    on_triple,
                )?;
            }
            RdfParseType::Collection => {
                let mut objects = Vec::default();
                for child in element.element_children()? {
                    objects.push(self.node_element(child, &scope, on_triple)?);
                }
                // Build the list from rdf:nil up, in reverse document order
                let mut head: OwnedNamedOrBlankNode = OwnedNamedNode {
                    iri: RDF_NIL.to_owned(),
                }
                .into();
                for object in objects.iter().rev() {
                    let cell: OwnedNamedOrBlankNode = self.bnodes.fresh().into();
                    on_triple(Triple {
                        subject: (&cell).into(),
                        predicate: NamedNode { iri: RDF_FIRST },
                        object: NamedOrBlankNode::from(object).into(),
                    })?;
                    on_triple(Triple {
                        subject: (&cell).into(),
                        predicate: NamedNode { iri: RDF_REST },
                        object: NamedOrBlankNode::from(&head).into(),
                    })?;
                    head = cell;
                }
                self.emit_with_reification(
                    subject,
                    &predicate,
                    NamedOrBlankNode::from(&head).into(),
                    id_attr.as_ref(),
                    on_triple,
                )?;
            }
            RdfParseType::Default => {
                self.default_property_element(
                    element,
                    &scope,
                    subject,
                    &predicate,
                    attributes,
                    id_attr.as_ref(),
                    on_triple,
                )?;
            }
        }
        Ok(())
    }

    /// A property element without parseType: empty with object attributes,
    /// one nested node element, or literal text content.
    #[allow(clippy::too_many_arguments)]
    fn default_property_element<E: From<RdfXmlError>>(
        &mut self,
        element: &XmlElement,
        scope: &ScopeContext,
        subject: &OwnedNamedOrBlankNode,
        predicate: &OwnedNamedNode,
        attributes: ElementAttributes,
        id_attr: Option<&OwnedNamedNode>,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        if attributes.resource.is_some()
            || attributes.node_id.is_some()
            || attributes.type_attr.is_some()
            || !attributes.property.is_empty()
        {
            if !element.children.is_empty() {
                return Err(RdfXmlError::structural_violation(format!(
                    "The property element {} has both object attributes and content",
                    element.qname
                ))
                .into());
            }
            if attributes.datatype.is_some() {
                return Err(RdfXmlError::structural_violation(format!(
                    "rdf:datatype on {} does not apply to a resource object",
                    element.qname
                ))
                .into());
            }
            let object: OwnedNamedOrBlankNode = match (&attributes.resource, &attributes.node_id) {
                (Some(resource), None) => OwnedNamedNode {
                    iri: scope.resolve(resource)?.into_inner(),
                }
                .into(),
                (None, Some(node_id)) => self.bnodes.for_node_id(node_id).into(),
                (None, None) => self.bnodes.fresh().into(),
                (Some(_), Some(_)) => {
                    return Err(RdfXmlError::structural_violation(
                        "Not both rdf:resource and rdf:nodeID could be set at the same time",
                    )
                    .into());
                }
            };
            self.emit_property_attributes(&object, &attributes.property, scope, on_triple)?;
            if let Some(type_attr) = &attributes.type_attr {
                let type_iri = scope.resolve(type_attr)?;
                on_triple(Triple {
                    subject: (&object).into(),
                    predicate: NamedNode { iri: RDF_TYPE },
                    object: NamedNode {
                        iri: type_iri.as_str(),
                    }
                    .into(),
                })?;
            }
            return self.emit_with_reification(
                subject,
                predicate,
                NamedOrBlankNode::from(&object).into(),
                id_attr,
                on_triple,
            );
        }

        if element
            .children
            .iter()
            .any(|child| matches!(child, XmlNode::Element(_)))
        {
            let children = element.element_children()?;
            if attributes.datatype.is_some() {
                return Err(RdfXmlError::structural_violation(format!(
                    "rdf:datatype on {} does not apply to a resource object",
                    element.qname
                ))
                .into());
            }
            let object = match children.as_slice() {
                [child] => self.node_element(child, scope, on_triple)?,
                _ => {
                    return Err(RdfXmlError::structural_violation(format!(
                        "The property element {} must contain exactly one node element",
                        element.qname
                    ))
                    .into());
                }
            };
            return self.emit_with_reification(
                subject,
                predicate,
                NamedOrBlankNode::from(&object).into(),
                id_attr,
                on_triple,
            );
        }

        // Text content or nothing: a literal object
        let value = element.text_content().unwrap_or("");
        let datatype_iri = match &attributes.datatype {
            Some(datatype) => Some(scope.resolve(datatype)?),
            None => None,
        };
        let object = match (&datatype_iri, scope.language()) {
            (Some(datatype), _) => Literal::Typed {
                value,
                datatype: NamedNode {
                    iri: datatype.as_str(),
                },
            },
            (None, Some(language)) => Literal::LanguageTaggedString {
                value,
                language: language.as_str(),
            },
            (None, None) => Literal::Simple { value },
        };
        self.emit_with_reification(subject, predicate, object.into(), id_attr, on_triple)
    }

    /// Emits the asserted triple, then the four triples describing it when it
    /// is reified through `rdf:ID`.
    fn emit_with_reification<E: From<RdfXmlError>>(
        &self,
        subject: &OwnedNamedOrBlankNode,
        predicate: &OwnedNamedNode,
        object: Term<'_>,
        id_attr: Option<&OwnedNamedNode>,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        let triple = Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        };
        on_triple(triple.clone())?;
        if let Some(id_attr) = id_attr {
            let statement = NamedNode::from(id_attr);
            on_triple(Triple {
                subject: statement.into(),
                predicate: NamedNode { iri: RDF_TYPE },
                object: NamedNode { iri: RDF_STATEMENT }.into(),
            })?;
            on_triple(Triple {
                subject: statement.into(),
                predicate: NamedNode { iri: RDF_SUBJECT },
                object: triple.subject.into(),
            })?;
            on_triple(Triple {
                subject: statement.into(),
                predicate: NamedNode { iri: RDF_PREDICATE },
                object: triple.predicate.into(),
            })?;
            on_triple(Triple {
                subject: statement.into(),
                predicate: NamedNode { iri: RDF_OBJECT },
                object: triple.object,
            })?;
        }
        Ok(())
    }

    fn emit_property_attributes<E: From<RdfXmlError>>(
        &self,
        subject: &OwnedNamedOrBlankNode,
        property_attributes: &[(String, String)],
        scope: &ScopeContext,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        for (predicate, value) in property_attributes {
            on_triple(Triple {
                subject: subject.into(),
                predicate: NamedNode { iri: predicate },
                object: match scope.language() {
                    Some(language) => Literal::LanguageTaggedString {
                        value,
                        language: language.as_str(),
                    },
                    None => Literal::Simple { value },
                }
                .into(),
            })?;
        }
        Ok(())
    }

    /// Resolves `rdf:ID` to `<base>#id` and tracks duplicates.
    fn resolve_id(
        &mut self,
        id: &Option<String>,
        scope: &ScopeContext,
    ) -> Result<Option<OwnedNamedNode>, RdfXmlError> {
        match id {
            Some(id) => {
                let iri = scope.resolve(&format!("#{}", id))?.into_inner();
                if !self.seen_ids.insert(iri.clone()) && self.mode == ValidationMode::Strict {
                    return Err(RdfXmlError::structural_violation(format!(
                        "{} has already been used as rdf:ID value",
                        iri
                    )));
                }
                Ok(Some(OwnedNamedNode { iri }))
            }
            None => Ok(None),
        }
    }

    /// Attributes that only make sense on property elements are rejected on
    /// node elements in strict mode.
    fn check_misplaced_property_attributes(
        &self,
        attributes: &ElementAttributes,
        element: &XmlElement,
    ) -> Result<(), RdfXmlError> {
        if self.mode == ValidationMode::Strict
            && (attributes.resource.is_some()
                || attributes.datatype.is_some()
                || attributes.parse_type != RdfParseType::Default)
        {
            return Err(RdfXmlError::structural_violation(format!(
                "rdf:resource, rdf:datatype and rdf:parseType are not allowed on the node element {}",
                element.qname
            )));
        }
        Ok(())
    }
}
