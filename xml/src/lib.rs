//! Implementation of an [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) parser.
//!
//! How to read a document and count the number of `rdf:type` triples:
//! ```
//! use lodestone_xml::{RdfXmlError, RdfXmlParser};
//! use lodestone_api::parser::TriplesParser;
//! use lodestone_api::model::NamedNode;
//!
//! let file = b"<?xml version=\"1.0\"?>
//! <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:schema=\"http://schema.org/\">
//!  <rdf:Description rdf:about=\"http://example.com/foo\">
//!    <rdf:type rdf:resource=\"http://schema.org/Person\" />
//!    <schema:name>Foo</schema:name>
//!  </rdf:Description>
//!  <schema:Person rdf:about=\"http://example.com/bar\" schema:name=\"Bar\" />
//! </rdf:RDF>";
//!
//! let rdf_type = NamedNode { iri: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" };
//! let mut count = 0;
//! RdfXmlParser::new(file.as_ref(), "").unwrap().parse_all(&mut |t| {
//!     if t.predicate == rdf_type {
//!         count += 1;
//!     }
//!     Ok(()) as Result<(), RdfXmlError>
//! }).unwrap();
//! assert_eq!(2, count);
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

mod error;
mod guard;
mod identity;
mod model;
mod scan;
mod scope;
mod translate;
mod tree;
mod vocab;

pub use error::{RdfXmlError, RdfXmlErrorKind};

use crate::scope::ScopeContext;
use crate::translate::Translator;
use crate::tree::XmlElement;
use crate::vocab::{RDF_NAMESPACE, RDF_TYPE};
use lodestone_api::model::{BlankNode, NamedNode, Triple};
use lodestone_api::parser::TriplesParser;
use oxilangtag::LanguageTag;
use oxiri::Iri;
use std::io::BufRead;

/// Whether anomalies outside the always-fatal grammar violations are
/// reported or tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationMode {
    Strict,
    Lenient,
}

/// A [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) parser.
///
/// It implements the [`TriplesParser`](../lodestone_api/parser/trait.TriplesParser.html) trait.
///
/// The whole document is read and scanned for `rdf:RDF` elements on the
/// first `parse_step` call; each step then translates one of them (RDF/XML
/// may be embedded several times in otherwise unrelated XML). If the
/// document contains no `rdf:RDF` element and its root is not an RDF term,
/// the only emitted triple types the root element with a fresh blank node.
///
/// The parser is strict by default: the obsolete `rdf:aboutEach`,
/// `rdf:aboutEachPrefix` and `rdf:bagID` attributes, invalid `rdf:ID` /
/// `rdf:nodeID` values and grammar-invalid construct combinations are always
/// fatal, while [`lenient`](#method.lenient) additionally tolerates unknown
/// attributes in the RDF namespace and invalid language tags.
///
/// `rdf:parseType="Literal"` content is kept as re-serialized XML; it is not
/// put in exclusive canonical form.
///
/// Count the number of people:
/// ```
/// use lodestone_xml::{RdfXmlError, RdfXmlParser};
/// use lodestone_api::parser::TriplesParser;
/// use lodestone_api::model::NamedNode;
///
/// let file = b"<?xml version=\"1.0\"?>
/// <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:schema=\"http://schema.org/\">
///  <schema:Person rdf:about=\"http://example.com/foo\" schema:name=\"Foo\" />
///  <schema:Person rdf:about=\"http://example.com/bar\" schema:name=\"Bar\" />
/// </rdf:RDF>";
///
/// let rdf_type = NamedNode { iri: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type" };
/// let schema_person = NamedNode { iri: "http://schema.org/Person" };
/// let mut count = 0;
/// RdfXmlParser::new(file.as_ref(), "").unwrap().parse_all(&mut |t| {
///     if t.predicate == rdf_type && t.object == schema_person.into() {
///         count += 1;
///     }
///     Ok(()) as Result<(), RdfXmlError>
/// }).unwrap();
/// assert_eq!(2, count);
/// ```
pub struct RdfXmlParser<R: BufRead> {
    read: Option<R>,
    base_iri: Option<Iri<String>>,
    language: Option<LanguageTag<String>>,
    mode: ValidationMode,
    translator: Translator,
    tasks: Vec<ParserTask>,
    is_end: bool,
}

enum ParserTask {
    /// The children of this `rdf:RDF` element are node elements.
    Rdf {
        element: XmlElement,
        scope: ScopeContext,
    },
    /// The document root is itself a node element.
    Node {
        element: XmlElement,
        scope: ScopeContext,
    },
    /// Non-RDF document: a single implicit type triple for the root.
    ImplicitType { type_iri: String },
}

impl<R: BufRead> RdfXmlParser<R> {
    /// Builds the parser from a `BufRead` implementation and a base IRI for
    /// relative IRI resolution.
    ///
    /// The base IRI might be empty to state there is no base IRI.
    pub fn new(read: R, base_iri: &str) -> Result<Self, RdfXmlError> {
        Ok(Self {
            read: Some(read),
            base_iri: if base_iri.is_empty() {
                None
            } else {
                Some(Iri::parse(base_iri.to_owned())?)
            },
            language: None,
            mode: ValidationMode::Strict,
            translator: Translator::new(ValidationMode::Strict),
            tasks: Vec::default(),
            is_end: false,
        })
    }

    /// Sets the language literals inherit when the document sets none.
    pub fn with_language(mut self, language: &str) -> Result<Self, RdfXmlError> {
        self.language = Some(
            LanguageTag::parse(language.to_ascii_lowercase())
                .map_err(|_| RdfXmlError::invalid_language_tag(language))?,
        );
        Ok(self)
    }

    /// Tolerates anomalies outside the always-fatal grammar violations.
    pub fn lenient(mut self) -> Self {
        self.mode = ValidationMode::Lenient;
        self.translator = Translator::new(ValidationMode::Lenient);
        self
    }

    fn load(&mut self) -> Result<(), RdfXmlError> {
        let read = match self.read.take() {
            Some(read) => read,
            None => return Ok(()),
        };
        let root = tree::read_document(read)?;
        let scope = ScopeContext::new(self.base_iri.clone(), self.language.clone());
        let mut roots = Vec::default();
        scan::find_rdf_roots(&root, &scope, self.mode, &mut roots)?;
        if roots.is_empty() {
            if root.name.starts_with(RDF_NAMESPACE) {
                self.tasks.push(ParserTask::Node {
                    element: root,
                    scope,
                });
            } else {
                // A non-namespaced root has a relative expanded name, so this
                // can fail like any other reference
                self.tasks.push(ParserTask::ImplicitType {
                    type_iri: scope.resolve(&root.name)?.into_inner(),
                });
            }
        } else {
            // popped from the back, so pushed in reverse document order
            for (element, scope) in roots.into_iter().rev() {
                self.tasks.push(ParserTask::Rdf {
                    element: element.clone(),
                    scope,
                });
            }
        }
        Ok(())
    }
}

impl<R: BufRead> TriplesParser for RdfXmlParser<R> {
    type Error = RdfXmlError;

    /// One step reads the document if not done yet and translates the next
    /// `rdf:RDF` root, so failures can be caught per root.
    fn parse_step<E: From<RdfXmlError>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple<'_>) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.read.is_some() {
            self.load().map_err(E::from)?;
        }
        match self.tasks.pop() {
            Some(ParserTask::Rdf { element, scope }) => {
                self.translator.rdf_element(&element, &scope, on_triple)?;
            }
            Some(ParserTask::Node { element, scope }) => {
                self.translator.node_element(&element, &scope, on_triple)?;
            }
            Some(ParserTask::ImplicitType { type_iri }) => {
                let subject = self.translator.fresh_blank_node();
                on_triple(Triple {
                    subject: BlankNode { id: &subject.id }.into(),
                    predicate: NamedNode { iri: RDF_TYPE },
                    object: NamedNode { iri: &type_iri }.into(),
                })?;
            }
            None => (),
        }
        if self.tasks.is_empty() {
            self.is_end = true;
        }
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.is_end
    }
}
