use lodestone_api::parser::{LineBytePosition, ParseError};
use std::error::Error;
use std::fmt;

/// Error that might be returned during parsing.
///
/// It might wrap an IO error or be a parsing error, and exposes which of the
/// fatal grammar conditions it reports through [`kind`](#method.kind).
#[derive(Debug)]
pub struct RdfXmlError {
    kind: RdfXmlErrorKind,
}

/// The category of a [`RdfXmlError`](struct.RdfXmlError.html).
#[derive(Debug)]
#[non_exhaustive]
pub enum RdfXmlErrorKind {
    /// Error raised by the underlying XML reader (including IO errors).
    Xml(quick_xml::Error),
    /// An IRI (absolute or after resolution) is invalid.
    InvalidIri(String),
    /// A relative IRI reference was found while no base IRI is in scope.
    UnresolvedReference(String),
    /// A `rdf:ID` or `rdf:nodeID` value is not a valid XML NCName.
    InvalidIdentifier {
        attribute: &'static str,
        value: String,
    },
    /// An attribute removed from the RDF syntax (`rdf:aboutEach`,
    /// `rdf:aboutEachPrefix` or `rdf:bagID`) was found.
    ObsoleteConstruct(&'static str),
    /// A combination of constructs the RDF/XML grammar does not allow.
    StructuralViolation(String),
    /// A `xml:lang` value is not a valid BCP47 language tag.
    InvalidLanguageTag(String),
}

impl RdfXmlError {
    /// The category of the error, so each failure mode can be matched on.
    pub fn kind(&self) -> &RdfXmlErrorKind {
        &self.kind
    }

    pub(crate) fn invalid_identifier(attribute: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidIdentifier {
                attribute,
                value: value.into(),
            },
        }
    }

    pub(crate) fn obsolete_construct(attribute: &'static str) -> Self {
        Self {
            kind: RdfXmlErrorKind::ObsoleteConstruct(attribute),
        }
    }

    pub(crate) fn structural_violation(message: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::StructuralViolation(message.into()),
        }
    }

    pub(crate) fn unresolved_reference(reference: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::UnresolvedReference(reference.into()),
        }
    }

    pub(crate) fn invalid_iri(iri: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidIri(iri.into()),
        }
    }

    pub(crate) fn invalid_language_tag(tag: impl Into<String>) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidLanguageTag(tag.into()),
        }
    }
}

impl fmt::Display for RdfXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RdfXmlErrorKind::Xml(error) => error.fmt(f),
            RdfXmlErrorKind::InvalidIri(iri) => write!(f, "The IRI {} is invalid", iri),
            RdfXmlErrorKind::UnresolvedReference(reference) => write!(
                f,
                "No base IRI is in scope to resolve the relative reference {}",
                reference
            ),
            RdfXmlErrorKind::InvalidIdentifier { attribute, value } => {
                write!(f, "{} attribute '{}' must be an NCName", attribute, value)
            }
            RdfXmlErrorKind::ObsoleteConstruct(attribute) => {
                write!(f, "Obsolete attribute {}", attribute)
            }
            RdfXmlErrorKind::StructuralViolation(message) => message.fmt(f),
            RdfXmlErrorKind::InvalidLanguageTag(tag) => {
                write!(f, "The language tag '{}' is invalid", tag)
            }
        }
    }
}

impl Error for RdfXmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RdfXmlErrorKind::Xml(quick_xml::Error::Io(error)) => Some(error),
            RdfXmlErrorKind::Xml(quick_xml::Error::Utf8(error)) => Some(error),
            _ => None,
        }
    }
}

impl ParseError for RdfXmlError {
    fn textual_position(&self) -> Option<LineBytePosition> {
        None
    }
}

impl From<quick_xml::Error> for RdfXmlError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            kind: RdfXmlErrorKind::Xml(error),
        }
    }
}

impl From<oxiri::IriParseError> for RdfXmlError {
    fn from(error: oxiri::IriParseError) -> Self {
        Self {
            kind: RdfXmlErrorKind::InvalidIri(error.to_string()),
        }
    }
}
