//! Lexical scoping of `xml:base` and `xml:lang`.

use crate::error::RdfXmlError;
use crate::tree::XmlElement;
use crate::ValidationMode;
use oxilangtag::LanguageTag;
use oxiri::Iri;

/// The base IRI and language in scope at one element.
///
/// A scope is never mutated: each element derives the scope of its subtree
/// from its parent's, so sibling subtrees cannot observe each other's
/// overrides.
#[derive(Debug, Clone)]
pub(crate) struct ScopeContext {
    base_iri: Option<Iri<String>>,
    language: Option<LanguageTag<String>>,
}

impl ScopeContext {
    pub fn new(base_iri: Option<Iri<String>>, language: Option<LanguageTag<String>>) -> Self {
        Self { base_iri, language }
    }

    /// The scope the given element and its descendants see: this scope with
    /// the element's own `xml:base` and `xml:lang` overrides applied.
    pub fn derived_for(
        &self,
        element: &XmlElement,
        mode: ValidationMode,
    ) -> Result<Self, RdfXmlError> {
        let mut scope = self.clone();
        for attribute in &element.attributes {
            match attribute.qname.as_str() {
                "xml:base" => {
                    scope.base_iri = Some(self.resolve(&attribute.value)?);
                }
                "xml:lang" => {
                    if attribute.value.is_empty() {
                        // An empty xml:lang explicitly resets the language
                        scope.language = None;
                    } else {
                        match LanguageTag::parse(attribute.value.to_ascii_lowercase()) {
                            Ok(tag) => scope.language = Some(tag),
                            Err(_) => {
                                if mode == ValidationMode::Strict {
                                    return Err(RdfXmlError::invalid_language_tag(
                                        attribute.value.as_str(),
                                    ));
                                }
                            }
                        }
                    }
                }
                _ => (),
            }
        }
        Ok(scope)
    }

    /// Resolves an IRI reference against the base IRI in scope.
    pub fn resolve(&self, reference: &str) -> Result<Iri<String>, RdfXmlError> {
        match &self.base_iri {
            Some(base_iri) => base_iri
                .resolve(reference)
                .map_err(|_| RdfXmlError::invalid_iri(reference)),
            None => Iri::parse(reference.to_owned()).map_err(|_| {
                if has_scheme(reference) {
                    RdfXmlError::invalid_iri(reference)
                } else {
                    RdfXmlError::unresolved_reference(reference)
                }
            }),
        }
    }

    pub fn language(&self) -> Option<&LanguageTag<String>> {
        self.language.as_ref()
    }
}

fn has_scheme(reference: &str) -> bool {
    let mut chars = reference.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => (),
        _ => return false,
    }
    for c in chars {
        match c {
            c if c.is_ascii_alphanumeric() => (),
            '+' | '-' | '.' => (),
            ':' => return true,
            _ => return false,
        }
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::XmlAttribute;

    fn element_with(qname: &str, value: &str) -> XmlElement {
        XmlElement {
            name: qname.to_owned(),
            qname: qname.to_owned(),
            attributes: vec![XmlAttribute {
                name: qname.to_owned(),
                qname: qname.to_owned(),
                value: value.to_owned(),
            }],
            children: Vec::default(),
        }
    }

    fn scope(base_iri: &str) -> ScopeContext {
        ScopeContext::new(Some(Iri::parse(base_iri.to_owned()).unwrap()), None)
    }

    #[test]
    fn base_override_is_resolved_against_the_parent_base() {
        let derived = scope("http://example.com/a/b")
            .derived_for(&element_with("xml:base", "c/"), ValidationMode::Strict)
            .unwrap();
        assert_eq!(
            "http://example.com/a/c/d",
            derived.resolve("d").unwrap().as_str()
        );
    }

    #[test]
    fn siblings_do_not_share_overrides() {
        let parent = scope("http://example.com/");
        let first = parent
            .derived_for(&element_with("xml:base", "http://other.example/"), ValidationMode::Strict)
            .unwrap();
        assert_eq!("http://other.example/x", first.resolve("x").unwrap().as_str());
        assert_eq!(
            "http://example.com/x",
            parent.resolve("x").unwrap().as_str()
        );
    }

    #[test]
    fn empty_language_resets_inherited_language() {
        let parent = scope("http://example.com/")
            .derived_for(&element_with("xml:lang", "en"), ValidationMode::Strict)
            .unwrap();
        assert_eq!("en", parent.language().unwrap().as_str());
        let child = parent
            .derived_for(&element_with("xml:lang", ""), ValidationMode::Strict)
            .unwrap();
        assert!(child.language().is_none());
    }

    #[test]
    fn relative_reference_without_base_is_unresolved() {
        let scope = ScopeContext::new(None, None);
        assert!(matches!(
            scope.resolve("relative").unwrap_err().kind(),
            crate::RdfXmlErrorKind::UnresolvedReference(_)
        ));
    }
}
