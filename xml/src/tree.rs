//! The XML front end: reads a whole document into an element tree with
//! namespaces resolved and entities expanded, so the semantic layer can walk
//! elements recursively instead of juggling reader events.

use crate::error::RdfXmlError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::BufRead;

/// One XML element with its name resolved against the in-scope namespaces.
///
/// `name` is the expanded name (namespace IRI directly followed by the local
/// name, or the local name alone for unprefixed names without a default
/// namespace). `qname` is the name as written, kept for re-serializing
/// `rdf:parseType="Literal"` content.
#[derive(Debug, Clone)]
pub(crate) struct XmlElement {
    pub name: String,
    pub qname: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Clone)]
pub(crate) struct XmlAttribute {
    /// Expanded name for namespaced attributes; for `xmlns*` declarations and
    /// attributes in the `xml:` prefix this is the qualified name itself.
    pub name: String,
    pub qname: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub(crate) enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    /// The element children, erroring out on interleaved text.
    ///
    /// The reader trims whitespace-only runs, so any text left between child
    /// elements is meaningful and the grammar has no production for it.
    pub fn element_children(&self) -> Result<Vec<&XmlElement>, RdfXmlError> {
        let mut elements = Vec::default();
        for child in &self.children {
            match child {
                XmlNode::Element(element) => elements.push(element),
                XmlNode::Text(text) => {
                    return Err(RdfXmlError::structural_violation(format!(
                        "Unexpected text content '{}' in {}",
                        text, self.qname
                    )));
                }
            }
        }
        Ok(elements)
    }

    /// The element's text content if it has no element children.
    pub fn text_content(&self) -> Option<&str> {
        match self.children.as_slice() {
            [XmlNode::Text(text)] => Some(text),
            _ => None,
        }
    }
}

/// Reads the complete document and returns its root element.
pub(crate) fn read_document<R: BufRead>(read: R) -> Result<XmlElement, RdfXmlError> {
    let mut reader = Reader::from_reader(read);
    reader.expand_empty_elements(true).trim_text(true);

    let mut buffer = Vec::default();
    let mut namespace_buffer = Vec::default();
    let mut open: Vec<XmlElement> = Vec::default();
    let mut root = None;
    loop {
        let (_, event) = reader.read_namespaced_event(&mut buffer, &mut namespace_buffer)?;
        match event {
            Event::Start(ref event) => {
                let element = read_start_element(&reader, event, &namespace_buffer)?;
                open.push(element);
            }
            Event::Text(ref event) => {
                let text = event.unescape_and_decode(&reader)?;
                match open.last_mut() {
                    Some(parent) => {
                        if let Some(XmlNode::Text(last)) = parent.children.last_mut() {
                            last.push_str(&text);
                        } else {
                            parent.children.push(XmlNode::Text(text));
                        }
                    }
                    None => {
                        return Err(RdfXmlError::structural_violation(format!(
                            "Unexpected text '{}' outside of the document element",
                            text
                        )));
                    }
                }
            }
            Event::End(_) => {
                let element = open.pop().ok_or_else(|| {
                    RdfXmlError::structural_violation("The XML document is not balanced")
                })?;
                match open.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => root = Some(element),
                }
            }
            Event::Eof => break,
            _ => (), // comments, processing instructions, declarations
        }
        buffer.clear();
    }
    root.ok_or_else(|| RdfXmlError::structural_violation("The XML document has no root element"))
}

fn read_start_element<R: BufRead>(
    reader: &Reader<R>,
    event: &BytesStart<'_>,
    namespace_buffer: &[u8],
) -> Result<XmlElement, RdfXmlError> {
    let (namespace, local_name) = reader.event_namespace(event.name(), namespace_buffer);
    let name = expanded_name(reader, namespace, local_name)?;
    let qname = reader.decode(event.name())?.to_owned();

    let mut attributes = Vec::default();
    for attribute in event.attributes() {
        let attribute = attribute?;
        let qname = reader.decode(attribute.key)?.to_owned();
        let name = if attribute.key.starts_with(b"xml") {
            // xmlns declarations and the built-in xml: prefix
            qname.clone()
        } else {
            let (namespace, local_name) =
                reader.attribute_namespace(attribute.key, namespace_buffer);
            expanded_name(reader, namespace, local_name)?
        };
        attributes.push(XmlAttribute {
            name,
            qname,
            value: attribute.unescape_and_decode_value(reader)?,
        });
    }
    Ok(XmlElement {
        name,
        qname,
        attributes,
        children: Vec::default(),
    })
}

fn expanded_name<R: BufRead>(
    reader: &Reader<R>,
    namespace: Option<&[u8]>,
    local_name: &[u8],
) -> Result<String, RdfXmlError> {
    Ok(match namespace {
        Some(namespace) => reader.decode(namespace)?.to_owned() + reader.decode(local_name)?,
        None => reader.decode(local_name)?.to_owned(),
    })
}

/// Serializes the children of an element back into XML for
/// `rdf:parseType="Literal"`.
///
/// This is a best-effort round-trip, not exclusive canonical XML: namespace
/// declarations, attribute order and insignificant whitespace are kept only
/// as the tree recorded them.
pub(crate) fn serialize_children(element: &XmlElement) -> Result<String, RdfXmlError> {
    let mut writer = Writer::new(Vec::default());
    for child in &element.children {
        write_node(&mut writer, child)?;
    }
    String::from_utf8(writer.into_inner())
        .map_err(|_| RdfXmlError::structural_violation("The XML literal is not in valid UTF-8"))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), RdfXmlError> {
    match node {
        XmlNode::Text(text) => {
            writer.write_event(Event::Text(BytesText::from_plain_str(text)))?;
        }
        XmlNode::Element(element) => {
            let mut start = BytesStart::borrowed_name(element.qname.as_bytes());
            for attribute in &element.attributes {
                start.push_attribute((attribute.qname.as_str(), attribute.value.as_str()));
            }
            writer.write_event(Event::Start(start))?;
            for child in &element.children {
                write_node(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::borrowed(element.qname.as_bytes())))?;
        }
    }
    Ok(())
}
