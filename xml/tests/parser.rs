//! Behavior tests for the RDF/XML parser, run over inline documents through
//! the public API.

use lodestone_api::parser::TriplesParser;
use lodestone_xml::{RdfXmlError, RdfXmlErrorKind, RdfXmlParser};

const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

fn parse(document: &str, base_iri: &str) -> Result<Vec<String>, RdfXmlError> {
    collect(RdfXmlParser::new(document.as_bytes(), base_iri)?)
}

fn parse_lenient(document: &str, base_iri: &str) -> Result<Vec<String>, RdfXmlError> {
    collect(RdfXmlParser::new(document.as_bytes(), base_iri)?.lenient())
}

fn collect(mut parser: RdfXmlParser<&[u8]>) -> Result<Vec<String>, RdfXmlError> {
    let mut triples = Vec::default();
    parser.parse_all(&mut |t| {
        triples.push(t.to_string());
        Ok(()) as Result<(), RdfXmlError>
    })?;
    Ok(triples)
}

fn rdf_document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?><rdf:RDF xmlns:rdf=\"{}\" xmlns:ex=\"http://example.org/\">{}</rdf:RDF>",
        RDF, body
    )
}

#[test]
fn description_with_a_literal_property() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://www.w3.org/TR/rdf-syntax-grammar">
                <ex:editor>Dave Beckett</ex:editor>
            </rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://www.w3.org/TR/rdf-syntax-grammar> <http://example.org/editor> \"Dave Beckett\" ."
        ],
        triples
    );
}

#[test]
fn property_attributes_share_the_element_subject() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/x" ex:title="Title" ex:creator="Someone" />"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://example.com/x> <http://example.org/title> \"Title\" .",
            "<http://example.com/x> <http://example.org/creator> \"Someone\" .",
        ],
        triples
    );
}

#[test]
fn typed_node_element_emits_a_type_triple() {
    let triples = parse(
        &rdf_document(r#"<ex:Person rdf:about="http://example.com/x" ex:name="X" />"#),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://example.com/x> <http://example.org/name> \"X\" .".to_owned(),
            format!("<http://example.com/x> <{}type> <http://example.org/Person> .", RDF),
        ],
        triples
    );
}

#[test]
fn type_attribute_emits_a_type_triple() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/x" rdf:type="http://example.org/Class" />"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![format!(
            "<http://example.com/x> <{}type> <http://example.org/Class> .",
            RDF
        )],
        triples
    );
}

#[test]
fn id_attribute_resolves_as_a_fragment_of_the_base() {
    let triples = parse(
        &rdf_document(r#"<rdf:Description rdf:ID="thing"><ex:p>v</ex:p></rdf:Description>"#),
        "http://example.com/doc",
    )
    .unwrap();
    assert_eq!(
        vec!["<http://example.com/doc#thing> <http://example.org/p> \"v\" ."],
        triples
    );
}

#[test]
fn container_items_expand_to_membership_properties() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Bag rdf:about="http://example.com/favourites">
                <rdf:li>Banana</rdf:li>
                <rdf:li>Apple</rdf:li>
            </rdf:Bag>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            format!("<http://example.com/favourites> <{}type> <{}Bag> .", RDF, RDF),
            format!("<http://example.com/favourites> <{}_1> \"Banana\" .", RDF),
            format!("<http://example.com/favourites> <{}_2> \"Apple\" .", RDF),
        ],
        triples
    );
}

#[test]
fn membership_numbering_restarts_at_each_node_element() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Seq rdf:about="http://example.com/s1">
                <rdf:li rdf:resource="http://example.com/i1" />
            </rdf:Seq>
            <rdf:Seq rdf:about="http://example.com/s2">
                <rdf:li rdf:resource="http://example.com/i2" />
            </rdf:Seq>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            format!("<http://example.com/s1> <{}type> <{}Seq> .", RDF, RDF),
            format!("<http://example.com/s1> <{}_1> <http://example.com/i1> .", RDF),
            format!("<http://example.com/s2> <{}type> <{}Seq> .", RDF, RDF),
            format!("<http://example.com/s2> <{}_1> <http://example.com/i2> .", RDF),
        ],
        triples
    );
}

#[test]
fn nested_node_element_is_the_property_object() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/a">
                <ex:knows>
                    <ex:Person rdf:about="http://example.com/b" />
                </ex:knows>
            </rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            format!("<http://example.com/b> <{}type> <http://example.org/Person> .", RDF),
            "<http://example.com/a> <http://example.org/knows> <http://example.com/b> .".to_owned(),
        ],
        triples
    );
}

#[test]
fn parse_type_resource_describes_a_fresh_blank_node() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/a">
                <ex:prop rdf:parseType="Resource">
                    <ex:name>n</ex:name>
                </ex:prop>
            </rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://example.com/a> <http://example.org/prop> _:lode00000001 .",
            "_:lode00000001 <http://example.org/name> \"n\" .",
        ],
        triples
    );
}

#[test]
fn parse_type_collection_builds_a_list() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/a">
                <ex:prop rdf:parseType="Collection">
                    <rdf:Description rdf:about="http://example.com/x" />
                    <rdf:Description rdf:about="http://example.com/y" />
                </ex:prop>
            </rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            format!("_:lode00000001 <{}first> <http://example.com/y> .", RDF),
            format!("_:lode00000001 <{}rest> <{}nil> .", RDF, RDF),
            format!("_:lode00000002 <{}first> <http://example.com/x> .", RDF),
            format!("_:lode00000002 <{}rest> _:lode00000001 .", RDF),
            "<http://example.com/a> <http://example.org/prop> _:lode00000002 .".to_owned(),
        ],
        triples
    );
}

#[test]
fn parse_type_literal_keeps_the_markup() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/a"><ex:prop rdf:parseType="Literal"><b>bold</b>text</ex:prop></rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![format!(
            "<http://example.com/a> <http://example.org/prop> \"<b>bold</b>text\"^^<{}XMLLiteral> .",
            RDF
        )],
        triples
    );
}

#[test]
fn unknown_parse_type_is_handled_as_literal() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/a"><ex:prop rdf:parseType="Whatever">x</ex:prop></rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![format!(
            "<http://example.com/a> <http://example.org/prop> \"x\"^^<{}XMLLiteral> .",
            RDF
        )],
        triples
    );
}

#[test]
fn id_on_a_property_element_reifies_the_statement() {
    let document = format!(
        r#"<rdf:RDF xmlns:rdf="{}" xmlns:ex="http://example.org/" xml:base="http://example.com/triples/">
            <rdf:Description rdf:ID="item">
                <ex:prop rdf:ID="triple1">object</ex:prop>
            </rdf:Description>
        </rdf:RDF>"#,
        RDF
    );
    let triples = parse(&document, "").unwrap();
    assert_eq!(
        vec![
            "<http://example.com/triples/#item> <http://example.org/prop> \"object\" .".to_owned(),
            format!(
                "<http://example.com/triples/#triple1> <{}type> <{}Statement> .",
                RDF, RDF
            ),
            format!(
                "<http://example.com/triples/#triple1> <{}subject> <http://example.com/triples/#item> .",
                RDF
            ),
            format!(
                "<http://example.com/triples/#triple1> <{}predicate> <http://example.org/prop> .",
                RDF
            ),
            format!(
                "<http://example.com/triples/#triple1> <{}object> \"object\" .",
                RDF
            ),
        ],
        triples
    );
}

#[test]
fn obsolete_attributes_are_fatal_even_in_lenient_mode() {
    for (attribute, name) in [
        ("rdf:aboutEach=\"http://example.com/x\"", "rdf:aboutEach"),
        (
            "rdf:aboutEachPrefix=\"http://example.com/\"",
            "rdf:aboutEachPrefix",
        ),
        ("rdf:bagID=\"bag\"", "rdf:bagID"),
    ] {
        let document = rdf_document(&format!("<rdf:Description {} />", attribute));
        for result in [parse(&document, ""), parse_lenient(&document, "")] {
            match result.unwrap_err().kind() {
                RdfXmlErrorKind::ObsoleteConstruct(found) => assert_eq!(name, *found),
                kind => panic!("unexpected error for {}: {:?}", attribute, kind),
            }
        }
    }
}

#[test]
fn obsolete_attributes_on_the_rdf_root_are_fatal_even_in_lenient_mode() {
    let document = format!(
        r##"<rdf:RDF xmlns:rdf="{}" rdf:aboutEach="#x"><rdf:Description rdf:about="http://example.com/x" /></rdf:RDF>"##,
        RDF
    );
    for result in [parse(&document, ""), parse_lenient(&document, "")] {
        assert!(matches!(
            result.unwrap_err().kind(),
            RdfXmlErrorKind::ObsoleteConstruct("rdf:aboutEach")
        ));
    }
}

#[test]
fn id_values_must_be_nc_names() {
    let document = rdf_document(r#"<rdf:Description rdf:ID="333-555-666" />"#);
    assert!(matches!(
        parse(&document, "http://example.com/").unwrap_err().kind(),
        RdfXmlErrorKind::InvalidIdentifier {
            attribute: "ID",
            ..
        }
    ));
    assert!(matches!(
        parse_lenient(&document, "http://example.com/")
            .unwrap_err()
            .kind(),
        RdfXmlErrorKind::InvalidIdentifier { .. }
    ));
}

#[test]
fn node_id_values_must_be_nc_names() {
    for value in ["q:name", "a/b"] {
        let document = rdf_document(&format!("<rdf:Description rdf:nodeID=\"{}\" />", value));
        assert!(matches!(
            parse(&document, "").unwrap_err().kind(),
            RdfXmlErrorKind::InvalidIdentifier {
                attribute: "nodeID",
                ..
            }
        ));
    }
}

#[test]
fn node_id_designates_the_same_blank_node_across_the_document() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:nodeID="a"><ex:p rdf:nodeID="a" /></rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec!["_:lode00000001 <http://example.org/p> _:lode00000001 ."],
        triples
    );
}

#[test]
fn base_overrides_are_scoped_to_the_element() {
    let document = format!(
        r#"<rdf:RDF xmlns:rdf="{}" xmlns:ex="http://example.org/" xml:base="http://one.example/">
            <ex:Thing rdf:about="a" xml:base="http://two.example/" />
            <ex:Thing rdf:about="b" />
        </rdf:RDF>"#,
        RDF
    );
    let triples = parse(&document, "").unwrap();
    assert_eq!(
        vec![
            format!("<http://two.example/a> <{}type> <http://example.org/Thing> .", RDF),
            format!("<http://one.example/b> <{}type> <http://example.org/Thing> .", RDF),
        ],
        triples
    );
}

#[test]
fn language_is_inherited_and_reset_by_an_empty_value() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/x" xml:lang="en">
                <ex:title>Title</ex:title>
                <ex:title xml:lang="">Plain</ex:title>
                <ex:title xml:lang="FR">Titre</ex:title>
            </rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://example.com/x> <http://example.org/title> \"Title\"@en .",
            "<http://example.com/x> <http://example.org/title> \"Plain\" .",
            "<http://example.com/x> <http://example.org/title> \"Titre\"@fr .",
        ],
        triples
    );
}

#[test]
fn parser_language_applies_when_the_document_sets_none() {
    let document = rdf_document(
        r#"<rdf:Description rdf:about="http://example.com/x"><ex:title>Title</ex:title></rdf:Description>"#,
    );
    let parser = RdfXmlParser::new(document.as_bytes(), "")
        .unwrap()
        .with_language("EN")
        .unwrap();
    assert_eq!(
        vec!["<http://example.com/x> <http://example.org/title> \"Title\"@en ."],
        collect(parser).unwrap()
    );
}

#[test]
fn datatype_attribute_types_the_literal() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/x"><ex:n rdf:datatype="http://www.w3.org/2001/XMLSchema#int">1</ex:n></rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://example.com/x> <http://example.org/n> \"1\"^^<http://www.w3.org/2001/XMLSchema#int> ."
        ],
        triples
    );
}

#[test]
fn empty_property_element_is_an_empty_literal() {
    let triples = parse(
        &rdf_document(r#"<rdf:Description rdf:about="http://example.com/x"><ex:p /></rdf:Description>"#),
        "",
    )
    .unwrap();
    assert_eq!(
        vec!["<http://example.com/x> <http://example.org/p> \"\" ."],
        triples
    );
}

#[test]
fn predefined_entities_are_expanded_in_attributes_and_text() {
    let triples = parse(
        &rdf_document(
            r#"<rdf:Description rdf:about="http://example.com/x" ex:title="A &amp; B">
                <ex:note>1 &lt; 2 &amp; 3 &gt; 2</ex:note>
            </rdf:Description>"#,
        ),
        "",
    )
    .unwrap();
    assert_eq!(
        vec![
            "<http://example.com/x> <http://example.org/title> \"A & B\" .",
            "<http://example.com/x> <http://example.org/note> \"1 < 2 & 3 > 2\" .",
        ],
        triples
    );
}

#[test]
fn relative_reference_without_a_base_is_an_error() {
    let document = rdf_document(r#"<rdf:Description rdf:about="relative"><ex:p>v</ex:p></rdf:Description>"#);
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::UnresolvedReference(_)
    ));
    assert_eq!(
        vec!["<http://example.com/relative> <http://example.org/p> \"v\" ."],
        parse(&document, "http://example.com/").unwrap()
    );
}

#[test]
fn resource_attribute_with_element_content_is_rejected() {
    let document = rdf_document(
        r#"<rdf:Description rdf:about="http://example.com/x"><ex:p rdf:resource="http://example.com/o">text</ex:p></rdf:Description>"#,
    );
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
}

#[test]
fn duplicate_id_values_are_rejected_in_strict_mode() {
    let document = rdf_document(
        r#"<rdf:Description rdf:ID="frag"><ex:p>a</ex:p></rdf:Description>
           <rdf:Description rdf:ID="frag"><ex:p>b</ex:p></rdf:Description>"#,
    );
    assert!(matches!(
        parse(&document, "http://example.com/doc").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
    assert_eq!(
        2,
        parse_lenient(&document, "http://example.com/doc")
            .unwrap()
            .len()
    );
}

#[test]
fn unknown_rdf_attributes_are_rejected_in_strict_mode_only() {
    let document =
        rdf_document(r#"<rdf:Description rdf:about="http://example.com/x" rdf:foo="bar" />"#);
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
    assert_eq!(
        vec![format!("<http://example.com/x> <{}foo> \"bar\" .", RDF)],
        parse_lenient(&document, "").unwrap()
    );
}

#[test]
fn reserved_names_may_not_be_node_elements() {
    let document = rdf_document(r#"<rdf:li rdf:about="http://example.com/x" />"#);
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
}

#[test]
fn stray_attributes_on_the_rdf_root_are_rejected_in_strict_mode_only() {
    let document = format!(
        r#"<rdf:RDF xmlns:rdf="{}" version="1.0"><rdf:Description rdf:about="http://example.com/x" /></rdf:RDF>"#,
        RDF
    );
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
    assert!(parse_lenient(&document, "").unwrap().is_empty());
}

#[test]
fn rdf_roots_embedded_in_unrelated_markup_are_all_parsed() {
    let document = format!(
        r#"<notes>
            <note>
                <rdf:RDF xmlns:rdf="{rdf}" xmlns:ex="http://example.org/">
                    <rdf:Description rdf:about="http://example.com/one" ex:title="One" />
                </rdf:RDF>
            </note>
            <rdf:RDF xmlns:rdf="{rdf}" xmlns:ex="http://example.org/">
                <rdf:Description rdf:about="http://example.com/two" ex:title="Two" />
            </rdf:RDF>
        </notes>"#,
        rdf = RDF
    );
    let triples = parse(&document, "").unwrap();
    assert_eq!(
        vec![
            "<http://example.com/one> <http://example.org/title> \"One\" .",
            "<http://example.com/two> <http://example.org/title> \"Two\" .",
        ],
        triples
    );
}

#[test]
fn non_rdf_document_gets_a_single_implicit_type_triple() {
    let triples = parse(
        r#"<doc xmlns="http://example.org/vocab#"><child /></doc>"#,
        "",
    )
    .unwrap();
    assert_eq!(
        vec![format!(
            "_:lode00000001 <{}type> <http://example.org/vocab#doc> .",
            RDF
        )],
        triples
    );
}

#[test]
fn non_namespaced_root_type_resolves_against_the_base() {
    let document = r#"<doc><child /></doc>"#;
    assert_eq!(
        vec![format!(
            "_:lode00000001 <{}type> <http://example.com/doc> .",
            RDF
        )],
        parse(document, "http://example.com/").unwrap()
    );
    assert!(matches!(
        parse(document, "").unwrap_err().kind(),
        RdfXmlErrorKind::UnresolvedReference(_)
    ));
}

#[test]
fn rdf_node_element_as_document_root_is_translated() {
    let document = format!(
        r#"<rdf:Description xmlns:rdf="{}" xmlns:ex="http://example.org/" rdf:about="http://example.com/x"><ex:p>v</ex:p></rdf:Description>"#,
        RDF
    );
    assert_eq!(
        vec!["<http://example.com/x> <http://example.org/p> \"v\" ."],
        parse(&document, "").unwrap()
    );
}

#[test]
fn property_attributes_next_to_parse_type_are_rejected_in_strict_mode() {
    let document = rdf_document(
        r#"<rdf:Description rdf:about="http://example.com/a"><ex:prop rdf:parseType="Resource" ex:x="1" /></rdf:Description>"#,
    );
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
    assert_eq!(
        vec!["<http://example.com/a> <http://example.org/prop> _:lode00000001 ."],
        parse_lenient(&document, "").unwrap()
    );
}

#[test]
fn misplaced_object_attributes_on_a_node_element_are_rejected_in_strict_mode() {
    let document =
        rdf_document(r#"<rdf:Description rdf:about="http://example.com/x" rdf:parseType="Resource" />"#);
    assert!(matches!(
        parse(&document, "").unwrap_err().kind(),
        RdfXmlErrorKind::StructuralViolation(_)
    ));
    assert!(parse_lenient(&document, "").unwrap().is_empty());
}
