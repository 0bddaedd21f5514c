//! Turtle codec and dataset tests

use super::turtle::{parse_turtle, to_turtle};
use super::vocab::{predicates, rdf, xsd};
use super::*;
use chrono::{NaiveDate, TimeZone, Utc};

const DOC: &str = "https://pod.example/PASS/Users/userlist.ttl";

fn alice() -> Thing {
    ThingBuilder::local("alice")
        .add_string_no_locale(predicates::PERSON, "Alice A")
        .add_string_no_locale(predicates::GIVEN_NAME, "Alice")
        .add_url(predicates::IDENTIFIER, "https://a.example/profile/card#me")
        .build()
}

#[test]
fn local_thing_resolves_against_document() {
    let mut dataset = Dataset::new(DOC);
    dataset.set_thing(alice());

    let url = format!("{}#alice", DOC);
    assert!(dataset.contains(&url));
    assert_eq!(dataset.thing_url("alice"), url);
    assert_eq!(dataset.get_thing(&url).unwrap().fragment(), Some("alice"));
}

#[test]
fn set_thing_replaces_same_subject() {
    let mut dataset = Dataset::new(DOC);
    dataset.set_thing(alice());
    dataset.set_thing(
        ThingBuilder::local("alice")
            .add_string_no_locale(predicates::GIVEN_NAME, "Alicia")
            .build(),
    );

    assert_eq!(dataset.len(), 1);
    let thing = dataset.get_thing(&dataset.thing_url("alice")).unwrap();
    assert_eq!(thing.get_string_no_locale(predicates::GIVEN_NAME), Some("Alicia"));
    assert_eq!(thing.get_string_no_locale(predicates::PERSON), None);
}

#[test]
fn local_names_are_percent_encoded() {
    assert_eq!(encode_component("RE:test inbox"), "RE%3Atest%20inbox");
    assert_eq!(encode_component("a-b_c.d!~*'()"), "a-b_c.d!~*'()");
    assert_eq!(decode_component("RE%3Atest%20inbox"), "RE:test inbox");
    let thing = Thing::local("o'neil/2");
    assert_eq!(thing.url(), "#o'neil%2F2");
}

#[test]
fn set_datetime_replaces_previous_value() {
    let first = Utc.with_ymd_and_hms(2023, 10, 23, 19, 59, 31).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let thing = ThingBuilder::local("active")
        .add_datetime(predicates::DATE_MODIFIED, first)
        .build();
    let thing = ThingBuilder::new(thing)
        .set_datetime(predicates::DATE_MODIFIED, second)
        .build();

    assert_eq!(thing.terms(predicates::DATE_MODIFIED).len(), 1);
    assert_eq!(thing.get_datetime(predicates::DATE_MODIFIED), Some(second));
}

#[test]
fn parse_prefixed_document() {
    let input = r#"
@prefix schema: <http://schema.org/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

# the users list header
<#userlist> schema:name "Users List" ;
    schema:description 'A list of users' .

<#alice>
    a schema:Thing ;
    schema:givenName "Alice", "Ally"@en ;
    schema:identifier <https://a.example/profile/card#me> ;
    schema:birthDate "1990-05-17"^^xsd:date ;
    schema:dateModified "2023-10-23T19:59:31.424Z"^^xsd:dateTime ;
    schema:readStatus true ;
    schema:position 3 .
"#;
    let dataset = parse_turtle(input, DOC).unwrap();
    assert_eq!(dataset.len(), 2);

    let alice = dataset.get_thing(&format!("{}#alice", DOC)).unwrap();
    assert_eq!(alice.get_string_no_locale(predicates::GIVEN_NAME), Some("Alice"));
    assert_eq!(alice.get_string_with_locale(predicates::GIVEN_NAME, "EN"), Some("Ally"));
    assert_eq!(alice.get_url(rdf::TYPE), Some("http://schema.org/Thing"));
    assert_eq!(
        alice.get_url(predicates::IDENTIFIER),
        Some("https://a.example/profile/card#me")
    );
    assert_eq!(
        alice.get_date(predicates::DATE_OF_BIRTH),
        NaiveDate::from_ymd_opt(1990, 5, 17)
    );
    assert_eq!(
        alice.get_datetime(predicates::DATE_MODIFIED).map(|d| d.timestamp_millis()),
        Some(1698091171424)
    );
    assert_eq!(alice.get_boolean(predicates::READ_STATUS), Some(true));
    let position = alice.terms("http://schema.org/position")[0].as_literal().unwrap();
    assert_eq!(position.datatype, xsd::INTEGER);

    let header = dataset.get_thing(&format!("{}#userlist", DOC)).unwrap();
    assert_eq!(header.get_string_no_locale(predicates::DESCRIPTION), Some("A list of users"));
}

#[test]
fn parse_sparql_style_prefix_and_long_strings() {
    let input = "PREFIX schema: <http://schema.org/>\n\
                 <#m1> schema:text \"\"\"line one\nline \"two\" end\"\"\" ; .\n";
    let dataset = parse_turtle(input, DOC).unwrap();
    let thing = dataset.get_thing(&format!("{}#m1", DOC)).unwrap();
    assert_eq!(
        thing.get_string_no_locale(predicates::TEXT),
        Some("line one\nline \"two\" end")
    );
}

#[test]
fn parse_resolves_relative_iris() {
    let input = "<#a> <http://schema.org/URL> <../> .\n<> <http://schema.org/name> \"doc\" .";
    let dataset = parse_turtle(input, DOC).unwrap();
    let a = dataset.get_thing(&format!("{}#a", DOC)).unwrap();
    assert_eq!(a.get_url(predicates::URL), Some("https://pod.example/PASS/"));
    assert!(dataset.get_thing(DOC).is_some());
}

#[test]
fn parse_keeps_blank_node_descriptions() {
    let input = "@prefix schema: <http://schema.org/> .\n\
                 <#x> schema:name \"n\" ; schema:author [ schema:name \"a\" ] .";
    let dataset = parse_turtle(input, DOC).unwrap();

    assert_eq!(dataset.len(), 1);
    let x = dataset.get_thing(&format!("{}#x", DOC)).unwrap();
    assert_eq!(x.get_string_no_locale(predicates::NAME), Some("n"));
    assert_eq!(x.get_url("http://schema.org/author"), None);
    let author: Vec<_> = dataset.anonymous_things().collect();
    assert_eq!(author.len(), 1);
    assert_eq!(author[0].get_string_no_locale(predicates::NAME), Some("a"));

    // the nested description is written back and dropped with its owner
    let reread = parse_turtle(&to_turtle(&dataset).unwrap(), DOC).unwrap();
    assert_eq!(reread.anonymous_things().count(), 1);
    let mut dataset = reread;
    dataset.remove_thing(&format!("{}#x", DOC));
    assert_eq!(dataset.anonymous_things().count(), 0);
}

#[test]
fn parse_reports_syntax_errors() {
    let err = parse_turtle("\n\n<#a> foo:bar \"x\" .", DOC).unwrap_err();
    assert!(matches!(err, RdfError::Syntax(_)));

    let err = parse_turtle("<#a> <http://schema.org/name> \"x\"", DOC).unwrap_err();
    assert!(matches!(err, RdfError::Syntax(_)));
}

#[test]
fn writer_rejects_malformed_iris() {
    let mut dataset = Dataset::new(DOC);
    dataset.set_thing(
        ThingBuilder::local("bad")
            .add_url(predicates::IDENTIFIER, "https://b.example/my profile>#me")
            .build(),
    );
    let err = to_turtle(&dataset).unwrap_err();
    assert!(matches!(err, RdfError::InvalidIri { .. }));
}

#[test]
fn datetime_without_timezone_reads_as_utc() {
    let lit = Literal::typed("2023-10-23T19:59:31", xsd::DATE_TIME);
    assert_eq!(
        lit.as_datetime(),
        Some(Utc.with_ymd_and_hms(2023, 10, 23, 19, 59, 31).unwrap())
    );
    let lit = Literal::typed("2023-10-23T19:59:31.424", xsd::DATE_TIME);
    assert_eq!(lit.as_datetime().map(|d| d.timestamp_millis()), Some(1698091171424));
}

#[test]
fn stamped_time_survives_literal() {
    let now = timestamp_now();
    assert_eq!(Literal::datetime(now).as_datetime(), Some(now));
}

#[test]
fn writer_output_reads_back() {
    let mut dataset = Dataset::new(DOC);
    dataset.set_thing(alice());
    dataset.set_thing(
        ThingBuilder::local("m \"1\"")
            .add_string_no_locale(predicates::TEXT, "hello\n\"world\"\\")
            .add_boolean(predicates::READ_STATUS, false)
            .add_date(predicates::DATE_OF_BIRTH, NaiveDate::from_ymd_opt(2000, 2, 29).unwrap())
            .add_term(predicates::NAME, Literal::lang("Nachricht", "de").into())
            .add_url(rdf::TYPE, "https://example.org/vocab#Message")
            .build(),
    );

    let text = to_turtle(&dataset).unwrap();
    assert!(text.contains("@prefix schema: <http://schema.org/>"));
    assert!(text.contains(&format!("<{}#alice>", DOC)));

    let read = parse_turtle(&text, DOC).unwrap();
    assert_eq!(read, dataset);
}

#[test]
fn empty_dataset_writes_empty_document() {
    let dataset = Dataset::new(DOC);
    assert_eq!(to_turtle(&dataset).unwrap(), "");
    assert!(parse_turtle("", DOC).unwrap().is_empty());
}
