//! Integration tests for query parsing and matching.

use serde_json::json;
use treequery::document::node::Node;
use treequery::query::{
    is_query_expression, parse_path_or_query, select, Descriptor, KeyValuePattern, Marker, Path,
    PathLike, PathOrQuery, Query, QueryElement, TreeError,
};

fn path(text: &str) -> Path {
    text.parse().unwrap()
}

fn query(text: &str) -> Query {
    text.parse().unwrap()
}

#[test]
fn test_wildcard_query() {
    let q = query("hello>|>world");
    assert!(q.matches_path(&path("hello>dear>world")));
    assert!(q.matches_path(&path("hello>>world")));
    assert!(!q.matches_path(&path("hello>world")));
}

#[test]
fn test_skip_query() {
    let q = query("hello>\\>world");
    assert!(q.matches_path(&path("hello>world")));
    assert!(q.matches_path(&path("hello>people>of>the>world")));
    assert!(!q.matches_path(&path("hello>all")));
}

#[test]
fn test_options_query() {
    let q = query("hello>world<all");
    assert!(q.matches_path(&path("hello>world")));
    assert!(q.matches_path(&path("hello>all")));
    assert!(!q.matches_path(&path("hello>people")));
}

#[test]
fn test_query_built_from_patterns() {
    let mut world = KeyValuePattern::literal("world");
    world.set_marker(Marker::Curly);

    let q = Query::from_elements([
        QueryElement::from(KeyValuePattern::skip()),
        QueryElement::from(world),
        QueryElement::from(KeyValuePattern::skip()),
    ]);
    assert!(q.elements()[1].is_return_marked());
    assert_eq!(q.to_string(), "\\>world>\\");
    assert!(q.matches_path(&path("a>b>world>c")));
}

#[test]
fn test_stem_path() {
    assert_eq!(query("foo>bar>|>baz").stem_path(), path("foo>bar"));
    assert!(query("\\>foo").stem_path().is_empty());
}

#[test]
fn test_query_clone_keeps_type() {
    let q = query("a>|");
    let mut copy = q.clone();
    copy.append_key("b");
    assert_eq!(q.len(), 2);
    assert_eq!(copy.len(), 3);
    assert!(copy.matches_path(&path("a>x>b")));
}

#[test]
fn test_pattern_string_forms() {
    let pattern = KeyValuePattern::parse("[foo%5E<bar%5E^baz]").unwrap();
    assert_eq!(
        pattern.descriptor(),
        &Descriptor::Options {
            options: vec!["foo^".to_string(), "bar^".to_string()],
            value: Some(Node::from("baz")),
            marker: Some(Marker::Bracket),
        }
    );
    assert_eq!(pattern.to_string(), "foo%5E<bar%5E^baz");
}

#[test]
fn test_query_display_round_trip() {
    let text = "hello>|^foo>\\>a%20b<c>\"";
    assert_eq!(query(text).to_string(), text);
}

#[test]
fn test_path_or_query() {
    assert!(is_query_expression("a>{b}"));
    assert!(!is_query_expression("a>b"));

    match parse_path_or_query("a>b").unwrap() {
        PathOrQuery::Path(p) => assert_eq!(p, path("a>b")),
        PathOrQuery::Query(_) => panic!("expected a path"),
    }
    match parse_path_or_query("a>\\").unwrap() {
        PathOrQuery::Query(q) => assert!(q.elements()[1].is_skipper()),
        PathOrQuery::Path(_) => panic!("expected a query"),
    }
}

#[test]
fn test_bad_encoding_is_an_error() {
    let err = "a>%FF".parse::<Query>().unwrap_err();
    assert!(matches!(err, TreeError::InvalidEncoding { .. }));
}

#[test]
fn test_select_matches_agree_with_matches_path() {
    let tree = Node::from(json!({
        "hello": {
            "world": 1,
            "people": {"of": {"the": {"world": 2}}},
            "all": {"world": 3}
        }
    }));
    let q = query("hello>\\>world");
    let matches = select(&tree, &q);
    assert_eq!(matches.len(), 3);
    for found in &matches {
        assert!(q.matches_path(&found.path));
        assert_eq!(found.path.resolve(&tree), Some(found.node));
    }
}

#[test]
fn test_uri_keys_match_unescaped() {
    let tree = Node::from(json!({"http://x.org/a": {"k=v": 1}, "other": {"k=v": 2}}));
    let q = query("http://x.org/a>|");
    assert_eq!(q.to_string(), "http://x.org/a>|");
    let paths: Vec<String> = select(&tree, &q)
        .iter()
        .map(|found| found.path.to_string())
        .collect();
    assert_eq!(paths, vec!["http://x.org/a>k=v"]);
}

#[test]
fn test_malformed_escape_is_an_error() {
    let err = "a>%zz".parse::<Query>().unwrap_err();
    assert!(matches!(err, TreeError::InvalidEncoding { .. }));
}
