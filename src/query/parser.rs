//! Parser for the path, query and pattern string grammar.

use super::ast::{Query, QueryElement};
use super::encoding::decode_key;
use super::error::Result;
use super::path::{Path, PATH_SEPARATOR};
use super::pattern::{
    Descriptor, KeyValuePattern, Marker, Symbol, KEY_VALUE_SEPARATOR, OPTION_SEPARATOR,
    PRIMITIVE_SYMBOL, SKIP_SYMBOL, WILDCARD_SYMBOL,
};
use crate::document::node::Node;

/// Characters that turn a segment into a pattern.
const PATTERN_CHARACTERS: [char; 7] = [
    OPTION_SEPARATOR,
    KEY_VALUE_SEPARATOR,
    WILDCARD_SYMBOL,
    PRIMITIVE_SYMBOL,
    SKIP_SYMBOL,
    '[',
    '{',
];

/// Result of [`parse_path_or_query`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathOrQuery {
    Path(Path),
    Query(Query),
}

/// Tells whether a string has to be parsed as a query rather than a plain
/// path, i.e. whether any of `< ^ | " \ [ {` occurs in it.
pub fn is_query_expression(input: &str) -> bool {
    input.contains(PATTERN_CHARACTERS)
}

/// Parses `input` as a query if it contains pattern characters, as a path
/// otherwise.
pub fn parse_path_or_query(input: &str) -> Result<PathOrQuery> {
    if is_query_expression(input) {
        Parser::parse(input).map(PathOrQuery::Query)
    } else {
        Parser::parse_path(input).map(PathOrQuery::Path)
    }
}

/// Parser for `>`-separated path and query strings.
pub struct Parser {
    input: String,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            position: 0,
        }
    }

    /// Parses a query string.
    pub fn parse(query: &str) -> Result<Query> {
        let mut parser = Parser::new(query);
        parser.parse_query()
    }

    /// Parses a path string. Every segment is a decoded literal key.
    pub fn parse_path(path: &str) -> Result<Path> {
        let mut parser = Parser::new(path);
        let mut keys = Vec::new();
        while let Some(segment) = parser.next_segment() {
            keys.push(decode_key(&segment)?);
        }
        Ok(Path::from(keys))
    }

    /// Parses a single key-value pattern.
    pub fn parse_pattern(pattern: &str) -> Result<KeyValuePattern> {
        let (marker, content) = extract_marker(pattern);

        let mut parts = content.split(KEY_VALUE_SEPARATOR);
        let key = parts.next().unwrap_or_default();
        let value = parts.next();

        // Skip patterns can't have other attributes
        if key.len() == 1 && key.starts_with(SKIP_SYMBOL) {
            return Ok(KeyValuePattern::skip());
        }

        let value = value.map(decode_key).transpose()?.map(Node::from);

        let descriptor = if key.len() == 1 && key.starts_with(WILDCARD_SYMBOL) {
            Descriptor::Symbol {
                symbol: Symbol::Wildcard,
                value,
                marker,
            }
        } else if key.len() == 1 && key.starts_with(PRIMITIVE_SYMBOL) {
            Descriptor::Symbol {
                symbol: Symbol::Primitive,
                value,
                marker,
            }
        } else if key.contains(OPTION_SEPARATOR) {
            Descriptor::Options {
                options: key
                    .split(OPTION_SEPARATOR)
                    .map(decode_key)
                    .collect::<Result<Vec<_>>>()?,
                value,
                marker,
            }
        } else if value.is_none() && marker.is_none() {
            Descriptor::Literal(decode_key(key)?)
        } else {
            Descriptor::Key {
                key: decode_key(key)?,
                value,
                marker,
            }
        };

        Ok(KeyValuePattern::from_descriptor(descriptor))
    }

    fn parse_query(&mut self) -> Result<Query> {
        let mut elements = Vec::new();
        while let Some(segment) = self.next_segment() {
            let element = if segment.starts_with(SKIP_SYMBOL) {
                QueryElement::Pattern(KeyValuePattern::skip())
            } else if is_query_expression(&segment) {
                QueryElement::Pattern(Self::parse_pattern(&segment)?)
            } else {
                QueryElement::Key(decode_key(&segment)?)
            };
            elements.push(element);
        }
        Ok(Query::from_elements(elements))
    }

    /// Checks if every segment has been consumed.
    fn is_eof(&self) -> bool {
        self.position > self.input.len()
    }

    /// Returns the text up to the next separator and advances past it.
    ///
    /// Separators delimit segments, so `n` separators always yield `n + 1`
    /// segments, empty ones included.
    fn next_segment(&mut self) -> Option<String> {
        if self.is_eof() {
            return None;
        }
        let rest = &self.input[self.position..];
        let end = rest.find(PATH_SEPARATOR).unwrap_or(rest.len());
        let segment = rest[..end].to_string();
        self.position += end + PATH_SEPARATOR.len_utf8();
        Some(segment)
    }
}

/// Splits a `[...]` or `{...}` wrapper off a pattern.
///
/// The wrapper must span the whole pattern and its content must not contain
/// another bracket of the same kind.
fn extract_marker(pattern: &str) -> (Option<Marker>, &str) {
    for marker in [Marker::Bracket, Marker::Curly] {
        let inner = pattern
            .strip_prefix(marker.opening())
            .and_then(|rest| rest.strip_suffix(marker.closing()));
        if let Some(inner) = inner {
            if !inner.contains([marker.opening(), marker.closing()]) {
                return (Some(marker), inner);
            }
        }
    }
    (None, pattern)
}
