//! Query types: paths generalized with patterns.

use std::fmt;
use std::str::FromStr;

use super::encoding::encode_key;
use super::error::{Result, TreeError};
use super::parser::Parser;
use super::path::{Path, PathLike, PATH_SEPARATOR};
use super::pattern::KeyValuePattern;

/// An element of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryElement {
    /// Literal key, matched by string equality.
    Key(String),
    /// Key-value pattern.
    Pattern(KeyValuePattern),
}

impl QueryElement {
    pub fn is_skipper(&self) -> bool {
        matches!(self, QueryElement::Pattern(pattern) if pattern.is_skipper())
    }

    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            QueryElement::Key(literal) => literal == key,
            QueryElement::Pattern(pattern) => pattern.matches_key(key),
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            QueryElement::Key(key) => Some(key),
            QueryElement::Pattern(_) => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&KeyValuePattern> {
        match self {
            QueryElement::Pattern(pattern) => Some(pattern),
            QueryElement::Key(_) => None,
        }
    }

    pub fn is_return_marked(&self) -> bool {
        self.as_pattern()
            .is_some_and(KeyValuePattern::is_return_marked)
    }
}

impl From<String> for QueryElement {
    fn from(key: String) -> Self {
        QueryElement::Key(key)
    }
}

impl From<&str> for QueryElement {
    fn from(key: &str) -> Self {
        QueryElement::Key(key.to_string())
    }
}

impl From<KeyValuePattern> for QueryElement {
    /// Skip patterns all collapse to the canonical skip.
    fn from(pattern: KeyValuePattern) -> Self {
        if pattern.is_skipper() {
            QueryElement::Pattern(KeyValuePattern::skip())
        } else {
            QueryElement::Pattern(pattern)
        }
    }
}

impl fmt::Display for QueryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryElement::Key(key) => write!(f, "{}", encode_key(key)),
            QueryElement::Pattern(pattern) => write!(f, "{}", pattern),
        }
    }
}

/// A path whose elements may be literal keys or key-value patterns, matching
/// any number of locations in a tree.
///
/// # Example
///
/// ```
/// use treequery::query::{Path, Query};
///
/// let query: Query = "hello>\\>world".parse().unwrap();
/// assert!(query.matches_path(&"hello>people>of>the>world".parse::<Path>().unwrap()));
/// assert!(!query.matches_path(&"hello>all".parse::<Path>().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    elements: Vec<QueryElement>,
}

impl Query {
    /// Parses the string form of a query.
    pub fn parse(input: &str) -> Result<Self> {
        Parser::parse(input)
    }

    pub fn from_elements<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<QueryElement>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// The longest prefix made only of literal keys.
    pub fn stem_path(&self) -> Path {
        self.elements
            .iter()
            .map_while(QueryElement::as_key)
            .collect()
    }

    /// Matches a literal path against the query.
    ///
    /// The scan runs one cursor over the path and one over the query. A skip
    /// element switches skip mode on without consuming a key; while in skip
    /// mode, keys that don't match the next element are passed over.
    pub fn matches_path(&self, path: &Path) -> bool {
        let keys = path.keys();
        let elements = &self.elements;
        let mut i = 0;
        let mut j = 0;
        let mut in_skip_mode = false;
        let mut last_was_skip = false;

        while i < keys.len() {
            let element = elements.get(j);
            if element.is_some_and(QueryElement::is_skipper) {
                in_skip_mode = true;
                last_was_skip = true;
                j += 1;
                continue;
            }

            last_was_skip = false;
            if element.is_some_and(|element| element.matches_key(&keys[i])) {
                in_skip_mode = false;
                j += 1;
            } else if !in_skip_mode {
                return false;
            }
            i += 1;
        }

        // Trailing skips match the empty remainder
        while elements.get(j).is_some_and(QueryElement::is_skipper) {
            j += 1;
        }

        j == elements.len() && (i == keys.len() || last_was_skip)
    }

    /// True if every path below a location matched by this query is matched
    /// by the query extended with a trailing skip.
    pub fn is_root_of(&self, path: &Path) -> bool {
        let mut extended = self.clone();
        extended.append_key(KeyValuePattern::skip());
        extended.matches_path(path)
    }
}

impl PathLike for Query {
    type Element = QueryElement;

    fn elements(&self) -> &[QueryElement] {
        &self.elements
    }

    fn elements_mut(&mut self) -> &mut Vec<QueryElement> {
        &mut self.elements
    }
}

impl From<Path> for Query {
    fn from(path: Path) -> Self {
        Query::from_elements(path.into_keys())
    }
}

impl FromStr for Query {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, element) in self.elements.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(keys: &[&str]) -> Path {
        Path::from_keys(keys.iter().copied())
    }

    #[test]
    fn test_from_elements_normalizes_skip() {
        let mut skip = KeyValuePattern::skip();
        skip.set_value("ignored");
        let query = Query::from_elements([QueryElement::from("a"), QueryElement::from(skip)]);
        assert_eq!(
            query.elements()[1],
            QueryElement::Pattern(KeyValuePattern::skip())
        );
    }

    #[test]
    fn test_stem_path() {
        let query = Query::from_elements([
            QueryElement::from("foo"),
            QueryElement::from("bar"),
            QueryElement::from(KeyValuePattern::wildcard()),
            QueryElement::from("baz"),
        ]);
        assert_eq!(query.stem_path(), path(&["foo", "bar"]));

        let no_stem = Query::from_elements([KeyValuePattern::skip()]);
        assert!(no_stem.stem_path().is_empty());
    }

    #[test]
    fn test_matches_literal_path() {
        let query = Query::from_elements(["a", "b"]);
        assert!(query.matches_path(&path(&["a", "b"])));
        assert!(!query.matches_path(&path(&["a"])));
        assert!(!query.matches_path(&path(&["a", "b", "c"])));
        assert!(!query.matches_path(&path(&["a", "c"])));
    }

    #[test]
    fn test_matches_wildcard() {
        let query = Query::from_elements([
            QueryElement::from("hello"),
            QueryElement::from(KeyValuePattern::wildcard()),
            QueryElement::from("world"),
        ]);
        assert!(query.matches_path(&path(&["hello", "dear", "world"])));
        assert!(query.matches_path(&path(&["hello", "", "world"])));
        assert!(!query.matches_path(&path(&["hello", "world"])));
    }

    #[test]
    fn test_matches_trailing_skip() {
        let query = Query::from_elements([
            QueryElement::from("a"),
            QueryElement::from(KeyValuePattern::skip()),
        ]);
        assert!(query.matches_path(&path(&["a"])));
        assert!(query.matches_path(&path(&["a", "b", "c"])));
        assert!(!query.matches_path(&path(&["b"])));
    }

    #[test]
    fn test_matches_empty() {
        assert!(Query::default().matches_path(&Path::new()));
        assert!(!Query::default().matches_path(&path(&["a"])));
        assert!(!Query::from_elements(["a"]).matches_path(&Path::new()));

        let only_skip = Query::from_elements([KeyValuePattern::skip()]);
        assert!(only_skip.matches_path(&Path::new()));
        assert!(only_skip.matches_path(&path(&["x", "y"])));
    }

    #[test]
    fn test_is_root_of() {
        let query = Query::from_elements([
            QueryElement::from("hello"),
            QueryElement::from(KeyValuePattern::wildcard()),
        ]);
        assert!(query.is_root_of(&path(&["hello", "world"])));
        assert!(query.is_root_of(&path(&["hello", "world", "and", "more"])));
        assert!(!query.is_root_of(&path(&["hello"])));
        assert!(!query.is_root_of(&path(&["bye", "world"])));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let query = Query::from_elements(["a", "b"]);
        let mut copy = query.clone();
        assert_eq!(copy, query);
        copy.append_key("c");
        assert_ne!(copy, query);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_from_path() {
        let query = Query::from(path(&["x", "y"]));
        assert_eq!(query.stem_path(), path(&["x", "y"]));
        assert!(query.matches_path(&path(&["x", "y"])));
    }
}
