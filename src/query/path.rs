//! Literal paths into a tree.

use std::fmt;
use std::str::FromStr;

use super::encoding::encode_key;
use super::error::{Result, TreeError};
use super::parser::Parser;
use crate::document::node::{array_index, Node};

/// Separates keys in the string form of paths and queries.
pub const PATH_SEPARATOR: char = '>';

/// Buffer operations shared by [`Path`] and [`Query`].
///
/// All mutators work in place and return `&mut Self` for chaining; use
/// `clone()` first to keep an unmodified copy.
///
/// [`Query`]: super::ast::Query
pub trait PathLike: Clone {
    type Element: Clone + PartialEq;

    fn elements(&self) -> &[Self::Element];

    fn elements_mut(&mut self) -> &mut Vec<Self::Element>;

    fn len(&self) -> usize {
        self.elements().len()
    }

    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    fn last_key(&self) -> Option<&Self::Element> {
        self.elements().last()
    }

    /// Removes `count` elements from the start. Removing more than the path
    /// holds leaves it empty.
    fn trim_left(&mut self, count: usize) -> &mut Self {
        let count = count.min(self.len());
        self.elements_mut().drain(..count);
        self
    }

    /// Removes `count` elements from the end.
    fn trim_right(&mut self, count: usize) -> &mut Self {
        let keep = self.len().saturating_sub(count);
        self.elements_mut().truncate(keep);
        self
    }

    fn append(&mut self, other: &Self) -> &mut Self {
        let tail = other.elements().to_vec();
        self.elements_mut().extend(tail);
        self
    }

    fn append_key(&mut self, key: impl Into<Self::Element>) -> &mut Self {
        self.elements_mut().push(key.into());
        self
    }

    fn prepend(&mut self, other: &Self) -> &mut Self {
        let head = other.elements().to_vec();
        self.elements_mut().splice(0..0, head);
        self
    }

    fn prepend_key(&mut self, key: impl Into<Self::Element>) -> &mut Self {
        self.elements_mut().insert(0, key.into());
        self
    }

    /// True if `root`'s elements are a prefix of this path's. Every path is
    /// relative to itself and to the empty path.
    fn is_relative_to(&self, root: &Self) -> bool {
        self.elements().starts_with(root.elements())
    }
}

/// An ordered sequence of literal keys identifying one location in a tree.
///
/// # Example
///
/// ```
/// use treequery::query::{Path, PathLike};
///
/// let mut path: Path = "test>path>it>is".parse().unwrap();
/// assert_eq!(path, Path::from_keys(["test", "path", "it", "is"]));
///
/// path.trim_left(1).append_key("here");
/// assert_eq!(path.to_string(), "path>it>is>here");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    keys: Vec<String>,
}

impl Path {
    /// The empty (root) path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `>`-separated, percent-encoded path string.
    ///
    /// An empty string yields a path holding a single empty key, since every
    /// segment between separators is a key.
    pub fn parse(input: &str) -> Result<Self> {
        Parser::parse_path(input)
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<String> {
        self.keys
    }

    /// Inverse of [`PathLike::is_relative_to`].
    pub fn is_root_of(&self, other: &Path) -> bool {
        other.is_relative_to(self)
    }

    /// Follows the path down from `root`.
    ///
    /// Returns `None` as soon as a key is missing or a leaf is in the way.
    pub fn resolve<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        self.keys
            .iter()
            .try_fold(root, |node, key| node.child(key))
    }

    /// Follows the path down from `root`, creating missing object entries as
    /// empty objects along the way.
    ///
    /// Fails if a leaf blocks the path, or if an array is reached with a key
    /// that is not one of its indices.
    pub fn resolve_or_build<'a>(&self, root: &'a mut Node) -> Result<&'a mut Node> {
        let mut current = root;
        for key in &self.keys {
            current = match current {
                Node::Object(entries) => entries.entry(key.clone()).or_default(),
                Node::Array(items) => array_index(key)
                    .and_then(|idx| items.get_mut(idx))
                    .ok_or_else(|| {
                        TreeError::invalid_argument(format!(
                            "Key '{}' is not an index of the array on path '{}'",
                            key, self
                        ))
                    })?,
                _ => {
                    return Err(TreeError::invalid_argument(format!(
                        "Cannot build path '{}' through a leaf at key '{}'",
                        self, key
                    )))
                }
            };
        }
        Ok(current)
    }
}

impl PathLike for Path {
    type Element = String;

    fn elements(&self) -> &[String] {
        &self.keys
    }

    fn elements_mut(&mut self) -> &mut Vec<String> {
        &mut self.keys
    }
}

impl FromStr for Path {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<String>> for Path {
    fn from(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path::from_keys(iter)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, key) in self.keys.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", encode_key(key))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(path: &Path) -> Vec<&str> {
        path.keys().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_last_key() {
        let path = Path::from_keys(["a", "b"]);
        assert_eq!(path.last_key().map(String::as_str), Some("b"));
        assert_eq!(Path::new().last_key(), None);
    }

    #[test]
    fn test_trim() {
        let mut path = Path::from_keys(["a", "b", "c", "d"]);
        path.trim_left(1);
        assert_eq!(keys(&path), vec!["b", "c", "d"]);
        path.trim_right(2);
        assert_eq!(keys(&path), vec!["b"]);
        path.trim_right(5);
        assert!(path.is_empty());
    }

    #[test]
    fn test_trim_zero_is_noop() {
        let mut path = Path::from_keys(["a", "b"]);
        path.trim_left(0).trim_right(0);
        assert_eq!(keys(&path), vec!["a", "b"]);
    }

    #[test]
    fn test_append_and_prepend() {
        let mut path = Path::from_keys(["b"]);
        path.append(&Path::from_keys(["c", "d"]))
            .prepend(&Path::from_keys(["a"]))
            .append_key("e")
            .prepend_key("root");
        assert_eq!(keys(&path), vec!["root", "a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_relative_to() {
        let path = Path::from_keys(["test", "path", "it", "is"]);
        assert!(path.is_relative_to(&Path::from_keys(["test", "path"])));
        assert!(path.is_relative_to(&path.clone()));
        assert!(path.is_relative_to(&Path::new()));
        assert!(!path.is_relative_to(&Path::from_keys(["path"])));
        assert!(!Path::from_keys(["test"]).is_relative_to(&path));

        assert!(Path::from_keys(["test"]).is_root_of(&path));
        assert!(!path.is_root_of(&Path::from_keys(["test"])));
    }

    #[test]
    fn test_display_encodes_keys() {
        let path = Path::from_keys(["a>b", "c d", "e"]);
        assert_eq!(path.to_string(), "a%3Eb>c%20d>e");
    }

    #[test]
    fn test_resolve() {
        let tree = Node::from(json!({"hello": {"world": "!!"}, "list": [1, 2]}));
        assert_eq!(
            Path::from_keys(["hello", "world"]).resolve(&tree),
            Some(&Node::from("!!"))
        );
        assert_eq!(Path::from_keys(["list", "1"]).resolve(&tree), Some(&Node::from(2)));
        assert_eq!(Path::from_keys(["hello", "nope"]).resolve(&tree), None);
        assert_eq!(Path::new().resolve(&tree), Some(&tree));
        assert_eq!(Path::from_keys(["x"]).resolve(&Node::default()), None);
    }

    #[test]
    fn test_resolve_or_build() {
        let mut tree = Node::from(json!({"hello": "world"}));
        let path = Path::from_keys(["foo", "bar"]);

        let built = path.resolve_or_build(&mut tree).unwrap();
        assert_eq!(built, &Node::default());
        assert_eq!(tree, Node::from(json!({"hello": "world", "foo": {"bar": {}}})));
        assert_eq!(keys(&path), vec!["foo", "bar"]);
    }

    #[test]
    fn test_resolve_or_build_fails_through_leaf() {
        let mut tree = Node::from(json!({"hello": "world"}));
        let result = Path::from_keys(["hello", "there"]).resolve_or_build(&mut tree);
        assert!(matches!(result, Err(TreeError::InvalidArgument { .. })));
    }

    #[test]
    fn test_resolve_or_build_existing_array_index() {
        let mut tree = Node::from(json!({"items": [{"a": 1}]}));
        let node = Path::from_keys(["items", "0", "b"])
            .resolve_or_build(&mut tree)
            .unwrap();
        *node = Node::from(2);
        assert_eq!(tree, Node::from(json!({"items": [{"a": 1, "b": 2}]})));

        let result = Path::from_keys(["items", "5"]).resolve_or_build(&mut tree);
        assert!(result.is_err());
    }
}
