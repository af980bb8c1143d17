//! Key-value patterns: the single match units a query is made of.
//!
//! A pattern matches a key, optionally constrained by the value stored under
//! it. The string form is compact:
//!
//! | Form          | Meaning                                          |
//! |---------------|--------------------------------------------------|
//! | `foo`         | key `foo`                                        |
//! | `foo<bar`     | key `foo` or `bar`                               |
//! | `\|`           | any key                                          |
//! | `"`           | any key holding a primitive (non-null leaf)      |
//! | `\`           | skip: zero or more keys (stands alone)           |
//! | `...^value`   | any of the above, value must equal `value`       |
//! | `[...]` `{...}` | marked pattern, `{` marks the match for return |

use std::fmt;
use std::str::FromStr;

use super::encoding::encode_key;
use super::error::{Result, TreeError};
use super::parser::Parser;
use crate::document::node::Node;

/// Separates keys from values in a string pattern.
pub const KEY_VALUE_SEPARATOR: char = '^';
/// Separates options within the key part of a string pattern.
pub const OPTION_SEPARATOR: char = '<';
/// Matches any key.
pub const WILDCARD_SYMBOL: char = '|';
/// Matches any key whose value is a primitive.
pub const PRIMITIVE_SYMBOL: char = '"';
/// Matches zero or more keys.
pub const SKIP_SYMBOL: char = '\\';

/// Annotation wrapping a pattern in `[...]` or `{...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Bracket,
    Curly,
}

impl Marker {
    /// The marker that makes the recursive walker report the matched ancestor
    /// instead of the leaves below it.
    pub const RETURN: Marker = Marker::Curly;

    pub fn opening(self) -> char {
        match self {
            Marker::Bracket => '[',
            Marker::Curly => '{',
        }
    }

    pub fn closing(self) -> char {
        match self {
            Marker::Bracket => ']',
            Marker::Curly => '}',
        }
    }
}

impl TryFrom<char> for Marker {
    type Error = TreeError;

    fn try_from(ch: char) -> Result<Self> {
        match ch {
            '[' => Ok(Marker::Bracket),
            '{' => Ok(Marker::Curly),
            other => Err(TreeError::InvalidMarker(other)),
        }
    }
}

/// Key symbols other than skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Wildcard,
    Primitive,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::Wildcard => WILDCARD_SYMBOL,
            Symbol::Primitive => PRIMITIVE_SYMBOL,
        }
    }
}

/// The shape of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// Bare key literal, no value and no marker.
    Literal(String),
    /// Single key with an optional value constraint and marker.
    Key {
        key: String,
        value: Option<Node>,
        marker: Option<Marker>,
    },
    /// Any of the listed keys.
    Options {
        options: Vec<String>,
        value: Option<Node>,
        marker: Option<Marker>,
    },
    /// Wildcard or primitive-type key.
    Symbol {
        symbol: Symbol,
        value: Option<Node>,
        marker: Option<Marker>,
    },
    /// Zero or more keys. Carries nothing else.
    Skip,
}

/// Matches a key-value pair. A series of patterns make up a [`Query`].
///
/// [`Query`]: super::ast::Query
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePattern {
    descriptor: Descriptor,
}

impl KeyValuePattern {
    /// Parses the string form of a pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use treequery::query::pattern::{KeyValuePattern, Marker};
    ///
    /// let pattern = KeyValuePattern::parse("{foo<bar^baz}").unwrap();
    /// assert_eq!(pattern.marker(), Some(Marker::Curly));
    /// assert!(pattern.matches_key("bar"));
    /// assert_eq!(pattern.to_string(), "foo<bar^baz");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Parser::parse_pattern(input)
    }

    pub fn from_descriptor(descriptor: Descriptor) -> Self {
        Self { descriptor }
    }

    /// Pattern matching exactly `key`.
    pub fn literal(key: impl Into<String>) -> Self {
        Self::from_descriptor(Descriptor::Literal(key.into()))
    }

    /// Pattern matching exactly `key`, ready to take a value or marker.
    pub fn key(key: impl Into<String>) -> Self {
        Self::from_descriptor(Descriptor::Key {
            key: key.into(),
            value: None,
            marker: None,
        })
    }

    /// Pattern matching any of `options`.
    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_descriptor(Descriptor::Options {
            options: options.into_iter().map(Into::into).collect(),
            value: None,
            marker: None,
        })
    }

    pub fn wildcard() -> Self {
        Self::symbol(Symbol::Wildcard)
    }

    pub fn primitive() -> Self {
        Self::symbol(Symbol::Primitive)
    }

    pub fn skip() -> Self {
        Self::from_descriptor(Descriptor::Skip)
    }

    fn symbol(symbol: Symbol) -> Self {
        Self::from_descriptor(Descriptor::Symbol {
            symbol,
            value: None,
            marker: None,
        })
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Turns a bare literal into a `Key` descriptor so it can carry a value or
    /// marker.
    fn expand_descriptor(&mut self) {
        if let Descriptor::Literal(key) = &mut self.descriptor {
            self.descriptor = Descriptor::Key {
                key: std::mem::take(key),
                value: None,
                marker: None,
            };
        }
    }

    fn value_and_marker_mut(&mut self) -> Option<(&mut Option<Node>, &mut Option<Marker>)> {
        self.expand_descriptor();
        match &mut self.descriptor {
            Descriptor::Key { value, marker, .. }
            | Descriptor::Options { value, marker, .. }
            | Descriptor::Symbol { value, marker, .. } => Some((value, marker)),
            Descriptor::Literal(_) | Descriptor::Skip => None,
        }
    }

    /// Adds a value constraint. Ignored on skip patterns.
    pub fn set_value(&mut self, value: impl Into<Node>) -> &mut Self {
        if !self.is_skipper() {
            if let Some((slot, _)) = self.value_and_marker_mut() {
                *slot = Some(value.into());
            }
        }
        self
    }

    /// Marks the pattern. Ignored on skip patterns.
    pub fn set_marker(&mut self, marker: Marker) -> &mut Self {
        if !self.is_skipper() {
            if let Some((_, slot)) = self.value_and_marker_mut() {
                *slot = Some(marker);
            }
        }
        self
    }

    pub fn value(&self) -> Option<&Node> {
        match &self.descriptor {
            Descriptor::Key { value, .. }
            | Descriptor::Options { value, .. }
            | Descriptor::Symbol { value, .. } => value.as_ref(),
            Descriptor::Literal(_) | Descriptor::Skip => None,
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        match &self.descriptor {
            Descriptor::Key { marker, .. }
            | Descriptor::Options { marker, .. }
            | Descriptor::Symbol { marker, .. } => *marker,
            Descriptor::Literal(_) | Descriptor::Skip => None,
        }
    }

    pub fn is_skipper(&self) -> bool {
        matches!(self.descriptor, Descriptor::Skip)
    }

    /// Whether a match on this pattern is reported in place of the matches
    /// found below it.
    pub fn is_return_marked(&self) -> bool {
        self.marker() == Some(Marker::RETURN)
    }

    /// Tests the key part of the pattern.
    pub fn matches_key(&self, key: &str) -> bool {
        match &self.descriptor {
            Descriptor::Literal(literal) => literal == key,
            Descriptor::Key { key: expected, .. } => expected == key,
            Descriptor::Options { options, .. } => options.iter().any(|option| option == key),
            Descriptor::Symbol { .. } => true,
            Descriptor::Skip => false,
        }
    }

    /// Tests the value part of the pattern.
    ///
    /// Primitive patterns accept strings, numbers and booleans (never null)
    /// regardless of any value set on them. Other patterns with a value
    /// require equality; without one every value passes.
    pub fn matches_value(&self, value: &Node) -> bool {
        match &self.descriptor {
            Descriptor::Symbol {
                symbol: Symbol::Primitive,
                ..
            } => value.is_primitive(),
            _ => self.value().map_or(true, |expected| expected == value),
        }
    }
}

impl FromStr for KeyValuePattern {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyValuePattern {
    /// Writes the pattern back in string form. Markers are not written.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.descriptor {
            Descriptor::Literal(key) | Descriptor::Key { key, .. } => {
                write!(f, "{}", encode_key(key))?
            }
            Descriptor::Options { options, .. } => {
                for (idx, option) in options.iter().enumerate() {
                    if idx > 0 {
                        write!(f, "{}", OPTION_SEPARATOR)?;
                    }
                    write!(f, "{}", encode_key(option))?;
                }
            }
            Descriptor::Symbol { symbol, .. } => write!(f, "{}", symbol.as_char())?,
            Descriptor::Skip => write!(f, "{}", SKIP_SYMBOL)?,
        }

        if let Some(value) = self.value() {
            write!(f, "{}{}", KEY_VALUE_SEPARATOR, encode_key(&value.to_text()))?;
        }

        Ok(())
    }
}
