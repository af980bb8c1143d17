//! Path and query language for nested trees.
//!
//! Paths and queries are written as `>`-separated segments. Literal keys are
//! percent-encoded; any segment containing one of the characters below is
//! read as a key-value pattern.
//!
//! # Supported Syntax
//!
//! - `key` - Literal key (`a%3Eb` for the key `a>b`)
//! - `|` - Any key
//! - `"` - Any key holding a string, number or boolean
//! - `\` - Zero or more keys
//! - `foo<bar` - Key `foo` or `bar`
//! - `foo^value` - Key `foo` holding the string `value`
//! - `[foo]` / `{foo}` - Marked pattern; `{...}` reports the match itself
//!   rather than the leaves below it
//!
//! # Examples
//!
//! ```
//! // hello>|>world        - `world` two levels under `hello`
//! // \>"                  - every primitive leaf
//! // \>{user}>\>|^admin   - every `user` with an `admin` value somewhere below
//! ```

pub mod ast;
pub mod encoding;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod path;
pub mod pattern;

pub use ast::{Query, QueryElement};
pub use encoding::{decode_key, encode_key};
pub use error::{Result, TreeError};
pub use evaluator::{select, Evaluator, Match};
pub use parser::{is_query_expression, parse_path_or_query, Parser, PathOrQuery};
pub use path::{Path, PathLike, PATH_SEPARATOR};
pub use pattern::{Descriptor, KeyValuePattern, Marker, Symbol};
