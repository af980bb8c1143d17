//! treequery - paths, queries and walkers for nested trees.
//!
//! The crate is built around a compact query language for locating nodes in
//! arbitrary object/array trees:
//!
//! ```
//! use treequery::document::node::Node;
//! use treequery::query::{Evaluator, Query};
//!
//! let tree = Node::from(serde_json::json!({
//!     "hello": { "dear": { "world": 1 } }
//! }));
//! let query: Query = "hello>|>world".parse().unwrap();
//! let matches = Evaluator::new(&tree).evaluate(&query);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].path.to_string(), "hello>dear>world");
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod query;
pub mod walker;

pub use query::{KeyValuePattern, Path, PathLike, Query, QueryElement, TreeError};
pub use walker::{IterativeTreeWalker, RecursiveTreeWalker, TraversalState, TreeWalker, Visit};
