use std::marker::PhantomData;

use tracing::{debug, trace};

use super::{TraversalState, TreeWalker, Visit};
use crate::document::key_set::KeySet;
use crate::document::node::Node;
use crate::query::{Descriptor, KeyValuePattern, Path, PathLike, Query, QueryElement};

/// Query every primitive leaf: `\>"`.
fn default_query() -> Query {
    Query::from_elements([KeyValuePattern::skip(), KeyValuePattern::primitive()])
}

/// Walker that only reports the nodes a [`Query`] matches.
///
/// The query is followed element by element from the root. A skip element
/// lets the walk pass over any number of container levels until the next
/// element matches. When a matched element carries the return marker
/// (`{...}`), the node it matched is reported instead of the matches found
/// below it.
///
/// # Example
///
/// ```
/// use treequery::document::node::Node;
/// use treequery::walker::{RecursiveTreeWalker, TreeWalker};
///
/// let tree = Node::from(serde_json::json!({
///     "users": [{"name": "ann", "role": "admin"}, {"name": "bob"}]
/// }));
/// let mut names = Vec::new();
/// RecursiveTreeWalker::new(
///     |_state, node| names.push(node.to_text()),
///     "users>|>name".parse().unwrap(),
/// )
/// .walk(&tree);
/// assert_eq!(names, vec!["ann", "bob"]);
/// ```
pub struct RecursiveTreeWalker<'a, H> {
    handler: H,
    query: Query,
    tree: PhantomData<&'a Node>,
}

impl<'a, H, R> RecursiveTreeWalker<'a, H>
where
    H: FnMut(&mut TraversalState<'a>, &'a Node) -> R,
    R: Into<Visit>,
{
    pub fn new(handler: H, query: Query) -> Self {
        Self {
            handler,
            query,
            tree: PhantomData,
        }
    }

    /// Walker reporting every primitive leaf of the tree.
    pub fn with_default_query(handler: H) -> Self {
        Self::new(handler, default_query())
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl<'a, H, R> TreeWalker<'a> for RecursiveTreeWalker<'a, H>
where
    H: FnMut(&mut TraversalState<'a>, &'a Node) -> R,
    R: Into<Visit>,
{
    fn walk(&mut self, root: &'a Node) -> &mut Self {
        let handler = &mut self.handler;
        traverse(root, &self.query, |state, node| handler(state, node).into());
        self
    }
}

/// Runs a query-guided walk over `root`, passing every match to `emit`.
///
/// Returns the number of matches emitted.
pub(crate) fn traverse<'a, F>(root: &'a Node, query: &Query, emit: F) -> usize
where
    F: FnMut(&mut TraversalState<'a>, &'a Node) -> Visit,
{
    debug!(query = %query, "Starting recursive walk");

    let mut traversal = Traversal {
        query,
        state: TraversalState::new(),
        handler: emit,
        emitted: 0,
    };
    let mut path = Vec::new();
    let matched = traversal.visit(&mut path, root, 0, false, false, false);

    debug!(
        matched,
        emitted = traversal.emitted,
        terminated = traversal.state.is_terminated(),
        "Recursive walk finished"
    );
    traversal.state.reset();
    traversal.emitted
}

struct Traversal<'q, 'a, F> {
    query: &'q Query,
    state: TraversalState<'a>,
    handler: F,
    emitted: usize,
}

impl<'q, 'a, F> Traversal<'q, 'a, F>
where
    F: FnMut(&mut TraversalState<'a>, &'a Node) -> Visit,
{
    /// Matches `node`, reached through `path`, against the query from
    /// element `pos` on. Returns whether anything matched at or below it.
    ///
    /// `under_marked` is set below a node matched by a return-marked element;
    /// `reached_by_marked` is set on that node itself.
    fn visit(
        &mut self,
        path: &mut Vec<String>,
        node: &'a Node,
        pos: usize,
        skip_mode: bool,
        under_marked: bool,
        reached_by_marked: bool,
    ) -> bool {
        let query = self.query;
        let elements = query.elements();
        let mut pos = pos;
        let mut skip_mode = skip_mode;
        while elements.get(pos).is_some_and(QueryElement::is_skipper) {
            skip_mode = true;
            pos += 1;
        }

        let Some(element) = elements.get(pos) else {
            if !under_marked {
                self.emit(path, node);
            }
            return true;
        };

        let marked_below = under_marked || reached_by_marked;
        let matched = keys_by_pattern(node, element);
        let mut any_matched = false;

        for key in matched.iter() {
            if self.state.is_terminated() {
                return any_matched;
            }
            let Some(child) = node.child(key) else {
                continue;
            };
            path.push(key.to_string());
            any_matched |= self.visit(
                path,
                child,
                pos + 1,
                false,
                marked_below,
                element.is_return_marked(),
            );
            path.pop();
        }

        if skip_mode {
            let containers = KeySet::from_keys(
                node.keys()
                    .into_iter()
                    .filter(|key| node.child(key).is_some_and(Node::is_container)),
            );
            for key in matched.subtract_from(&containers).iter() {
                if self.state.is_terminated() {
                    return any_matched;
                }
                let Some(child) = node.child(key) else {
                    continue;
                };
                path.push(key.to_string());
                any_matched |= self.visit(path, child, pos, true, marked_below, false);
                path.pop();
            }
        }

        if reached_by_marked && any_matched {
            self.emit(path, node);
        }
        any_matched
    }

    fn emit(&mut self, path: &[String], node: &'a Node) {
        if self.state.is_terminated() {
            return;
        }
        let path = Path::from(path.to_vec());
        trace!(path = %path, "Emitting match");

        self.state.enter(path.last_key().cloned(), node, path);
        self.emitted += 1;
        let visit = (self.handler)(&mut self.state, node);
        self.state.apply(visit);
    }
}

/// Keys of `node` whose entries satisfy `element`. Only keys that exist are
/// returned; leaves have none.
fn keys_by_pattern(node: &Node, element: &QueryElement) -> KeySet {
    let pattern = match element {
        QueryElement::Key(key) => {
            return if node.has_child(key) {
                KeySet::from_keys([key.as_str()])
            } else {
                KeySet::new()
            };
        }
        QueryElement::Pattern(pattern) => pattern,
    };

    let candidates = match pattern.descriptor() {
        Descriptor::Literal(key) | Descriptor::Key { key, .. } => vec![key.clone()],
        Descriptor::Options { options, .. } => options.clone(),
        Descriptor::Symbol { .. } => node.keys(),
        Descriptor::Skip => Vec::new(),
    };

    candidates
        .into_iter()
        .filter(|key| {
            node.child(key)
                .is_some_and(|child| pattern.matches_value(child))
        })
        .collect()
}
