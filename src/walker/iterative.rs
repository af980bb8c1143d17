use std::marker::PhantomData;

use tracing::debug;

use super::{TraversalState, TreeWalker, Visit};
use crate::document::node::Node;
use crate::query::Path;

/// One level of the explicit stack: a container and the position among its
/// keys.
struct Frame<'a> {
    node: &'a Node,
    keys: Vec<String>,
    index: usize,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Node) -> Self {
        Self {
            node,
            keys: node.keys(),
            index: 0,
        }
    }
}

/// Depth-first walker visiting every node below the root, with no filtering.
///
/// Nodes are visited in pre-order: a container is handed to the handler
/// before its children. The root itself is not visited.
///
/// # Example
///
/// ```
/// use treequery::document::node::Node;
/// use treequery::walker::{IterativeTreeWalker, TreeWalker};
///
/// let tree = Node::from(serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3}));
/// let mut paths = Vec::new();
/// IterativeTreeWalker::new(|state, _node| {
///     paths.push(state.current_path().unwrap().to_string());
/// })
/// .walk(&tree);
/// assert_eq!(paths, vec!["a", "a>b", "a>c", "d"]);
/// ```
///
/// Visited nodes borrow from the walked tree, so a handler may keep them:
///
/// ```
/// use treequery::document::node::Node;
/// use treequery::walker::{IterativeTreeWalker, TreeWalker};
///
/// let tree = Node::from(serde_json::json!({"a": [1, 2]}));
/// let mut leaves: Vec<&Node> = Vec::new();
/// IterativeTreeWalker::new(|_state, node| {
///     if !node.is_container() {
///         leaves.push(node);
///     }
/// })
/// .walk(&tree);
/// assert_eq!(leaves, vec![&Node::from(1), &Node::from(2)]);
/// ```
pub struct IterativeTreeWalker<'a, H> {
    handler: H,
    tree: PhantomData<&'a Node>,
}

impl<'a, H, R> IterativeTreeWalker<'a, H>
where
    H: FnMut(&mut TraversalState<'a>, &'a Node) -> R,
    R: Into<Visit>,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            tree: PhantomData,
        }
    }
}

impl<'a, H, R> TreeWalker<'a> for IterativeTreeWalker<'a, H>
where
    H: FnMut(&mut TraversalState<'a>, &'a Node) -> R,
    R: Into<Visit>,
{
    fn walk(&mut self, root: &'a Node) -> &mut Self {
        debug!("Starting iterative walk");

        let mut state = TraversalState::new();
        let mut stack = vec![Frame::new(root)];
        let mut path: Vec<String> = Vec::new();
        let mut visited = 0usize;

        while let Some(frame) = stack.last_mut() {
            if state.is_terminated() {
                break;
            }
            if frame.index >= frame.keys.len() {
                stack.pop();
                continue;
            }

            let node = frame.node;
            let key = frame.keys[frame.index].clone();
            frame.index += 1;
            let Some(child) = node.child(&key) else {
                continue;
            };

            path.truncate(stack.len() - 1);
            path.push(key.clone());
            state.enter(Some(key), child, Path::from(path.clone()));
            visited += 1;

            let visit = (self.handler)(&mut state, child).into();
            state.apply(visit);

            if child.is_container() && !state.is_terminated() {
                stack.push(Frame::new(child));
            }
        }

        debug!(
            visited,
            terminated = state.is_terminated(),
            "Iterative walk finished"
        );
        state.reset();
        self
    }
}
