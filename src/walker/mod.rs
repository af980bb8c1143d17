//! Tree walkers.
//!
//! Both walkers hand every visited node to a caller-supplied handler along
//! with a [`TraversalState`] describing where the walk currently is. The
//! handler steers the walk through its return value (see [`Visit`]) or by
//! calling [`TraversalState::terminate_traversal`].

pub mod iterative;
pub mod recursive;

pub use iterative::IterativeTreeWalker;
pub use recursive::RecursiveTreeWalker;

use crate::document::node::Node;
use crate::query::Path;

/// What a handler wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Stop,
}

impl From<()> for Visit {
    fn from(_: ()) -> Self {
        Visit::Continue
    }
}

impl From<bool> for Visit {
    /// `false` stops the walk.
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Visit::Continue
        } else {
            Visit::Stop
        }
    }
}

/// Position of a walk in progress.
///
/// Idle (every field empty, not terminated) outside of a walk.
#[derive(Debug, Clone, Default)]
pub struct TraversalState<'a> {
    current_key: Option<String>,
    current_node: Option<&'a Node>,
    current_path: Option<Path>,
    is_terminated: bool,
}

impl<'a> TraversalState<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which the current node sits, `None` for the root.
    pub fn current_key(&self) -> Option<&str> {
        self.current_key.as_deref()
    }

    pub fn current_node(&self) -> Option<&'a Node> {
        self.current_node
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.is_terminated
    }

    /// Stops the walk once the current handler call returns.
    pub fn terminate_traversal(&mut self) -> &mut Self {
        self.is_terminated = true;
        self
    }

    /// Returns to the idle state.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    pub(crate) fn enter(&mut self, key: Option<String>, node: &'a Node, path: Path) {
        self.current_key = key;
        self.current_node = Some(node);
        self.current_path = Some(path);
    }

    /// Applies a handler result.
    pub(crate) fn apply(&mut self, visit: Visit) {
        if visit == Visit::Stop {
            self.terminate_traversal();
        }
    }
}

/// Walks a tree, calling a handler on visited nodes.
///
/// Handlers receive nodes borrowed for `'a`, the lifetime of the walked tree.
pub trait TreeWalker<'a> {
    fn walk(&mut self, root: &'a Node) -> &mut Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_from_handler_results() {
        assert_eq!(Visit::from(()), Visit::Continue);
        assert_eq!(Visit::from(true), Visit::Continue);
        assert_eq!(Visit::from(false), Visit::Stop);
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = TraversalState::new();
        assert_eq!(state.current_key(), None);
        assert!(state.current_node().is_none());
        assert!(state.current_path().is_none());
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_terminate_and_reset() {
        let node = Node::from("leaf");
        let mut state = TraversalState::new();
        state.enter(Some("a".to_string()), &node, Path::from_keys(["a"]));
        assert_eq!(state.current_key(), Some("a"));
        assert_eq!(state.current_node(), Some(&node));

        assert!(state.terminate_traversal().is_terminated());

        state.reset();
        assert!(!state.is_terminated());
        assert_eq!(state.current_key(), None);
        assert!(state.current_path().is_none());
    }

    #[test]
    fn test_apply_stop_terminates() {
        let mut state = TraversalState::new();
        state.apply(Visit::Continue);
        assert!(!state.is_terminated());
        state.apply(Visit::Stop);
        assert!(state.is_terminated());
    }
}
