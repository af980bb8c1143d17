use super::ast::Query;
use super::path::Path;
use crate::document::node::Node;
use crate::walker::recursive::traverse;
use crate::walker::Visit;

/// A node matched by a query, with the path leading to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub path: Path,
    pub node: &'a Node,
}

pub struct Evaluator<'a> {
    root: &'a Node,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Node) -> Self {
        Evaluator { root }
    }

    /// Evaluates a query and returns every match, in walk order.
    pub fn evaluate(&self, query: &Query) -> Vec<Match<'a>> {
        let mut matches = Vec::new();
        traverse(self.root, query, |state, node| {
            matches.push(Match {
                path: state.current_path().cloned().unwrap_or_default(),
                node,
            });
            Visit::Continue
        });
        matches
    }

    /// Evaluates a query and returns just the matching paths.
    pub fn evaluate_paths(&self, query: &Query) -> Vec<Path> {
        self.evaluate(query)
            .into_iter()
            .map(|found| found.path)
            .collect()
    }

    /// Returns the first match, stopping the walk as soon as it is found.
    pub fn first(&self, query: &Query) -> Option<Match<'a>> {
        let mut first = None;
        traverse(self.root, query, |state, node| {
            first = Some(Match {
                path: state.current_path().cloned().unwrap_or_default(),
                node,
            });
            Visit::Stop
        });
        first
    }
}

/// Shorthand for `Evaluator::new(root).evaluate(query)`.
pub fn select<'a>(root: &'a Node, query: &Query) -> Vec<Match<'a>> {
    Evaluator::new(root).evaluate(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Node {
        Node::from(json!({
            "store": {
                "book": [
                    {"author": "Nigel Rees", "price": 8.95},
                    {"author": "Evelyn Waugh", "price": 12.99}
                ],
                "bicycle": {"color": "red", "price": 19.95}
            }
        }))
    }

    #[test]
    fn test_evaluate_returns_nodes_and_paths() {
        let tree = sample();
        let query: Query = "store>book>|>author".parse().unwrap();
        let matches = Evaluator::new(&tree).evaluate(&query);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].path.to_string(), "store>book>0>author");
        assert_eq!(matches[0].node, &Node::from("Nigel Rees"));
        assert_eq!(matches[1].node, &Node::from("Evelyn Waugh"));
    }

    #[test]
    fn test_evaluate_paths_recursive() {
        let tree = sample();
        let query: Query = "\\>price".parse().unwrap();
        let paths: Vec<String> = Evaluator::new(&tree)
            .evaluate_paths(&query)
            .iter()
            .map(Path::to_string)
            .collect();
        assert_eq!(
            paths,
            vec![
                "store>book>0>price",
                "store>book>1>price",
                "store>bicycle>price"
            ]
        );
    }

    #[test]
    fn test_first_stops_early() {
        let tree = sample();
        let query: Query = "\\>author".parse().unwrap();
        let found = Evaluator::new(&tree).first(&query).unwrap();
        assert_eq!(found.node, &Node::from("Nigel Rees"));

        let none: Query = "nope".parse().unwrap();
        assert!(Evaluator::new(&tree).first(&none).is_none());
    }

    #[test]
    fn test_select_marked_return() {
        let tree = sample();
        let query: Query = "store>{|}>color^red".parse().unwrap();
        let matches = select(&tree, &query);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].path.to_string(), "store>bicycle");
    }

    #[test]
    fn test_no_matches_is_empty() {
        let tree = sample();
        let query: Query = "store>car".parse().unwrap();
        assert!(select(&tree, &query).is_empty());
    }
}
