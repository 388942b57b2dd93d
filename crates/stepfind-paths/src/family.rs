//! Predecessor tracking and path reconstruction.

use std::collections::HashMap;

use stepfind_core::{Node, NodeKey};

/// Maps each discovered node to the node that first discovered it.
///
/// Entries are never overwritten: the first discoverer wins. The root of a
/// search is never a key.
#[derive(Debug, Clone, Default)]
pub struct Family {
    parents: HashMap<NodeKey, NodeKey>,
}

impl Family {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of discovered (non-root) nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether nothing has been discovered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether `node` has a recorded discoverer.
    #[inline]
    pub fn contains(&self, node: Node) -> bool {
        self.parents.contains_key(&node.key())
    }

    /// The node that discovered `node`, if any.
    #[inline]
    pub fn parent(&self, node: Node) -> Option<Node> {
        self.parents.get(&node.key()).map(|k| k.decode())
    }

    /// Record `parent` as the discoverer of `child`.
    ///
    /// Returns `false` and leaves the map untouched if `child` already has a
    /// discoverer.
    pub fn record(&mut self, child: Node, parent: Node) -> bool {
        match self.parents.entry(child.key()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(parent.key());
                true
            }
        }
    }

    /// Reconstruct the path from `node` back to the root: `node` first, the
    /// root last.
    ///
    /// An inconsistent map (a cycle) yields the partial list walked so far.
    pub fn path(&self, node: Node) -> Vec<Node> {
        let mut path = vec![node];
        let mut cur = node.key();
        while let Some(&prev) = self.parents.get(&cur) {
            if path.len() > self.parents.len() {
                break;
            }
            path.push(prev.decode());
            cur = prev;
        }
        path
    }

    /// Length of [`path`](Self::path) without allocating it.
    pub fn path_len(&self, node: Node) -> usize {
        let mut len = 1;
        let mut cur = node.key();
        while let Some(&prev) = self.parents.get(&cur) {
            if len > self.parents.len() {
                break;
            }
            len += 1;
            cur = prev;
        }
        len
    }
}

/// Reconstruct the path from `node` to the root of `family`, goal first.
#[inline]
pub fn reconstruct(node: Node, family: &Family) -> Vec<Node> {
    family.path(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Family {
        // (0,0) -> (0,1) -> (1,1) -> (2,1)
        let mut f = Family::new();
        f.record(Node::new(0, 1), Node::new(0, 0));
        f.record(Node::new(1, 1), Node::new(0, 1));
        f.record(Node::new(2, 1), Node::new(1, 1));
        f
    }

    #[test]
    fn path_is_goal_to_root() {
        let f = chain();
        assert_eq!(
            reconstruct(Node::new(2, 1), &f),
            vec![
                Node::new(2, 1),
                Node::new(1, 1),
                Node::new(0, 1),
                Node::new(0, 0),
            ]
        );
        assert_eq!(f.path_len(Node::new(2, 1)), 4);
    }

    #[test]
    fn root_path_is_singleton() {
        let f = chain();
        assert_eq!(f.path(Node::new(0, 0)), vec![Node::new(0, 0)]);
        assert_eq!(f.path_len(Node::new(0, 0)), 1);
        assert_eq!(f.path_len(Node::new(9, 9)), 1);
    }

    #[test]
    fn first_discoverer_wins() {
        let mut f = chain();
        assert!(!f.record(Node::new(1, 1), Node::new(1, 0)));
        assert_eq!(f.parent(Node::new(1, 1)), Some(Node::new(0, 1)));
        assert_eq!(f.len(), 3);
    }

    #[test]
    fn cycle_yields_partial_path() {
        let mut f = Family::new();
        f.record(Node::new(0, 0), Node::new(0, 1));
        f.record(Node::new(0, 1), Node::new(0, 0));
        let path = f.path(Node::new(0, 0));
        assert!(path.len() <= 3);
        assert!(f.path_len(Node::new(0, 0)) <= 3);
    }
}
