use stepfind_core::{GraphGrid, Node};

/// Minimal search interface: bounds and neighbour enumeration.
pub trait Pather {
    /// Whether `node` is part of the searchable space.
    fn contains(&self, node: Node) -> bool;

    /// Append neighbours of `node` into `buf`. The caller clears `buf` before
    /// calling. Order must be deterministic.
    fn neighbors(&self, node: Node, buf: &mut Vec<Node>);
}

impl Pather for GraphGrid {
    #[inline]
    fn contains(&self, node: Node) -> bool {
        GraphGrid::contains(self, node)
    }

    #[inline]
    fn neighbors(&self, node: Node, buf: &mut Vec<Node>) {
        self.neighbors_into(node, buf);
    }
}
