//! The [`GraphGrid`] type: a `rows × cols` node space with 4-way adjacency.
//!
//! A grid is built once per size change and never mutated afterwards; it
//! owns no search state, so one grid can back any number of searches.

use std::fmt;

use crate::geom::Node;

/// A rectangular grid of [`Node`]s stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphGrid {
    rows: i32,
    cols: i32,
    nodes: Vec<Node>,
}

impl GraphGrid {
    /// Build a `rows × cols` grid.
    ///
    /// A `0 × n` or `n × 0` grid is valid and has no nodes.
    pub fn build(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows < 0 || cols < 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        let mut nodes = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                nodes.push(Node::new(row, col));
            }
        }
        log::debug!("built {rows}x{cols} grid");
        Ok(Self { rows, cols, nodes })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the grid has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` lies inside the grid.
    #[inline]
    pub fn contains(&self, node: Node) -> bool {
        node.row >= 0 && node.row < self.rows && node.col >= 0 && node.col < self.cols
    }

    /// The grid's own copy of `node`, or `None` if it is out of bounds.
    #[inline]
    pub fn get(&self, node: Node) -> Option<Node> {
        self.index(node).map(|i| self.nodes[i])
    }

    /// The nodes of row `row`, left to right.
    pub fn row(&self, row: i32) -> Option<&[Node]> {
        if row < 0 || row >= self.rows {
            return None;
        }
        let start = row as usize * self.cols as usize;
        Some(&self.nodes[start..start + self.cols as usize])
    }

    /// Iterator over the rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Node]> + '_ {
        (0..self.rows).filter_map(move |r| self.row(r))
    }

    /// Row-major iterator over every node.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// In-bounds neighbours of `node` in the order up, right, down, left.
    pub fn neighbors(&self, node: Node) -> Vec<Node> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(node, &mut buf);
        buf
    }

    /// Append the in-bounds neighbours of `node` into `buf`, in the same
    /// order as [`neighbors`](Self::neighbors). The caller clears `buf`.
    pub fn neighbors_into(&self, node: Node, buf: &mut Vec<Node>) {
        buf.extend(
            node.neighbors_4()
                .into_iter()
                .filter_map(|n| self.get(n)),
        );
    }

    #[inline]
    fn index(&self, node: Node) -> Option<usize> {
        if self.contains(node) {
            Some(node.row as usize * self.cols as usize + node.col as usize)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a GraphGrid {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Errors raised while building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A negative row or column count.
    InvalidDimension { rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { rows, cols } => {
                write!(f, "invalid grid dimension {rows}x{cols}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(feature = "serde")]
impl serde::Serialize for GraphGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&(self.rows, self.cols), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GraphGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (rows, cols) = <(i32, i32) as serde::Deserialize>::deserialize(deserializer)?;
        GraphGrid::build(rows, cols).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_has_requested_shape() {
        for (rows, cols) in [(10, 5), (1, 1), (3, 7), (0, 4), (4, 0), (0, 0)] {
            let g = GraphGrid::build(rows, cols).unwrap();
            assert_eq!(g.iter_rows().count(), rows as usize);
            for row in g.iter_rows() {
                assert_eq!(row.len(), cols as usize);
            }
            assert_eq!(g.len(), (rows * cols) as usize);
        }
    }

    #[test]
    fn rows_hold_their_coordinates() {
        let g = GraphGrid::build(3, 4).unwrap();
        for (r, row) in g.iter_rows().enumerate() {
            for (c, node) in row.iter().enumerate() {
                assert_eq!(*node, Node::new(r as i32, c as i32));
            }
        }
        assert!(g.row(3).is_none());
        assert!(g.row(-1).is_none());
    }

    #[test]
    fn negative_dimension_rejected() {
        assert_eq!(
            GraphGrid::build(-1, 3),
            Err(GridError::InvalidDimension { rows: -1, cols: 3 })
        );
        assert!(GraphGrid::build(3, -2).is_err());
    }

    #[test]
    fn contains_bounds() {
        let g = GraphGrid::build(2, 3).unwrap();
        assert!(g.contains(Node::new(0, 0)));
        assert!(g.contains(Node::new(1, 2)));
        assert!(!g.contains(Node::new(2, 0)));
        assert!(!g.contains(Node::new(0, 3)));
        assert!(!g.contains(Node::new(-1, 0)));
        assert!(!g.contains(Node::new(0, -1)));
    }

    #[test]
    fn neighbors_interior_order() {
        let g = GraphGrid::build(3, 3).unwrap();
        assert_eq!(
            g.neighbors(Node::new(1, 1)),
            vec![
                Node::new(0, 1),
                Node::new(1, 2),
                Node::new(2, 1),
                Node::new(1, 0),
            ]
        );
    }

    #[test]
    fn neighbors_clipped_at_corners() {
        let g = GraphGrid::build(3, 3).unwrap();
        assert_eq!(
            g.neighbors(Node::new(0, 0)),
            vec![Node::new(0, 1), Node::new(1, 0)]
        );
        assert_eq!(
            g.neighbors(Node::new(2, 2)),
            vec![Node::new(1, 2), Node::new(2, 1)]
        );
    }

    #[test]
    fn neighbors_never_out_of_bounds() {
        let g = GraphGrid::build(4, 6).unwrap();
        for &n in &g {
            let ns = g.neighbors(n);
            assert!(ns.len() <= 4);
            for m in ns {
                assert!(g.contains(m));
                assert_eq!(n.manhattan(m), 1);
            }
        }
    }

    #[test]
    fn degenerate_grid_has_no_neighbors() {
        let g = GraphGrid::build(0, 0).unwrap();
        assert!(g.is_empty());
        assert!(g.neighbors(Node::new(0, 0)).is_empty());
        assert!(g.neighbors(Node::new(-3, 7)).is_empty());
    }

    #[test]
    fn single_row_grid() {
        let g = GraphGrid::build(1, 3).unwrap();
        assert_eq!(
            g.neighbors(Node::new(0, 1)),
            vec![Node::new(0, 2), Node::new(0, 0)]
        );
    }
}
