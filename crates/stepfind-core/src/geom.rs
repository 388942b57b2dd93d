//! Grid coordinates: [`Node`] and its hashable encoding [`NodeKey`].

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A grid cell identified by row and column. Rows grow down, columns grow
/// right.
///
/// Coordinates are signed so that positions supplied from outside (pointer
/// events, stale selections after a resize) can be represented and then
/// rejected by [`GraphGrid::contains`](crate::GraphGrid::contains).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub row: i32,
    pub col: i32,
}

impl Node {
    /// Create a new node.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a node shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row.wrapping_add(drow),
            col: self.col.wrapping_add(dcol),
        }
    }

    /// The four cardinal neighbours in the order up, right, down, left.
    ///
    /// No bounds are applied; see [`GraphGrid::neighbors`](crate::GraphGrid::neighbors).
    #[inline]
    pub const fn neighbors_4(self) -> [Node; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
        ]
    }

    /// The canonical key of this node.
    #[inline]
    pub const fn key(self) -> NodeKey {
        NodeKey::encode(self)
    }

    /// Euclidean (L2) distance to `other`.
    #[inline]
    pub fn distance(self, other: Node) -> f64 {
        let dr = f64::from(self.row - other.row);
        let dc = f64::from(self.col - other.col);
        (dr * dr + dc * dc).sqrt()
    }

    /// Manhattan (L1) distance to `other`, i.e. the hop count on an open grid.
    #[inline]
    pub fn manhattan(self, other: Node) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<NodeKey> for Node {
    #[inline]
    fn from(key: NodeKey) -> Self {
        key.decode()
    }
}

// ---------------------------------------------------------------------------
// NodeKey
// ---------------------------------------------------------------------------

/// Canonical, hashable encoding of a [`Node`].
///
/// Both coordinates are packed into a single `u64` (row in the high half),
/// so the mapping is a bijection over every `(i32, i32)` pair. The textual
/// form is `"row:col"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u64);

impl NodeKey {
    /// Encode a node.
    #[inline]
    pub const fn encode(node: Node) -> Self {
        Self(((node.row as u32 as u64) << 32) | (node.col as u32 as u64))
    }

    /// Decode back into the node this key was built from.
    #[inline]
    pub const fn decode(self) -> Node {
        Node {
            row: (self.0 >> 32) as u32 as i32,
            col: self.0 as u32 as i32,
        }
    }

    /// The packed representation.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<Node> for NodeKey {
    #[inline]
    fn from(node: Node) -> Self {
        Self::encode(node)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.decode();
        write!(f, "{}:{}", n.row, n.col)
    }
}

impl FromStr for NodeKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(':')
            .ok_or_else(|| KeyParseError(s.to_string()))?;
        let row = row
            .trim()
            .parse::<i32>()
            .map_err(|_| KeyParseError(s.to_string()))?;
        let col = col
            .trim()
            .parse::<i32>()
            .map_err(|_| KeyParseError(s.to_string()))?;
        Ok(Self::encode(Node::new(row, col)))
    }
}

/// A string that is not a `"row:col"` node key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyParseError(pub String);

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node key \u{201c}{}\u{201d}, expected row:col", self.0)
    }
}

impl std::error::Error for KeyParseError {}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
