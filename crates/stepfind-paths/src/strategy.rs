//! Frontier selection strategies.

use std::fmt;
use std::str::FromStr;

use stepfind_core::Node;

use crate::family::Family;

/// How the next node to expand is picked from the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Uninformed FIFO expansion. Finds a shortest path in hop count.
    Breadth,
    /// Best-effort heuristic expansion, see [`Strategy::select`].
    #[default]
    Greedy,
}

impl Strategy {
    /// Every strategy, in display order.
    pub const ALL: [Strategy; 2] = [Strategy::Breadth, Strategy::Greedy];

    /// Pick the index of the frontier node to expand next, or `None` if the
    /// frontier is empty.
    ///
    /// `Breadth` always picks index 0. `Greedy` scores every node as
    /// `ln(euclidean(node, target) * path_len(node))`, where `path_len` is
    /// the length of the node's reconstructed path back to the root, and
    /// picks the lowest score. Ties keep the earliest node. A node sitting on
    /// the target scores `-inf` and always wins. The score is not an
    /// admissible estimate, so Greedy paths are not guaranteed shortest.
    pub fn select(
        self,
        frontier: &[Node],
        target: Node,
        _root: Node,
        family: &Family,
    ) -> Option<usize> {
        if frontier.is_empty() {
            return None;
        }
        match self {
            Self::Breadth => Some(0),
            Self::Greedy => {
                let mut chosen = 0;
                let mut least = f64::INFINITY;
                for (i, &node) in frontier.iter().enumerate() {
                    let score = greedy_score(node, target, family);
                    if score < least {
                        least = score;
                        chosen = i;
                    }
                }
                Some(chosen)
            }
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Breadth => "breadth",
            Self::Greedy => "greedy",
        }
    }
}

/// Greedy cost of expanding `node`. Lower is better.
pub fn greedy_score(node: Node, target: Node, family: &Family) -> f64 {
    let path_len = family.path_len(node) as f64;
    (node.distance(target) * path_len).ln()
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    /// Accepts `breadth`/`bfs`/`dijkstra` and `greedy`/`astar`, case
    /// insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth" | "bfs" | "dijkstra" => Ok(Self::Breadth),
            "greedy" | "astar" | "a*" => Ok(Self::Greedy),
            _ => Err(StrategyParseError(s.to_string())),
        }
    }
}

/// An unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyParseError(pub String);

impl fmt::Display for StrategyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search strategy \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for StrategyParseError {}
