//! The resumable step engine.
//!
//! A [`SearchEngine`] performs one node expansion per call to
//! [`advance`](SearchEngine::advance) and reports it as a [`StepEvent`], so a
//! caller can animate the search or abandon it between any two steps.

use std::collections::HashSet;
use std::iter::FusedIterator;

use stepfind_core::{GraphGrid, Node, NodeKey};

use crate::error::{InvalidEndpoint, check_endpoints};
use crate::family::Family;
use crate::strategy::Strategy;
use crate::traits::Pather;

/// One unit of search progress.
///
/// `path` runs from `node` back to the root. It is only a complete route when
/// `found` is `true`; otherwise it is the current reconstruction for `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    pub node: Node,
    pub path: Vec<Node>,
    pub found: bool,
}

/// Lifecycle of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// More steps may follow.
    Stepping,
    /// The target was reached. Terminal.
    Done,
    /// The frontier ran dry without reaching the target. Terminal.
    Exhausted,
}

/// Stepwise expansion search from `root` to `target`.
///
/// The wall set is copied in at construction, so later changes to the
/// caller's walls never affect a running search.
pub struct SearchEngine<'g, P: ?Sized = GraphGrid> {
    pather: &'g P,
    strategy: Strategy,
    root: Node,
    target: Node,
    walls: HashSet<NodeKey>,
    frontier: Vec<Node>,
    visited: HashSet<NodeKey>,
    family: Family,
    nbuf: Vec<Node>,
    state: EngineState,
    expansions: usize,
}

impl<'g, P: Pather + ?Sized> SearchEngine<'g, P> {
    /// Create an engine with the frontier seeded with `root`.
    ///
    /// Fails if either endpoint lies outside `pather`.
    pub fn new<W>(
        pather: &'g P,
        strategy: Strategy,
        root: Node,
        target: Node,
        walls: W,
    ) -> Result<Self, InvalidEndpoint>
    where
        W: IntoIterator<Item = NodeKey>,
    {
        check_endpoints(pather, Some(root), Some(target))?;
        Ok(Self {
            pather,
            strategy,
            root,
            target,
            walls: walls.into_iter().collect(),
            frontier: vec![root],
            visited: HashSet::new(),
            family: Family::new(),
            nbuf: Vec::with_capacity(4),
            state: EngineState::Stepping,
            expansions: 0,
        })
    }

    /// Produce the next step, or `None` once the search is over.
    ///
    /// After a `found` step the engine is [`Done`](EngineState::Done). If the
    /// frontier empties first the engine is
    /// [`Exhausted`](EngineState::Exhausted) and no `found` step is ever
    /// produced.
    pub fn advance(&mut self) -> Option<StepEvent> {
        if self.state != EngineState::Stepping {
            return None;
        }

        loop {
            let Some(i) = self
                .strategy
                .select(&self.frontier, self.target, self.root, &self.family)
            else {
                self.state = EngineState::Exhausted;
                log::debug!(
                    "{} search {} -> {} exhausted after {} expansions",
                    self.strategy,
                    self.root,
                    self.target,
                    self.expansions
                );
                return None;
            };

            let node = self.frontier.remove(i);
            let key = node.key();

            if self.visited.contains(&key) {
                continue;
            }

            if node == self.target {
                self.state = EngineState::Done;
                let path = self.family.path(node);
                log::debug!(
                    "{} search {} -> {} found a {}-node path after {} expansions",
                    self.strategy,
                    self.root,
                    self.target,
                    path.len(),
                    self.expansions
                );
                return Some(StepEvent {
                    node,
                    path,
                    found: true,
                });
            }

            self.nbuf.clear();
            self.pather.neighbors(node, &mut self.nbuf);
            for &nb in self.nbuf.iter() {
                let nk = nb.key();
                if self.walls.contains(&nk)
                    || self.visited.contains(&nk)
                    || self.family.contains(nb)
                {
                    continue;
                }
                self.family.record(nb, node);
                self.frontier.push(nb);
            }

            self.visited.insert(key);
            self.expansions += 1;

            return Some(StepEvent {
                node,
                path: self.family.path(node),
                found: false,
            });
        }
    }

    /// Drain the remaining steps and return the found path, if any.
    pub fn run_to_end(&mut self) -> Option<Vec<Node>> {
        let mut found = None;
        while let Some(step) = self.advance() {
            if step.found {
                found = Some(step.path);
            }
        }
        found
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether no further steps will be produced.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state != EngineState::Stepping
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn root(&self) -> Node {
        self.root
    }

    #[inline]
    pub fn target(&self) -> Node {
        self.target
    }

    /// Nodes awaiting expansion, in enqueue order.
    #[inline]
    pub fn frontier(&self) -> &[Node] {
        &self.frontier
    }

    /// The predecessor map built so far.
    #[inline]
    pub fn family(&self) -> &Family {
        &self.family
    }

    /// Whether `node` has been expanded.
    #[inline]
    pub fn is_visited(&self, node: Node) -> bool {
        self.visited.contains(&node.key())
    }

    /// Number of non-target nodes expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}

impl<P: Pather + ?Sized> Iterator for SearchEngine<'_, P> {
    type Item = StepEvent;

    #[inline]
    fn next(&mut self) -> Option<StepEvent> {
        self.advance()
    }
}

impl<P: Pather + ?Sized> FusedIterator for SearchEngine<'_, P> {}

/// Start a search over `grid` with the given strategy.
pub fn search<W>(
    strategy: Strategy,
    root: Node,
    target: Node,
    grid: &GraphGrid,
    walls: W,
) -> Result<SearchEngine<'_>, InvalidEndpoint>
where
    W: IntoIterator<Item = NodeKey>,
{
    SearchEngine::new(grid, strategy, root, target, walls)
}

/// Start a [`Strategy::Breadth`] search over `grid`.
pub fn breadth_search<W>(
    root: Node,
    target: Node,
    grid: &GraphGrid,
    walls: W,
) -> Result<SearchEngine<'_>, InvalidEndpoint>
where
    W: IntoIterator<Item = NodeKey>,
{
    search(Strategy::Breadth, root, target, grid, walls)
}

/// Start a [`Strategy::Greedy`] search over `grid`.
pub fn greedy_search<W>(
    root: Node,
    target: Node,
    grid: &GraphGrid,
    walls: W,
) -> Result<SearchEngine<'_>, InvalidEndpoint>
where
    W: IntoIterator<Item = NodeKey>,
{
    search(Strategy::Greedy, root, target, grid, walls)
}
