//! The run controller: a [`Session`] owns the grid, endpoints, walls and
//! strategy, and drives one [`SearchEngine`] per [`solve`](Session::solve)
//! call with pacing and cooperative cancellation.
//!
//! Observation state (visited keys, current path, run flags) is shared with
//! any number of [`SessionHandle`]s, which can also stop or reset a run from
//! an observer callback or another thread.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexSet;
use stepfind_core::{GraphGrid, GridError, Node, NodeKey};
use stepfind_paths::{InvalidEndpoint, SearchEngine, StepEvent, Strategy, check_endpoints};

use crate::config::RunConfig;
use crate::context::CancelToken;
use crate::pacing::{Observer, Pacer, SleepPacer};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a call to [`Session::solve`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target was reached; the path is in
    /// [`current_path`](SessionHandle::current_path).
    Solved,
    /// Every reachable node was expanded without reaching the target.
    NotFound,
    /// The run was stopped or reset before it finished.
    Cancelled,
    /// The search could not start. Nothing was changed.
    Invalid(InvalidEndpoint),
}

// ---------------------------------------------------------------------------
// Shared run state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct RunState {
    is_running: bool,
    is_solved: bool,
    visited: IndexSet<NodeKey>,
    path: Vec<NodeKey>,
    /// Token of the run in flight, if any.
    brake: Option<CancelToken>,
}

impl RunState {
    fn cancel_requested(&self) -> bool {
        self.brake.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Drop the run flags and the partial path, keeping visited keys.
    fn settle(&mut self) {
        self.path.clear();
        self.is_running = false;
        self.is_solved = false;
        self.brake = None;
    }

    fn reset(&mut self) {
        if let Some(token) = self.brake.take() {
            token.cancel();
        }
        self.settle();
        self.visited.clear();
    }
}

fn lock(shared: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A point-in-time copy of a session's observation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSnapshot {
    pub is_running: bool,
    pub is_solved: bool,
    pub cancel_requested: bool,
    /// Expanded nodes in expansion order.
    pub visited: IndexSet<NodeKey>,
    /// Latest reconstructed path, target first. Only a route when solved.
    pub path: Vec<NodeKey>,
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// Cloneable view of a session's run state.
///
/// Handles stay valid for the lifetime of the session and may be sent to
/// other threads.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    shared: Arc<Mutex<RunState>>,
}

impl SessionHandle {
    /// Ask the run in flight to stop at its next step boundary. No-op when
    /// nothing is running.
    pub fn stop(&self) {
        let state = lock(&self.shared);
        if !state.is_running {
            return;
        }
        if let Some(token) = &state.brake {
            log::debug!("stop requested");
            token.cancel();
        }
    }

    /// Clear visited keys, the path, and every run flag. A run in flight is
    /// cancelled. Idempotent.
    pub fn reset(&self) {
        lock(&self.shared).reset();
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).is_running
    }

    pub fn is_solved(&self) -> bool {
        lock(&self.shared).is_solved
    }

    /// Whether a stop was requested for the run in flight.
    pub fn is_cancel_requested(&self) -> bool {
        lock(&self.shared).cancel_requested()
    }

    /// Expanded node keys, in expansion order.
    pub fn visited_keys(&self) -> Vec<NodeKey> {
        lock(&self.shared).visited.iter().copied().collect()
    }

    /// Number of expanded nodes.
    pub fn visited_count(&self) -> usize {
        lock(&self.shared).visited.len()
    }

    /// Latest reconstructed path, target first. Authoritative only once
    /// [`is_solved`](Self::is_solved).
    pub fn current_path(&self) -> Vec<NodeKey> {
        lock(&self.shared).path.clone()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let state = lock(&self.shared);
        RunSnapshot {
            is_running: state.is_running,
            is_solved: state.is_solved,
            cancel_requested: state.cancel_requested(),
            visited: state.visited.clone(),
            path: state.path.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A pathfinding session: the configuration a search runs against, plus the
/// observation state of the latest run.
///
/// [`solve`](Self::solve) borrows the session mutably, so grid, endpoints,
/// walls and strategy are frozen for the whole run and a second run cannot
/// start while one is in flight.
#[derive(Debug)]
pub struct Session {
    config: RunConfig,
    grid: GraphGrid,
    strategy: Strategy,
    root: Option<Node>,
    target: Option<Node>,
    walls: IndexSet<NodeKey>,
    handle: SessionHandle,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}

impl Session {
    /// Create a session over an empty `0 × 0` grid.
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            grid: GraphGrid::default(),
            strategy: config.strategy,
            root: None,
            target: None,
            walls: IndexSet::new(),
            handle: SessionHandle {
                shared: Arc::new(Mutex::new(RunState::default())),
            },
        }
    }

    /// Create a session over a `rows × cols` grid.
    pub fn with_grid(rows: i32, cols: i32, config: RunConfig) -> Result<Self, GridError> {
        let mut session = Self::new(config);
        session.set_grid_size(rows, cols)?;
        Ok(session)
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// A handle sharing this session's run state.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    // -- grid ---------------------------------------------------------------

    pub fn grid(&self) -> &GraphGrid {
        &self.grid
    }

    /// Rebuild the grid. Observation state from earlier runs is reset;
    /// endpoints and walls are kept, and endpoints outside the new bounds
    /// read as unset until the grid grows back.
    pub fn set_grid_size(&mut self, rows: i32, cols: i32) -> Result<(), GridError> {
        self.grid = GraphGrid::build(rows, cols)?;
        self.handle.reset();
        Ok(())
    }

    // -- strategy -----------------------------------------------------------

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    // -- endpoints ----------------------------------------------------------

    /// The root, if set and inside the current grid.
    pub fn root(&self) -> Option<Node> {
        self.root.filter(|&n| self.grid.contains(n))
    }

    /// The target, if set and inside the current grid.
    pub fn target(&self) -> Option<Node> {
        self.target.filter(|&n| self.grid.contains(n))
    }

    pub fn set_root(&mut self, root: impl Into<Option<Node>>) {
        self.root = root.into();
    }

    pub fn set_target(&mut self, target: impl Into<Option<Node>>) {
        self.target = target.into();
    }

    // -- walls --------------------------------------------------------------

    /// Wall keys in the order they were added.
    pub fn walls(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.walls.iter().copied()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn is_wall(&self, key: impl Into<NodeKey>) -> bool {
        self.walls.contains(&key.into())
    }

    /// Returns `false` if it was already a wall.
    pub fn add_wall(&mut self, key: impl Into<NodeKey>) -> bool {
        self.walls.insert(key.into())
    }

    /// Returns `false` if it was not a wall.
    pub fn remove_wall(&mut self, key: impl Into<NodeKey>) -> bool {
        self.walls.shift_remove(&key.into())
    }

    /// Flip wall membership. Returns whether it is a wall afterwards.
    pub fn toggle_wall(&mut self, key: impl Into<NodeKey>) -> bool {
        let key = key.into();
        if self.walls.shift_remove(&key) {
            false
        } else {
            self.walls.insert(key);
            true
        }
    }

    /// Replace the wall set.
    pub fn set_walls<I, K>(&mut self, walls: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        self.walls = walls.into_iter().map(Into::into).collect();
    }

    pub fn clear_walls(&mut self) {
        self.walls.clear();
    }

    // -- run control --------------------------------------------------------

    /// Run a search to completion, pausing [`RunConfig::pacing`] between
    /// steps.
    pub fn solve(&mut self) -> Outcome {
        let mut pacer = SleepPacer::new(self.config.pacing);
        self.solve_with(&mut |_: &StepEvent| {}, &mut pacer)
    }

    /// Run a search to completion, reporting every step to `observer` and
    /// calling `pacer` between steps.
    ///
    /// Cancellation is checked before each step is recorded; a cancelled run
    /// is reset and reports [`Outcome::Cancelled`].
    pub fn solve_with<O, P>(&mut self, observer: &mut O, pacer: &mut P) -> Outcome
    where
        O: Observer + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut engine = match self.start() {
            Ok(engine) => engine,
            Err(e) => {
                log::warn!("cannot solve: {e}");
                return Outcome::Invalid(e);
            }
        };

        let token = CancelToken::new();
        {
            let mut state = lock(&self.handle.shared);
            state.reset();
            state.is_running = true;
            state.brake = Some(token.clone());
        }
        log::debug!(
            "{} search {} -> {} started with {} walls",
            engine.strategy(),
            engine.root(),
            engine.target(),
            self.walls.len()
        );

        let mut steps = 0usize;
        while let Some(step) = engine.advance() {
            {
                let mut state = lock(&self.handle.shared);
                if token.is_cancelled() {
                    state.reset();
                    drop(state);
                    log::info!("search cancelled after {steps} steps");
                    return Outcome::Cancelled;
                }
                state.visited.insert(step.node.key());
                state.path = step.path.iter().map(|n| n.key()).collect();
                if step.found {
                    state.is_solved = true;
                    state.is_running = false;
                    state.brake = None;
                }
            }
            steps += 1;
            log::trace!("step {steps}: {} (found: {})", step.node, step.found);

            observer.on_step(&step);

            if step.found {
                log::info!("search solved in {steps} steps, path of {} nodes", step.path.len());
                return Outcome::Solved;
            }
            pacer.pause();
        }

        let mut state = lock(&self.handle.shared);
        if token.is_cancelled() {
            state.reset();
            drop(state);
            log::info!("search cancelled after {steps} steps");
            return Outcome::Cancelled;
        }
        state.settle();
        drop(state);
        log::info!("search exhausted after {steps} steps, no path");
        Outcome::NotFound
    }

    fn start(&self) -> Result<SearchEngine<'_>, InvalidEndpoint> {
        let (root, target) = check_endpoints(&self.grid, self.root, self.target)?;
        SearchEngine::new(
            &self.grid,
            self.strategy,
            root,
            target,
            self.walls.iter().copied(),
        )
    }

    /// See [`SessionHandle::stop`].
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// See [`SessionHandle::reset`]. Root, target and walls are kept.
    pub fn reset(&self) {
        self.handle.reset();
    }

    /// [`reset`](Self::reset), then forget root, target and walls.
    pub fn clear(&mut self) {
        self.handle.reset();
        self.root = None;
        self.target = None;
        self.walls.clear();
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn is_solved(&self) -> bool {
        self.handle.is_solved()
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.handle.is_cancel_requested()
    }

    pub fn visited_keys(&self) -> Vec<NodeKey> {
        self.handle.visited_keys()
    }

    pub fn current_path(&self) -> Vec<NodeKey> {
        self.handle.current_path()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.handle.snapshot()
    }
}
