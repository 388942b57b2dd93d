//! Stepwise pathfinding on 4-way grids.
//!
//! A [`SearchEngine`] expands one node per [`advance`](SearchEngine::advance)
//! call and reports each expansion as a [`StepEvent`], which lets a caller
//! animate the search or stop it at any step boundary.
//!
//! - **Breadth** ([`Strategy::Breadth`]) expands in FIFO order and finds a
//!   shortest path in hop count.
//! - **Greedy** ([`Strategy::Greedy`]) favours frontier nodes that are close
//!   to the target and were reached by a short path. It is best-effort and
//!   may return longer paths.
//!
//! Paths are rebuilt from a predecessor map ([`Family`]) and always run from
//! the reached node back to the root.

mod engine;
mod error;
mod family;
mod strategy;
mod traits;

pub use engine::{EngineState, SearchEngine, StepEvent, breadth_search, greedy_search, search};
pub use error::{InvalidEndpoint, check_endpoints};
pub use family::{Family, reconstruct};
pub use strategy::{Strategy, StrategyParseError, greedy_score};
pub use traits::Pather;
