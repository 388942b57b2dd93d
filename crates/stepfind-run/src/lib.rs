//! **stepfind-run** — paced, cancellable runs of a stepfind search.
//!
//! A [`Session`] holds everything a search needs (grid, root, target, walls,
//! strategy) and drives a fresh [`SearchEngine`](stepfind_paths::SearchEngine)
//! on every [`solve`](Session::solve), pausing between steps so a front end
//! can animate progress. A [`SessionHandle`] shares the session's
//! observation state and can [`stop`](SessionHandle::stop) or
//! [`reset`](SessionHandle::reset) a run from a step observer or another
//! thread; cancellation takes effect at the next step boundary.
//!
//! ```
//! use stepfind_core::Node;
//! use stepfind_run::{NoPacing, Outcome, RunConfig, Session};
//! use stepfind_paths::{StepEvent, Strategy};
//!
//! let config = RunConfig { strategy: Strategy::Breadth, ..RunConfig::default() };
//! let mut session = Session::with_grid(3, 3, config).unwrap();
//! session.set_root(Node::new(0, 0));
//! session.set_target(Node::new(2, 2));
//!
//! let outcome = session.solve_with(&mut |_: &StepEvent| {}, &mut NoPacing);
//! assert_eq!(outcome, Outcome::Solved);
//! assert_eq!(session.current_path().len(), 5);
//! ```

pub mod config;
pub mod context;
pub mod pacing;
pub mod session;

pub use config::{DEFAULT_PACING, RunConfig};
pub use context::CancelToken;
pub use pacing::{NoPacing, Observer, Pacer, SleepPacer};
pub use session::{Outcome, RunSnapshot, Session, SessionHandle};
