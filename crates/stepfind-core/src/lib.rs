//! **stepfind-core** — core types for stepwise grid pathfinding.
//!
//! This crate provides the structural model every search runs against:
//! grid coordinates ([`Node`]), their canonical hashable encoding
//! ([`NodeKey`]), and the immutable 4-way [`GraphGrid`].

pub mod geom;
pub mod grid;

pub use geom::{KeyParseError, Node, NodeKey};
pub use grid::{GraphGrid, GridError};
