//! **gridpath-core** — Grid model for step-observable shortest-path
//! visualization (core types).
//!
//! This crate provides the data model the rest of the *gridpath* workspace
//! operates on: a geometry primitive ([`Point`]), per-cell state
//! ([`Cell`], [`CellState`]), and the mutable [`Grid`] that owns topology,
//! obstacle flags and visualization tags.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellState};
pub use geom::Point;
pub use grid::{Edge, Grid, InvalidSizeError};
