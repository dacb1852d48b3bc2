//! **gridpath-search** — step-observable single-source shortest-path search.
//!
//! The usual "run Dijkstra to completion" loop is rearchitected here as an
//! explicit state object: [`Dijkstra`] holds the frontier, distance and
//! predecessor tables across suspension points, and [`Dijkstra::step`]
//! advances the search by exactly one frontier pop. A driving loop can
//! therefore interleave rendering between steps and watch frontier growth,
//! visitation order and the final path emerge.
//!
//! The algorithm operates on any [`SearchSpace`] — neighbor enumeration,
//! obstacle state and visualization-mark writes are delegated to it; an
//! implementation for [`gridpath_core::Grid`] is provided.

mod dijkstra;
mod traits;

pub use dijkstra::{Dijkstra, SearchStatus};
pub use traits::SearchSpace;
