//! The [`Cell`] type — position, obstacle flag, and visualization tag.

use crate::geom::Point;

/// The visualization tag of a cell.
///
/// Tags are a presentation projection written by the grid and the search;
/// renderers read them, nothing derives algorithmic truth from them. The
/// obstacle flag on [`Cell`] is the authoritative passability state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Not yet touched by the current search.
    #[default]
    Unvisited,
    /// Discovered and queued, awaiting finalization.
    Frontier,
    /// Popped this step, currently being examined.
    Processing,
    /// Finalized: its recorded distance will not change again.
    Visited,
    /// Impassable cell.
    Obstacle,
    /// On the reconstructed shortest path.
    Path,
    /// The search origin.
    Start,
    /// The search destination.
    Target,
}

/// A single grid cell.
///
/// `pos` is fixed at grid construction. A cell tagged `Start` or `Target`
/// never has `obstacle == true`; [`Grid`](crate::Grid) maintains that.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub obstacle: bool,
    pub state: CellState,
}

impl Cell {
    /// A fresh, passable, unvisited cell at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            obstacle: false,
            state: CellState::Unvisited,
        }
    }
}
