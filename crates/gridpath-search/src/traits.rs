use gridpath_core::{CellState, Edge, Grid, Point};

/// The topology a steppable search runs over.
///
/// The search never inspects grid geometry directly: bounds, edge costs and
/// obstacle state all come through this interface, and the search's only
/// output besides its own tables is visualization marks written back
/// through [`mark`](SearchSpace::mark).
pub trait SearchSpace {
    /// Total number of cells; distance/predecessor tables are sized to it.
    fn cell_count(&self) -> usize;

    /// Flat index for `p`, or `None` if `p` is outside the space.
    fn index_of(&self, p: Point) -> Option<usize>;

    /// Position for a flat index below [`cell_count`](SearchSpace::cell_count).
    fn point_at(&self, index: usize) -> Point;

    /// Append the in-bounds neighbors of `p` with their edge costs into
    /// `out` (cleared first). Obstacle cells are included; the search
    /// filters them.
    fn neighbors(&self, p: Point, out: &mut Vec<Edge>);

    /// Whether the cell at `p` is impassable.
    fn is_blocked(&self, p: Point) -> bool;

    /// Write a visualization mark at `p`. Presentation side channel only.
    fn mark(&mut self, p: Point, state: CellState);

    /// Clear visualization marks from a previous run, keeping obstacles.
    fn reset_marks(&mut self);
}

impl SearchSpace for Grid {
    #[inline]
    fn cell_count(&self) -> usize {
        Grid::cell_count(self)
    }

    #[inline]
    fn index_of(&self, p: Point) -> Option<usize> {
        Grid::index_of(self, p)
    }

    #[inline]
    fn point_at(&self, index: usize) -> Point {
        Grid::point_at(self, index)
    }

    #[inline]
    fn neighbors(&self, p: Point, out: &mut Vec<Edge>) {
        Grid::neighbors(self, p, out);
    }

    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        self.is_obstacle(p)
    }

    #[inline]
    fn mark(&mut self, p: Point, state: CellState) {
        self.set_state(p, state);
    }

    #[inline]
    fn reset_marks(&mut self) {
        self.reset_states();
    }
}
