//! The [`Grid`] type — authoritative topology and per-cell mutable state.
//!
//! A `Grid` owns a fixed-size row-major buffer of [`Cell`]s, the diagonal
//! connectivity flag, and the current start/target designation. Searches
//! borrow it per call; they read topology (neighbors, costs, obstacle
//! flags) and write visualization tags, never obstacle flags or the
//! start/target designation.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::geom::Point;

/// Cost of an orthogonal hop.
const ORTHO_COST: f64 = 1.0;
/// Cost of a diagonal hop.
const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Orthogonal direction offsets: up, down, left, right.
const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
];

/// Diagonal direction offsets: up-left, up-right, down-left, down-right.
const DIAGONAL: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(1, 1),
];

// ---------------------------------------------------------------------------
// Edge / InvalidSizeError
// ---------------------------------------------------------------------------

/// One traversable hop out of a cell: the neighbor position and the edge
/// cost (1 for orthogonal moves, √2 for diagonal moves).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: Point,
    pub cost: f64,
}

/// Error returned by [`Grid::new`] for non-positive dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidSizeError {
    pub width: i32,
    pub height: i32,
}

impl fmt::Display for InvalidSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid dimensions must be positive, got {}x{}",
            self.width, self.height
        )
    }
}

impl std::error::Error for InvalidSizeError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size grid of [`Cell`]s with optional diagonal connectivity.
///
/// At most one cell is tagged `Start` and one `Target` at any time; both
/// designations are unset after construction until assigned through
/// [`set_start`](Grid::set_start) / [`set_target`](Grid::set_target).
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    diagonal: bool,
    start: Option<usize>,
    target: Option<usize>,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with passable
    /// unvisited cells. Fails on non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, InvalidSizeError> {
        if width <= 0 || height <= 0 {
            return Err(InvalidSizeError { width, height });
        }
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Point::new(x, y)));
            }
        }
        Ok(Self {
            width,
            height,
            diagonal: false,
            start: None,
            target: None,
            cells,
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Convert a point to a flat row-major index. `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// Convert a flat index back to a point.
    ///
    /// Callers must pass an index below [`cell_count`](Grid::cell_count).
    #[inline]
    pub fn point_at(&self, index: usize) -> Point {
        let w = self.width as usize;
        Point::new((index % w) as i32, (index / w) as i32)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The visualization tag at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.cell(p).map(|c| c.state)
    }

    /// Whether the cell at `p` is an obstacle. Out-of-bounds cells are not.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| c.obstacle)
    }

    /// Whether diagonal connectivity is enabled.
    #[inline]
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }

    /// Enable or disable diagonal connectivity.
    #[inline]
    pub fn set_diagonal(&mut self, enabled: bool) {
        self.diagonal = enabled;
    }

    /// The current start cell position, if assigned.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start.map(|i| self.point_at(i))
    }

    /// The current target cell position, if assigned.
    #[inline]
    pub fn target(&self) -> Option<Point> {
        self.target.map(|i| self.point_at(i))
    }

    /// Flat index of the start cell, if assigned.
    #[inline]
    pub fn start_index(&self) -> Option<usize> {
        self.start
    }

    /// Flat index of the target cell, if assigned.
    #[inline]
    pub fn target_index(&self) -> Option<usize> {
        self.target
    }

    // -----------------------------------------------------------------------
    // Neighbor enumeration
    // -----------------------------------------------------------------------

    /// Append the in-bounds neighbors of `p` to `out` (cleared first).
    ///
    /// Orthogonal neighbors come first in the fixed order up, down, left,
    /// right (cost 1). When diagonal connectivity is enabled the diagonals
    /// follow as up-left, up-right, down-left, down-right (cost √2). The
    /// order only influences tie-breaking among equal-cost expansions and
    /// is not a contract. Obstacle cells are included; filtering them is
    /// the search's job.
    pub fn neighbors(&self, p: Point, out: &mut Vec<Edge>) {
        out.clear();
        if !self.contains(p) {
            return;
        }
        for d in CARDINAL {
            let n = p + d;
            if self.contains(n) {
                out.push(Edge {
                    to: n,
                    cost: ORTHO_COST,
                });
            }
        }
        if self.diagonal {
            for d in DIAGONAL {
                let n = p + d;
                if self.contains(n) {
                    out.push(Edge {
                        to: n,
                        cost: DIAGONAL_COST,
                    });
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Overwrite the visualization tag at `p`. No-op if out of bounds.
    ///
    /// This is the write-only side channel used by the search and by path
    /// animation; it never touches the obstacle flag or the start/target
    /// designation.
    pub fn set_state(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.index_of(p) {
            self.cells[i].state = state;
        }
    }

    /// Flip the obstacle flag (and matching tag) at `p`.
    ///
    /// No-op when `p` is out of bounds or is the start or target cell;
    /// those can never become obstacles.
    pub fn toggle_obstacle(&mut self, p: Point) {
        let Some(i) = self.index_of(p) else { return };
        if self.start == Some(i) || self.target == Some(i) {
            return;
        }
        let cell = &mut self.cells[i];
        cell.obstacle = !cell.obstacle;
        cell.state = if cell.obstacle {
            CellState::Obstacle
        } else {
            CellState::Unvisited
        };
    }

    /// Set the obstacle flag (and matching tag) at `p` to `obstacle`.
    ///
    /// Bulk-mutation entry for obstacle generators; same start/target
    /// immunity as [`toggle_obstacle`](Grid::toggle_obstacle).
    pub fn set_obstacle(&mut self, p: Point, obstacle: bool) {
        let Some(i) = self.index_of(p) else { return };
        if self.start == Some(i) || self.target == Some(i) {
            return;
        }
        let cell = &mut self.cells[i];
        cell.obstacle = obstacle;
        cell.state = if obstacle {
            CellState::Obstacle
        } else {
            CellState::Unvisited
        };
    }

    /// Relocate the start cell to `p`.
    ///
    /// No-op if `p` already is the start or is out of bounds. The previous
    /// start cell's tag reverts to `Obstacle` if its flag is set, else
    /// `Unvisited`, and its flag is forced false; the new cell's flag is
    /// forced false and its tag set to `Start`.
    pub fn set_start(&mut self, p: Point) {
        let Some(i) = self.index_of(p) else { return };
        if self.start == Some(i) {
            return;
        }
        if let Some(old) = self.start {
            let cell = &mut self.cells[old];
            cell.state = if cell.obstacle {
                CellState::Obstacle
            } else {
                CellState::Unvisited
            };
            cell.obstacle = false;
        }
        self.start = Some(i);
        let cell = &mut self.cells[i];
        cell.obstacle = false;
        cell.state = CellState::Start;
    }

    /// Relocate the target cell to `p`. Mirrors [`set_start`](Grid::set_start).
    pub fn set_target(&mut self, p: Point) {
        let Some(i) = self.index_of(p) else { return };
        if self.target == Some(i) {
            return;
        }
        if let Some(old) = self.target {
            let cell = &mut self.cells[old];
            cell.state = if cell.obstacle {
                CellState::Obstacle
            } else {
                CellState::Unvisited
            };
            cell.obstacle = false;
        }
        self.target = Some(i);
        let cell = &mut self.cells[i];
        cell.obstacle = false;
        cell.state = CellState::Target;
    }

    /// Reset visualization tags, keeping obstacle flags.
    ///
    /// Every non-obstacle cell reverts to `Unvisited`, every obstacle cell
    /// to `Obstacle`, then the start/target tags are re-applied. Used
    /// between search runs without discarding user-drawn obstacles.
    pub fn reset_states(&mut self) {
        for cell in &mut self.cells {
            cell.state = if cell.obstacle {
                CellState::Obstacle
            } else {
                CellState::Unvisited
            };
        }
        self.apply_endpoints();
    }

    /// Clear all obstacle flags, reset every tag to `Unvisited`, then
    /// re-apply the start/target tags.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.obstacle = false;
            cell.state = CellState::Unvisited;
        }
        self.apply_endpoints();
    }

    /// Editor-driven clear of all obstacles; same effect as
    /// [`reset_all`](Grid::reset_all).
    #[inline]
    pub fn clear_obstacles(&mut self) {
        self.reset_all();
    }

    /// Re-apply the `Start`/`Target` tags and force those cells passable.
    fn apply_endpoints(&mut self) {
        if let Some(i) = self.start {
            self.cells[i].obstacle = false;
            self.cells[i].state = CellState::Start;
        }
        if let Some(i) = self.target {
            self.cells[i].obstacle = false;
            self.cells[i].state = CellState::Target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn grid_3x3() -> Grid {
        Grid::new(3, 3).unwrap()
    }

    #[test]
    fn new_sets_positions() {
        let g = Grid::new(4, 3).unwrap();
        assert_eq!(g.cell_count(), 12);
        assert_eq!(g.cell(Point::new(2, 1)).unwrap().pos, Point::new(2, 1));
        assert_eq!(g.state(Point::new(0, 0)), Some(CellState::Unvisited));
        assert_eq!(g.start(), None);
        assert_eq!(g.target(), None);
    }

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert!(Grid::new(0, 5).is_err());
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(-1, 3).is_err());
        let err = Grid::new(0, 0).unwrap_err();
        assert_eq!(err, InvalidSizeError { width: 0, height: 0 });
    }

    #[test]
    fn index_point_round_trip() {
        let g = Grid::new(5, 4).unwrap();
        for idx in 0..g.cell_count() {
            let p = g.point_at(idx);
            assert_eq!(g.index_of(p), Some(idx));
        }
        assert_eq!(g.index_of(Point::new(5, 0)), None);
        assert_eq!(g.index_of(Point::new(0, -1)), None);
    }

    #[test]
    fn neighbors_orthogonal_order_and_cost() {
        let g = grid_3x3();
        let mut out = Vec::new();
        g.neighbors(Point::new(1, 1), &mut out);
        let pts: Vec<Point> = out.iter().map(|e| e.to).collect();
        // up, down, left, right
        assert_eq!(
            pts,
            vec![
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1),
            ]
        );
        assert!(out.iter().all(|e| e.cost == 1.0));
    }

    #[test]
    fn neighbors_corner_clipped() {
        let g = grid_3x3();
        let mut out = Vec::new();
        g.neighbors(Point::new(0, 0), &mut out);
        assert_eq!(out.len(), 2); // down, right
        g.neighbors(Point::new(2, 2), &mut out);
        assert_eq!(out.len(), 2); // up, left
    }

    #[test]
    fn neighbors_with_diagonals() {
        let mut g = grid_3x3();
        g.set_diagonal(true);
        let mut out = Vec::new();
        g.neighbors(Point::new(1, 1), &mut out);
        assert_eq!(out.len(), 8);
        // The four diagonal edges come after the cardinals and cost √2.
        for e in &out[4..] {
            assert_eq!(e.cost, SQRT_2);
        }
        g.neighbors(Point::new(0, 0), &mut out);
        assert_eq!(out.len(), 3); // down, right, down-right
    }

    #[test]
    fn neighbors_out_of_bounds_is_empty() {
        let g = grid_3x3();
        let mut out = vec![Edge {
            to: Point::ZERO,
            cost: 1.0,
        }];
        g.neighbors(Point::new(9, 9), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn neighbors_include_obstacles() {
        let mut g = grid_3x3();
        g.toggle_obstacle(Point::new(1, 0));
        let mut out = Vec::new();
        g.neighbors(Point::new(1, 1), &mut out);
        // Filtering obstacles is the search's responsibility.
        assert!(out.iter().any(|e| e.to == Point::new(1, 0)));
    }

    #[test]
    fn toggle_obstacle_flips_flag_and_tag() {
        let mut g = grid_3x3();
        let p = Point::new(1, 1);
        g.toggle_obstacle(p);
        assert!(g.is_obstacle(p));
        assert_eq!(g.state(p), Some(CellState::Obstacle));
        g.toggle_obstacle(p);
        assert!(!g.is_obstacle(p));
        assert_eq!(g.state(p), Some(CellState::Unvisited));
    }

    #[test]
    fn start_and_target_are_obstacle_immune() {
        let mut g = grid_3x3();
        g.set_start(Point::new(0, 0));
        g.set_target(Point::new(2, 2));
        g.toggle_obstacle(Point::new(0, 0));
        g.toggle_obstacle(Point::new(2, 2));
        g.set_obstacle(Point::new(0, 0), true);
        assert!(!g.is_obstacle(Point::new(0, 0)));
        assert!(!g.is_obstacle(Point::new(2, 2)));
        assert_eq!(g.state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Point::new(2, 2)), Some(CellState::Target));
    }

    #[test]
    fn relocation_preserves_single_occupancy() {
        let mut g = grid_3x3();
        g.set_start(Point::new(0, 0));
        g.set_start(Point::new(2, 0));
        let starts = g
            .cells()
            .iter()
            .filter(|c| c.state == CellState::Start)
            .count();
        assert_eq!(starts, 1);
        assert_eq!(g.start(), Some(Point::new(2, 0)));
        assert_eq!(g.state(Point::new(0, 0)), Some(CellState::Unvisited));
    }

    #[test]
    fn relocation_reverts_previous_cell_to_its_obstacle_state() {
        let mut g = grid_3x3();
        g.set_start(Point::new(1, 1));
        // Force an obstacle flag under the start tag, then move away: the
        // old cell must show Obstacle and end up passable (flag forced off).
        if let Some(i) = g.index_of(Point::new(1, 1)) {
            g.cells[i].obstacle = true;
        }
        g.set_start(Point::new(0, 0));
        assert_eq!(g.state(Point::new(1, 1)), Some(CellState::Obstacle));
        assert!(!g.is_obstacle(Point::new(1, 1)));
    }

    #[test]
    fn relocation_to_same_cell_is_noop() {
        let mut g = grid_3x3();
        g.set_start(Point::new(1, 1));
        g.set_start(Point::new(1, 1));
        assert_eq!(g.start(), Some(Point::new(1, 1)));
        assert_eq!(g.state(Point::new(1, 1)), Some(CellState::Start));
    }

    #[test]
    fn reset_states_keeps_obstacles() {
        let mut g = grid_3x3();
        g.set_start(Point::new(0, 0));
        g.set_target(Point::new(2, 2));
        g.toggle_obstacle(Point::new(1, 1));
        g.set_state(Point::new(2, 0), CellState::Visited);
        g.set_state(Point::new(0, 2), CellState::Frontier);
        g.reset_states();
        assert!(g.is_obstacle(Point::new(1, 1)));
        assert_eq!(g.state(Point::new(1, 1)), Some(CellState::Obstacle));
        assert_eq!(g.state(Point::new(2, 0)), Some(CellState::Unvisited));
        assert_eq!(g.state(Point::new(0, 2)), Some(CellState::Unvisited));
        assert_eq!(g.state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Point::new(2, 2)), Some(CellState::Target));
    }

    #[test]
    fn reset_all_clears_obstacles() {
        let mut g = grid_3x3();
        g.set_start(Point::new(0, 0));
        g.toggle_obstacle(Point::new(1, 1));
        g.toggle_obstacle(Point::new(2, 1));
        g.reset_all();
        assert!(g.cells().iter().all(|c| !c.obstacle));
        assert_eq!(g.state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Point::new(1, 1)), Some(CellState::Unvisited));
    }
}
