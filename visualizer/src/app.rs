//! Application state machine: edit phase, stepping phase, path animation.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use gridpath_core::{CellState, Grid, InvalidSizeError, Point};
use gridpath_search::Dijkstra;

use crate::scatter::{self, ScatterConfig};

pub const GRID_WIDTH: i32 = 25;
pub const GRID_HEIGHT: i32 = 25;

/// Terminal columns per grid cell (two columns make cells roughly square).
pub const CELL_COLS: u16 = 2;
/// Terminal rows above the grid reserved for the status line.
pub const HEADER_ROWS: u16 = 1;

const DEFAULT_DELAY: Duration = Duration::from_millis(50);
const MIN_DELAY: Duration = Duration::from_millis(1);
const MAX_DELAY: Duration = Duration::from_millis(500);
const DELAY_STEP: Duration = Duration::from_millis(5);

/// What the driving loop is currently doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Editing: obstacle/endpoint changes accepted.
    Idle,
    /// Stepping the search once per delay tick; edits rejected.
    Running,
    /// Search ended; the reconstructed path animates in, edits accepted.
    Finished,
}

/// The visualizer application.
pub struct App {
    grid: Grid,
    search: Dijkstra,
    phase: Phase,
    delay: Duration,
    last_step: Instant,
    last_path: Instant,
    path: Vec<Point>,
    path_drawn: usize,
    quit: bool,
}

impl App {
    /// Build the initial grid with endpoints in opposite corners and a
    /// random obstacle layout.
    pub fn new() -> Result<Self, InvalidSizeError> {
        let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT)?;
        grid.set_start(Point::new(0, 0));
        grid.set_target(Point::new(GRID_WIDTH - 1, GRID_HEIGHT - 1));
        let mut rng = rand::rng();
        scatter::scatter(&mut grid, &mut rng, &ScatterConfig::default());
        grid.reset_states();

        let now = Instant::now();
        Ok(Self {
            grid,
            search: Dijkstra::new(),
            phase: Phase::Idle,
            delay: DEFAULT_DELAY,
            last_step: now,
            last_path: now,
            path: Vec::new(),
            path_drawn: 0,
            quit: false,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Map a terminal position to the grid cell under it.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Point> {
        if row < HEADER_ROWS {
            return None;
        }
        let p = Point::new(
            (column / CELL_COLS) as i32,
            (row - HEADER_ROWS) as i32,
        );
        if self.grid.contains(p) { Some(p) } else { None }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn update(&mut self, ev: &Event) {
        match ev {
            Event::Key(KeyEvent {
                code, modifiers, ..
            }) => self.handle_key(*code, *modifiers),
            Event::Mouse(me) => self.handle_mouse(me),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            KeyCode::Char(' ') => {
                if self.phase != Phase::Running {
                    self.start_search();
                }
            }
            KeyCode::Char('r') => self.rescatter(),
            KeyCode::Char('c') => self.clear_obstacles(),
            KeyCode::Char('d') => {
                if self.phase != Phase::Running {
                    let enabled = !self.grid.diagonal();
                    self.grid.set_diagonal(enabled);
                    self.grid.reset_states();
                }
            }
            KeyCode::Up => {
                self.delay = self.delay.saturating_sub(DELAY_STEP).max(MIN_DELAY);
            }
            KeyCode::Down => {
                self.delay = (self.delay + DELAY_STEP).min(MAX_DELAY);
            }
            _ => {}
        }
    }

    /// Grid edits are accepted only while the search is not running — the
    /// search core documents, but does not defend, that precondition.
    fn handle_mouse(&mut self, me: &MouseEvent) {
        if self.phase == Phase::Running {
            return;
        }
        let MouseEventKind::Down(button) = me.kind else {
            return;
        };
        let Some(p) = self.cell_at(me.column, me.row) else {
            return;
        };
        match button {
            MouseButton::Left => self.grid.toggle_obstacle(p),
            MouseButton::Right => {
                if me.modifiers.contains(KeyModifiers::SHIFT) {
                    self.grid.set_target(p);
                } else {
                    self.grid.set_start(p);
                }
                self.grid.reset_states();
            }
            MouseButton::Middle => return,
        }
        self.abandon_search();
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn start_search(&mut self) {
        let (Some(from), Some(to)) = (self.grid.start(), self.grid.target()) else {
            return;
        };
        self.search.start(&mut self.grid, from, to);
        self.path.clear();
        self.path_drawn = 0;
        self.phase = Phase::Running;
        self.last_step = Instant::now();
    }

    fn rescatter(&mut self) {
        self.grid.reset_all();
        let mut rng = rand::rng();
        scatter::scatter(&mut self.grid, &mut rng, &ScatterConfig::default());
        self.grid.reset_states();
        self.abandon_search();
    }

    fn clear_obstacles(&mut self) {
        self.grid.clear_obstacles();
        self.abandon_search();
    }

    fn abandon_search(&mut self) {
        self.search.reset();
        self.path.clear();
        self.path_drawn = 0;
        self.phase = Phase::Idle;
    }

    // -----------------------------------------------------------------------
    // Ticking
    // -----------------------------------------------------------------------

    /// Advance time-driven work: one search step per delay tick while
    /// running, one revealed path cell per delay tick once finished.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::Running => {
                if now.duration_since(self.last_step) >= self.delay {
                    let reached = self.search.step(&mut self.grid);
                    self.last_step = now;
                    if self.search.is_completed() {
                        self.phase = Phase::Finished;
                        if let Some(to) = self.grid.target() {
                            log::info!(
                                "search completed: reached={}, distance={:.3}",
                                self.search.reached_target(),
                                self.search.distance_to(&self.grid, to)
                            );
                            if reached {
                                self.path = self.search.path(&self.grid, to);
                                self.path_drawn = 0;
                                self.last_path = now;
                            }
                        }
                    }
                }
            }
            Phase::Finished => {
                if self.path_drawn < self.path.len()
                    && now.duration_since(self.last_path) >= self.delay
                {
                    let p = self.path[self.path_drawn];
                    if Some(p) != self.grid.start() && Some(p) != self.grid.target() {
                        self.grid.set_state(p, CellState::Path);
                    }
                    self.path_drawn += 1;
                    self.last_path = now;
                }
            }
            Phase::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn left_click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn cell_mapping_accounts_for_header_and_cell_width() {
        let app = App::new().unwrap();
        assert_eq!(app.cell_at(0, 0), None); // status line
        assert_eq!(app.cell_at(0, HEADER_ROWS), Some(Point::new(0, 0)));
        assert_eq!(app.cell_at(5, HEADER_ROWS + 3), Some(Point::new(2, 3)));
        assert_eq!(app.cell_at(200, 5), None);
    }

    #[test]
    fn edits_are_rejected_while_running() {
        let mut app = App::new().unwrap();
        app.update(&key(KeyCode::Char(' ')));
        assert_eq!(app.phase(), Phase::Running);

        let probe = Point::new(5, 5);
        let was_obstacle = app.grid().is_obstacle(probe);
        // (5,5) is at terminal column 10, row HEADER_ROWS + 5.
        app.update(&left_click(10, HEADER_ROWS + 5));
        assert_eq!(app.grid().is_obstacle(probe), was_obstacle);

        // Diagonal toggling is also rejected mid-run.
        let diag = app.grid().diagonal();
        app.update(&key(KeyCode::Char('d')));
        assert_eq!(app.grid().diagonal(), diag);
    }

    #[test]
    fn editing_aborts_a_finished_search() {
        let mut app = App::new().unwrap();
        app.update(&key(KeyCode::Char(' ')));
        // Drive to completion with a fake clock that outruns the delay.
        let mut now = Instant::now();
        for _ in 0..100_000 {
            now += Duration::from_secs(1);
            app.tick(now);
            if app.phase() != Phase::Running {
                break;
            }
        }
        assert_eq!(app.phase(), Phase::Finished);

        app.update(&left_click(10, HEADER_ROWS + 5));
        assert_eq!(app.phase(), Phase::Idle);
    }

    #[test]
    fn delay_clamps_to_its_range() {
        let mut app = App::new().unwrap();
        for _ in 0..200 {
            app.update(&key(KeyCode::Up));
        }
        assert_eq!(app.delay(), Duration::from_millis(1));
        for _ in 0..200 {
            app.update(&key(KeyCode::Down));
        }
        assert_eq!(app.delay(), Duration::from_millis(500));
    }
}
