use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridpath_core::{CellState, Edge, Point};

use crate::traits::SearchSpace;

/// Predecessor sentinel: no predecessor recorded.
const NONE: usize = usize::MAX;

/// Lifecycle of a [`Dijkstra`] search.
///
/// `Completed` is terminal: only [`Dijkstra::start`] or
/// [`Dijkstra::reset`] leave it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// No active search data.
    #[default]
    Idle,
    /// A search is in progress; stepping advances it.
    Running,
    /// The search ended, either by reaching the target or by exhausting
    /// the frontier.
    Completed,
}

/// A frontier entry: a cell index with the tentative distance it was
/// queued at. Ordered by ascending distance for the max-[`BinaryHeap`].
#[derive(Copy, Clone, Debug)]
struct FrontierEntry {
    index: usize,
    dist: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist).is_eq()
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (a max-heap) pops the smallest distance.
        other.dist.total_cmp(&self.dist)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest-path search advanced one frontier pop at a time.
///
/// Everything that must survive between steps (frontier, distance and
/// predecessor tables, completion flags) lives in this object rather than
/// on a call stack, so a driving loop can suspend the search between any
/// two relaxation steps and render in between. The space is borrowed
/// afresh for every call; the search never stores it.
///
/// The frontier may hold stale duplicate entries for a cell whose distance
/// was improved after it was queued; they are discarded on pop by
/// comparison against the distance table (lazy deletion), which avoids
/// needing a priority queue with in-place decrease-key.
#[derive(Debug, Default)]
pub struct Dijkstra {
    frontier: BinaryHeap<FrontierEntry>,
    dist: Vec<f64>,
    prev: Vec<usize>,
    start: usize,
    target: usize,
    status: SearchStatus,
    reached: bool,
    /// Scratch buffer for neighbor queries, reused across steps.
    nbuf: Vec<Edge>,
}

impl Dijkstra {
    /// Create an idle search with no tables allocated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Whether the search has ended (target reached or frontier exhausted).
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == SearchStatus::Completed
    }

    /// Whether the target was reached. Meaningful once
    /// [`is_completed`](Dijkstra::is_completed) is true.
    #[inline]
    pub fn reached_target(&self) -> bool {
        self.reached
    }

    /// The recorded tentative distance to `p`, or `f64::INFINITY` when `p`
    /// is undiscovered or out of range. Final once `p` has been finalized.
    pub fn distance_to<S: SearchSpace>(&self, space: &S, p: Point) -> f64 {
        space
            .index_of(p)
            .and_then(|i| self.dist.get(i))
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Begin a new search from `from` to `to`, discarding any previous one.
    ///
    /// Tables are re-initialized (distance ∞, no predecessor), the frontier
    /// is seeded with `from` at distance 0, the space's marks from a prior
    /// run are cleared (obstacles kept) and the endpoints tagged. If either
    /// endpoint is outside the space the search stays `Idle`.
    pub fn start<S: SearchSpace>(&mut self, space: &mut S, from: Point, to: Point) {
        self.frontier.clear();
        self.reached = false;
        self.status = SearchStatus::Idle;

        let (Some(si), Some(ti)) = (space.index_of(from), space.index_of(to)) else {
            self.dist.clear();
            self.prev.clear();
            return;
        };

        let n = space.cell_count();
        self.dist.clear();
        self.dist.resize(n, f64::INFINITY);
        self.prev.clear();
        self.prev.resize(n, NONE);

        space.reset_marks();

        self.start = si;
        self.target = ti;
        self.dist[si] = 0.0;
        self.frontier.push(FrontierEntry { index: si, dist: 0.0 });
        space.mark(from, CellState::Start);
        space.mark(to, CellState::Target);
        self.status = SearchStatus::Running;
    }

    /// Discard all search state and return to `Idle`.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.dist.clear();
        self.prev.clear();
        self.reached = false;
        self.status = SearchStatus::Idle;
    }

    /// Advance the search by exactly one frontier-pop unit of work.
    ///
    /// Returns `true` only on the step that first reaches the target.
    /// After completion (and while `Idle`) this is a no-op returning
    /// `false`, so a driver may poll it carelessly. A step that pops a
    /// stale frontier entry discards it and returns without further work.
    ///
    /// Which of several equal-distance entries pops first is decided by
    /// the heap's internals and the neighbor enumeration order; it shapes
    /// the visual sweep, not the result, and is not a contract.
    pub fn step<S: SearchSpace>(&mut self, space: &mut S) -> bool {
        if self.status != SearchStatus::Running {
            return false;
        }

        let Some(entry) = self.frontier.pop() else {
            // Frontier exhausted: the target is unreachable.
            self.status = SearchStatus::Completed;
            return false;
        };
        let FrontierEntry { index, dist } = entry;

        // Stale duplicate, superseded by a better relaxation: discard.
        if dist != self.dist[index] {
            return false;
        }

        let p = space.point_at(index);
        if index != self.start && index != self.target {
            space.mark(p, CellState::Processing);
        }

        if index == self.target {
            self.reached = true;
            self.status = SearchStatus::Completed;
            return true;
        }

        space.neighbors(p, &mut self.nbuf);
        for edge in &self.nbuf {
            if space.is_blocked(edge.to) {
                continue;
            }
            let Some(ni) = space.index_of(edge.to) else {
                continue;
            };
            let candidate = dist + edge.cost;
            if candidate < self.dist[ni] {
                self.dist[ni] = candidate;
                self.prev[ni] = index;
                self.frontier.push(FrontierEntry {
                    index: ni,
                    dist: candidate,
                });
                if ni != self.start && ni != self.target {
                    space.mark(edge.to, CellState::Frontier);
                }
            }
        }

        if index != self.start && index != self.target {
            space.mark(p, CellState::Visited);
        }
        false
    }

    /// Reconstruct the shortest path to `to` in start-to-target order.
    ///
    /// Returns an empty vector if the target was never reached or `to` is
    /// out of range. Pure query; may be called repeatedly after
    /// completion.
    pub fn path<S: SearchSpace>(&self, space: &S, to: Point) -> Vec<Point> {
        let mut path = Vec::new();
        if !self.reached {
            return path;
        }
        let Some(ti) = space.index_of(to) else {
            return path;
        };
        if ti >= self.prev.len() {
            return path;
        }
        let mut current = ti;
        while current != NONE {
            path.push(space.point_at(current));
            current = self.prev[current];
        }
        path.reverse();
        path
    }
}
