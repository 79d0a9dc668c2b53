//! A* search over a [`NavGrid`].
//!
//! Scratch state (costs, parents, heap slots, closed flags) lives in a
//! per-search arena indexed by [`CellId`], so any number of searches may
//! borrow the same grid at once.

use crate::pathfinding::grid::{CellId, NavGrid};
use crate::pathfinding::heap::{HeapSlots, IndexedHeap, NOT_IN_HEAP};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

/// Path cost. Wider than cell penalties so penalised paths can't overflow;
/// additions still saturate.
pub type Cost = u64;

/// Straight step cost. Costs are scaled by 10 so a diagonal (√2) is 14.
pub const STRAIGHT_COST: Cost = 10;
pub const DIAGONAL_COST: Cost = 14;

/// Octile distance between two cells, in scaled cost units.
pub fn octile_distance(grid: &NavGrid, a: CellId, b: CellId) -> Cost {
    let d = (grid.cell(a).coord - grid.cell(b).coord).abs();
    let (dx, dy) = (d.x as Cost, d.y as Cost);
    DIAGONAL_COST * dx.min(dy) + STRAIGHT_COST * dx.abs_diff(dy)
}

// ============================================================================
// Results
// ============================================================================

/// Why a search ended without a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathFailure {
    /// Start cell is not walkable
    StartBlocked,
    /// Goal cell is not walkable
    GoalBlocked,
    /// Open set exhausted before reaching the goal
    NoPath,
    /// Caller abandoned the search
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Running,
    Succeeded,
    Failed(PathFailure),
}

impl SearchState {
    pub fn is_finished(self) -> bool {
        matches!(self, SearchState::Succeeded | SearchState::Failed(_))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Start to goal inclusive; empty on failure.
    pub cells: Vec<CellId>,
    /// Sum of step distances plus entered-cell penalties.
    pub cost: Cost,
    pub nodes_expanded: usize,
    pub failure: Option<PathFailure>,
}

impl PathResult {
    fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            cells: Vec::new(),
            cost: 0,
            nodes_expanded,
            failure: Some(reason),
        }
    }

    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Shared flag a caller flips to abandon a search.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

// ============================================================================
// Scratch arena
// ============================================================================

#[derive(Clone, Copy, Debug)]
struct Node {
    g_cost: Cost,
    h_cost: Cost,
    parent: Option<CellId>,
    heap_index: usize,
    closed: bool,
}

impl Node {
    const FRESH: Node = Node {
        g_cost: 0,
        h_cost: 0,
        parent: None,
        heap_index: NOT_IN_HEAP,
        closed: false,
    };

    fn f_cost(&self) -> Cost {
        self.g_cost.saturating_add(self.h_cost)
    }
}

struct Scratch {
    nodes: Vec<Node>,
}

impl HeapSlots<CellId> for Scratch {
    fn compare(&self, a: CellId, b: CellId) -> Ordering {
        // Lower f pops first; ties go to the cell closer to the goal.
        let (a, b) = (&self.nodes[a.0], &self.nodes[b.0]);
        b.f_cost()
            .cmp(&a.f_cost())
            .then_with(|| b.h_cost.cmp(&a.h_cost))
    }

    fn heap_index(&self, item: CellId) -> usize {
        self.nodes[item.0].heap_index
    }

    fn set_heap_index(&mut self, item: CellId, index: usize) {
        self.nodes[item.0].heap_index = index;
    }
}

// ============================================================================
// Search
// ============================================================================

/// One start→goal query, runnable in bounded slices.
pub struct PathSearch<'g> {
    grid: &'g NavGrid,
    start: CellId,
    goal: CellId,
    state: SearchState,
    scratch: Scratch,
    open: IndexedHeap<CellId>,
    nodes_expanded: usize,
    result: Option<PathResult>,
}

impl<'g> PathSearch<'g> {
    pub fn new(grid: &'g NavGrid, start: CellId, goal: CellId) -> Self {
        let count = grid.cell_count();
        Self {
            grid,
            start,
            goal,
            state: SearchState::Idle,
            scratch: Scratch {
                nodes: vec![Node::FRESH; count],
            },
            open: IndexedHeap::with_capacity(count),
            nodes_expanded: 0,
            result: None,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Runs at most `max_iterations` expansions and returns the new state.
    ///
    /// Lets a caller spread one search across frames.
    pub fn step(&mut self, max_iterations: usize) -> SearchState {
        if self.state == SearchState::Idle {
            self.begin();
        }
        for _ in 0..max_iterations {
            if self.state != SearchState::Running {
                break;
            }
            self.expand_next();
        }
        self.state
    }

    pub fn run(&mut self) -> SearchState {
        while !self.step(usize::MAX).is_finished() {}
        self.state
    }

    /// Like [`run`](Self::run), but polls `cancel` before every expansion.
    pub fn run_with_cancel(&mut self, cancel: &CancelToken) -> SearchState {
        if self.state == SearchState::Idle {
            self.begin();
        }
        while self.state == SearchState::Running {
            if cancel.is_cancelled() {
                debug!(
                    "[PathSearch] cancelled after expanding {} nodes",
                    self.nodes_expanded
                );
                self.finish(PathResult::failed(PathFailure::Cancelled, self.nodes_expanded));
                break;
            }
            self.expand_next();
        }
        self.state
    }

    /// The finished result, or `None` while the search is still going.
    pub fn result(&self) -> Option<&PathResult> {
        self.result.as_ref()
    }

    /// Runs to completion and hands over the result.
    pub fn into_result(mut self) -> PathResult {
        loop {
            if let Some(result) = self.result.take() {
                return result;
            }
            self.step(usize::MAX);
        }
    }

    fn begin(&mut self) {
        let (start, goal) = (self.start, self.goal);
        trace!(
            "[PathSearch] start={:?} goal={:?}",
            self.grid.cell(start).coord,
            self.grid.cell(goal).coord
        );

        if !self.grid.cell(start).walkable {
            debug!("[PathSearch] FAILED: StartBlocked");
            self.finish(PathResult::failed(PathFailure::StartBlocked, 0));
            return;
        }
        if !self.grid.cell(goal).walkable {
            debug!("[PathSearch] FAILED: GoalBlocked");
            self.finish(PathResult::failed(PathFailure::GoalBlocked, 0));
            return;
        }

        self.scratch.nodes[start.0].h_cost = octile_distance(self.grid, start, goal);
        self.open.insert(&mut self.scratch, start);
        self.state = SearchState::Running;
    }

    fn expand_next(&mut self) {
        let Some(current) = self.open.extract_top(&mut self.scratch) else {
            warn!(
                "[PathSearch] no path found after expanding {} nodes",
                self.nodes_expanded
            );
            self.finish(PathResult::failed(PathFailure::NoPath, self.nodes_expanded));
            return;
        };

        self.nodes_expanded += 1;
        self.scratch.nodes[current.0].closed = true;

        if current == self.goal {
            let result = self.retrace();
            trace!(
                "[PathSearch] SUCCESS: {} cells, cost={}, nodes_expanded={}",
                result.cells.len(),
                result.cost,
                result.nodes_expanded
            );
            self.finish(result);
            return;
        }

        let grid = self.grid;
        let current_g = self.scratch.nodes[current.0].g_cost;
        for neighbor in grid.neighbors(current) {
            let cell = grid.cell(neighbor);
            if !cell.walkable || self.scratch.nodes[neighbor.0].closed {
                continue;
            }

            let candidate = current_g
                .saturating_add(octile_distance(grid, current, neighbor))
                .saturating_add(Cost::from(cell.penalty));
            let queued = self.open.contains(&self.scratch, neighbor);
            if queued && candidate >= self.scratch.nodes[neighbor.0].g_cost {
                continue;
            }

            let node = &mut self.scratch.nodes[neighbor.0];
            node.g_cost = candidate;
            node.h_cost = octile_distance(grid, neighbor, self.goal);
            node.parent = Some(current);

            if queued {
                self.open.update(&mut self.scratch, neighbor);
            } else {
                self.open.insert(&mut self.scratch, neighbor);
            }
        }
    }

    fn retrace(&self) -> PathResult {
        let mut cells = vec![self.goal];
        let mut current = self.goal;
        while let Some(parent) = self.scratch.nodes[current.0].parent {
            cells.push(parent);
            current = parent;
        }
        cells.reverse();

        PathResult {
            cells,
            cost: self.scratch.nodes[self.goal.0].g_cost,
            nodes_expanded: self.nodes_expanded,
            failure: None,
        }
    }

    fn finish(&mut self, result: PathResult) {
        self.state = match result.failure {
            None => SearchState::Succeeded,
            Some(reason) => SearchState::Failed(reason),
        };
        self.result = Some(result);
    }
}
