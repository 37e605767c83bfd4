//! A* over a [Navigable] maze with a fully deterministic exploration order.
//!
//! Cells are expanded by ascending `f = g + h`, where `g` is the path length from the start and
//! `h` the Manhattan distance to the goal. Ties are broken by ascending `h`, then row, then
//! column.
//!
//! Every edge costs [STEP_COST] and the heuristic is consistent, so a cell's cost is final once
//! it is expanded and expanded cells are never re-opened. The cost of a cell that is still on
//! the frontier can drop when a cheaper route to it turns up, in which case its parent is
//! replaced and it is queued again. Supporting weighted edges would need the closed set to be
//! revisited as well.
use core::fmt;
use indexmap::map::Entry::{Occupied, Vacant};
use itertools::Itertools;
use log::{debug, info};
use std::iter;

use crate::cell::Cell;
use crate::frontier::{Frontier, FrontierEntry};
use crate::maze::Navigable;
use crate::{FxIndexMap, FxIndexSet, STEP_COST};

/// How a finished search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The goal was dequeued; the path runs from start to goal.
    GoalReached,
    /// The frontier ran dry; the path is empty and every cell reachable from the start has
    /// been explored.
    Exhausted,
}

/// The two states of a search: still running, or done with an [Outcome].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchStatus {
    Running,
    Done(Outcome),
}

/// Bookkeeping of one search run. `parents` maps every discovered cell to the index of its
/// parent in the same map and its best known cost; the start has parent index [usize::MAX].
struct SearchState<'a, M> {
    maze: &'a M,
    goal: Cell,
    frontier: Frontier,
    parents: FxIndexMap<Cell, (usize, usize)>,
    explored: FxIndexSet<Cell>,
    path: Vec<Cell>,
}

impl<'a, M: Navigable> SearchState<'a, M> {
    fn new(maze: &'a M) -> Self {
        let start = maze.start();
        let goal = maze.goal();
        let mut state = SearchState {
            maze,
            goal,
            frontier: Frontier::new(),
            parents: FxIndexMap::default(),
            explored: FxIndexSet::default(),
            path: Vec::new(),
        };
        state.parents.insert(start, (usize::MAX, 0));
        let h = state.heuristic(&start);
        state.frontier.push(FrontierEntry {
            estimated_cost: h,
            heuristic: h,
            cell: start,
            cost: 0,
            index: 0,
        });
        state
    }

    fn heuristic(&self, cell: &Cell) -> usize {
        cell.manhattan_distance(&self.goal)
    }

    /// Dequeues the next cell and either finishes on the goal or expands it.
    fn step(&mut self) -> SearchStatus {
        let Some(FrontierEntry {
            cell, cost, index, ..
        }) = self.frontier.pop()
        else {
            return SearchStatus::Done(Outcome::Exhausted);
        };
        // A cell is queued again whenever its cost drops, so older entries are skipped.
        if let Some((_, &(_, best))) = self.parents.get_index(index) {
            if cost > best {
                return SearchStatus::Running;
            }
        }
        if cell == self.goal {
            self.path = reverse_path(&self.parents, index);
            self.explored.insert(cell);
            return SearchStatus::Done(Outcome::GoalReached);
        }
        self.explored.insert(cell);
        debug!(
            "Expanding {} at cost {}, {} entries queued",
            cell,
            cost,
            self.frontier.len()
        );

        for neighbour in cell.neighbours() {
            if self.maze.is_blocked(&neighbour) || self.explored.contains(&neighbour) {
                continue;
            }
            let new_cost = cost + STEP_COST;
            let n; // index for neighbour
            match self.parents.entry(neighbour) {
                Vacant(e) => {
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            let h = self.heuristic(&neighbour);
            self.frontier.push(FrontierEntry {
                estimated_cost: new_cost + h,
                heuristic: h,
                cell: neighbour,
                cost: new_cost,
                index: n,
            });
        }
        SearchStatus::Running
    }
}

/// Follows parent indices from `goal` back to the start and returns the cells start first.
fn reverse_path(parents: &FxIndexMap<Cell, (usize, usize)>, goal: usize) -> Vec<Cell> {
    let mut path: Vec<Cell> = iter::successors(parents.get_index(goal), |(_, value)| {
        parents.get_index(value.0)
    })
    .map(|(cell, _)| *cell)
    .collect();
    path.reverse();
    path
}

/// The finished result of a search: the path from start to goal and all explored cells.
///
/// An unreachable goal is not an error. The search ends with [Outcome::Exhausted] and an empty
/// path, which callers can tell apart from success through [Solver::outcome].
#[derive(Clone, Debug)]
pub struct Solver {
    start: Cell,
    goal: Cell,
    outcome: Outcome,
    path: Vec<Cell>,
    explored: FxIndexSet<Cell>,
    costs: FxIndexMap<Cell, usize>,
}

impl Solver {
    /// Runs the search over `maze` to completion.
    pub fn solve<M: Navigable>(maze: &M) -> Solver {
        let start = maze.start();
        let goal = maze.goal();
        info!("Searching for a path from {} to {}", start, goal);
        let mut state = SearchState::new(maze);
        let outcome = loop {
            if let SearchStatus::Done(outcome) = state.step() {
                break outcome;
            }
        };
        match outcome {
            Outcome::GoalReached => {
                debug_assert!(state
                    .path
                    .iter()
                    .tuple_windows()
                    .all(|(a, b)| a.is_adjacent(b)));
                info!(
                    "{} reached from {} in {} steps, {} cells explored",
                    goal,
                    start,
                    state.path.len() - 1,
                    state.explored.len()
                );
                debug!("Path: {}", state.path.iter().join(" -> "));
            }
            Outcome::Exhausted => info!(
                "{} is not reachable from {}, {} cells explored",
                goal,
                start,
                state.explored.len()
            ),
        }
        Solver {
            start,
            goal,
            outcome,
            path: state.path,
            explored: state.explored,
            costs: state
                .parents
                .into_iter()
                .map(|(cell, (_, cost))| (cell, cost))
                .collect(),
        }
    }

    /// The cells along the path from the start to the goal, both included. Empty if the goal
    /// could not be reached.
    pub fn path_from_start_to_goal(&self) -> &[Cell] {
        &self.path
    }

    /// All cells that were expanded during the search, in expansion order. The goal counts as
    /// explored when it is reached. This is always a superset of the path.
    pub fn explored_cells(&self) -> &FxIndexSet<Cell> {
        &self.explored
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::GoalReached
    }

    /// Number of steps on the path, [None] if the goal was not reached.
    pub fn path_cost(&self) -> Option<usize> {
        match self.outcome {
            Outcome::GoalReached => self.best_cost(&self.goal),
            Outcome::Exhausted => None,
        }
    }

    /// The lowest cost found for `cell`, [None] if it was never discovered. Final for explored
    /// cells; for cells left on the frontier it is an upper bound.
    pub fn best_cost(&self, cell: &Cell) -> Option<usize> {
        self.costs.get(cell).copied()
    }

    /// The path without its two endpoints.
    pub fn interior_cells(&self) -> &[Cell] {
        match self.path.len() {
            0..=2 => &[],
            n => &self.path[1..n - 1],
        }
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.path_cost() {
            Some(cost) => write!(
                f,
                "{} -> {} in {} steps: {}",
                self.start,
                self.goal,
                cost,
                self.path.iter().join(" -> ")
            ),
            None => write!(f, "{} -> {}: no path", self.start, self.goal),
        }
    }
}
