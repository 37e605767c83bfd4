//! # maze_pathfinding
//!
//! Shortest paths through mazes on a 4-connected, uniform-cost grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//!
//! The exploration order is fully deterministic: cells are expanded by lowest `f`, then lowest
//! heuristic, then lowest row, then lowest column. Besides the path, the set of explored cells
//! is part of the result and is identical from run to run.
//!
//! ```
//! use maze_pathfinding::{Cell, Maze, Solver};
//!
//! let maze = Maze::new(
//!     3,
//!     5,
//!     Cell::new(2, 1),
//!     Cell::new(1, 4),
//!     [Cell::new(1, 2), Cell::new(2, 3)],
//! )
//! .unwrap();
//! let solver = Solver::solve(&maze);
//! assert_eq!(solver.path_cost(), Some(6));
//! assert_eq!(solver.explored_cells().len(), 8);
//! ```
//!
//! Unreachable goals are not an error: the path is empty and [Solver::outcome] reports
//! [Outcome::Exhausted]. [Maze] pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) so this can
//! also be checked up front with [Maze::solvable].
pub mod cell;
mod frontier;
pub mod maze;
pub mod solver;

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

pub use cell::Cell;
pub use maze::{Maze, MazeError, Navigable};
pub use solver::{Outcome, Solver};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Cost of a single orthogonal step.
pub const STEP_COST: usize = 1;
/// Inline capacity for neighbourhoods, one slot per orthogonal direction.
pub const N_SMALLVEC_SIZE: usize = 4;
