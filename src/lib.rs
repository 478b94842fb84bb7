//! # grid_astar_stepper
//!
//! An [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search over a fixed rectangular
//! grid with 8-directional
//! ([Moore](https://en.wikipedia.org/wiki/Moore_neighborhood)) movement that runs one
//! expansion per call. This suits visualisation: a render loop calls
//! [step](solver::astar::StepwiseAstar::step) once per tick and draws the open set, the closed
//! set and per-cell costs in between.
//!
//! Edge costs and the heuristic are both the straight-line distance between cell positions,
//! truncated to an integer. Cells sit at multiples of a configurable cell size, so with
//! 50 unit tiles a cardinal step costs 50 and a diagonal one 70. Closed cells are re-opened when
//! a cheaper path to them turns up, which the truncation makes necessary.
//!
//! ```
//! use grid_astar_stepper::{PathingGrid, StepResult, StepwiseAstar};
//!
//! let grid = PathingGrid::build(3, 3, 1).unwrap();
//! let start = grid.get_ix(0, 0).unwrap();
//! let goal = grid.get_ix(2, 2).unwrap();
//! let mut search = StepwiseAstar::new(grid);
//! search.start(start, goal).unwrap();
//! while search.step() == StepResult::InProgress {}
//! assert_eq!(search.path().unwrap(), vec![0, 4, 8]);
//! ```
pub mod cell;
pub mod error;
pub mod pathing_grid;
pub mod solver;

pub use cell::{Cell, Role, TileState};
pub use error::{GridError, InvalidSelection, SearchError};
pub use grid_util::point::Point;
pub use pathing_grid::{GridConfig, Neighbour, PathingGrid};
pub use solver::astar::StepwiseAstar;
pub use solver::path::reconstruct_path;
pub use solver::{distance, heuristic, path_cost, SearchState, StepResult};

/// Inline capacity of successor lists; a cell never has more than 8 neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
