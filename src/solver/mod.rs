use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;
use itertools::Itertools;

pub mod astar;
pub mod path;

/// Outcome of a single [step](astar::StepwiseAstar::step).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepResult {
    /// One cell was expanded and the frontier is not empty.
    InProgress,
    /// The goal was taken from the frontier; a path can be reconstructed.
    Completed,
    /// The frontier ran dry without reaching the goal: no path exists.
    Exhausted,
}

impl StepResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepResult::InProgress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Completed,
    Exhausted,
}

/// Straight-line distance between two world positions, truncated towards zero.
///
/// With 50 unit tiles a cardinal step costs 50 and a diagonal step 70; with unit tiles
/// both cost 1.
pub fn distance(a: &Point, b: &Point) -> i32 {
    let dx = (b.x - a.x) as i64;
    let dy = (b.y - a.y) as i64;
    ((dx * dx + dy * dy) as f64).sqrt() as i32
}

/// Estimate of the remaining cost from `current` to `goal`. The same truncated Euclidean
/// distance that prices edges, so it can overshoot the true cost by less than one unit
/// per truncated edge.
pub fn heuristic(current: &Point, goal: &Point) -> i32 {
    distance(current, goal)
}

/// Sums the edge costs along a path of cell indices, [None] if any index is outside the grid.
pub fn path_cost(grid: &PathingGrid, path: &[usize]) -> Option<i32> {
    let positions = path
        .iter()
        .map(|&ix| grid.cell(ix).map(|c| c.position()))
        .collect::<Option<Vec<_>>>()?;
    Some(
        positions
            .iter()
            .tuple_windows()
            .map(|(a, b)| distance(a, b))
            .sum(),
    )
}
