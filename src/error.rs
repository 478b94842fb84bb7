use grid_util::point::Point;
use thiserror::Error;

/// Failures while building or addressing a [PathingGrid](crate::pathing_grid::PathingGrid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width, height or cell size is not positive, or world positions or path costs on a grid
    /// of this shape would not fit in an `i32`.
    #[error("invalid grid dimensions (width={width}, height={height}, cell_size={cell_size})")]
    InvalidDimensions {
        width: i32,
        height: i32,
        cell_size: i32,
    },
    #[error("cell index {index} is outside the grid")]
    OutOfBounds { index: usize },
}

/// Why a start/goal selection was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSelection {
    #[error("cell ({}, {}) is an obstacle", .cell.x, .cell.y)]
    Obstacle { cell: Point },
    #[error("no start cell selected")]
    MissingStart,
    #[error("no goal cell selected")]
    MissingGoal,
    #[error("cell index {index} is outside the grid")]
    OutOfBounds { index: usize },
}

/// Failures reported by [StepwiseAstar](crate::solver::astar::StepwiseAstar).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] InvalidSelection),
    /// An edit was attempted while a search is in progress.
    #[error("grid cannot be edited while a search is running")]
    SearchRunning,
    /// A path was requested before the goal was reached.
    #[error("search has not reached the goal")]
    NotCompleted,
    /// Reconstruction reached a cell without a parent before reaching the start.
    #[error("parent chain broken at ({}, {}) before reaching the start", .cell.x, .cell.y)]
    NoParentChain { cell: Point },
    #[error("grid edit failed: {0}")]
    Grid(#[from] GridError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn messages_name_the_cell() {
        let err = SearchError::from(InvalidSelection::Obstacle {
            cell: Point::new(3, 4),
        });
        assert_eq!(err.to_string(), "invalid selection: cell (3, 4) is an obstacle");
        let err = SearchError::NoParentChain {
            cell: Point::new(1, 0),
        };
        assert_eq!(
            err.to_string(),
            "parent chain broken at (1, 0) before reaching the start"
        );
    }

    #[test]
    fn grid_errors_are_the_source() {
        let err = SearchError::from(GridError::OutOfBounds { index: 9 });
        assert_eq!(err.to_string(), "grid edit failed: cell index 9 is outside the grid");
        assert!(err.source().is_some());
    }
}
