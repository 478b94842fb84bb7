use crate::error::{InvalidSelection, SearchError};
use crate::pathing_grid::PathingGrid;

/// Follows parent links from `goal` back to `start` and returns the cells in start to goal
/// order, both ends included.
///
/// Fails with [SearchError::NoParentChain] if a cell without parent is met before the start,
/// or if the chain is longer than the grid has cells (a parent cycle).
pub fn reconstruct_path(
    grid: &PathingGrid,
    start: usize,
    goal: usize,
) -> Result<Vec<usize>, SearchError> {
    if grid.cell(start).is_none() {
        return Err(InvalidSelection::OutOfBounds { index: start }.into());
    }
    let mut current = grid
        .cell(goal)
        .ok_or(InvalidSelection::OutOfBounds { index: goal })?;
    let mut path = vec![goal];
    let mut ix = goal;
    while ix != start {
        let Some(parent) = current.parent() else {
            return Err(SearchError::NoParentChain {
                cell: current.coords(),
            });
        };
        if path.len() > grid.cell_count() {
            return Err(SearchError::NoParentChain {
                cell: current.coords(),
            });
        }
        ix = parent;
        current = grid
            .cell(ix)
            .ok_or(SearchError::NoParentChain {
                cell: current.coords(),
            })?;
        path.push(ix);
    }
    path.reverse();
    Ok(path)
}
