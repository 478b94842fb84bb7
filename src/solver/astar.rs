use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::cell::{Cell, Role};
use crate::error::{InvalidSelection, SearchError};
use crate::pathing_grid::PathingGrid;
use crate::solver::path::reconstruct_path;
use crate::solver::{heuristic, SearchState, StepResult};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A* that advances one frontier expansion per [step](Self::step) call, so a caller can
/// render or poll input between expansions.
///
/// The search owns the [PathingGrid] it runs on. Obstacle and selection edits go through
/// the search and are refused while it is [Running](SearchState::Running). The open set
/// keeps insertion order: among cells of equal `f` the one added first is expanded first.
#[derive(Clone, Debug)]
pub struct StepwiseAstar {
    grid: PathingGrid,
    open_set: FxIndexSet<usize>,
    closed_set: FxIndexSet<usize>,
    state: SearchState,
    start: Option<usize>,
    goal: Option<usize>,
    selected_start: Option<usize>,
    selected_goal: Option<usize>,
    expansions: usize,
    reopened: usize,
}

impl StepwiseAstar {
    pub fn new(grid: PathingGrid) -> StepwiseAstar {
        StepwiseAstar {
            grid,
            open_set: FxIndexSet::default(),
            closed_set: FxIndexSet::default(),
            state: SearchState::Idle,
            start: None,
            goal: None,
            selected_start: None,
            selected_goal: None,
            expansions: 0,
            reopened: 0,
        }
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    pub fn into_grid(self) -> PathingGrid {
        self.grid
    }
    pub fn state(&self) -> SearchState {
        self.state
    }
    /// Start and goal of the current search.
    pub fn endpoints(&self) -> Option<(usize, usize)> {
        self.start.zip(self.goal)
    }
    pub fn selected_start(&self) -> Option<usize> {
        self.selected_start
    }
    pub fn selected_goal(&self) -> Option<usize> {
        self.selected_goal
    }
    /// Cells discovered but not yet expanded, in insertion order.
    pub fn open_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.open_set.iter().copied()
    }
    pub fn closed_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.closed_set.iter().copied()
    }
    /// Number of cells expanded since the search started.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
    /// Number of closed cells moved back to the open set after a cheaper path was found.
    pub fn reopened(&self) -> usize {
        self.reopened
    }

    fn checked(&self, ix: usize) -> Result<&Cell, InvalidSelection> {
        self.grid
            .cell(ix)
            .ok_or(InvalidSelection::OutOfBounds { index: ix })
    }

    fn selectable(&self, ix: usize) -> Result<(), InvalidSelection> {
        let cell = self.checked(ix)?;
        if cell.is_obstacle() {
            return Err(InvalidSelection::Obstacle {
                cell: cell.coords(),
            });
        }
        Ok(())
    }

    /// Begins a new search, discarding whatever search state the grid carried.
    /// `start == goal` is allowed; the first step then completes immediately.
    pub fn start(&mut self, start: usize, goal: usize) -> Result<(), SearchError> {
        self.selectable(start)?;
        self.selectable(goal)?;
        self.reset();
        self.grid.update();

        let goal_pos = self.grid.tile(goal).position();
        let start_cell = self.grid.tile_mut(start);
        let h = heuristic(&start_cell.position(), &goal_pos);
        start_cell.calculate_costs(0, h);
        start_cell.set_parent(None);
        start_cell.set_to_open();
        self.open_set.insert(start);

        self.start = Some(start);
        self.goal = Some(goal);
        self.state = SearchState::Running;

        let (from, to) = (self.grid.tile(start).coords(), self.grid.tile(goal).coords());
        if self.grid.reachable(start, goal) {
            info!("Searching from {:?} to {:?}", from, to);
        } else {
            info!(
                "{:?} is not reachable from {:?}, search will exhaust",
                to, from
            );
        }
        Ok(())
    }

    /// Starts a search between the currently selected start and goal cells.
    pub fn run(&mut self) -> Result<(), SearchError> {
        let start = self.selected_start.ok_or(InvalidSelection::MissingStart)?;
        let goal = self.selected_goal.ok_or(InvalidSelection::MissingGoal)?;
        self.start(start, goal)
    }

    /// Expands the open cell with the lowest `f` cost.
    ///
    /// Once the search has completed or exhausted, further calls return the same result and
    /// touch nothing. Calling this with no search started returns
    /// [Exhausted](StepResult::Exhausted), as there is no frontier to expand.
    pub fn step(&mut self) -> StepResult {
        match self.state {
            SearchState::Idle | SearchState::Exhausted => return StepResult::Exhausted,
            SearchState::Completed => return StepResult::Completed,
            SearchState::Running => {}
        }
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            self.state = SearchState::Exhausted;
            return StepResult::Exhausted;
        };
        let Some(current) = self.lowest_f_cost() else {
            self.state = SearchState::Exhausted;
            if self.grid.reachable(start, goal) {
                warn!("Reachable goal could not be pathed to, is the component table stale?");
            } else {
                info!("Open set exhausted after {} expansions", self.expansions);
            }
            return StepResult::Exhausted;
        };
        if current == goal {
            self.state = SearchState::Completed;
            info!(
                "Reached goal {:?} with cost {} after {} expansions",
                self.grid.tile(goal).coords(),
                self.grid.tile(goal).g_cost(),
                self.expansions
            );
            return StepResult::Completed;
        }

        self.expand(current, goal);
        self.open_set.shift_remove(&current);
        self.closed_set.insert(current);
        self.grid.tile_mut(current).set_to_closed();
        self.expansions += 1;
        StepResult::InProgress
    }

    /// Steps until the search completes or exhausts.
    pub fn run_to_end(&mut self) -> StepResult {
        loop {
            let result = self.step();
            if result.is_terminal() {
                return result;
            }
        }
    }

    /// First open cell with minimal `f`, scanning in insertion order.
    fn lowest_f_cost(&self) -> Option<usize> {
        self.open_set
            .iter()
            .position_min_by_key(|&&ix| self.grid.tile(ix).f_cost())
            .and_then(|i| self.open_set.get_index(i).copied())
    }

    fn expand(&mut self, current: usize, goal: usize) {
        let goal_pos = self.grid.tile(goal).position();
        let current_g = self.grid.tile(current).g_cost();
        debug!(
            "Expanding {:?} (g={}, f={})",
            self.grid.tile(current).coords(),
            current_g,
            self.grid.tile(current).f_cost()
        );
        for (n, move_cost) in self.grid.successors(current) {
            let tentative_g = current_g.saturating_add(move_cost);
            let cell = self.grid.tile_mut(n);
            let h = heuristic(&cell.position(), &goal_pos);
            if cell.is_open() {
                if tentative_g < cell.g_cost() {
                    cell.calculate_costs(tentative_g, h);
                    cell.set_parent(Some(current));
                }
            } else if cell.is_closed() {
                if tentative_g < cell.g_cost() {
                    debug!(
                        "Re-opening {:?}: g {} -> {}",
                        cell.coords(),
                        cell.g_cost(),
                        tentative_g
                    );
                    cell.calculate_costs(tentative_g, h);
                    cell.set_parent(Some(current));
                    cell.set_to_open();
                    self.closed_set.shift_remove(&n);
                    self.open_set.insert(n);
                    self.reopened += 1;
                }
            } else {
                cell.calculate_costs(tentative_g, h);
                cell.set_parent(Some(current));
                cell.set_to_open();
                self.open_set.insert(n);
            }
        }
    }

    /// Clears costs, parents and set membership grid-wide and returns to
    /// [Idle](SearchState::Idle). Obstacles and selections are kept.
    pub fn reset(&mut self) {
        self.grid.clear_search();
        self.open_set.clear();
        self.closed_set.clear();
        self.start = None;
        self.goal = None;
        self.expansions = 0;
        self.reopened = 0;
        self.state = SearchState::Idle;
    }

    /// The cells from start to goal. Only available once the search has completed.
    pub fn path(&self) -> Result<Vec<usize>, SearchError> {
        match (self.state, self.start, self.goal) {
            (SearchState::Completed, Some(start), Some(goal)) => {
                reconstruct_path(&self.grid, start, goal)
            }
            _ => Err(SearchError::NotCompleted),
        }
    }

    /// Reconstructs the path and flags its cells for display.
    pub fn mark_path(&mut self) -> Result<Vec<usize>, SearchError> {
        let path = self.path()?;
        for &ix in &path {
            self.grid.tile_mut(ix).set_to_path();
        }
        Ok(path)
    }

    /// Edits are refused mid-search. A finished search is discarded before the edit so
    /// that no stale open or closed flags survive it.
    fn ensure_editable(&mut self) -> Result<(), SearchError> {
        match self.state {
            SearchState::Running => Err(SearchError::SearchRunning),
            SearchState::Completed | SearchState::Exhausted => {
                self.reset();
                Ok(())
            }
            SearchState::Idle => Ok(()),
        }
    }

    pub fn set_obstacle(&mut self, ix: usize) -> Result<(), SearchError> {
        self.ensure_editable()?;
        self.grid.set_obstacle(ix)?;
        Ok(())
    }

    pub fn reset_tile(&mut self, ix: usize) -> Result<(), SearchError> {
        self.ensure_editable()?;
        self.grid.reset_tile(ix)?;
        Ok(())
    }

    /// Resets every tile. Selections are kept.
    pub fn clear(&mut self) -> Result<(), SearchError> {
        self.ensure_editable()?;
        self.grid.clear();
        Ok(())
    }

    pub fn clear_obstacles(&mut self) -> Result<(), SearchError> {
        self.ensure_editable()?;
        self.grid.clear_obstacles();
        Ok(())
    }

    /// Selects the start cell, deselecting the previously selected one.
    pub fn select_start(&mut self, ix: usize) -> Result<(), SearchError> {
        self.select(ix, Role::Start)
    }

    /// Selects the goal cell, deselecting the previously selected one.
    pub fn select_goal(&mut self, ix: usize) -> Result<(), SearchError> {
        self.select(ix, Role::Goal)
    }

    fn select(&mut self, ix: usize, role: Role) -> Result<(), SearchError> {
        self.ensure_editable()?;
        self.selectable(ix)?;
        let (previous, other, other_role) = match role {
            Role::Start => (self.selected_start, self.selected_goal, Role::Goal),
            Role::Goal => (self.selected_goal, self.selected_start, Role::Start),
        };
        if let Some(prev) = previous.filter(|&prev| prev != ix) {
            if Some(prev) == other {
                // Still the other endpoint.
                self.grid.select(prev, other_role)?;
            } else {
                self.grid.deselect(prev)?;
            }
        }
        self.grid.select(ix, role)?;
        match role {
            Role::Start => self.selected_start = Some(ix),
            Role::Goal => self.selected_goal = Some(ix),
        }
        Ok(())
    }

    /// Drops the selection of a cell and resets it.
    pub fn deselect(&mut self, ix: usize) -> Result<(), SearchError> {
        self.ensure_editable()?;
        self.grid.deselect(ix)?;
        if self.selected_start == Some(ix) {
            self.selected_start = None;
        }
        if self.selected_goal == Some(ix) {
            self.selected_goal = None;
        }
        Ok(())
    }
}
