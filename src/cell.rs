use grid_util::point::Point;

/// Which end of a search a selected cell stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Start,
    Goal,
}

/// What a renderer should draw for a cell, in order of precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    Blank,
    Obstacle,
    Start,
    Goal,
    Open,
    Closed,
    Path,
}

/// A single grid position together with the bookkeeping of the current search.
///
/// The obstacle and selection flags belong to the user and survive between searches.
/// Costs, the parent link and open/closed membership belong to the search and are cleared
/// whenever a new one starts. Parents are stored as cell indices into the owning
/// [PathingGrid](crate::pathing_grid::PathingGrid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coords: Point,
    position: Point,
    obstacle: bool,
    selection: Option<Role>,
    open: bool,
    closed: bool,
    on_path: bool,
    g: i32,
    h: i32,
    f: i32,
    parent: Option<usize>,
}

impl Cell {
    pub(crate) fn new(coords: Point, position: Point) -> Cell {
        Cell {
            coords,
            position,
            obstacle: false,
            selection: None,
            open: false,
            closed: false,
            on_path: false,
            g: 0,
            h: 0,
            f: 0,
            parent: None,
        }
    }

    /// Column and row of the cell.
    pub fn coords(&self) -> Point {
        self.coords
    }
    /// World position of the cell's corner, a multiple of the cell size.
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }
    pub fn is_selected(&self) -> bool {
        self.selection.is_some()
    }
    pub fn selection(&self) -> Option<Role> {
        self.selection
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }
    pub fn g_cost(&self) -> i32 {
        self.g
    }
    pub fn h_cost(&self) -> i32 {
        self.h
    }
    pub fn f_cost(&self) -> i32 {
        self.f
    }
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Marks the cell as an obstacle. Any search state it carried is dropped so that an
    /// obstacle is never a member of the open or closed set.
    pub fn set_obstacle(&mut self) {
        self.clear_search();
        self.obstacle = true;
    }

    pub fn select(&mut self, role: Role) {
        self.selection = Some(role);
    }

    /// Resets the tile and drops its selection.
    pub fn deselect(&mut self) {
        self.reset_tile();
        self.selection = None;
    }

    /// Returns the tile to blank: no obstacle, no costs, no parent, in neither set.
    /// The selection is left alone.
    pub fn reset_tile(&mut self) {
        self.clear_search();
        self.obstacle = false;
    }

    pub(crate) fn clear_search(&mut self) {
        self.open = false;
        self.closed = false;
        self.on_path = false;
        self.g = 0;
        self.h = 0;
        self.f = 0;
        self.parent = None;
    }

    pub(crate) fn calculate_costs(&mut self, g: i32, h: i32) {
        self.g = g;
        self.h = h;
        self.f = g.saturating_add(h);
    }

    pub(crate) fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }

    pub(crate) fn set_to_open(&mut self) {
        self.open = true;
        self.closed = false;
    }

    pub(crate) fn set_to_closed(&mut self) {
        self.open = false;
        self.closed = true;
    }

    pub(crate) fn set_to_path(&mut self) {
        self.on_path = true;
    }

    pub fn state(&self) -> TileState {
        if self.obstacle {
            TileState::Obstacle
        } else if self.on_path {
            TileState::Path
        } else if let Some(role) = self.selection {
            match role {
                Role::Start => TileState::Start,
                Role::Goal => TileState::Goal,
            }
        } else if self.closed {
            TileState::Closed
        } else if self.open {
            TileState::Open
        } else {
            TileState::Blank
        }
    }

    /// The `g` and `f` costs as drawn on a visited tile, `None` for tiles the search has
    /// not touched.
    pub fn cost_label(&self) -> Option<String> {
        if self.open || self.closed {
            Some(format!("{}    {}", self.g, self.f))
        } else {
            None
        }
    }
}
