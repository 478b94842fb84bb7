use crate::cell::{Cell, Role, TileState};
use crate::error::GridError;
use crate::solver::distance;
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Shape of a grid. Defaults to the 32 by 18 layout of 50 unit tiles that fills a
/// 1600x900 window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: 32,
            height: 18,
            cell_size: 50,
        }
    }
}

/// Upper bound on any `f` cost a search on this grid can produce: every cell visited once
/// over edges of at most `2 * cell_size`, plus a heuristic of at most the world extent.
fn max_path_cost(width: i32, height: i32, cell_size: i32) -> i128 {
    let (w, h, s) = (width as i128, height as i128, cell_size as i128);
    w * h * 2 * s + (w + h) * s
}

/// The eight neighbour slots of a cell. Rows grow downwards, so `Up` is `y - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighbour {
    Left,
    Right,
    Up,
    Down,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Neighbour {
    /// All slots in the order neighbours are expanded: cardinals first, then corners.
    pub const ALL: [Neighbour; 8] = [
        Neighbour::Left,
        Neighbour::Right,
        Neighbour::Up,
        Neighbour::Down,
        Neighbour::TopLeft,
        Neighbour::TopRight,
        Neighbour::BottomLeft,
        Neighbour::BottomRight,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Neighbour::Left => (-1, 0),
            Neighbour::Right => (1, 0),
            Neighbour::Up => (0, -1),
            Neighbour::Down => (0, 1),
            Neighbour::TopLeft => (-1, -1),
            Neighbour::TopRight => (1, -1),
            Neighbour::BottomLeft => (-1, 1),
            Neighbour::BottomRight => (1, 1),
        }
    }

    /// The slot pointing back from the neighbour.
    pub fn opposite(self) -> Neighbour {
        match self {
            Neighbour::Left => Neighbour::Right,
            Neighbour::Right => Neighbour::Left,
            Neighbour::Up => Neighbour::Down,
            Neighbour::Down => Neighbour::Up,
            Neighbour::TopLeft => Neighbour::BottomRight,
            Neighbour::TopRight => Neighbour::BottomLeft,
            Neighbour::BottomLeft => Neighbour::TopRight,
            Neighbour::BottomRight => Neighbour::TopLeft,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// [PathingGrid] owns every [Cell] of a rectangular grid together with an adjacency table
/// computed once at build time. Cells are addressed by index (`y * width + x`), and the
/// table maps each index to up to eight neighbour indices, [None] past the border.
///
/// It also maintains 8-connected components of the non-obstacle cells using a
/// [UnionFind] structure, so callers can tell ahead of time whether a search can succeed.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: i32,
    height: i32,
    cell_size: i32,
    cells: Vec<Cell>,
    neighbours: Vec<[Option<usize>; 8]>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Allocates `width * height` cells at multiples of `cell_size` and links their
    /// Moore neighbourhoods.
    pub fn build(width: i32, height: i32, cell_size: i32) -> Result<PathingGrid, GridError> {
        let invalid = GridError::InvalidDimensions {
            width,
            height,
            cell_size,
        };
        if width <= 0 || height <= 0 || cell_size <= 0 {
            return Err(invalid);
        }
        // World positions must stay representable.
        if width.checked_mul(cell_size).is_none() || height.checked_mul(cell_size).is_none() {
            return Err(invalid);
        }
        if max_path_cost(width, height, cell_size) > i32::MAX as i128 {
            return Err(invalid);
        }
        let n = (width as usize)
            .checked_mul(height as usize)
            .ok_or(invalid)?;

        let mut cells = Vec::with_capacity(n);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(
                    Point::new(x, y),
                    Point::new(x * cell_size, y * cell_size),
                ));
            }
        }
        let mut grid = PathingGrid {
            width,
            height,
            cell_size,
            cells,
            neighbours: Vec::with_capacity(n),
            components: UnionFind::new(n),
            components_dirty: false,
        };
        grid.neighbours = (0..n).map(|ix| grid.compute_neighbours(ix)).collect();
        grid.generate_components();
        Ok(grid)
    }

    pub fn from_config(config: &GridConfig) -> Result<PathingGrid, GridError> {
        PathingGrid::build(config.width, config.height, config.cell_size)
    }

    fn compute_neighbours(&self, ix: usize) -> [Option<usize>; 8] {
        let p = self.cells[ix].coords();
        let mut links = [None; 8];
        for n in Neighbour::ALL {
            let (dx, dy) = n.offset();
            links[n.slot()] = self.get_ix(p.x + dx, p.y + dy);
        }
        links
    }

    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Index of the cell in column `x`, row `y`.
    pub fn get_ix(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
    pub fn get_ix_point(&self, point: &Point) -> Option<usize> {
        self.get_ix(point.x, point.y)
    }

    /// Translates a world coordinate, such as a pointer position, to the cell containing
    /// it. Uses floor division so coordinates left of or above the grid map to no cell.
    pub fn cell_at(&self, world_x: i32, world_y: i32) -> Option<usize> {
        self.get_ix(
            world_x.div_euclid(self.cell_size),
            world_y.div_euclid(self.cell_size),
        )
    }

    pub fn cell(&self, ix: usize) -> Option<&Cell> {
        self.cells.get(ix)
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    pub(crate) fn cell_mut(&mut self, ix: usize) -> Result<&mut Cell, GridError> {
        self.cells
            .get_mut(ix)
            .ok_or(GridError::OutOfBounds { index: ix })
    }

    pub(crate) fn tile(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }
    pub(crate) fn tile_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }

    /// The neighbour slots of a cell in [Neighbour::ALL] order.
    pub fn neighbours(&self, ix: usize) -> Option<&[Option<usize>; 8]> {
        self.neighbours.get(ix)
    }
    pub fn neighbour(&self, ix: usize, dir: Neighbour) -> Option<usize> {
        self.neighbours.get(ix).and_then(|links| links[dir.slot()])
    }
    pub fn neighbour_count(&self, ix: usize) -> usize {
        self.neighbours
            .get(ix)
            .map_or(0, |links| links.iter().flatten().count())
    }
    pub fn are_neighbours(&self, a: usize, b: usize) -> bool {
        self.neighbours
            .get(a)
            .is_some_and(|links| links.contains(&Some(b)))
    }

    /// Non-obstacle neighbours of a cell paired with the cost of stepping onto them.
    pub fn successors(&self, ix: usize) -> SmallVec<[(usize, i32); N_SMALLVEC_SIZE]> {
        let (Some(cell), Some(links)) = (self.cells.get(ix), self.neighbours.get(ix)) else {
            return SmallVec::new();
        };
        let from = cell.position();
        links
            .iter()
            .flatten()
            .filter(|&&n| !self.cells[n].is_obstacle())
            .map(|&n| (n, distance(&from, &self.cells[n].position())))
            .collect()
    }

    /// Marks a cell as an obstacle. Components are flagged dirty as they may break apart.
    pub fn set_obstacle(&mut self, ix: usize) -> Result<(), GridError> {
        if !self.cell_mut(ix)?.is_obstacle() {
            self.components_dirty = true;
        }
        self.cells[ix].set_obstacle();
        Ok(())
    }

    pub fn select(&mut self, ix: usize, role: Role) -> Result<(), GridError> {
        self.cell_mut(ix)?.select(role);
        Ok(())
    }

    pub fn deselect(&mut self, ix: usize) -> Result<(), GridError> {
        let was_obstacle = self.cell_mut(ix)?.is_obstacle();
        self.cells[ix].deselect();
        if was_obstacle {
            self.join_components(ix);
        }
        Ok(())
    }

    /// Resets a tile to blank, joining the components it newly connects.
    pub fn reset_tile(&mut self, ix: usize) -> Result<(), GridError> {
        let was_obstacle = self.cell_mut(ix)?.is_obstacle();
        self.cells[ix].reset_tile();
        if was_obstacle {
            self.join_components(ix);
        }
        Ok(())
    }

    /// Resets every tile, obstacles included. Selections stay.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset_tile();
        }
        self.components_dirty = true;
    }

    /// Resets only the obstacle tiles.
    pub fn clear_obstacles(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_obstacle()) {
            cell.reset_tile();
        }
        self.components_dirty = true;
    }

    /// Drops costs, parents, set membership and path marks grid-wide.
    pub(crate) fn clear_search(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_search();
        }
    }

    fn join_components(&mut self, ix: usize) {
        if self.components_dirty {
            return;
        }
        for &n in self.neighbours[ix].iter().flatten() {
            if !self.cells[n].is_obstacle() {
                self.components.union(ix, n);
            }
        }
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, ix: usize) -> usize {
        self.components.find(ix)
    }

    /// Checks if start and goal are free cells on the same connected component. Only
    /// meaningful once [update](Self::update) has run after the last obstacle edit.
    pub fn reachable(&self, start: usize, goal: usize) -> bool {
        match (self.cell(start), self.cell(goal)) {
            (Some(s), Some(g)) if !s.is_obstacle() && !g.is_obstacle() => {
                self.components.equiv(start, goal)
            }
            _ => false,
        }
    }

    pub fn unreachable(&self, start: usize, goal: usize) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components for {}x{} grid",
            self.width, self.height
        );
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if self.cells[ix].is_obstacle() {
                continue;
            }
            // Links going right or down cover every undirected edge once.
            for dir in [
                Neighbour::Right,
                Neighbour::Down,
                Neighbour::BottomLeft,
                Neighbour::BottomRight,
            ] {
                if let Some(n) = self.neighbours[ix][dir.slot()] {
                    if !self.cells[n].is_obstacle() {
                        self.components.union(ix, n);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            let line = row
                .iter()
                .map(|cell| match cell.state() {
                    TileState::Blank => '.',
                    TileState::Obstacle => '#',
                    TileState::Start => 'S',
                    TileState::Goal => 'G',
                    TileState::Open => 'o',
                    TileState::Closed => 'x',
                    TileState::Path => '*',
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
