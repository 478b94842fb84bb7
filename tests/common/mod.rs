#![allow(dead_code)]
use grid_astar_stepper::{PathingGrid, StepwiseAstar};

/// Builds a grid from rows of text where `#` is an obstacle, `S` the start and `G` the goal.
pub fn grid_from_ascii(rows: &[&str], cell_size: i32) -> (PathingGrid, usize, usize) {
    let height = rows.len() as i32;
    let width = rows[0].len() as i32;
    let mut grid = PathingGrid::build(width, height, cell_size).unwrap();
    let mut start = None;
    let mut goal = None;
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let ix = grid.get_ix(x as i32, y as i32).unwrap();
            match c {
                '#' => grid.set_obstacle(ix).unwrap(),
                'S' => start = Some(ix),
                'G' => goal = Some(ix),
                _ => {}
            }
        }
    }
    grid.update();
    (grid, start.unwrap(), goal.unwrap())
}

pub fn started(rows: &[&str], cell_size: i32) -> StepwiseAstar {
    let (grid, start, goal) = grid_from_ascii(rows, cell_size);
    let mut search = StepwiseAstar::new(grid);
    search.start(start, goal).unwrap();
    search
}

pub fn coords(search: &StepwiseAstar, path: &[usize]) -> Vec<(i32, i32)> {
    path.iter()
        .map(|&ix| {
            let p = search.grid().cell(ix).unwrap().coords();
            (p.x, p.y)
        })
        .collect()
}

/// Asserts that a path runs from start to goal over free, adjacent cells.
pub fn assert_valid_path(search: &StepwiseAstar, path: &[usize]) {
    let (start, goal) = search.endpoints().unwrap();
    let grid = search.grid();
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        assert!(grid.are_neighbours(pair[0], pair[1]));
    }
    assert!(path.iter().all(|&ix| !grid.cell(ix).unwrap().is_obstacle()));
}
