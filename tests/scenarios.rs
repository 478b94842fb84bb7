mod common;

use common::*;
use grid_astar_stepper::{
    path_cost, GridConfig, PathingGrid, SearchError, SearchState, StepResult, StepwiseAstar,
};

#[test]
fn diagonal_is_taken_on_open_grid() {
    let mut search = started(&["S..", "...", "..G"], 1);
    assert_eq!(search.step(), StepResult::InProgress);
    assert_eq!(search.step(), StepResult::InProgress);
    assert_eq!(search.step(), StepResult::Completed);
    let path = search.path().unwrap();
    assert_eq!(coords(&search, &path), vec![(0, 0), (1, 1), (2, 2)]);
    let goal = search.grid().cell(*path.last().unwrap()).unwrap();
    assert_eq!(goal.g_cost(), 2);
    assert_eq!(path_cost(search.grid(), &path), Some(goal.g_cost()));
}

#[test]
fn detours_around_single_obstacle() {
    for cell_size in [1, 50] {
        let mut search = started(&["S#G", "...", "..."], cell_size);
        assert_eq!(search.run_to_end(), StepResult::Completed);
        let path = search.path().unwrap();
        assert_eq!(coords(&search, &path), vec![(0, 0), (1, 1), (2, 0)]);
        assert_valid_path(&search, &path);
        assert_eq!(search.expansions(), 2);
    }
}

#[test]
fn marked_path_is_drawn() {
    let mut search = started(&["S#G", "...", "..."], 1);
    search.run_to_end();
    search.mark_path().unwrap();
    assert_eq!(search.grid().to_string(), "*#*\no*o\nooo\n");
}

#[test]
fn enclosed_goal_exhausts() {
    let mut search = started(&["S....", "...##", "...#G"], 1);
    let (start, goal) = search.endpoints().unwrap();
    assert!(search.grid().unreachable(start, goal));
    let mut steps = 0;
    while search.step() == StepResult::InProgress {
        steps += 1;
        assert!(steps < 100);
    }
    assert_eq!(search.state(), SearchState::Exhausted);
    let cells = search.grid().cells().cloned().collect::<Vec<_>>();
    let open = search.open_set().collect::<Vec<_>>();
    let closed = search.closed_set().collect::<Vec<_>>();
    for _ in 0..3 {
        assert_eq!(search.step(), StepResult::Exhausted);
    }
    assert_eq!(search.grid().cells().cloned().collect::<Vec<_>>(), cells);
    assert_eq!(search.open_set().collect::<Vec<_>>(), open);
    assert_eq!(search.closed_set().collect::<Vec<_>>(), closed);
    assert_eq!(search.state(), SearchState::Exhausted);
    assert_eq!(search.path(), Err(SearchError::NotCompleted));
    // Every free cell except the goal was expanded.
    assert_eq!(search.closed_set().count(), 11);
    assert_eq!(search.open_set().count(), 0);
}

#[test]
fn start_equal_to_goal_completes_immediately() {
    let grid = PathingGrid::build(4, 4, 50).unwrap();
    let cell = grid.get_ix(2, 1).unwrap();
    let mut search = StepwiseAstar::new(grid);
    search.start(cell, cell).unwrap();
    assert_eq!(search.step(), StepResult::Completed);
    assert_eq!(search.path().unwrap(), vec![cell]);
}

/// The truncated heuristic is not consistent, so a closed cell can later be reached more
/// cheaply and has to be expanded again.
#[test]
fn closed_cell_is_reopened() {
    let mut search = started(
        &[
            ".....G.", //
            "..#####", //
            ".#.....", //
            "...##..", //
            "...#...", //
            "...#...", //
            "...#..#", //
            "#....#.", //
            ".......", //
            ".#...S.", //
        ],
        1,
    );
    assert_eq!(search.run_to_end(), StepResult::Completed);
    assert_eq!(search.reopened(), 1);
    assert_eq!(search.expansions(), 49);
    let path = search.path().unwrap();
    assert_eq!(
        coords(&search, &path),
        vec![
            (5, 9),
            (4, 8),
            (3, 7),
            (2, 6),
            (2, 5),
            (2, 4),
            (2, 3),
            (2, 2),
            (1, 1),
            (2, 0),
            (3, 0),
            (4, 0),
            (5, 0)
        ]
    );
    assert_valid_path(&search, &path);
    let goal = search.grid().cell(*path.last().unwrap()).unwrap();
    assert_eq!(goal.g_cost(), 12);
    assert_eq!(path_cost(search.grid(), &path), Some(12));
}

#[test]
fn reopening_while_exhausting() {
    let mut search = started(
        &[
            ".###G", //
            "...##", //
            "..#..", //
            ".##..", //
            ".....", //
            ".....", //
            ".#..S", //
            "..#..", //
        ],
        1,
    );
    assert_eq!(search.run_to_end(), StepResult::Exhausted);
    assert_eq!(search.reopened(), 1);
    assert_eq!(search.expansions(), 30);
}

#[test]
fn pointer_selection_on_default_grid() {
    let grid = PathingGrid::from_config(&GridConfig::default()).unwrap();
    let start = grid.cell_at(30, 30).unwrap();
    let goal = grid.cell_at(1575, 875).unwrap();
    let mut search = StepwiseAstar::new(grid);
    search.select_start(start).unwrap();
    search.select_goal(goal).unwrap();
    search.run().unwrap();
    assert_eq!(search.run_to_end(), StepResult::Completed);
    let path = search.path().unwrap();
    assert_valid_path(&search, &path);
    assert_eq!(path.len(), 32);
    assert_eq!(search.grid().cell(goal).unwrap().g_cost(), 17 * 70 + 14 * 50);
    assert_eq!(path_cost(search.grid(), &path), Some(1890));
    assert_eq!(search.expansions(), 291);
}

#[test]
fn rerun_after_edit() {
    let mut search = started(&["S.G", "...", "..."], 1);
    search.run_to_end();
    assert_eq!(search.path().unwrap().len(), 3);
    let (start, goal) = search.endpoints().unwrap();
    let blocked = search.grid().get_ix(1, 0).unwrap();
    search.set_obstacle(blocked).unwrap();
    assert_eq!(search.state(), SearchState::Idle);
    search.start(start, goal).unwrap();
    assert_eq!(search.run_to_end(), StepResult::Completed);
    let path = search.path().unwrap();
    assert_eq!(coords(&search, &path), vec![(0, 0), (1, 1), (2, 0)]);
}

#[cfg(feature = "serde")]
#[test]
fn grid_config_round_trips_through_json() {
    let config = GridConfig {
        width: 8,
        height: 6,
        cell_size: 25,
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"width":8,"height":6,"cell_size":25}"#);
    let back: GridConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
