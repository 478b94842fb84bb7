use grid_astar_stepper::{PathingGrid, StepResult, StepwiseAstar};

// The goal in the corner is walled off, so the search floods every reachable cell and then
// reports that no path exists.
//  _____
// |S    |
// |   ##|
// |   #G|
//  _____

fn main() {
    env_logger::init();
    let mut grid = PathingGrid::build(5, 3, 1).unwrap();
    for (x, y) in [(3, 1), (4, 1), (3, 2)] {
        let ix = grid.get_ix(x, y).unwrap();
        grid.set_obstacle(ix).unwrap();
    }
    grid.update();
    let start = grid.get_ix(0, 0).unwrap();
    let goal = grid.get_ix(4, 2).unwrap();
    println!("Goal reachable: {}", grid.reachable(start, goal));

    let mut search = StepwiseAstar::new(grid);
    search.start(start, goal).unwrap();
    let result = search.run_to_end();
    println!("{}", search.grid());
    assert_eq!(result, StepResult::Exhausted);
    println!(
        "Exhausted after {} expansions: {}",
        search.expansions(),
        search.path().unwrap_err()
    );
}
