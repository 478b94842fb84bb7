use grid_astar_stepper::{PathingGrid, StepResult, StepwiseAstar};
use std::thread::sleep;
use std::time::Duration;

// In this example a path is found on a 12x6 grid with shape
//  ____________
// |S    #      |
// |     #      |
// |  ####  ##  |
// |        #   |
// |    #   #  G|
// |    #       |
//  ____________
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// The grid is printed after every expansion, the way a render loop would draw it between
// steps. Run with RUST_LOG=debug to see each expansion logged.

const STEP_DELAY: Duration = Duration::from_millis(100);

fn main() {
    env_logger::init();
    let mut grid = PathingGrid::build(12, 6, 50).unwrap();
    for (x, y) in [
        (5, 0),
        (5, 1),
        (2, 2),
        (3, 2),
        (4, 2),
        (5, 2),
        (8, 2),
        (9, 2),
        (8, 3),
        (4, 4),
        (8, 4),
        (4, 5),
    ] {
        let ix = grid.get_ix(x, y).unwrap();
        grid.set_obstacle(ix).unwrap();
    }
    // Pointer positions in world units, as a click handler would pass them.
    let start = grid.cell_at(10, 20).unwrap();
    let goal = grid.cell_at(575, 230).unwrap();

    let mut search = StepwiseAstar::new(grid);
    search.select_start(start).unwrap();
    search.select_goal(goal).unwrap();
    search.run().unwrap();
    loop {
        let result = search.step();
        println!("{}", search.grid());
        match result {
            StepResult::InProgress => sleep(STEP_DELAY),
            StepResult::Completed => break,
            StepResult::Exhausted => {
                println!("No path exists");
                return;
            }
        }
    }
    let path = search.mark_path().unwrap();
    println!("{}", search.grid());
    println!("Path after {} expansions:", search.expansions());
    for ix in path {
        let cell = search.grid().cell(ix).unwrap();
        println!("{:?} {}", cell.coords(), cell.cost_label().unwrap_or_default());
    }
}
