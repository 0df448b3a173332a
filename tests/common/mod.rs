#![allow(dead_code)]

use visibility_planner::domains::path_planning::{Obstacle, Point, Workspace};

pub fn square() -> Obstacle {
    Obstacle::from(vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)])
}

/// start (0,0), goal (10,10), one square obstacle between them.
pub fn square_workspace() -> Workspace {
    Workspace::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), vec![square()])
}

pub fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub const SQUARE_MAP: &str = "\
# start
0 0
# goal
10 10
1
4
4 4
6 4
6 6
4 6
";
