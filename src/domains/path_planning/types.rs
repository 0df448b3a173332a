use crate::common::{DomainError, DomainResult};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A planar point used both as geometry and as a graph vertex key.
///
/// Equality is exact coordinate equality. Hashing goes through `OrderedFloat`
/// so that `0.0` and `-0.0` land on the same key, matching `==`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point, rejecting NaN or infinite coordinates.
    pub fn checked(x: f64, y: f64) -> DomainResult<Self> {
        let p = Self { x, y };
        p.validate()?;
        Ok(p)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(DomainError::malformed(format!(
                "point {} does not have two finite coordinates",
                self
            )))
        }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }

    pub fn to_position(&self) -> Vec<f64> {
        vec![self.x, self.y]
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.x) == OrderedFloat(other.x) && OrderedFloat(self.y) == OrderedFloat(other.y)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.x).hash(state);
        OrderedFloat(self.y).hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = DomainError;

    fn try_from(coords: &[f64]) -> DomainResult<Self> {
        match coords {
            [x, y] => Point::checked(*x, *y),
            _ => Err(DomainError::malformed(format!(
                "expected 2 coordinates, got {}",
                coords.len()
            ))),
        }
    }
}

/// A closed polygon boundary; the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub vertices: Vec<Point>,
}

impl Obstacle {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Fewer than three corners cannot enclose an interior.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Boundary edges including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl From<Vec<(f64, f64)>> for Obstacle {
    fn from(corners: Vec<(f64, f64)>) -> Self {
        Obstacle::new(corners.into_iter().map(Point::from).collect())
    }
}

/// Everything a planning run needs: endpoints plus the fixed obstacle set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub start: Point,
    pub goal: Point,
    pub obstacles: Vec<Obstacle>,
}

impl Workspace {
    pub fn new(start: Point, goal: Point, obstacles: Vec<Obstacle>) -> Self {
        Self { start, goal, obstacles }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.start.validate()?;
        self.goal.validate()?;
        for obstacle in &self.obstacles {
            for corner in &obstacle.vertices {
                corner.validate()?;
            }
        }
        Ok(())
    }

    /// Candidate vertices as given: start, goal, then every obstacle corner.
    pub fn candidate_points(&self) -> Vec<Point> {
        let mut points = vec![self.start, self.goal];
        for obstacle in &self.obstacles {
            points.extend(obstacle.vertices.iter().copied());
        }
        points
    }

    pub fn corner_count(&self) -> usize {
        self.obstacles.iter().map(|o| o.vertices.len()).sum()
    }
}
