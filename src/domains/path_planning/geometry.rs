//! Planar predicates used by the visibility builder.
//!
//! Clearance follows a "touch is free, cross is blocked" rule: a segment may
//! graze a corner or run along an obstacle edge, but any part of it that lies
//! in the open interior of a polygon blocks it.

use super::types::{Obstacle, Point};
use std::cmp::Ordering;

const EPSILON: f64 = 1e-9;

fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn orientation(a: &Point, b: &Point, c: &Point) -> Ordering {
    let value = cross(a, b, c);
    if value.abs() <= EPSILON {
        Ordering::Equal
    } else if value > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// `p` is collinear with `a`-`b` and inside its bounding box.
fn on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    orientation(a, b, p) == Ordering::Equal
        && p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

pub fn point_on_boundary(p: &Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    (0..n).any(|i| on_segment(p, &polygon[i], &polygon[(i + 1) % n]))
}

/// Even-odd ray cast; boundary points are not handled here.
fn ray_cast_inside(p: &Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True when `p` lies inside `polygon` or on its boundary.
pub fn point_in_polygon(p: &Point, polygon: &[Point]) -> bool {
    point_on_boundary(p, polygon) || ray_cast_inside(p, polygon)
}

/// True when `p` lies in the open interior of `polygon`.
pub fn point_strictly_inside(p: &Point, polygon: &[Point]) -> bool {
    !point_on_boundary(p, polygon) && ray_cast_inside(p, polygon)
}

/// True when segments `p1`-`q1` and `p2`-`q2` share at least one point,
/// endpoint touches and collinear overlaps included.
pub fn segments_intersect(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Ordering::Equal && on_segment(p2, p1, q1))
        || (o2 == Ordering::Equal && on_segment(q2, p1, q1))
        || (o3 == Ordering::Equal && on_segment(p1, p2, q2))
        || (o4 == Ordering::Equal && on_segment(q1, p2, q2))
}

/// Parameters along `a`-`b` (in `[0, 1]`) where the segment meets the
/// boundary of `polygon`, including the segment's own endpoints.
fn boundary_parameters(a: &Point, b: &Point, polygon: &[Point]) -> Vec<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let mut ts = vec![0.0, 1.0];

    let n = polygon.len();
    for i in 0..n {
        let c = &polygon[i];
        let d = &polygon[(i + 1) % n];
        let ex = d.x - c.x;
        let ey = d.y - c.y;
        let denom = dx * ey - dy * ex;

        if denom.abs() > EPSILON {
            let t = ((c.x - a.x) * ey - (c.y - a.y) * ex) / denom;
            let u = ((c.x - a.x) * dy - (c.y - a.y) * dx) / denom;
            if (-EPSILON..=1.0 + EPSILON).contains(&t) && (-EPSILON..=1.0 + EPSILON).contains(&u) {
                ts.push(t.clamp(0.0, 1.0));
            }
        } else if orientation(a, b, c) == Ordering::Equal {
            // Collinear edge: its endpoints bound any overlap.
            for corner in [c, d] {
                let t = ((corner.x - a.x) * dx + (corner.y - a.y) * dy) / len_sq;
                if (0.0..=1.0).contains(&t) {
                    ts.push(t);
                }
            }
        }
    }

    ts.sort_by(|l, r| l.total_cmp(r));
    ts.dedup_by(|l, r| (*l - *r).abs() <= EPSILON);
    ts
}

/// True when some part of segment `a`-`b` lies in the open interior of the
/// obstacle. Boundary contact alone never counts.
pub fn segment_crosses_interior(a: &Point, b: &Point, obstacle: &Obstacle) -> bool {
    let polygon = &obstacle.vertices;
    if obstacle.is_degenerate() {
        return false;
    }
    if a == b {
        return point_strictly_inside(a, polygon);
    }

    let ts = boundary_parameters(a, b, polygon);
    ts.windows(2).any(|w| {
        let probe = a.lerp(b, (w[0] + w[1]) / 2.0);
        point_strictly_inside(&probe, polygon)
    })
}

/// True iff segment `p1`-`p2` does not cross the interior of any obstacle.
pub fn segment_clear(p1: &Point, p2: &Point, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .filter(|o| !o.is_degenerate())
        .all(|o| !segment_crosses_interior(p1, p2, o))
}
