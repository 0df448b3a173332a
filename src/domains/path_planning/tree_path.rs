//! Path lookup inside a spanning tree.
//!
//! A tree holds exactly one simple path between two of its vertices, so a
//! depth-first walk that backtracks out of dead branches finds it without
//! comparing alternatives. The path is only as short as the tree allows: the
//! spanning tree minimises total weight, not the distance between any given
//! pair, so the result can be longer than the shortest route through the
//! visibility graph.

use super::spanning_tree::TreeEdge;
use super::types::Point;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreePath {
    pub points: Vec<Point>,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoPathReason {
    EmptyTree,
    StartNotInTree,
    EndNotInTree,
    Disconnected,
}

/// Outcome of a tree path search. Not finding a path is a normal result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathSearch {
    Found(TreePath),
    NotFound(NoPathReason),
}

impl PathSearch {
    pub fn found(self) -> Option<TreePath> {
        match self {
            PathSearch::Found(path) => Some(path),
            PathSearch::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathSearch::Found(_))
    }
}

/// Bidirectional adjacency over the tree edges, neighbors in edge order.
pub fn tree_adjacency(edges: &[TreeEdge]) -> HashMap<Point, Vec<(Point, f64)>> {
    let mut adjacency: HashMap<Point, Vec<(Point, f64)>> = HashMap::new();
    for edge in edges {
        adjacency.entry(edge.from).or_default().push((edge.to, edge.weight));
        adjacency.entry(edge.to).or_default().push((edge.from, edge.weight));
    }
    adjacency
}

/// Depth-first search for the path from `start` to `end` along `edges`.
///
/// The walk keeps its own stack, so distance and visited state live only for
/// the duration of one call.
pub fn find_tree_path(start: Point, end: Point, edges: &[TreeEdge]) -> PathSearch {
    if edges.is_empty() {
        return PathSearch::NotFound(NoPathReason::EmptyTree);
    }
    let adjacency = tree_adjacency(edges);
    if !adjacency.contains_key(&start) {
        return PathSearch::NotFound(NoPathReason::StartNotInTree);
    }
    if !adjacency.contains_key(&end) {
        return PathSearch::NotFound(NoPathReason::EndNotInTree);
    }

    let mut visited = HashSet::from([start]);
    let mut path = vec![start];
    // Per frame: accumulated distance and index of the next neighbor to try.
    let mut frames = vec![(0.0_f64, 0_usize)];

    while let Some(&current) = path.last() {
        let Some(frame) = frames.last_mut() else { break };
        let distance = frame.0;
        if current == end {
            return PathSearch::Found(TreePath { points: path, distance });
        }

        let neighbors = &adjacency[&current];
        match neighbors.get(frame.1) {
            Some(&(next, weight)) => {
                frame.1 += 1;
                if visited.insert(next) {
                    path.push(next);
                    frames.push((distance + weight, 0));
                }
            }
            None => {
                path.pop();
                frames.pop();
            }
        }
    }

    PathSearch::NotFound(NoPathReason::Disconnected)
}

/// Path length over direct distance. Coincident endpoints give `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DetourRatio {
    Finite(f64),
    Infinite,
}

impl DetourRatio {
    pub fn value(&self) -> f64 {
        match self {
            DetourRatio::Finite(v) => *v,
            DetourRatio::Infinite => f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathQuality {
    Efficient,
    Reasonable,
    Long,
}

impl PathQuality {
    pub fn classify(ratio: DetourRatio) -> Self {
        match ratio {
            DetourRatio::Finite(r) if r < 1.5 => PathQuality::Efficient,
            DetourRatio::Finite(r) if r < 2.5 => PathQuality::Reasonable,
            _ => PathQuality::Long,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub total_distance: f64,
    pub mean_edge_distance: f64,
    pub direct_distance: f64,
    pub ratio: DetourRatio,
}

/// Quality figures for `points` walked over `distance`.
///
/// With fewer than two vertices every figure is zero; a single vertex has
/// coincident endpoints and therefore an infinite ratio.
pub fn path_stats(points: &[Point], distance: f64) -> PathStats {
    if points.len() < 2 {
        return PathStats {
            vertex_count: points.len(),
            edge_count: 0,
            total_distance: 0.0,
            mean_edge_distance: 0.0,
            direct_distance: 0.0,
            ratio: if points.is_empty() { DetourRatio::Finite(0.0) } else { DetourRatio::Infinite },
        };
    }

    let edge_count = points.len() - 1;
    let direct_distance = points[0].distance(&points[edge_count]);
    let ratio = if direct_distance > 0.0 {
        DetourRatio::Finite(distance / direct_distance)
    } else {
        DetourRatio::Infinite
    };

    PathStats {
        vertex_count: points.len(),
        edge_count,
        total_distance: distance,
        mean_edge_distance: distance / edge_count as f64,
        direct_distance,
        ratio,
    }
}
