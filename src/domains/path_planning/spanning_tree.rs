use super::types::Point;
use super::visibility::VisibilityGraph;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeEdge {
    pub from: Point,
    pub to: Point,
    pub weight: f64,
}

/// Result of growing a spanning tree from one root.
///
/// `reached` holds every vertex connected to the root, in the order Prim
/// committed them; the root comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub root: Point,
    pub edges: Vec<TreeEdge>,
    pub total_weight: f64,
    pub reached: Vec<Point>,
}

impl SpanningTree {
    pub fn reaches(&self, p: &Point) -> bool {
        self.reached.iter().any(|v| v == p)
    }

    pub fn reached_set(&self) -> HashSet<Point> {
        self.reached.iter().copied().collect()
    }
}

/// Union of edge endpoints in first-seen order.
pub fn tree_vertices(edges: &[TreeEdge]) -> Vec<Point> {
    let mut seen = HashSet::new();
    let mut vertices = Vec::new();
    for edge in edges {
        for p in [edge.from, edge.to] {
            if seen.insert(p) {
                vertices.push(p);
            }
        }
    }
    vertices
}

/// Prim's algorithm from `root`.
///
/// Equal-weight candidates pop in the order they were pushed. A root that
/// is not a vertex of `graph` yields a single-node tree with zero weight.
pub fn prim(graph: &VisibilityGraph, root: Point) -> SpanningTree {
    let mut visited = HashSet::new();
    let mut heap = BinaryHeap::new();
    let mut candidates = Vec::new();
    let mut edges = Vec::new();
    let mut total_weight = 0.0;
    let mut reached = vec![root];

    visited.insert(root);
    push_candidates(graph, root, &visited, &mut heap, &mut candidates);

    while let Some(Reverse((weight, slot))) = heap.pop() {
        let (from, to) = candidates[slot];
        if !visited.insert(to) {
            continue;
        }
        edges.push(TreeEdge { from, to, weight: weight.0 });
        total_weight += weight.0;
        reached.push(to);
        push_candidates(graph, to, &visited, &mut heap, &mut candidates);
    }

    SpanningTree { root, edges, total_weight, reached }
}

// Heap entries carry a slot into `candidates`; the slot doubles as the tie-break.
fn push_candidates(
    graph: &VisibilityGraph,
    from: Point,
    visited: &HashSet<Point>,
    heap: &mut BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>>,
    candidates: &mut Vec<(Point, Point)>,
) {
    for (neighbor, weight) in graph.neighbors(&from) {
        if !visited.contains(&neighbor) {
            heap.push(Reverse((OrderedFloat(weight), candidates.len())));
            candidates.push((from, neighbor));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTreeValidation {
    pub valid: bool,
    pub total_vertices: usize,
    pub reached_vertices: usize,
    pub tree_edges: usize,
    pub expected_edges: usize,
    pub fully_connected: bool,
    pub disconnected_vertices: usize,
    pub coverage: f64,
}

/// Structural check of a tree against the graph it came from.
pub fn validate_spanning_tree(
    graph: &VisibilityGraph,
    edges: &[TreeEdge],
    reached: &HashSet<Point>,
) -> SpanningTreeValidation {
    let total_vertices = graph.vertex_count();
    let reached_vertices = reached.len();
    let expected_edges = reached_vertices.saturating_sub(1);
    let coverage = if total_vertices > 0 {
        reached_vertices as f64 / total_vertices as f64
    } else {
        0.0
    };

    SpanningTreeValidation {
        valid: reached_vertices > 0 && edges.len() == expected_edges,
        total_vertices,
        reached_vertices,
        tree_edges: edges.len(),
        expected_edges,
        fully_connected: reached_vertices == total_vertices,
        disconnected_vertices: total_vertices.saturating_sub(reached_vertices),
        coverage,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub edge_count: usize,
}

/// Weight summary; an empty edge set yields all zeros.
pub fn weight_stats(edges: &[TreeEdge]) -> WeightStats {
    if edges.is_empty() {
        return WeightStats::default();
    }
    let total: f64 = edges.iter().map(|e| e.weight).sum();
    let min = edges.iter().map(|e| e.weight).fold(f64::INFINITY, f64::min);
    let max = edges.iter().map(|e| e.weight).fold(f64::NEG_INFINITY, f64::max);
    WeightStats {
        total,
        mean: total / edges.len() as f64,
        min,
        max,
        edge_count: edges.len(),
    }
}
