use super::geometry::segment_clear;
use super::types::{Obstacle, Point, Workspace};
use crate::common::{DomainError, DomainResult};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeRef};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Undirected visibility graph keyed by point.
///
/// Vertices keep insertion order (start, goal, then obstacle corners as given)
/// and every edge weight is the Euclidean length of the segment it stands for.
/// The graph is never mutated once the builder hands it out.
#[derive(Debug, Clone, Default)]
pub struct VisibilityGraph {
    graph: UnGraph<Point, f64>,
    index: HashMap<Point, NodeIndex>,
}

impl VisibilityGraph {
    fn add_vertex(&mut self, p: Point) -> NodeIndex {
        if let Some(&idx) = self.index.get(&p) {
            return idx;
        }
        let idx = self.graph.add_node(p);
        self.index.insert(p, idx);
        idx
    }

    fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, weight: f64) {
        self.graph.add_edge(a, b, weight);
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.index.contains_key(p)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.graph.node_weights().copied()
    }

    /// Neighbors of `p` with edge weights, in edge insertion order.
    /// Unknown points have no neighbors.
    pub fn neighbors(&self, p: &Point) -> Vec<(Point, f64)> {
        let Some(&idx) = self.index.get(p) else {
            return Vec::new();
        };
        let mut incident: Vec<_> = self.graph.edges(idx).collect();
        incident.sort_by_key(|e| e.id());
        incident
            .into_iter()
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (self.graph[other], *e.weight())
            })
            .collect()
    }

    pub fn degree(&self, p: &Point) -> usize {
        self.index
            .get(p)
            .map(|&idx| self.graph.edges(idx).count())
            .unwrap_or(0)
    }

    pub fn edge_weight(&self, a: &Point, b: &Point) -> Option<f64> {
        let (ia, ib) = (*self.index.get(a)?, *self.index.get(b)?);
        self.graph.find_edge(ia, ib).map(|e| self.graph[e])
    }

    /// Every undirected edge once, in insertion order.
    pub fn edges(&self) -> Vec<(Point, Point, f64)> {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()], *e.weight()))
            .collect()
    }

    /// The adjacency mapping as an ordered list of (vertex, neighbors).
    pub fn adjacency(&self) -> Vec<(Point, Vec<(Point, f64)>)> {
        self.vertices().map(|v| (v, self.neighbors(&v))).collect()
    }

    /// Vertices sorted by descending degree; ties keep insertion order.
    pub fn degree_ranking(&self, limit: usize) -> Vec<(Point, usize)> {
        let mut ranking: Vec<(Point, usize)> =
            self.vertices().map(|v| (v, self.degree(&v))).collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking.truncate(limit);
        ranking
    }

    /// Vertices reachable from `p` in breadth-first order, `p` included.
    pub fn reachable_from(&self, p: &Point) -> Vec<Point> {
        let Some(&start) = self.index.get(p) else {
            return Vec::new();
        };
        let mut bfs = Bfs::new(&self.graph, start);
        let mut reached = Vec::new();
        while let Some(idx) = bfs.next(&self.graph) {
            reached.push(self.graph[idx]);
        }
        reached
    }

    /// True when `a` and `b` lie in the same connected component.
    pub fn connects(&self, a: &Point, b: &Point) -> bool {
        self.contains(b) && self.reachable_from(a).iter().any(|v| v == b)
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }
}

/// Counters gathered while testing vertex pairs. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    pub vertices: usize,
    pub pairs_considered: usize,
    pub skipped_by_cutoff: usize,
    pub blocked: usize,
    pub edges: usize,
}

#[derive(Debug, Clone)]
pub struct VisibilityBuild {
    pub graph: VisibilityGraph,
    pub stats: BuildStats,
}

#[derive(Debug, Clone, Default)]
pub struct VisibilityGraphBuilder {
    max_edge_length: Option<f64>,
}

impl VisibilityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip pairs farther apart than `max` without testing them.
    pub fn with_max_edge_length(mut self, max: f64) -> DomainResult<Self> {
        if !max.is_finite() || max <= 0.0 {
            return Err(DomainError::malformed(format!(
                "max edge length must be a positive finite number, got {}",
                max
            )));
        }
        self.max_edge_length = Some(max);
        Ok(self)
    }

    pub fn max_edge_length(&self) -> Option<f64> {
        self.max_edge_length
    }

    pub fn build_workspace(&self, workspace: &Workspace) -> DomainResult<VisibilityBuild> {
        self.build(workspace.start, workspace.goal, &workspace.obstacles)
    }

    pub fn build(&self, start: Point, goal: Point, obstacles: &[Obstacle]) -> DomainResult<VisibilityBuild> {
        let workspace = Workspace::new(start, goal, obstacles.to_vec());
        workspace.validate()?;

        let mut graph = VisibilityGraph::default();
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        for p in workspace.candidate_points() {
            let idx = graph.add_vertex(p);
            if seen.insert(idx) {
                nodes.push((p, idx));
            }
        }

        let mut stats = BuildStats { vertices: nodes.len(), ..BuildStats::default() };

        for (i, &(a, ia)) in nodes.iter().enumerate() {
            for &(b, ib) in &nodes[i + 1..] {
                stats.pairs_considered += 1;
                let distance = a.distance(&b);

                if matches!(self.max_edge_length, Some(max) if distance > max) {
                    stats.skipped_by_cutoff += 1;
                    continue;
                }

                if segment_clear(&a, &b, obstacles) {
                    graph.add_edge(ia, ib, distance);
                    stats.edges += 1;
                } else {
                    stats.blocked += 1;
                    trace!("blocked: {} <-> {} (dist={:.2})", a, b, distance);
                }
            }
        }

        debug!(
            "visibility graph: {} vertices, {} edges, {} pairs tested, {} blocked, {} beyond cutoff",
            stats.vertices, stats.edges, stats.pairs_considered, stats.blocked, stats.skipped_by_cutoff
        );

        Ok(VisibilityBuild { graph, stats })
    }
}

/// Build the visibility graph over start, goal and all obstacle corners.
pub fn visibility_graph(
    start: Point,
    goal: Point,
    obstacles: &[Obstacle],
    max_edge_length: Option<f64>,
) -> DomainResult<VisibilityGraph> {
    let builder = match max_edge_length {
        Some(max) => VisibilityGraphBuilder::new().with_max_edge_length(max)?,
        None => VisibilityGraphBuilder::new(),
    };
    Ok(builder.build(start, goal, obstacles)?.graph)
}
