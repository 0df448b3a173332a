use super::spanning_tree::{tree_vertices, SpanningTree, TreeEdge};
use super::types::Point;
use super::visibility::VisibilityGraph;
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Anything that exposes a vertex set for nearest-vertex queries.
pub trait VertexSource {
    /// Vertices in the order queries scan them; ties go to the earliest.
    fn vertex_list(&self) -> Vec<Point>;
}

impl VertexSource for VisibilityGraph {
    fn vertex_list(&self) -> Vec<Point> {
        self.vertices().collect()
    }
}

impl VertexSource for [TreeEdge] {
    fn vertex_list(&self) -> Vec<Point> {
        tree_vertices(self)
    }
}

impl VertexSource for Vec<TreeEdge> {
    fn vertex_list(&self) -> Vec<Point> {
        tree_vertices(self)
    }
}

impl VertexSource for SpanningTree {
    fn vertex_list(&self) -> Vec<Point> {
        tree_vertices(&self.edges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestVertex {
    pub vertex: Point,
    pub distance: f64,
}

/// Linear scan for the vertex closest to `query`.
///
/// Fails with `MalformedInput` when `query` has a non-finite coordinate or
/// the source has no vertices.
pub fn nearest_vertex<S>(query: &Point, source: &S) -> DomainResult<NearestVertex>
where
    S: VertexSource + ?Sized,
{
    query.validate()?;

    let mut best: Option<NearestVertex> = None;
    for vertex in source.vertex_list() {
        let distance = query.distance(&vertex);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(NearestVertex { vertex, distance });
        }
    }

    best.ok_or_else(|| DomainError::malformed("vertex set is empty, nothing to search"))
}
