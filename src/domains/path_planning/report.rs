use super::nearest::NearestVertex;
use super::spanning_tree::{SpanningTree, SpanningTreeValidation, WeightStats};
use super::tree_path::{PathQuality, PathSearch, PathStats};
use super::types::{Point, Workspace};
use super::visibility::BuildStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of one planning run, handed to renderers and exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub workspace: Workspace,
    pub graph: GraphSummary,
    pub tree: SpanningTree,
    pub tree_stats: WeightStats,
    pub validation: SpanningTreeValidation,
    pub probes: Vec<NearestProbe>,
    pub path: PathSearch,
    pub path_stats: Option<PathStats>,
    pub quality: Option<PathQuality>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
    pub build: BuildStats,
    pub top_degrees: Vec<(Point, usize)>,
    pub start_goal_connected: bool,
    /// Every visibility edge once, as (from, to, length).
    pub edge_list: Vec<(Point, Point, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexKind {
    Start,
    Goal,
    ObstacleCorner,
}

impl VertexKind {
    pub fn of(vertex: &Point, workspace: &Workspace) -> Self {
        if *vertex == workspace.start {
            VertexKind::Start
        } else if *vertex == workspace.goal {
            VertexKind::Goal
        } else {
            VertexKind::ObstacleCorner
        }
    }
}

/// A nearest-vertex lookup against the spanning tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestProbe {
    pub query: Point,
    pub nearest: Option<NearestVertex>,
    pub kind: Option<VertexKind>,
    pub error: Option<String>,
}
