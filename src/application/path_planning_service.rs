// Path Planning Service - runs the visibility graph -> spanning tree -> tree path pipeline
use std::sync::Arc;
use chrono::Utc;
use crate::common::{ApplicationError, ApplicationResult, DomainResult};
use crate::config::PlannerConfig;
use crate::domains::logger::DynLogger;
use crate::domains::path_planning::{
    find_tree_path, nearest_vertex, path_stats, prim, validate_spanning_tree, weight_stats,
    GraphSummary, MapSource, NearestProbe, PathQuality, PathSearch, PlanExporter, PlanReport,
    Point, TreeEdge, VertexKind, Workspace,
};

pub struct PathPlanningService {
    data_source: Arc<dyn MapSource>,
    logger: DynLogger,
    settings: PlannerConfig,
    exporter: Option<Arc<dyn PlanExporter>>,
}

impl PathPlanningService {
    pub fn new(data_source: Arc<dyn MapSource>, logger: DynLogger, settings: PlannerConfig) -> Self {
        Self { data_source, logger, settings, exporter: None }
    }

    pub fn with_exporter(mut self, exporter: Arc<dyn PlanExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn load_workspace(&self, name: &str) -> DomainResult<Workspace> {
        self.data_source.load_workspace(name)
    }

    /// Load `name` through the data source and plan on it.
    pub fn plan_map(&self, name: &str) -> ApplicationResult<PlanReport> {
        let workspace = self.load_workspace(name)?;
        self.logger.info(&format!("Map '{}' loaded", name));
        self.plan(&workspace)
    }

    pub fn plan(&self, workspace: &Workspace) -> ApplicationResult<PlanReport> {
        workspace.validate()?;
        let log = &self.logger;
        log.info(&format!(
            "start {} goal {} with {} obstacles ({} corners)",
            workspace.start,
            workspace.goal,
            workspace.obstacles.len(),
            workspace.corner_count()
        ));

        let build = self.settings.graph_builder()?.build_workspace(workspace)?;
        let graph = build.graph;
        let start_goal_connected = graph.connects(&workspace.start, &workspace.goal);
        log.info(&format!(
            "Visibility graph: {} vertices, {} edges ({} pairs tested, {} blocked)",
            graph.vertex_count(),
            graph.edge_count(),
            build.stats.pairs_considered,
            build.stats.blocked
        ));
        if start_goal_connected {
            log.info("Start and goal share a connected component");
        } else {
            log.warn("Start and goal lie in different components of the visibility graph");
        }

        let summary = GraphSummary {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            components: graph.component_count(),
            build: build.stats,
            top_degrees: graph.degree_ranking(self.settings.top_degrees),
            start_goal_connected,
            edge_list: graph.edges(),
        };

        let tree = prim(&graph, workspace.start);
        let tree_stats = weight_stats(&tree.edges);
        let validation = validate_spanning_tree(&graph, &tree.edges, &tree.reached_set());
        log.info(&format!(
            "Spanning tree: {} edges, total weight {:.2}, coverage {}/{}",
            tree_stats.edge_count, tree_stats.total, validation.reached_vertices, validation.total_vertices
        ));
        if !validation.fully_connected {
            log.warn(&format!(
                "Spanning tree covers only the start component; {} vertices unreached",
                validation.disconnected_vertices
            ));
        }

        let probes = self.probe_nearest(workspace, &tree.edges);

        let path = find_tree_path(workspace.start, workspace.goal, &tree.edges);
        let (path_summary, quality) = match &path {
            PathSearch::Found(found) => {
                let stats = path_stats(&found.points, found.distance);
                let quality = PathQuality::classify(stats.ratio);
                log.info(&format!(
                    "Path found: {} vertices, distance {:.2}, quality {:?}",
                    stats.vertex_count, stats.total_distance, quality
                ));
                (Some(stats), Some(quality))
            }
            PathSearch::NotFound(reason) => {
                log.warn(&format!("No path between start and goal: {:?}", reason));
                (None, None)
            }
        };

        let report = PlanReport {
            workspace: workspace.clone(),
            graph: summary,
            tree,
            tree_stats,
            validation,
            probes,
            path,
            path_stats: path_summary,
            quality,
            generated_at: Utc::now(),
        };

        if let Some(exporter) = &self.exporter {
            exporter
                .export(&report)
                .map_err(|e| ApplicationError::Export(e.to_string()))?;
            log.info("Plan exported");
        }

        Ok(report)
    }

    /// Midpoint of start and goal, both endpoints, and a point just off start.
    fn probe_nearest(&self, workspace: &Workspace, tree_edges: &[TreeEdge]) -> Vec<NearestProbe> {
        let queries = [
            workspace.start.midpoint(&workspace.goal),
            workspace.start,
            workspace.goal,
            Point::new(workspace.start.x + 1.0, workspace.start.y + 1.0),
        ];

        queries
            .iter()
            .map(|query| match nearest_vertex(query, tree_edges) {
                Ok(hit) => NearestProbe {
                    query: *query,
                    nearest: Some(hit),
                    kind: Some(VertexKind::of(&hit.vertex, workspace)),
                    error: None,
                },
                Err(e) => {
                    self.logger.warn(&format!("Nearest-vertex probe at {} failed: {}", query, e));
                    NearestProbe { query: *query, nearest: None, kind: None, error: Some(e.to_string()) }
                }
            })
            .collect()
    }
}
