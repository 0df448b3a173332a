use std::fmt::Write;
use crate::domains::path_planning::{DetourRatio, PathQuality, PathSearch, PlanReport, Point, VertexKind};

const FULL_PATH_LIMIT: usize = 6;

fn ratio_text(ratio: DetourRatio) -> String {
    match ratio {
        DetourRatio::Finite(r) => format!("{:.2}x", r),
        DetourRatio::Infinite => "inf".to_string(),
    }
}

fn quality_text(quality: PathQuality) -> &'static str {
    match quality {
        PathQuality::Efficient => "efficient (ratio < 1.5)",
        PathQuality::Reasonable => "reasonable (1.5 <= ratio < 2.5)",
        PathQuality::Long => "long (ratio >= 2.5)",
    }
}

/// Paths longer than six vertices show the first and last three.
pub fn path_sequence_lines(points: &[Point]) -> Vec<String> {
    let numbered = |i: usize| format!("{}. {}", i + 1, points[i]);
    if points.len() <= FULL_PATH_LIMIT {
        return (0..points.len()).map(numbered).collect();
    }
    let mut lines: Vec<String> = (0..3).map(numbered).collect();
    lines.push("...".to_string());
    lines.extend((points.len() - 3..points.len()).map(numbered));
    lines
}

/// Human-readable summary of a planning run.
pub fn render_report(report: &PlanReport) -> String {
    let mut out = String::new();
    let ws = &report.workspace;
    let g = &report.graph;
    let v = &report.validation;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Start: {}  Goal: {}", ws.start, ws.goal);
    let _ = writeln!(out, "Obstacles: {} ({} corners)", ws.obstacles.len(), ws.corner_count());

    let _ = writeln!(out, "\nVisibility graph");
    let _ = writeln!(out, "  vertices: {}  edges: {}  components: {}", g.vertices, g.edges, g.components);
    let _ = writeln!(out, "  pairs tested: {}  blocked: {}  beyond cutoff: {}", g.build.pairs_considered, g.build.blocked, g.build.skipped_by_cutoff);
    let degrees: Vec<String> = g.top_degrees.iter().map(|(p, d)| format!("{}: {}", p, d)).collect();
    let _ = writeln!(out, "  top degrees: {}", degrees.join(", "));
    let _ = writeln!(
        out,
        "  start/goal {}",
        if g.start_goal_connected { "connected" } else { "NOT connected" }
    );

    let _ = writeln!(out, "\nSpanning tree (Prim from start)");
    let _ = writeln!(out, "  edges: {}  total weight: {:.2}", report.tree_stats.edge_count, report.tree_stats.total);
    let _ = writeln!(
        out,
        "  weight mean/min/max: {:.2} / {:.2} / {:.2}",
        report.tree_stats.mean, report.tree_stats.min, report.tree_stats.max
    );
    let _ = writeln!(out, "  coverage: {}/{} ({:.1}%)", v.reached_vertices, v.total_vertices, v.coverage * 100.0);
    if !v.fully_connected {
        let _ = writeln!(out, "  disconnected vertices: {}", v.disconnected_vertices);
    }
    let _ = writeln!(out, "  goal in tree: {}", report.tree.reaches(&ws.goal));

    let _ = writeln!(out, "\nNearest tree vertex");
    for probe in &report.probes {
        match (&probe.nearest, probe.kind) {
            (Some(hit), Some(kind)) => {
                let kind = match kind {
                    VertexKind::Start => "start",
                    VertexKind::Goal => "goal",
                    VertexKind::ObstacleCorner => "obstacle corner",
                };
                let _ = writeln!(out, "  {} -> {} ({}, dist {:.3})", probe.query, hit.vertex, kind, hit.distance);
            }
            _ => {
                let _ = writeln!(out, "  {} -> none ({})", probe.query, probe.error.as_deref().unwrap_or("unknown"));
            }
        }
    }

    let _ = writeln!(out, "\nPath");
    match (&report.path, &report.path_stats) {
        (PathSearch::Found(path), Some(stats)) => {
            let _ = writeln!(out, "  vertices: {}  edges: {}", stats.vertex_count, stats.edge_count);
            let _ = writeln!(out, "  distance: {:.2}  mean per edge: {:.2}", stats.total_distance, stats.mean_edge_distance);
            let _ = writeln!(out, "  direct: {:.2}  ratio: {}", stats.direct_distance, ratio_text(stats.ratio));
            if let Some(quality) = report.quality {
                let _ = writeln!(out, "  quality: {}", quality_text(quality));
            }
            for line in path_sequence_lines(&path.points) {
                let _ = writeln!(out, "    {}", line);
            }
        }
        (PathSearch::NotFound(reason), _) => {
            let _ = writeln!(out, "  no path: {:?}", reason);
        }
        (PathSearch::Found(_), None) => {}
    }

    out
}
