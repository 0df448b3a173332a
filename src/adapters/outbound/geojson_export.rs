use crate::common::{DomainError, DomainResult};
use crate::domains::path_planning::ports::PlanExporter;
use crate::domains::path_planning::report::PlanReport;
use crate::domains::path_planning::types::{Obstacle, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use std::fs;
use std::path::PathBuf;

fn feature(value: Value, layer: &str, extra: &[(&str, serde_json::Value)]) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("layer".to_string(), serde_json::Value::from(layer));
    for (key, value) in extra {
        properties.insert((*key).to_string(), value.clone());
    }
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn segment(a: &Point, b: &Point) -> Value {
    Value::LineString(vec![a.to_position(), b.to_position()])
}

fn obstacle_geometry(obstacle: &Obstacle) -> Value {
    if obstacle.is_degenerate() {
        return Value::MultiPoint(obstacle.vertices.iter().map(Point::to_position).collect());
    }
    let mut ring: Vec<Vec<f64>> = obstacle.vertices.iter().map(Point::to_position).collect();
    ring.push(obstacle.vertices[0].to_position());
    Value::Polygon(vec![ring])
}

/// Layers: `obstacle`, `endpoint`, `visibility`, `tree`, `path`.
pub fn plan_to_geojson(report: &PlanReport) -> FeatureCollection {
    let mut features = Vec::new();

    for (i, obstacle) in report.workspace.obstacles.iter().enumerate() {
        features.push(feature(obstacle_geometry(obstacle), "obstacle", &[("index", i.into())]));
    }

    features.push(feature(Value::Point(report.workspace.start.to_position()), "endpoint", &[("role", "start".into())]));
    features.push(feature(Value::Point(report.workspace.goal.to_position()), "endpoint", &[("role", "goal".into())]));

    for (a, b, length) in &report.graph.edge_list {
        features.push(feature(segment(a, b), "visibility", &[("length", (*length).into())]));
    }

    for edge in &report.tree.edges {
        features.push(feature(segment(&edge.from, &edge.to), "tree", &[("weight", edge.weight.into())]));
    }

    if let Some(path) = report.path.clone().found() {
        if path.points.len() > 1 {
            let line = Value::LineString(path.points.iter().map(Point::to_position).collect());
            features.push(feature(line, "path", &[("distance", path.distance.into())]));
        }
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes the plan as a GeoJSON FeatureCollection for plotting tools.
pub struct GeoJsonFileExporter {
    path: PathBuf,
}

impl GeoJsonFileExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlanExporter for GeoJsonFileExporter {
    fn export(&self, report: &PlanReport) -> DomainResult<()> {
        let collection = plan_to_geojson(report);
        let body = serde_json::to_string_pretty(&collection)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
            }
        }
        fs::write(&self.path, body).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        Ok(())
    }
}
