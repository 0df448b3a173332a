use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{Context, Result};

use crate::common::DomainResult;
use crate::domains::path_planning::VisibilityGraphBuilder;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub map: MapConfig,
    pub planner: PlannerConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Directory holding map files; `None` defers to the data source's lookup.
    pub data_dir: Option<String>,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Pairs farther apart than this are never connected.
    pub max_edge_length: Option<f64>,
    /// How many vertices to list in the degree ranking.
    pub top_degrees: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub geojson: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
    /// Records held for the background log writer before new ones are dropped.
    pub buffer: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file: "map.txt".to_string(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_edge_length: None,
            top_degrees: 6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
            buffer: 1024,
        }
    }
}

impl PlannerConfig {
    pub fn graph_builder(&self) -> DomainResult<VisibilityGraphBuilder> {
        match self.max_edge_length {
            Some(max) => VisibilityGraphBuilder::new().with_max_edge_length(max),
            None => Ok(VisibilityGraphBuilder::new()),
        }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.planner.graph_builder()?;
        Ok(config)
    }
}
