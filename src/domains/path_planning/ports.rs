use super::report::PlanReport;
use super::types::Workspace;
use crate::common::DomainResult;

/// Port the path_planning domain depends on for loading planning maps.
/// Adapters provide filesystem or in-memory sources.
pub trait MapSource: Send + Sync {
    /// Raw map text by name.
    fn load_map_text(&self, name: &str) -> DomainResult<String>;
    /// Parsed workspace by name.
    fn load_workspace(&self, name: &str) -> DomainResult<Workspace>;
}

/// Port for handing a finished plan to an outside consumer (plotting, GIS).
pub trait PlanExporter: Send + Sync {
    fn export(&self, report: &PlanReport) -> DomainResult<()>;
}
