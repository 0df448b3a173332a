pub mod path_planning_service;
pub mod report_renderer;

pub use path_planning_service::*;
pub use report_renderer::*;
