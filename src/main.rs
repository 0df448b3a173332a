use visibility_planner::Config;
use visibility_planner::adapters::outbound::{
    init_buffered_logger, init_planner_logger, FilesystemDataSource, GeoJsonFileExporter,
};
use visibility_planner::application::{render_report, PathPlanningService};
use visibility_planner::domains::logger::parse_level;
use visibility_planner::domains::path_planning::{MapSource, PlanExporter};
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional arguments: [map file] [config file]
    let mut args = std::env::args().skip(1);
    let map_arg = args.next();
    let config_path = args.next().unwrap_or_else(|| "planner.toml".to_string());

    let config = if Path::new(&config_path).exists() {
        let config = Config::from_file(&config_path).await?;
        info!("Configuration loaded from {}", config_path);
        config
    } else {
        info!("No {} found, using defaults", config_path);
        Config::default()
    };

    let sinks = init_planner_logger(config.logging.file.as_deref(), parse_level(&config.logging.level));
    let (logger, log_drain) = init_buffered_logger(sinks, config.logging.buffer);

    let map_name = map_arg.unwrap_or_else(|| config.map.file.clone());
    let data_source = FilesystemDataSource::new(config.map.data_dir.as_ref().map(PathBuf::from));
    let ds_arc: Arc<dyn MapSource> = Arc::new(data_source);

    let mut service = PathPlanningService::new(ds_arc, logger, config.planner.clone());
    if let Some(path) = &config.output.geojson {
        let exporter: Arc<dyn PlanExporter> = Arc::new(GeoJsonFileExporter::new(path));
        service = service.with_exporter(exporter);
    }

    info!("Planning on map {}", map_name);
    let outcome = service.plan_map(&map_name);

    // The service holds the last logger handle; dropping it lets the drain finish.
    drop(service);
    log_drain.await?;

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!("Planning failed: {}", e);
            return Err(e.into());
        }
    };

    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }

    Ok(())
}
