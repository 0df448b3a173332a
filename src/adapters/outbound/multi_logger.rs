use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards every record to each attached logger in order.
pub struct MultiLogger {
    targets: Vec<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(targets: Vec<Arc<dyn DomainLogger>>) -> Self {
        Self { targets }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.error(msg));
    }
}

/// Console logging, plus file logging when `path` is given and `fast_log` starts.
pub fn init_planner_logger(path: Option<&str>, level: log::LevelFilter) -> Arc<dyn DomainLogger> {
    let console = crate::adapters::outbound::init_console_logger();
    let Some(path) = path else {
        return console;
    };
    attach_file_logger(console, crate::adapters::outbound::file_logger::init_file_logger(path, level))
}

/// Fan out to `console` and the file logger; on a failed file logger the
/// failure is reported on `console`, which then logs alone.
pub fn attach_file_logger(
    console: Arc<dyn DomainLogger>,
    file_logger: Result<Arc<dyn DomainLogger>, String>,
) -> Arc<dyn DomainLogger> {
    match file_logger {
        Ok(file_logger) => Arc::new(MultiLogger::new(vec![console, file_logger])),
        Err(e) => {
            console.warn(&e);
            console
        }
    }
}
