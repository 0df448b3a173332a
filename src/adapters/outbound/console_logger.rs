use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Plain stdout/stderr logger tagged with a component name.
struct ConsoleBridge {
    tag: String,
}

impl DomainLogger for ConsoleBridge {
    fn info(&self, msg: &str) { println!("[{}] {}", self.tag, msg); }
    fn warn(&self, msg: &str) { println!("[{}] WARN: {}", self.tag, msg); }
    fn error(&self, msg: &str) { eprintln!("[{}] ERROR: {}", self.tag, msg); }
}

/// Console-backed DomainLogger, also the fallback when file logging fails.
pub fn init_console_logger() -> Arc<dyn DomainLogger> {
    init_tagged_console_logger("planner")
}

pub fn init_tagged_console_logger(tag: &str) -> Arc<dyn DomainLogger> {
    Arc::new(ConsoleBridge { tag: tag.to_string() })
}
