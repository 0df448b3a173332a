use crate::domains::logger::DomainLogger;
use std::sync::{Arc, Mutex};

struct NoOp;

impl DomainLogger for NoOp {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Discards everything; default for unit tests.
pub fn init_noop_logger() -> Arc<dyn DomainLogger> {
    Arc::new(NoOp {})
}

/// Keeps every record in memory as `LEVEL:message`.
#[derive(Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<String> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn push(&self, level: &str, msg: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(format!("{}:{}", level, msg));
        }
    }
}

impl DomainLogger for MemoryLogger {
    fn info(&self, msg: &str) { self.push("INFO", msg); }
    fn warn(&self, msg: &str) { self.push("WARN", msg); }
    fn error(&self, msg: &str) { self.push("ERROR", msg); }
}
