use crate::domains::logger::DomainLogger;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

enum Level {
    Info,
    Warn,
    Error,
}

struct LogRecord {
    level: Level,
    msg: String,
}

struct BufferedLogger {
    sender: mpsc::Sender<LogRecord>,
}

impl BufferedLogger {
    // Never blocks the planner: records are dropped when the buffer is full.
    fn offer(&self, level: Level, msg: &str) {
        let _ = self.sender.try_send(LogRecord { level, msg: msg.to_string() });
    }
}

impl DomainLogger for BufferedLogger {
    fn info(&self, msg: &str) { self.offer(Level::Info, msg); }
    fn warn(&self, msg: &str) { self.offer(Level::Warn, msg); }
    fn error(&self, msg: &str) { self.offer(Level::Error, msg); }
}

/// Decouple logging from the planning loop. A background task drains up to
/// `capacity` pending records into `sink`. Must be called inside a tokio runtime.
///
/// The returned handle finishes once every clone of the logger is dropped
/// and the backlog has been written; await it before exiting to flush.
pub fn init_buffered_logger(
    sink: Arc<dyn DomainLogger>,
    capacity: usize,
) -> (Arc<dyn DomainLogger>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<LogRecord>(capacity.max(1));

    let drain = tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            match record.level {
                Level::Info => sink.info(&record.msg),
                Level::Warn => sink.warn(&record.msg),
                Level::Error => sink.error(&record.msg),
            }
        }
    });

    (Arc::new(BufferedLogger { sender: tx }), drain)
}
