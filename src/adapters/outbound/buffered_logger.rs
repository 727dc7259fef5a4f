use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Warn,
    Error,
}

struct Entry {
    level: Level,
    msg: String,
}

struct BufferedLogger {
    sender: mpsc::Sender<Entry>,
}

impl BufferedLogger {
    fn push(&self, level: Level, msg: &str) {
        // never block a search thread on a slow sink; drop when full
        let _ = self.sender.try_send(Entry { level, msg: msg.to_string() });
    }
}

impl DomainLogger for BufferedLogger {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }
}

/// Non-blocking logger draining into `sink` from a background task.
/// Must be called inside a tokio runtime.
pub fn init_buffered_logger(sink: DynLogger, capacity: usize) -> DynLogger {
    let (sender, mut receiver) = mpsc::channel::<Entry>(capacity.max(1));
    tokio::spawn(async move {
        while let Some(entry) = receiver.recv().await {
            match entry.level {
                Level::Info => sink.info(&entry.msg),
                Level::Warn => sink.warn(&entry.msg),
                Level::Error => sink.error(&entry.msg),
            }
        }
    });
    Arc::new(BufferedLogger { sender })
}
