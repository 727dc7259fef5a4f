use crate::domains::logger::{DomainLogger, DynLogger, FileLogger};
use log::LevelFilter;
use std::sync::Arc;

/// Initialize the fast_log file sink and return a logger that writes into it.
pub fn init_file_logger(path: &str, level: LevelFilter) -> Result<DynLogger, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger) as Arc<dyn DomainLogger>)
}
