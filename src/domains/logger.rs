use chrono::Utc;
use fast_log::plugin::file::FileAppender;
use log::{error as log_error, info as log_info, warn as log_warn, LevelFilter};
use std::sync::Arc;

/// Domain-level logging port. Search services report through this; the
/// colony's inner loop uses `tracing` directly.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// File sink backed by `fast_log`. Console output is left to the tracing bridge.
pub struct FileLogger;

impl FileLogger {
    /// fast_log configuration with a single file appender at `path`.
    pub fn config(path: &str, level: LevelFilter) -> Result<fast_log::Config, fast_log::error::LogError> {
        let appender = FileAppender::new(path)?;
        Ok(fast_log::Config::new().add_appender(appender).level(level))
    }

    /// Initialize the process-wide fast_log appender writing to `path`.
    pub fn init(path: &str, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(Self::config(path, level)?)?;
        Ok(())
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log_info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log_warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log_error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Parse a level name from configuration; unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_writes_only_to_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.log");
        let config = FileLogger::config(path.to_str().unwrap(), LevelFilter::Debug).unwrap();
        assert_eq!(config.appends.load().len(), 1);
        assert_eq!(config.level, LevelFilter::Debug);
        assert!(path.exists());
    }

    #[test]
    fn test_parse_level_is_case_insensitive() {
        assert_eq!(parse_level("Error"), LevelFilter::Error);
        assert_eq!(parse_level(""), LevelFilter::Info);
    }
}
