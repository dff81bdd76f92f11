//! Diagnostics logger injected into the bridge
//!
//! The bridge reports load outcomes through `Arc<dyn Logger>` rather than
//! calling `tracing` directly, so embedders and tests can capture them.

use tracing::Level;

/// Key/value context attached to a diagnostic line
pub type Fields<'a> = &'a [(&'a str, &'a str)];

/// Sink for bridge diagnostics
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: Fields<'_>);

    fn debug(&self, message: &str, fields: Fields<'_>) {
        self.log(Level::DEBUG, message, fields);
    }

    fn info(&self, message: &str, fields: Fields<'_>) {
        self.log(Level::INFO, message, fields);
    }

    fn warn(&self, message: &str, fields: Fields<'_>) {
        self.log(Level::WARN, message, fields);
    }

    fn error(&self, message: &str, fields: Fields<'_>) {
        self.log(Level::ERROR, message, fields);
    }
}

fn render_fields(fields: Fields<'_>) -> String {
    fields
        .iter()
        .map(|(key, value)| format!(" {}={}", key, value))
        .collect()
}

/// Forwards to `tracing`, so the host's subscriber decides what is shown
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: Fields<'_>) {
        let fields = render_fields(fields);
        match level {
            Level::ERROR => tracing::error!("{}{}", message, fields),
            Level::WARN => tracing::warn!("{}{}", message, fields),
            Level::INFO => tracing::info!("{}{}", message, fields),
            Level::DEBUG => tracing::debug!("{}{}", message, fields),
            _ => tracing::trace!("{}{}", message, fields),
        }
    }
}

/// Writes to stderr without a subscriber, dropping lines above `max_level`
#[derive(Debug, Clone)]
pub struct StderrLogger {
    max_level: Level,
}

impl StderrLogger {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Level, message: &str, fields: Fields<'_>) {
        if self.enabled(level) {
            eprintln!("[{}] {}{}", level, message, render_fields(fields));
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str, _fields: Fields<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fields_keeps_order() {
        let fields = [("file", "b.rive"), ("batch", "2")];
        assert_eq!(render_fields(&fields), " file=b.rive batch=2");
    }

    #[test]
    fn test_render_no_fields() {
        assert_eq!(render_fields(&[]), "");
    }

    #[test]
    fn test_stderr_logger_filters_by_level() {
        let logger = StderrLogger::default();
        assert!(logger.enabled(Level::ERROR));
        assert!(logger.enabled(Level::INFO));
        assert!(!logger.enabled(Level::DEBUG));

        let verbose = StderrLogger::new(Level::TRACE);
        assert!(verbose.enabled(Level::DEBUG));
    }

    #[test]
    fn test_loggers_are_object_safe() {
        let loggers: Vec<Box<dyn Logger>> = vec![
            Box::new(TracingLogger),
            Box::new(StderrLogger::new(Level::ERROR)),
            Box::new(NullLogger),
        ];
        for logger in &loggers {
            logger.debug("loaded", &[("batch", "0")]);
        }
    }
}
