use log::{error, info};
use std::sync::Mutex;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Level {
    Info,
    Error,
}

/// Destination for diagnostic records
pub trait DiagnosticSink: Send + Sync {
    fn info(&self, record: &str);
    fn error(&self, record: &str);
}

/// Forwards records to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogSink {
    target: String,
}

impl LogSink {
    pub const DEFAULT_TARGET: &'static str = "response_inspector";

    pub fn new(target: impl Into<String>) -> Self {
        LogSink {
            target: target.into(),
        }
    }

    /// Target from `INSPECTOR_LOG_TARGET`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var("INSPECTOR_LOG_TARGET") {
            Ok(target) if !target.is_empty() => LogSink::new(target),
            _ => LogSink::default(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogSink {
    fn default() -> Self {
        LogSink::new(Self::DEFAULT_TARGET)
    }
}

impl DiagnosticSink for LogSink {
    fn info(&self, record: &str) {
        info!(target: &self.target, "{}", record);
    }

    fn error(&self, record: &str) {
        error!(target: &self.target, "{}", record);
    }
}

/// Keeps every record in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    pub fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.lock())
    }

    pub fn count(&self, level: Level) -> usize {
        self.lock().iter().filter(|(l, _)| *l == level).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        // a poisoned recorder still holds valid records
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, level: Level, record: &str) {
        self.lock().push((level, record.to_string()));
    }
}

impl DiagnosticSink for MemorySink {
    fn info(&self, record: &str) {
        self.push(Level::Info, record);
    }

    fn error(&self, record: &str) {
        self.push(Level::Error, record);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn info(&self, record: &str) {
        (**self).info(record);
    }

    fn error(&self, record: &str) {
        (**self).error(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order_and_levels() {
        let sink = MemorySink::new();
        sink.info("a");
        sink.error("b");
        sink.info("c");
        assert_eq!(
            sink.records(),
            vec![
                (Level::Info, "a".to_string()),
                (Level::Error, "b".to_string()),
                (Level::Info, "c".to_string()),
            ]
        );
        assert_eq!(sink.count(Level::Info), 2);
        assert_eq!(sink.take().len(), 3);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::Info.to_string(), "INFO");
        assert_eq!(Level::Error.to_string(), "ERROR");
    }

    #[test]
    fn log_sink_default_target() {
        assert_eq!(LogSink::default().target(), "response_inspector");
        assert_eq!(LogSink::new("hooks").target(), "hooks");
    }
}
