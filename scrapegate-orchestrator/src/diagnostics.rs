//! Diagnostic sinks
//!
//! Orchestration code never logs through a global; it writes to a
//! `DiagnosticSink` handed to it at construction time. In production the sink
//! forwards to `tracing`; tests use `BufferedSink` and inspect the entries.

use scrapegate_core::domain::log::{LogEntry, LogLevel};
use std::sync::{Arc, Mutex};

/// Destination for orchestration diagnostics
///
/// Shared across concurrent requests, so implementations must be thread safe.
pub trait DiagnosticSink: Send + Sync {
    /// Write a diagnostic message
    ///
    /// # Arguments
    /// * `level` - The log level (Debug, Info, Warning, Error)
    /// * `message` - The message content
    fn write(&self, level: LogLevel, message: &str);
}

/// Sink that forwards every entry to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warning => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
    }
}

/// In-memory sink
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferedSink {
    buffer: Arc<Mutex<Vec<LogEntry>>>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the buffered entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer.lock().unwrap().clone()
    }

    /// Buffered entries at the given level
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }
}

impl DiagnosticSink for BufferedSink {
    fn write(&self, level: LogLevel, message: &str) {
        let mut buffer = self.buffer.lock().unwrap();
        buffer.push(LogEntry::new(level, message));
    }
}
