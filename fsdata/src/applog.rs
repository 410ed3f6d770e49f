//! Application diagnostics
//!
//! Failures inside the core are never fatal; they are reported through an
//! [`AppLogger`] and the poll carries on. This is independent of the flight
//! log, which only ever receives flight events.

use crate::types::FsDataError;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a diagnostic record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Note, usually for debugging
    Info,
    /// Potentially harmful situation
    Warning,
    /// A problem the software can continue past
    Error,
    /// A problem the software cannot continue past
    Fatal,
}

impl Severity {
    /// Matching `log` level; `Fatal` has no counterpart and maps to `Error`
    pub fn level(&self) -> log::Level {
        match self {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error | Severity::Fatal => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
            Severity::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Sink for diagnostics raised when a read or conversion fails
pub trait AppLogger {
    fn record(&self, message: &str, severity: Severity, error: Option<&FsDataError>);
}

/// Forwards records to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl AppLogger for LogFacade {
    fn record(&self, message: &str, severity: Severity, error: Option<&FsDataError>) {
        match error {
            Some(e) => log::log!(severity.level(), "{}: {}: {}", severity, message, e),
            None => log::log!(severity.level(), "{}: {}", severity, message),
        }
    }
}

/// One captured diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub message: String,
    pub severity: Severity,
    pub error: Option<FsDataError>,
}

/// Keeps every record in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of records at the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.records()
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

impl AppLogger for MemoryLogger {
    fn record(&self, message: &str, severity: Severity, error: Option<&FsDataError>) {
        LogFacade.record(message, severity, error);
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogRecord {
                message: message.to_string(),
                severity,
                error: error.cloned(),
            });
    }
}
