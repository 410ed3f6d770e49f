//! Flight log
//!
//! Append-only, in-memory record of flight events for one session. Entries
//! keep their arrival order; timestamps are wall-clock UTC truncated to
//! whole seconds. Formatting to text happens when the log is read.

use crate::types::Timestamp;
use chrono::{SubsecRound, Utc};
use std::fmt;

/// One timestamped flight log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: Timestamp,
    message: String,
}

impl LogEntry {
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlightLog {
    entries: Vec<LogEntry>,
}

impl FlightLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current time
    pub fn append(&mut self, message: impl Into<String>) {
        self.append_at(Utc::now(), message);
    }

    /// Append a message with an explicit timestamp
    pub fn append_at(&mut self, timestamp: Timestamp, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Flight log: {}", message);
        self.entries.push(LogEntry {
            timestamp: timestamp.trunc_subsecs(0),
            message,
        });
    }

    /// Entries in arrival order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages in arrival order, without timestamps
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(LogEntry::message).collect()
    }

    /// `[HH:MM:SS] message` lines in arrival order
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|e| e.to_string())
    }

    /// The whole log as text, one line per entry
    pub fn render(&self) -> String {
        self.lines().fold(String::new(), |mut out, line| {
            out.push_str(&line);
            out.push('\n');
            out
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
