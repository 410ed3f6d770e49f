//! Replay of recorded simulator state
//!
//! A replay file is JSON Lines: one frame per line, each frame a set of
//! offset writes applied to an in-memory offset area followed by one poll
//! cycle. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! {"writes":[{"offset":612,"value":{"i16":1}}]}
//! {"writes":[{"offset":612,"value":{"i16":0}}],"mark_fuel_start":true}
//! {"reset":true,"clear_log":true}
//! ```

use fsdata::{Address, FlightSession, FsDataError, OffsetMemory, PollReport, RawValue};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Failed to open replay file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read replay line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Invalid replay frame at line {line}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid offset write at line {line}")]
    Write {
        line: usize,
        #[source]
        source: FsDataError,
    },
}

/// One value stored at one offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetWrite {
    pub offset: Address,
    pub value: RawValue,
}

/// Simulator state changes between two polls, plus session actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    #[serde(default)]
    pub writes: Vec<OffsetWrite>,

    /// Reset every tracker before this frame's poll
    #[serde(default)]
    pub reset: bool,

    /// Take the fuel on board after this frame's poll as the baseline
    #[serde(default)]
    pub mark_fuel_start: bool,

    #[serde(default)]
    pub clear_log: bool,
}

/// A frame and the line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedFrame {
    pub line: usize,
    pub frame: ReplayFrame,
}

/// Parse every frame of a replay stream
pub fn parse_frames<R: BufRead>(reader: R) -> Result<Vec<NumberedFrame>, ReplayError> {
    let mut frames = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ReplayError::Read {
            line: line_no,
            source,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let frame = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
            line: line_no,
            source,
        })?;
        frames.push(NumberedFrame {
            line: line_no,
            frame,
        });
    }

    log::debug!("Parsed {} replay frames", frames.len());
    Ok(frames)
}

pub fn read_frames(path: &Path) -> Result<Vec<NumberedFrame>, ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_frames(BufReader::new(file))
}

/// Totals over a whole replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub paused_frames: usize,
    pub entries_appended: usize,
    pub failures: usize,
}

impl ReplaySummary {
    fn add(&mut self, report: &PollReport) {
        self.frames += 1;
        if report.paused {
            self.paused_frames += 1;
        }
        self.entries_appended += report.entries_appended;
        self.failures += report.failures.len();
    }
}

/// Drives a session over an in-memory offset area
pub struct Replayer {
    memory: OffsetMemory,
    session: FlightSession,
}

impl Replayer {
    pub fn new(session: FlightSession) -> Self {
        Self {
            memory: OffsetMemory::new(),
            session,
        }
    }

    pub fn session(&self) -> &FlightSession {
        &self.session
    }

    pub fn memory(&self) -> &OffsetMemory {
        &self.memory
    }

    /// Apply one frame: reset, clear, writes, poll, then fuel baseline
    pub fn apply(&mut self, frame: &NumberedFrame) -> Result<PollReport, ReplayError> {
        let actions = &frame.frame;

        if actions.reset {
            self.session.reset_session();
        }
        if actions.clear_log {
            self.session.clear_log();
        }

        for write in &actions.writes {
            self.memory
                .write(write.offset, &write.value)
                .map_err(|source| ReplayError::Write {
                    line: frame.line,
                    source,
                })?;
        }

        let report = self.session.poll_cycle(&self.memory);
        for failure in &report.failures {
            log::debug!("Line {}: {} failed: {}", frame.line, failure.tracker, failure.error);
        }

        if actions.mark_fuel_start {
            if let Some(fuel) = self.session.mark_fuel_start(&self.memory) {
                log::info!("Fuel baseline set to {}{}", fuel, self.session.config().fuel_units);
            }
        }

        Ok(report)
    }

    pub fn run(&mut self, frames: &[NumberedFrame]) -> Result<ReplaySummary, ReplayError> {
        let mut summary = ReplaySummary::default();
        for frame in frames {
            let report = self.apply(frame)?;
            summary.add(&report);
        }

        log::info!(
            "Replayed {} frames, {} log entries, {} tracker failures",
            summary.frames,
            summary.entries_appended,
            summary.failures
        );
        Ok(summary)
    }
}
