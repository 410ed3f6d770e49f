//! Flight Simulator Data Library
//!
//! Reads raw flight-simulator state through an offset source, turns it into
//! physical quantities and keeps a timestamped flight log of the discrete
//! changes a pilot cares about (gear, flaps, lights, engines, radios, ...).
//!
//! # Architecture
//!
//! - [`RawOffsetSource`] is the only way in: typed reads at fixed offsets
//! - [`conversion`] and [`quantities`] are stateless formulas over raw values
//! - [`trackers`] own one snapshot each and emit a [`FlightEvent`] per edge
//! - [`FlightSession`] runs the trackers once per poll and owns the [`FlightLog`]
//!
//! The library does NOT:
//! - Connect to a simulator or schedule polling
//! - Persist the flight log
//!
//! Both live in the application layer (fsdata-cli).
//!
//! # Example Usage
//!
//! ```
//! use fsdata::{offsets, FlightSession, OffsetMemory, SessionConfig};
//!
//! let mut memory = OffsetMemory::new();
//! let mut session = FlightSession::new(SessionConfig::default());
//!
//! memory.write_i16(offsets::PARKING_BRAKE, 32767).unwrap();
//! let report = session.poll_cycle(&memory);
//!
//! assert_eq!(report.entries_appended, 1);
//! assert_eq!(session.flight_log().messages(), vec!["Parking Brake Set"]);
//! ```

// Public modules
pub mod applog;
pub mod config;
pub mod conversion;
pub mod events;
pub mod flight_log;
pub mod offsets;
pub mod quantities;
pub mod session;
pub mod source;
pub mod trackers;
pub mod types;

// Re-export main types for convenience
pub use applog::{AppLogger, LogFacade, LogRecord, MemoryLogger, Severity};
pub use config::SessionConfig;
pub use conversion::SquawkClass;
pub use events::{FlapContext, FlightEvent, Light, Radio};
pub use flight_log::{FlightLog, LogEntry};
pub use quantities::{Airframe, Altitude, Heading, Position, Speed};
pub use session::{FlightSession, PollReport, TrackerFailure};
pub use source::{BitField, OffsetMemory, RawOffsetSource, RawValue};
pub use trackers::{TrackerId, Trackers};
pub use types::{Address, FsDataError, FuelUnits, Result, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
