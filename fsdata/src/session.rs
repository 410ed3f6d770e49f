//! Flight session orchestration
//!
//! A [`FlightSession`] owns one instance of every tracker, the flight log
//! and the diagnostics sink. Each call to [`FlightSession::poll_cycle`]
//! runs the pause tracker first and, unless the simulator is paused, every
//! other tracker in [`POLL_ORDER`]. A failing tracker is reported and
//! skipped; the rest of the cycle still runs.

use crate::applog::{AppLogger, LogFacade, Severity};
use crate::config::SessionConfig;
use crate::events::FlightEvent;
use crate::flight_log::FlightLog;
use crate::quantities::airframe::NO_PUSHBACK;
use crate::quantities::{Airframe, Altitude, Heading, Position};
use crate::source::RawOffsetSource;
use crate::trackers::{FuelTracker, PollContext, SimulatorTracker, Trackers, POLL_ORDER};
use crate::types::{FsDataError, Result};

/// A tracker that failed during a poll
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerFailure {
    /// Human-readable tracker name, e.g. `engine 2`
    pub tracker: String,
    pub error: FsDataError,
}

/// Outcome of one poll cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollReport {
    /// Pause state after the cycle; when set, only the pause tracker ran
    pub paused: bool,
    pub entries_appended: usize,
    pub failures: Vec<TrackerFailure>,
}

impl PollReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct FlightSession {
    config: SessionConfig,
    trackers: Trackers,
    flight_log: FlightLog,
    logger: Box<dyn AppLogger>,
}

impl FlightSession {
    /// Session reporting its diagnostics through the `log` facade
    pub fn new(config: SessionConfig) -> Self {
        Self::with_logger(config, Box::new(LogFacade))
    }

    pub fn with_logger(config: SessionConfig, logger: Box<dyn AppLogger>) -> Self {
        Self {
            config,
            trackers: Trackers::new(),
            flight_log: FlightLog::new(),
            logger,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn flight_log(&self) -> &FlightLog {
        &self.flight_log
    }

    pub fn trackers(&self) -> &Trackers {
        &self.trackers
    }

    pub fn is_paused(&self) -> bool {
        self.trackers.simulator.is_paused()
    }

    /// Run one poll cycle against the current simulator state
    pub fn poll_cycle(&mut self, source: &dyn RawOffsetSource) -> PollReport {
        let before = self.flight_log.len();
        let mut failures = Vec::new();

        match self.trackers.simulator.update(source) {
            Ok(Some(event)) => Self::append(&mut self.flight_log, event),
            Ok(None) => {}
            Err(e) => {
                self.logger
                    .record("Failed to update simulator pause state", Severity::Warning, Some(&e));
                failures.push(TrackerFailure {
                    tracker: "simulator".to_string(),
                    error: e,
                });
            }
        }

        let paused = self.trackers.simulator.is_paused();
        if !paused {
            let ctx = PollContext {
                source,
                logger: self.logger.as_ref(),
                config: &self.config,
            };

            for id in POLL_ORDER {
                match self.trackers.update(id, &ctx) {
                    Ok(events) => {
                        for event in events {
                            Self::append(&mut self.flight_log, event);
                        }
                    }
                    Err(e) => {
                        ctx.logger
                            .record(&format!("Failed to update {}", id), Severity::Warning, Some(&e));
                        failures.push(TrackerFailure {
                            tracker: id.to_string(),
                            error: e,
                        });
                    }
                }
            }
        }

        PollReport {
            paused,
            entries_appended: self.flight_log.len() - before,
            failures,
        }
    }

    fn append(flight_log: &mut FlightLog, event: FlightEvent) {
        flight_log.append(event.to_string());
    }

    /// Back to initial tracker state and a zero fuel baseline. The flight
    /// log is kept.
    pub fn reset_session(&mut self) {
        log::info!("Resetting flight session");
        self.trackers.reset_all();
    }

    pub fn clear_log(&mut self) {
        self.flight_log.clear();
    }

    pub fn start_fuel(&self) -> i32 {
        self.trackers.fuel.start_fuel()
    }

    pub fn set_start_fuel(&mut self, fuel: i32) {
        self.trackers.fuel.set_start_fuel(fuel);
    }

    /// Take the current fuel total as the baseline
    pub fn mark_fuel_start(&mut self, source: &dyn RawOffsetSource) -> Option<i32> {
        let units = self.config.fuel_units;
        let result = self.trackers.fuel.mark_flight_start(source, units);
        self.fuel_or_log(result)
    }

    /// Current fuel total in the configured unit, `None` if it could not
    /// be computed
    pub fn current_fuel(&self, source: &dyn RawOffsetSource) -> Option<i32> {
        self.fuel_or_log(FuelTracker::current_fuel(source, self.config.fuel_units))
    }

    pub fn current_fuel_label(&self, source: &dyn RawOffsetSource) -> Option<String> {
        self.fuel_or_log(FuelTracker::label(source, self.config.fuel_units))
    }

    pub fn fuel_used(&self, source: &dyn RawOffsetSource) -> Option<i32> {
        self.fuel_or_log(self.trackers.fuel.fuel_used(source, self.config.fuel_units))
    }

    fn fuel_or_log<T>(&self, result: Result<T>) -> Option<T> {
        result
            .map_err(|e| {
                self.logger
                    .record("Failed to calculate fuel weight", Severity::Error, Some(&e));
            })
            .ok()
    }

    /// Aircraft title, `None` if unreadable or not yet loaded
    pub fn aircraft_title(&self, source: &dyn RawOffsetSource) -> Option<String> {
        self.read_or_warn("aircraft title", Airframe::title(source))
            .filter(|title| !title.is_empty())
    }

    /// Pushback state, reading as [`NO_PUSHBACK`] when the offset fails
    pub fn pushback(&self, source: &dyn RawOffsetSource) -> i32 {
        self.read_or_warn("pushback state", Airframe::pushback(source))
            .unwrap_or(NO_PUSHBACK)
    }

    pub fn simulator_version(&self, source: &dyn RawOffsetSource) -> Option<&'static str> {
        self.read_or_warn("simulator version", SimulatorTracker::version(source))
    }

    /// Position as `latitude, longitude` in degrees, minutes and seconds
    pub fn position_label(&self, source: &dyn RawOffsetSource) -> Option<String> {
        let latitude = self.read_or_warn("latitude", Position::latitude(source))?;
        let longitude = self.read_or_warn("longitude", Position::longitude(source))?;
        Some(format!("{}, {}", latitude, longitude))
    }

    pub fn altitude_label(&self, source: &dyn RawOffsetSource) -> Option<String> {
        self.read_or_warn("altitude", Altitude::label(source))
    }

    pub fn vertical_speed_label(&self, source: &dyn RawOffsetSource) -> Option<String> {
        self.read_or_warn("vertical speed", Altitude::vertical_speed_label(source))
    }

    pub fn heading_label(&self, source: &dyn RawOffsetSource) -> Option<String> {
        self.read_or_warn("heading", Heading::whiskey(source))
    }

    fn read_or_warn<T>(&self, what: &str, result: Result<T>) -> Option<T> {
        result
            .map_err(|e| {
                self.logger
                    .record(&format!("Failed to read {}", what), Severity::Warning, Some(&e));
            })
            .ok()
    }

    /// Whether the engine at zero-based `index` exists on the aircraft
    pub fn engine_available(&self, source: &dyn RawOffsetSource, index: usize) -> Result<bool> {
        match self.trackers.engines.get(index) {
            Some(engine) => engine.is_available(source),
            None => Ok(false),
        }
    }
}
