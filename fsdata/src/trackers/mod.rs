//! Stateful trackers
//!
//! Each tracker owns the snapshot of one discrete subsystem fact. On
//! `update` it reads the current status, compares it against the snapshot,
//! and on a change overwrites the snapshot and returns the event to log.
//! `reset` puts the snapshot back to its initial value without emitting
//! anything.
//!
//! A tracker that fails to read leaves its snapshot alone and returns the
//! error; a failed read is never a transition.

pub mod aircraft;
pub mod engines;
pub mod flaps;
pub mod fuel;
pub mod lights;
pub mod radios;
pub mod simulator;

pub use aircraft::AircraftTracker;
pub use engines::{EngineTracker, ENGINE_COUNT};
pub use flaps::FlapsTracker;
pub use fuel::FuelTracker;
pub use lights::LightsTracker;
pub use radios::{RadioTracker, TransponderTracker};
pub use simulator::SimulatorTracker;

use crate::applog::{AppLogger, Severity};
use crate::config::SessionConfig;
use crate::events::{FlightEvent, Radio};
use crate::quantities::Altitude;
use crate::source::RawOffsetSource;
use crate::types::Result;
use std::fmt;

/// Everything a tracker may consult during one update
pub struct PollContext<'a> {
    pub source: &'a dyn RawOffsetSource,
    pub logger: &'a dyn AppLogger,
    pub config: &'a SessionConfig,
}

impl PollContext<'_> {
    /// Altitude text to annotate a transition with
    ///
    /// A failed read must not cost the transition its log entry, so this
    /// falls back to `Unknown Altitude` and reports the failure.
    pub fn altitude_label(&self) -> String {
        Altitude::label(self.source).unwrap_or_else(|e| {
            self.logger.record(
                "Failed to process aircraft altitude to string format",
                Severity::Warning,
                Some(&e),
            );
            "Unknown Altitude".to_string()
        })
    }
}

/// The trackers run during an active poll, excluding the pause tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerId {
    ParkingBrake,
    LandingGear,
    LandingRate,
    /// Zero-based engine position
    Engine(usize),
    Flaps,
    Lights,
    Radio(Radio),
    Transponder,
}

/// Order of the active-poll trackers
///
/// The aircraft trackers come first; the rest may annotate their entries
/// with airborne state.
pub const POLL_ORDER: [TrackerId; 14] = [
    TrackerId::ParkingBrake,
    TrackerId::LandingGear,
    TrackerId::LandingRate,
    TrackerId::Engine(0),
    TrackerId::Engine(1),
    TrackerId::Engine(2),
    TrackerId::Engine(3),
    TrackerId::Flaps,
    TrackerId::Lights,
    TrackerId::Radio(Radio::Com1),
    TrackerId::Radio(Radio::Com2),
    TrackerId::Radio(Radio::Nav1),
    TrackerId::Radio(Radio::Nav2),
    TrackerId::Transponder,
];

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerId::ParkingBrake => write!(f, "parking brake"),
            TrackerId::LandingGear => write!(f, "landing gear"),
            TrackerId::LandingRate => write!(f, "landing rate"),
            TrackerId::Engine(i) => write!(f, "engine {}", i + 1),
            TrackerId::Flaps => write!(f, "flaps"),
            TrackerId::Lights => write!(f, "lights"),
            TrackerId::Radio(radio) => write!(f, "{}", radio),
            TrackerId::Transponder => write!(f, "XPNDR"),
        }
    }
}

/// One instance of every tracker
#[derive(Debug, Clone, PartialEq)]
pub struct Trackers {
    pub simulator: SimulatorTracker,
    pub aircraft: AircraftTracker,
    pub engines: [EngineTracker; ENGINE_COUNT],
    pub flaps: FlapsTracker,
    pub fuel: FuelTracker,
    pub lights: LightsTracker,
    pub radios: [RadioTracker; 4],
    pub transponder: TransponderTracker,
}

impl Trackers {
    pub fn new() -> Self {
        Self {
            simulator: SimulatorTracker::new(),
            aircraft: AircraftTracker::new(),
            engines: std::array::from_fn(EngineTracker::new),
            flaps: FlapsTracker::new(),
            fuel: FuelTracker::new(),
            lights: LightsTracker::new(),
            radios: Radio::ALL.map(RadioTracker::new),
            transponder: TransponderTracker::new(),
        }
    }

    /// Run one active-poll tracker
    pub fn update(&mut self, id: TrackerId, ctx: &PollContext<'_>) -> Result<Vec<FlightEvent>> {
        let event = match id {
            TrackerId::ParkingBrake => self.aircraft.update_parking_brake(ctx)?,
            TrackerId::LandingGear => self.aircraft.update_landing_gear(ctx)?,
            TrackerId::LandingRate => {
                self.aircraft.update_landing_rate(ctx)?;
                None
            }
            TrackerId::Engine(index) => match self.engines.get_mut(index) {
                Some(engine) => engine.update(ctx)?,
                None => None,
            },
            TrackerId::Flaps => self.flaps.update(ctx)?,
            TrackerId::Lights => return self.lights.update(ctx),
            TrackerId::Radio(radio) => match self.radios.iter_mut().find(|r| r.radio() == radio) {
                Some(tracker) => tracker.update(ctx)?,
                None => None,
            },
            TrackerId::Transponder => self.transponder.update(ctx)?,
        };

        Ok(event.into_iter().collect())
    }

    /// Restore every snapshot and the fuel baseline to initial values
    pub fn reset_all(&mut self) {
        self.simulator.reset();
        self.aircraft.reset();
        self.engines.iter_mut().for_each(EngineTracker::reset);
        self.flaps.reset();
        self.fuel.reset();
        self.lights.reset();
        self.radios.iter_mut().for_each(RadioTracker::reset);
        self.transponder.reset();
    }

    pub fn radio(&self, radio: Radio) -> Option<&RadioTracker> {
        self.radios.iter().find(|r| r.radio() == radio)
    }
}

impl Default for Trackers {
    fn default() -> Self {
        Self::new()
    }
}
