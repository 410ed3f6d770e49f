//! Simulator tracker: pause state and product version

use crate::conversion;
use crate::events::FlightEvent;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatorTracker {
    paused: bool,
}

impl SimulatorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Runs ahead of every other tracker and decides whether they run
    pub fn update(&mut self, source: &dyn RawOffsetSource) -> Result<Option<FlightEvent>> {
        let paused = conversion::is_paused(source.read_i16(offsets::PAUSE)?);
        if paused == self.paused {
            return Ok(None);
        }

        self.paused = paused;
        Ok(Some(if paused {
            FlightEvent::SimulatorPaused
        } else {
            FlightEvent::SimulatorResumed
        }))
    }

    /// Name of the connected simulator, e.g. `FSX`
    pub fn version(source: &dyn RawOffsetSource) -> Result<&'static str> {
        conversion::simulator_name(source.read_i16(offsets::SIMULATOR_VERSION)?)
    }

    pub fn reset(&mut self) {
        self.paused = false;
    }
}
