//! Engine trackers
//!
//! Four independent instances, one per engine position. Availability comes
//! from the engine count and is read on demand; it plays no part in
//! transition logging.

use super::PollContext;
use crate::conversion;
use crate::events::FlightEvent;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::Result;

/// Number of engine positions tracked
pub const ENGINE_COUNT: usize = offsets::ENGINE_COMBUSTION.len();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTracker {
    index: usize,
    running: bool,
}

impl EngineTracker {
    /// Tracker for the engine at zero-based `index`
    pub fn new(index: usize) -> Self {
        Self {
            index,
            running: false,
        }
    }

    /// One-based engine position, as used in log messages
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether this engine position exists on the loaded aircraft
    pub fn is_available(&self, source: &dyn RawOffsetSource) -> Result<bool> {
        let count = source.read_i16(offsets::ENGINE_COUNT)?;
        Ok(conversion::engine_available(count, self.index))
    }

    pub fn update(&mut self, ctx: &PollContext<'_>) -> Result<Option<FlightEvent>> {
        let Some(&address) = offsets::ENGINE_COMBUSTION.get(self.index) else {
            return Ok(None);
        };

        let running = conversion::engine_running(ctx.source.read_i16(address)?);
        if running == self.running {
            return Ok(None);
        }

        self.running = running;
        Ok(Some(FlightEvent::Engine {
            number: self.number(),
            running,
        }))
    }

    pub fn reset(&mut self) {
        self.running = false;
    }
}
