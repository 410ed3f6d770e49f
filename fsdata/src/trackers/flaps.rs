//! Flap detent tracker

use super::PollContext;
use crate::applog::Severity;
use crate::conversion;
use crate::events::{FlapContext, FlightEvent};
use crate::offsets;
use crate::quantities::{Airframe, Speed};
use crate::types::{FsDataError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlapsTracker {
    position: i32,
    /// Set until the first zero detent step has been seen. The simulator
    /// leaves the step at zero until it is fully loaded.
    first_update: bool,
}

impl FlapsTracker {
    pub fn new() -> Self {
        Self {
            position: 0,
            first_update: true,
        }
    }

    /// Current detent index
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn update(&mut self, ctx: &PollContext<'_>) -> Result<Option<FlightEvent>> {
        let raw = ctx.source.read_i32(offsets::FLAPS_POSITION)?;
        let step = ctx.source.read_i16(offsets::FLAPS_STEP)?;
        let position = match conversion::flap_detent(raw, step) {
            Ok(position) => position,
            Err(FsDataError::DivideByZero(_))
                if std::mem::replace(&mut self.first_update, false) =>
            {
                return Ok(None)
            }
            Err(e) => return Err(e),
        };

        if position == self.position {
            return Ok(None);
        }

        self.position = position;
        Ok(Some(FlightEvent::Flaps {
            position,
            context: Self::airborne_context(ctx),
        }))
    }

    /// Altitude and speed annotation, only while airborne
    fn airborne_context(ctx: &PollContext<'_>) -> Option<FlapContext> {
        let airborne = Airframe::is_airborne(ctx.source).unwrap_or_else(|e| {
            ctx.logger.record(
                "Failed to read ground state for flaps",
                Severity::Warning,
                Some(&e),
            );
            false
        });
        if !airborne {
            return None;
        }

        let indicated_airspeed = match Speed::indicated_airspeed_knots(ctx.source) {
            Ok(ias) => Some(ias),
            Err(e) => {
                ctx.logger.record(
                    "Failed to read indicated airspeed for flaps",
                    Severity::Warning,
                    Some(&e),
                );
                None
            }
        };

        Some(FlapContext {
            altitude: ctx.altitude_label(),
            indicated_airspeed,
        })
    }

    /// Back to detent zero. Only the first zero detent step after
    /// construction is tolerated, so this leaves that alone.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl Default for FlapsTracker {
    fn default() -> Self {
        Self::new()
    }
}
