//! Aircraft tracker: parking brake, landing gear, landing rate

use super::PollContext;
use crate::conversion;
use crate::events::FlightEvent;
use crate::offsets;
use crate::types::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AircraftTracker {
    parking_brake_set: bool,
    gear_down: bool,
    landing_rate: Option<i32>,
}

impl AircraftTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parking_brake_set(&self) -> bool {
        self.parking_brake_set
    }

    pub fn gear_down(&self) -> bool {
        self.gear_down
    }

    /// Vertical speed at the last touchdown, `None` until first polled
    pub fn landing_rate(&self) -> Option<i32> {
        self.landing_rate
    }

    pub fn update_parking_brake(&mut self, ctx: &PollContext<'_>) -> Result<Option<FlightEvent>> {
        let set = conversion::parking_brake_set(ctx.source.read_i16(offsets::PARKING_BRAKE)?);
        if set == self.parking_brake_set {
            return Ok(None);
        }

        self.parking_brake_set = set;
        Ok(Some(if set {
            FlightEvent::ParkingBrakeSet
        } else {
            FlightEvent::ParkingBrakeReleased
        }))
    }

    pub fn update_landing_gear(&mut self, ctx: &PollContext<'_>) -> Result<Option<FlightEvent>> {
        let nose = ctx.source.read_i32(offsets::GEAR_NOSE)?;
        let left = ctx.source.read_i32(offsets::GEAR_LEFT)?;
        let right = ctx.source.read_i32(offsets::GEAR_RIGHT)?;

        let down = conversion::gear_down(nose, left, right);
        if down == self.gear_down {
            return Ok(None);
        }

        self.gear_down = down;
        Ok(Some(FlightEvent::LandingGear {
            down,
            altitude: ctx.altitude_label(),
        }))
    }

    /// Overwrite the landing rate with the current reading; never logs
    pub fn update_landing_rate(&mut self, ctx: &PollContext<'_>) -> Result<()> {
        let raw = ctx.source.read_i32(offsets::LANDING_RATE)?;
        self.landing_rate = Some(conversion::vertical_speed_fpm(raw)?);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
