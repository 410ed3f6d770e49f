//! Light switch tracker
//!
//! All ten categories come from one bit-field read. Every category that
//! changed in the same poll gets its own entry, in bit order.

use super::PollContext;
use crate::events::{FlightEvent, Light};
use crate::offsets;
use crate::types::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightsTracker {
    on: [bool; 10],
}

impl LightsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self, light: Light) -> bool {
        self.on[light.bit()]
    }

    pub fn update(&mut self, ctx: &PollContext<'_>) -> Result<Vec<FlightEvent>> {
        let bits = ctx.source.read_bits(offsets::LIGHTS, offsets::LIGHTS_LEN)?;

        let changed: Vec<(Light, bool)> = Light::ALL
            .iter()
            .map(|&light| (light, bits.bit(light.bit())))
            .filter(|&(light, on)| on != self.is_on(light))
            .collect();
        if changed.is_empty() {
            return Ok(Vec::new());
        }

        let altitude = ctx.altitude_label();
        Ok(changed
            .into_iter()
            .map(|(light, on)| {
                self.on[light.bit()] = on;
                FlightEvent::Light {
                    light,
                    on,
                    altitude: altitude.clone(),
                }
            })
            .collect())
    }

    pub fn reset(&mut self) {
        self.on = Default::default();
    }
}
