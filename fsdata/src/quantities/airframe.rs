//! Airframe read-outs: identity, attitude, ground state, pushback

use crate::conversion;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::Result;

/// Pushback state reported when nothing is being pushed
pub const NO_PUSHBACK: i32 = 3;

pub struct Airframe;

impl Airframe {
    /// Aircraft title as loaded in the simulator
    pub fn title(source: &dyn RawOffsetSource) -> Result<String> {
        source.read_string(offsets::AIRCRAFT_TITLE, offsets::AIRCRAFT_TITLE_LEN)
    }

    /// Pushback state, [`NO_PUSHBACK`] when idle
    pub fn pushback(source: &dyn RawOffsetSource) -> Result<i32> {
        source.read_i32(offsets::PUSHBACK)
    }

    pub fn pitch_degrees(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::pitch_degrees(source.read_i32(offsets::PITCH)?)
    }

    pub fn bank_degrees(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::bank_degrees(source.read_i32(offsets::BANK)?)
    }

    /// Bank angle as `0 (Level)`, `-12(R)` or `20(L)`
    pub fn bank_label(source: &dyn RawOffsetSource) -> Result<String> {
        Ok(conversion::bank_label(Self::bank_degrees(source)?))
    }

    pub fn is_airborne(source: &dyn RawOffsetSource) -> Result<bool> {
        Ok(!conversion::on_ground(source.read_i16(offsets::ON_GROUND)?))
    }
}
