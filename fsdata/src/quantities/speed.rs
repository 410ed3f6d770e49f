//! Speed read-outs

use crate::conversion;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::Result;

/// Speed quantities, knots and feet per minute
pub struct Speed;

impl Speed {
    pub fn ground_knots(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::ground_speed_knots(source.read_i32(offsets::GROUND_SPEED)?)
    }

    pub fn true_airspeed_knots(source: &dyn RawOffsetSource) -> Result<i32> {
        Ok(conversion::airspeed_knots(source.read_i32(offsets::TRUE_AIRSPEED)?))
    }

    pub fn indicated_airspeed_knots(source: &dyn RawOffsetSource) -> Result<i32> {
        Ok(conversion::airspeed_knots(
            source.read_i32(offsets::INDICATED_AIRSPEED)?,
        ))
    }

    pub fn vertical_fpm(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::vertical_speed_fpm(source.read_i32(offsets::VERTICAL_SPEED)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::OffsetMemory;

    #[test]
    fn test_speed_read_outs() {
        let mut mem = OffsetMemory::new();
        mem.write_i32(offsets::GROUND_SPEED, 128 * 65536).unwrap();
        mem.write_i32(offsets::TRUE_AIRSPEED, 260 * 128).unwrap();
        mem.write_i32(offsets::INDICATED_AIRSPEED, 250 * 128).unwrap();
        mem.write_i32(offsets::VERTICAL_SPEED, -1300).unwrap();

        assert_eq!(Speed::ground_knots(&mem).unwrap(), 249);
        assert_eq!(Speed::true_airspeed_knots(&mem).unwrap(), 260);
        assert_eq!(Speed::indicated_airspeed_knots(&mem).unwrap(), 250);
        assert_eq!(Speed::vertical_fpm(&mem).unwrap(), -1000);
    }
}
