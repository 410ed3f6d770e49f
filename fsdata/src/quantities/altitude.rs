//! Altitude read-outs

use crate::conversion;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::{FsDataError, Result};

/// Altitude quantities
pub struct Altitude;

impl Altitude {
    /// Altitude on the 1013.25 hPa datum, in feet
    pub fn standard_ft(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::metres_to_feet(source.read_f64(offsets::STANDARD_ALTITUDE)?)
    }

    /// Altitude on the local pressure setting, in feet
    pub fn indicated_ft(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::metres_to_feet(source.read_i32(offsets::ALTITUDE_METRES)? as f64)
    }

    /// Ground elevation below the aircraft, in feet
    pub fn ground_ft(source: &dyn RawOffsetSource) -> Result<i32> {
        conversion::metres_to_feet(source.read_i16(offsets::GROUND_ALTITUDE)? as f64)
    }

    /// Height above ground: local-pressure altitude minus ground elevation
    pub fn agl_ft(source: &dyn RawOffsetSource) -> Result<i32> {
        let indicated = Self::indicated_ft(source)?;
        let ground = Self::ground_ft(source)?;
        indicated.checked_sub(ground).ok_or_else(|| {
            FsDataError::ConversionFailure(format!("AGL {} - {}", indicated, ground))
        })
    }

    /// Local-pressure altitude above the transition altitude, standard
    /// altitude at or below it
    pub fn current_ft(source: &dyn RawOffsetSource) -> Result<i32> {
        let standard = Self::standard_ft(source)?;
        if standard > conversion::TRANSITION_ALTITUDE_FT {
            Self::indicated_ft(source)
        } else {
            Ok(standard)
        }
    }

    /// `FL180` above the transition altitude, `3200AGL` below
    pub fn label(source: &dyn RawOffsetSource) -> Result<String> {
        let standard = Self::standard_ft(source)?;
        match conversion::flight_level_label(standard) {
            Some(fl) => Ok(fl),
            None => Ok(conversion::agl_label(Self::agl_ft(source)?)),
        }
    }

    /// Vertical speed from the altitude block, e.g. `+500fpm`
    pub fn vertical_speed_label(source: &dyn RawOffsetSource) -> Result<String> {
        let raw = source.read_i16(offsets::ALTITUDE_VERTICAL_SPEED)?;
        Ok(conversion::vertical_speed_label(
            conversion::altitude_vertical_speed_fpm(raw)?,
        ))
    }
}
