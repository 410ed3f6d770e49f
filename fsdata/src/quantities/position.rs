//! Position read-outs

use crate::conversion;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::Result;

/// Aircraft position, decimal degrees or degrees-minutes-seconds text
pub struct Position;

impl Position {
    pub fn latitude_degrees(source: &dyn RawOffsetSource) -> Result<f64> {
        Ok(conversion::latitude_degrees(source.read_i64(offsets::LATITUDE)?))
    }

    pub fn longitude_degrees(source: &dyn RawOffsetSource) -> Result<f64> {
        Ok(conversion::longitude_degrees(source.read_i64(offsets::LONGITUDE)?))
    }

    /// Latitude as `33° 30' 0" S`
    pub fn latitude(source: &dyn RawOffsetSource) -> Result<String> {
        conversion::latitude_label(Self::latitude_degrees(source)?)
    }

    /// Longitude as `151° 10' 30" E`
    pub fn longitude(source: &dyn RawOffsetSource) -> Result<String> {
        conversion::longitude_label(Self::longitude_degrees(source)?)
    }
}
