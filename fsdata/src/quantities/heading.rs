//! Heading read-out

use crate::conversion;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::Result;

pub struct Heading;

impl Heading {
    /// Whiskey-compass heading in whole degrees, as text
    pub fn whiskey(source: &dyn RawOffsetSource) -> Result<String> {
        conversion::heading_label(source.read_f64(offsets::WHISKEY_HEADING)?)
    }
}
