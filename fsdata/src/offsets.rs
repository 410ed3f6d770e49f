//! Offset map
//!
//! Addresses of every offset the quantities and trackers read. Widths are
//! noted next to each address; strings and bit-fields carry their length.

use crate::types::Address;

// Simulator
pub const PAUSE: Address = 0x0264; // i16, 1 = paused
pub const SIMULATOR_VERSION: Address = 0x3308; // i16

// Aircraft
pub const ON_GROUND: Address = 0x0366; // i16, >0 = on ground
pub const PUSHBACK: Address = 0x31F0; // i32, 3 = no pushback
pub const PARKING_BRAKE: Address = 0x0BC8; // i16
pub const LANDING_RATE: Address = 0x030C; // i32, vertical speed at touchdown
pub const AIRCRAFT_TITLE: Address = 0x3D00;
pub const AIRCRAFT_TITLE_LEN: usize = 256;
pub const GEAR_NOSE: Address = 0x0BEC; // i32
pub const GEAR_RIGHT: Address = 0x0BF0; // i32
pub const GEAR_LEFT: Address = 0x0BF4; // i32
pub const PITCH: Address = 0x0578; // i32
pub const BANK: Address = 0x057C; // i32

// Altitude
pub const ALTITUDE_METRES: Address = 0x0574; // i32, local pressure
pub const STANDARD_ALTITUDE: Address = 0x34B0; // f64 metres, 1013.25 hPa
pub const GROUND_ALTITUDE: Address = 0x0B4C; // i16 metres
pub const ALTITUDE_VERTICAL_SPEED: Address = 0x0842; // i16

// Speed
pub const GROUND_SPEED: Address = 0x02B4; // i32, m/s * 65536
pub const TRUE_AIRSPEED: Address = 0x02B8; // i32, knots * 128
pub const INDICATED_AIRSPEED: Address = 0x02BC; // i32, knots * 128
pub const VERTICAL_SPEED: Address = 0x02C8; // i32

// Position and heading
pub const LATITUDE: Address = 0x0560; // i64
pub const LONGITUDE: Address = 0x0568; // i64
pub const WHISKEY_HEADING: Address = 0x02CC; // f64 degrees

// Engines
pub const ENGINE_COMBUSTION: [Address; 4] = [0x0894, 0x092C, 0x09C4, 0x0A5C]; // i16 each
pub const ENGINE_COUNT: Address = 0x0AEC; // i16

// Flaps
pub const FLAPS_POSITION: Address = 0x0BDC; // i32
pub const FLAPS_STEP: Address = 0x3BFA; // i16, zero until the sim populates it

// Lights
pub const LIGHTS: Address = 0x0D0C;
pub const LIGHTS_LEN: usize = 2;

// Radios
pub const COM1: Address = 0x034E; // u16 BCD
pub const COM2: Address = 0x3118; // u16 BCD
pub const NAV1: Address = 0x0350; // u16 BCD
pub const NAV2: Address = 0x0352; // u16 BCD
pub const TRANSPONDER: Address = 0x0354; // u16 BCD
pub const NAV1_IDENT: Address = 0x3000;
pub const NAV2_IDENT: Address = 0x301F;
pub const NAV_IDENT_LEN: usize = 6;

// Fuel
pub const FUEL_WEIGHT: Address = 0x0AF4; // i16, lbs per gallon * 256

/// Level and capacity offsets of one fuel tank (both i32)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TankOffsets {
    pub name: &'static str,
    pub level: Address,
    pub capacity: Address,
}

const fn tank(name: &'static str, level: Address, capacity: Address) -> TankOffsets {
    TankOffsets {
        name,
        level,
        capacity,
    }
}

/// Every tank summed into the total fuel figure
pub const FUEL_TANKS: [TankOffsets; 11] = [
    tank("center", 0x0B74, 0x0B78),
    tank("center 2", 0x1244, 0x1248),
    tank("center 3", 0x124C, 0x1250),
    tank("left main", 0x0B7C, 0x0B80),
    tank("left aux", 0x0B84, 0x0B88),
    tank("left tip", 0x0B8C, 0x0B90),
    tank("right main", 0x0B94, 0x0B98),
    tank("right aux", 0x0B9C, 0x0BA0),
    tank("right tip", 0x0BA4, 0x0BA8),
    tank("external 1", 0x1254, 0x1258),
    tank("external 2", 0x125C, 0x1260),
];
