//! Unit conversion formulas
//!
//! Pure functions from raw offset values to physical quantities. Nothing
//! here reads the source or keeps state; the quantities and trackers feed
//! raw values in and get numbers or text out.
//!
//! Rounding follows the simulator tooling convention: round half to even,
//! then a range check into `i32`.

use crate::types::{FsDataError, FuelUnits, Result};
use std::fmt;

pub const METRES_TO_FEET: f64 = 3.28084;
pub const ATTITUDE_SCALE: f64 = 8.381_903_171_539_31e-8;
pub const MPS_TO_KNOTS: f64 = 1.943_844_492_440_6;
pub const VERTICAL_SPEED_SCALE: f64 = 0.768_946_875;
pub const LBS_TO_KGS: f64 = 0.45359;

/// Standard-pressure altitude above which flight levels are reported
pub const TRANSITION_ALTITUDE_FT: i32 = 5500;

/// Parking brake raw value above which the brake counts as set
const PARKING_BRAKE_SET_ABOVE: i16 = 1000;

/// Round half to even into an `i32`
pub fn round_to_i32(value: f64, what: &str) -> Result<i32> {
    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(FsDataError::ConversionFailure(format!(
            "{} out of range: {}",
            what, value
        )));
    }
    Ok(rounded as i32)
}

pub fn metres_to_feet(metres: f64) -> Result<i32> {
    round_to_i32(metres * METRES_TO_FEET, "altitude")
}

/// Pitch in degrees, nose up positive
pub fn pitch_degrees(raw: i32) -> Result<i32> {
    Ok(-round_to_i32(raw as f64 * ATTITUDE_SCALE, "pitch")?)
}

pub fn bank_degrees(raw: i32) -> Result<i32> {
    round_to_i32(raw as f64 * ATTITUDE_SCALE, "bank")
}

/// Bank angle text: `0 (Level)` within one degree, otherwise the signed
/// angle tagged `(R)` or `(L)`
pub fn bank_label(degrees: i32) -> String {
    match degrees {
        d if d < -1 => format!("{}(R)", d),
        d if d > 1 => format!("{}(L)", d),
        _ => "0 (Level)".to_string(),
    }
}

/// Ground speed in knots from metres/second * 65536
pub fn ground_speed_knots(raw: i32) -> Result<i32> {
    round_to_i32((raw / 65536) as f64 * MPS_TO_KNOTS, "ground speed")
}

/// True or indicated airspeed in knots from knots * 128
pub fn airspeed_knots(raw: i32) -> i32 {
    raw / 128
}

pub fn vertical_speed_fpm(raw: i32) -> Result<i32> {
    round_to_i32(raw as f64 * VERTICAL_SPEED_SCALE, "vertical speed")
}

/// Vertical speed from the altitude block, sign flipped
pub fn altitude_vertical_speed_fpm(raw: i16) -> Result<i32> {
    round_to_i32(raw as f64 * -METRES_TO_FEET, "vertical speed")
}

pub fn vertical_speed_label(fpm: i32) -> String {
    if fpm > 0 {
        format!("+{}fpm", fpm)
    } else {
        format!("{}fpm", fpm)
    }
}

/// Flight level text for a standard-pressure altitude, `None` at or below
/// the transition altitude
pub fn flight_level_label(std_ft: i32) -> Option<String> {
    if std_ft <= TRANSITION_ALTITUDE_FT {
        return None;
    }

    let digits = std_ft.to_string();
    if std_ft > 9999 {
        Some(format!("FL{}", &digits[..3]))
    } else {
        Some(format!("FL0{}", &digits[..2]))
    }
}

pub fn agl_label(agl_ft: i32) -> String {
    format!("{}AGL", agl_ft)
}

pub fn latitude_degrees(raw: i64) -> f64 {
    raw as f64 * 90.0 / 4.295_718_915_276_8e16
}

pub fn longitude_degrees(raw: i64) -> f64 {
    raw as f64 * 360.0 / 1.844_674_407_370_96e19
}

/// Degrees-minutes-seconds text without a sign, plus whether the rounded
/// value was negative
fn dms(degrees: f64) -> Result<(String, bool)> {
    let total = round_to_i32(degrees * 3600.0, "coordinate")?;
    let negative = total < 0;
    let total = total.unsigned_abs();

    let deg = total / 3600;
    let min = (total % 3600) / 60;
    let sec = total % 60;

    Ok((format!("{}° {}' {}\"", deg, min, sec), negative))
}

/// Latitude as `33° 30' 0" S`
pub fn latitude_label(degrees: f64) -> Result<String> {
    let (text, negative) = dms(degrees)?;
    Ok(format!("{} {}", text, if negative { "S" } else { "N" }))
}

/// Longitude as `151° 10' 30" E`
pub fn longitude_label(degrees: f64) -> Result<String> {
    let (text, negative) = dms(degrees)?;
    Ok(format!("{} {}", text, if negative { "W" } else { "E" }))
}

/// Radio frequency from its BCD encoding: 0x2345 -> "123.45"
pub fn frequency_label(raw: u16) -> String {
    let hex = format!("{:04X}", raw);
    format!("1{}.{}", &hex[..2], &hex[2..])
}

/// Transponder code from its BCD encoding: 0x7000 -> "7000"
pub fn squawk_label(raw: u16) -> String {
    format!("{:04X}", raw)
}

/// Transponder code category, only used to annotate log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquawkClass {
    Vfr,
    Emergency,
    Discrete,
}

impl SquawkClass {
    /// Suffix appended to the log message, empty for discrete codes
    pub fn suffix(&self) -> &'static str {
        match self {
            SquawkClass::Vfr => " (VFR)",
            SquawkClass::Emergency => " (Emergency)",
            SquawkClass::Discrete => "",
        }
    }
}

impl fmt::Display for SquawkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquawkClass::Vfr => write!(f, "VFR"),
            SquawkClass::Emergency => write!(f, "Emergency"),
            SquawkClass::Discrete => write!(f, "Discrete"),
        }
    }
}

/// Classify a four-digit octal transponder code
pub fn classify_squawk(code: &str) -> Result<SquawkClass> {
    if code.len() != 4 || !code.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(FsDataError::ClassificationFailure(format!(
            "transponder code '{}'",
            code
        )));
    }

    Ok(match code {
        "7000" | "1200" => SquawkClass::Vfr,
        "7700" | "7600" | "7500" => SquawkClass::Emergency,
        _ => SquawkClass::Discrete,
    })
}

/// Weight of the fuel in one tank in pounds
///
/// `level` is the fill fraction * 128 * 65536, `capacity` is in gallons and
/// `weight_raw` is pounds per gallon * 256.
pub fn tank_weight_lbs(level: i32, capacity: i32, weight_raw: i16) -> Result<f64> {
    if level < 0 || capacity < 0 {
        return Err(FsDataError::ConversionFailure(format!(
            "negative tank level {} or capacity {}",
            level, capacity
        )));
    }

    let pounds_per_gallon = weight_raw as f64 / 256.0;
    Ok(capacity as f64 * level as f64 / 128.0 / 65536.0 * pounds_per_gallon)
}

/// Express a weight in pounds in the configured unit, rounded
pub fn fuel_in_units(lbs: f64, units: FuelUnits) -> Result<i32> {
    match units {
        FuelUnits::Lbs => round_to_i32(lbs, "fuel weight"),
        FuelUnits::Kgs => round_to_i32(lbs * LBS_TO_KGS, "fuel weight"),
    }
}

/// Gear counts as down if any of the three legs reports extension
pub fn gear_down(nose: i32, left: i32, right: i32) -> bool {
    nose as i64 + left as i64 + right as i64 != 0
}

pub fn parking_brake_set(raw: i16) -> bool {
    raw > PARKING_BRAKE_SET_ABOVE
}

pub fn engine_running(combustion: i16) -> bool {
    combustion > 0
}

/// Whether the engine at zero-based `index` exists on this aircraft
pub fn engine_available(engine_count: i16, index: usize) -> bool {
    engine_count as i64 > index as i64
}

pub fn on_ground(raw: i16) -> bool {
    raw > 0
}

pub fn is_paused(raw: i16) -> bool {
    raw == 1
}

/// Flap detent index from the raw position and the per-detent step
pub fn flap_detent(position: i32, step: i16) -> Result<i32> {
    if step == 0 {
        return Err(FsDataError::DivideByZero("flap detent"));
    }
    position.checked_div(step as i32).ok_or_else(|| {
        FsDataError::ConversionFailure(format!("flap detent {} / {}", position, step))
    })
}

pub fn heading_label(degrees: f64) -> Result<String> {
    Ok(round_to_i32(degrees, "heading")?.to_string())
}

/// Simulator product name from its version code
pub fn simulator_name(code: i16) -> Result<&'static str> {
    match code {
        1 => Ok("FS98"),
        2 => Ok("FS2K"),
        3 => Ok("CFS2"),
        4 => Ok("CFS1"),
        5 => Ok("reserved"),
        6 => Ok("FS2002"),
        7 => Ok("FS2004"),
        8 => Ok("FSX"),
        9 => Ok("ESP"),
        10 => Ok("P3D"),
        other => Err(FsDataError::ClassificationFailure(format!(
            "simulator version code {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_to_i32(2.5, "x").unwrap(), 2);
        assert_eq!(round_to_i32(3.5, "x").unwrap(), 4);
        assert_eq!(round_to_i32(-2.5, "x").unwrap(), -2);
        assert!(round_to_i32(f64::NAN, "x").is_err());
        assert!(round_to_i32(1e12, "x").is_err());
    }

    #[test]
    fn test_altitude_feet() {
        assert_eq!(metres_to_feet(1000.0).unwrap(), 3281);
        assert_eq!(metres_to_feet(0.0).unwrap(), 0);
    }

    #[test]
    fn test_attitude() {
        // 10 degrees nose up is reported by the sim as a negative pitch
        let raw = (-10.0 / ATTITUDE_SCALE) as i32;
        assert_eq!(pitch_degrees(raw).unwrap(), 10);

        let raw = (15.0 / ATTITUDE_SCALE) as i32;
        assert_eq!(bank_degrees(raw).unwrap(), 15);
    }

    #[test]
    fn test_bank_label() {
        assert_eq!(bank_label(0), "0 (Level)");
        assert_eq!(bank_label(1), "0 (Level)");
        assert_eq!(bank_label(-1), "0 (Level)");
        assert_eq!(bank_label(-12), "-12(R)");
        assert_eq!(bank_label(20), "20(L)");
    }

    #[test]
    fn test_speeds() {
        // 100 m/s
        assert_eq!(ground_speed_knots(100 * 65536).unwrap(), 194);
        // fractional metres per second are dropped before scaling
        assert_eq!(ground_speed_knots(100 * 65536 + 65535).unwrap(), 194);
        assert_eq!(airspeed_knots(250 * 128), 250);
        assert_eq!(airspeed_knots(250 * 128 + 127), 250);
        assert_eq!(vertical_speed_fpm(1000).unwrap(), 769);
        assert_eq!(altitude_vertical_speed_fpm(-5).unwrap(), 16);
    }

    #[test]
    fn test_vertical_speed_label() {
        assert_eq!(vertical_speed_label(500), "+500fpm");
        assert_eq!(vertical_speed_label(-700), "-700fpm");
        assert_eq!(vertical_speed_label(0), "0fpm");
    }

    #[test]
    fn test_flight_level_label() {
        assert_eq!(flight_level_label(3200), None);
        assert_eq!(flight_level_label(5500), None);
        assert_eq!(flight_level_label(5501).as_deref(), Some("FL055"));
        assert_eq!(flight_level_label(9999).as_deref(), Some("FL099"));
        assert_eq!(flight_level_label(10000).as_deref(), Some("FL100"));
        assert_eq!(flight_level_label(18000).as_deref(), Some("FL180"));
        assert_eq!(flight_level_label(35012).as_deref(), Some("FL350"));
        assert_eq!(agl_label(3200), "3200AGL");
    }

    #[test]
    fn test_position_labels() {
        assert_eq!(latitude_label(-33.5).unwrap(), "33° 30' 0\" S");
        assert_eq!(latitude_label(33.5).unwrap(), "33° 30' 0\" N");
        assert_eq!(longitude_label(151.175).unwrap(), "151° 10' 30\" E");
        assert_eq!(longitude_label(-0.5).unwrap(), "0° 30' 0\" W");
    }

    #[test]
    fn test_raw_latitude_round_trip() {
        let raw = (-33.5 / 90.0 * 4.295_718_915_276_8e16) as i64;
        let lat = latitude_degrees(raw);
        assert!((lat + 33.5).abs() < 1e-9);
        assert_eq!(latitude_label(lat).unwrap(), "33° 30' 0\" S");
    }

    #[test]
    fn test_radio_labels() {
        assert_eq!(frequency_label(0x2345), "123.45");
        assert_eq!(frequency_label(0x1390), "113.90");
        assert_eq!(frequency_label(0x0000), "100.00");
        assert_eq!(squawk_label(0x7000), "7000");
        assert_eq!(squawk_label(0x0000), "0000");
    }

    #[test]
    fn test_classify_squawk() {
        assert_eq!(classify_squawk("7000").unwrap(), SquawkClass::Vfr);
        assert_eq!(classify_squawk("1200").unwrap(), SquawkClass::Vfr);
        assert_eq!(classify_squawk("7700").unwrap(), SquawkClass::Emergency);
        assert_eq!(classify_squawk("7600").unwrap(), SquawkClass::Emergency);
        assert_eq!(classify_squawk("7500").unwrap(), SquawkClass::Emergency);
        assert_eq!(classify_squawk("2345").unwrap(), SquawkClass::Discrete);
        assert_eq!(SquawkClass::Discrete.suffix(), "");

        assert!(classify_squawk("12A4").is_err());
        assert!(classify_squawk("7800").is_err());
    }

    #[test]
    fn test_tank_weight() {
        // full 100 gallon tank at 6 lbs/gal
        let full = 128 * 65536;
        assert_eq!(tank_weight_lbs(full, 100, 6 * 256).unwrap(), 600.0);
        assert_eq!(tank_weight_lbs(full / 2, 50, 6 * 256).unwrap(), 150.0);
        assert!(tank_weight_lbs(-1, 50, 6 * 256).is_err());
    }

    #[test]
    fn test_fuel_units() {
        assert_eq!(fuel_in_units(750.0, FuelUnits::Lbs).unwrap(), 750);
        // 750 * 0.45359 = 340.19
        assert_eq!(fuel_in_units(750.0, FuelUnits::Kgs).unwrap(), 340);
    }

    #[test]
    fn test_discrete_states() {
        assert!(!gear_down(0, 0, 0));
        assert!(gear_down(0, 16383, 0));
        assert!(gear_down(i32::MAX, i32::MAX, 0));

        assert!(parking_brake_set(32767));
        assert!(!parking_brake_set(1000));

        assert!(engine_running(1));
        assert!(!engine_running(0));

        assert!(engine_available(2, 1));
        assert!(!engine_available(2, 2));
        assert!(!engine_available(-1, 0));

        assert!(on_ground(1));
        assert!(is_paused(1));
        assert!(!is_paused(2));
    }

    #[test]
    fn test_flap_detent() {
        assert_eq!(flap_detent(8192, 4096).unwrap(), 2);
        assert_eq!(flap_detent(16383, 4096).unwrap(), 3);
        assert_eq!(
            flap_detent(8192, 0).unwrap_err(),
            FsDataError::DivideByZero("flap detent")
        );
    }

    #[test]
    fn test_simulator_name() {
        assert_eq!(simulator_name(8).unwrap(), "FSX");
        assert_eq!(simulator_name(10).unwrap(), "P3D");
        assert!(simulator_name(0).is_err());
    }

    #[test]
    fn test_heading_label() {
        assert_eq!(heading_label(271.6).unwrap(), "272");
    }
}
