//! Flight events
//!
//! What a tracker emits when it observes a transition. The `Display`
//! implementation is the text that lands in the flight log.

use crate::conversion::SquawkClass;
use std::fmt;

/// Light categories, in bit order of the lights bit-field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Light {
    Navigation,
    Beacon,
    Landing,
    Taxi,
    Strobe,
    Instrument,
    Recognition,
    Wing,
    Logo,
    Cabin,
}

impl Light {
    pub const ALL: [Light; 10] = [
        Light::Navigation,
        Light::Beacon,
        Light::Landing,
        Light::Taxi,
        Light::Strobe,
        Light::Instrument,
        Light::Recognition,
        Light::Wing,
        Light::Logo,
        Light::Cabin,
    ];

    /// Bit index in the lights bit-field
    pub fn bit(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Light::Navigation => "Navigation",
            Light::Beacon => "Beacon",
            Light::Landing => "Landing",
            Light::Taxi => "Taxi",
            Light::Strobe => "Strobe",
            Light::Instrument => "Instrument",
            Light::Recognition => "Recognition",
            Light::Wing => "Wing",
            Light::Logo => "Logo",
            Light::Cabin => "Cabin",
        }
    }
}

/// Frequency-tuned radios (the transponder is tracked separately)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radio {
    Com1,
    Com2,
    Nav1,
    Nav2,
}

impl Radio {
    pub const ALL: [Radio; 4] = [Radio::Com1, Radio::Com2, Radio::Nav1, Radio::Nav2];

    pub fn is_nav(&self) -> bool {
        matches!(self, Radio::Nav1 | Radio::Nav2)
    }
}

impl fmt::Display for Radio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radio::Com1 => write!(f, "COM1"),
            Radio::Com2 => write!(f, "COM2"),
            Radio::Nav1 => write!(f, "NAV1"),
            Radio::Nav2 => write!(f, "NAV2"),
        }
    }
}

/// Altitude and speed at the moment flaps moved in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlapContext {
    pub altitude: String,
    pub indicated_airspeed: Option<i32>,
}

/// A qualifying transition observed by a tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightEvent {
    SimulatorPaused,
    SimulatorResumed,
    ParkingBrakeSet,
    ParkingBrakeReleased,
    LandingGear {
        down: bool,
        altitude: String,
    },
    Engine {
        /// One-based engine position
        number: usize,
        running: bool,
    },
    Flaps {
        position: i32,
        /// Present only when airborne
        context: Option<FlapContext>,
    },
    Light {
        light: Light,
        on: bool,
        altitude: String,
    },
    RadioTuned {
        radio: Radio,
        frequency: String,
        /// Station identifier, only for NAV radios with a non-empty ident
        ident: Option<String>,
    },
    Transponder {
        code: String,
        class: SquawkClass,
    },
}

impl fmt::Display for FlightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightEvent::SimulatorPaused => write!(f, "Simulator Paused"),
            FlightEvent::SimulatorResumed => write!(f, "Simulator Resumed"),
            FlightEvent::ParkingBrakeSet => write!(f, "Parking Brake Set"),
            FlightEvent::ParkingBrakeReleased => write!(f, "Parking Brake Released"),
            FlightEvent::LandingGear { down, altitude } => write!(
                f,
                "Landing Gear {} at {}",
                if *down { "DOWN" } else { "UP" },
                altitude
            ),
            FlightEvent::Engine { number, running } => write!(
                f,
                "Engine {} {}",
                number,
                if *running { "Started" } else { "Stopped" }
            ),
            FlightEvent::Flaps { position, context } => {
                write!(f, "Flaps set to position {}", position)?;
                if let Some(ctx) = context {
                    write!(f, " at {}", ctx.altitude)?;
                    if let Some(ias) = ctx.indicated_airspeed {
                        write!(f, " and {}kts", ias)?;
                    }
                }
                Ok(())
            }
            FlightEvent::Light { light, on, altitude } => write!(
                f,
                "{} Lights {} at {}",
                light.name(),
                if *on { "ON" } else { "OFF" },
                altitude
            ),
            FlightEvent::RadioTuned {
                radio,
                frequency,
                ident,
            } => {
                write!(f, "{}: {}", radio, frequency)?;
                if let Some(ident) = ident {
                    write!(f, " ({})", ident)?;
                }
                Ok(())
            }
            FlightEvent::Transponder { code, class } => {
                write!(f, "XPNDR: {}{}", code, class.suffix())
            }
        }
    }
}
