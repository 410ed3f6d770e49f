//! Radio and transponder trackers

use super::PollContext;
use crate::applog::Severity;
use crate::conversion;
use crate::events::{FlightEvent, Radio};
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::{Address, Result};

const DEFAULT_FREQUENCY: &str = "100.00";
const DEFAULT_SQUAWK: &str = "0000";

fn frequency_offset(radio: Radio) -> Address {
    match radio {
        Radio::Com1 => offsets::COM1,
        Radio::Com2 => offsets::COM2,
        Radio::Nav1 => offsets::NAV1,
        Radio::Nav2 => offsets::NAV2,
    }
}

fn ident_offset(radio: Radio) -> Option<Address> {
    match radio {
        Radio::Nav1 => Some(offsets::NAV1_IDENT),
        Radio::Nav2 => Some(offsets::NAV2_IDENT),
        Radio::Com1 | Radio::Com2 => None,
    }
}

/// Tuned frequency of one COM or NAV radio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioTracker {
    radio: Radio,
    frequency: String,
}

impl RadioTracker {
    pub fn new(radio: Radio) -> Self {
        Self {
            radio,
            frequency: DEFAULT_FREQUENCY.to_string(),
        }
    }

    pub fn radio(&self) -> Radio {
        self.radio
    }

    /// Last logged frequency, e.g. `123.45`
    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    /// Station identifier of a NAV radio; `None` for COM radios or when
    /// nothing is received
    pub fn ident(&self, source: &dyn RawOffsetSource) -> Result<Option<String>> {
        let Some(address) = ident_offset(self.radio) else {
            return Ok(None);
        };

        let ident = source.read_string(address, offsets::NAV_IDENT_LEN)?;
        let ident = ident.trim();
        Ok((!ident.is_empty()).then(|| ident.to_string()))
    }

    pub fn update(&mut self, ctx: &PollContext<'_>) -> Result<Option<FlightEvent>> {
        let raw = ctx.source.read_u16(frequency_offset(self.radio))?;
        let frequency = conversion::frequency_label(raw);
        if frequency == self.frequency {
            return Ok(None);
        }

        self.frequency = frequency.clone();
        let ident = if self.radio.is_nav() && ctx.config.annotate_nav_ident {
            self.ident(ctx.source).unwrap_or_else(|e| {
                ctx.logger.record(
                    &format!("Failed to read {} identifier", self.radio),
                    Severity::Warning,
                    Some(&e),
                );
                None
            })
        } else {
            None
        };

        Ok(Some(FlightEvent::RadioTuned {
            radio: self.radio,
            frequency,
            ident,
        }))
    }

    pub fn reset(&mut self) {
        self.frequency = DEFAULT_FREQUENCY.to_string();
    }
}

/// Transponder code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransponderTracker {
    code: String,
}

impl TransponderTracker {
    pub fn new() -> Self {
        Self {
            code: DEFAULT_SQUAWK.to_string(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// A code that is not valid octal is an error and leaves the
    /// snapshot unchanged
    pub fn update(&mut self, ctx: &PollContext<'_>) -> Result<Option<FlightEvent>> {
        let code = conversion::squawk_label(ctx.source.read_u16(offsets::TRANSPONDER)?);
        if code == self.code {
            return Ok(None);
        }

        let class = conversion::classify_squawk(&code)?;
        self.code = code.clone();
        Ok(Some(FlightEvent::Transponder { code, class }))
    }

    pub fn reset(&mut self) {
        self.code = DEFAULT_SQUAWK.to_string();
    }
}

impl Default for TransponderTracker {
    fn default() -> Self {
        Self::new()
    }
}
