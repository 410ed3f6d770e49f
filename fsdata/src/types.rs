//! Core types for the flight data library
//!
//! This module defines the error taxonomy shared by the offset source, the
//! conversion formulas and the trackers, plus the small value types that
//! flow between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used for flight log entries
pub type Timestamp = DateTime<Utc>;

/// Result type for flight data operations
pub type Result<T> = std::result::Result<T, FsDataError>;

/// Address of one offset in the simulator's offset area
pub type Address = u16;

/// Errors that can occur while reading or converting simulator state
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FsDataError {
    /// The raw source could not deliver a value (session lost, timeout, ...)
    #[error("Failed to read offset 0x{address:04X}: {reason}")]
    ReadFailure { address: Address, reason: String },

    /// A scale factor the simulator has not populated yet was zero
    #[error("Division by zero while converting {0}")]
    DivideByZero(&'static str),

    #[error("Conversion failed: {0}")]
    ConversionFailure(String),

    /// An encoded value did not match any known classification
    #[error("Unrecognised encoded value: {0}")]
    ClassificationFailure(String),
}

impl FsDataError {
    /// Build a read failure for an address
    pub fn read(address: Address, reason: impl Into<String>) -> Self {
        FsDataError::ReadFailure {
            address,
            reason: reason.into(),
        }
    }

    /// True for read failures reported by the raw source
    pub fn is_read_failure(&self) -> bool {
        matches!(self, FsDataError::ReadFailure { .. })
    }

    /// True for conversion failures, divide-by-zero included
    pub fn is_conversion_failure(&self) -> bool {
        matches!(
            self,
            FsDataError::DivideByZero(_) | FsDataError::ConversionFailure(_)
        )
    }
}

/// Unit used for every fuel-facing output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelUnits {
    /// Pounds (the simulator's native unit)
    #[default]
    Lbs,
    /// Kilograms
    Kgs,
}

impl fmt::Display for FuelUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelUnits::Lbs => write!(f, "lbs"),
            FuelUnits::Kgs => write!(f, "kgs"),
        }
    }
}

impl std::str::FromStr for FuelUnits {
    type Err = FsDataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lbs" | "lb" => Ok(FuelUnits::Lbs),
            "kgs" | "kg" => Ok(FuelUnits::Kgs),
            other => Err(FsDataError::ClassificationFailure(format!(
                "unknown fuel unit '{}'",
                other
            ))),
        }
    }
}
