//! Session configuration
//!
//! The few settings the core consults while polling. Everything about
//! where the data comes from and where the log goes lives in the
//! application layer.

use crate::types::FuelUnits;
use serde::{Deserialize, Serialize};

/// Configuration for a flight session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unit for every fuel-facing output
    #[serde(default)]
    pub fuel_units: FuelUnits,

    /// Append the tuned station identifier to NAV radio log lines
    #[serde(default = "default_true")]
    pub annotate_nav_ident: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fuel_units: FuelUnits::default(),
            annotate_nav_ident: true,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the fuel unit
    pub fn with_fuel_units(mut self, units: FuelUnits) -> Self {
        self.fuel_units = units;
        self
    }

    /// Builder method: enable or disable NAV identifier suffixes
    pub fn with_nav_ident(mut self, enabled: bool) -> Self {
        self.annotate_nav_ident = enabled;
        self
    }
}
