//! Fuel accounting
//!
//! Never logs: the baseline is set by the caller and `fuel used` is the
//! difference to the current total.

use crate::conversion;
use crate::offsets;
use crate::source::RawOffsetSource;
use crate::types::{FuelUnits, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuelTracker {
    start_fuel: i32,
}

impl FuelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fuel on board at the start of the flight, in the configured unit
    pub fn start_fuel(&self) -> i32 {
        self.start_fuel
    }

    pub fn set_start_fuel(&mut self, fuel: i32) {
        self.start_fuel = fuel;
    }

    /// Record the current total as the baseline and return it
    pub fn mark_flight_start(&mut self, source: &dyn RawOffsetSource, units: FuelUnits) -> Result<i32> {
        let fuel = Self::current_fuel(source, units)?;
        self.start_fuel = fuel;
        Ok(fuel)
    }

    /// Total fuel over every tank, rounded in the requested unit
    pub fn current_fuel(source: &dyn RawOffsetSource, units: FuelUnits) -> Result<i32> {
        let weight = source.read_i16(offsets::FUEL_WEIGHT)?;

        let mut total_lbs = 0.0;
        for tank in offsets::FUEL_TANKS.iter() {
            let level = source.read_i32(tank.level)?;
            let capacity = source.read_i32(tank.capacity)?;
            total_lbs += conversion::tank_weight_lbs(level, capacity, weight)?;
        }

        conversion::fuel_in_units(total_lbs, units)
    }

    /// Current total as `1234lbs` or `560kgs`
    pub fn label(source: &dyn RawOffsetSource, units: FuelUnits) -> Result<String> {
        Ok(format!("{}{}", Self::current_fuel(source, units)?, units))
    }

    pub fn fuel_used(&self, source: &dyn RawOffsetSource, units: FuelUnits) -> Result<i32> {
        Ok(self.start_fuel - Self::current_fuel(source, units)?)
    }

    pub fn reset(&mut self) {
        self.start_fuel = 0;
    }
}
