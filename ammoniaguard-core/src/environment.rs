//! Environmental readings
//!
//! The temperature/humidity sensor is read once per loop iteration. A DHT
//! read can fail (checksum, timeout) and reports NaN, so the pair is only
//! usable as a whole: if either value is not finite, the iteration is
//! abandoned before any ADC sampling happens.

use crate::{
    errors::{SensorError, SensorResult},
    traits::{EnvironmentalSensor, Validatable},
};

/// A validated temperature/humidity pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalReading {
    /// Air temperature (°C)
    pub temperature_c: f32,

    /// Relative humidity (%)
    pub humidity_pct: f32,
}

impl EnvironmentalReading {
    /// Build a reading, rejecting NaN and infinite values
    pub fn new(temperature_c: f32, humidity_pct: f32) -> SensorResult<Self> {
        if temperature_c.is_valid() && humidity_pct.is_valid() {
            Ok(Self {
                temperature_c,
                humidity_pct,
            })
        } else {
            Err(SensorError::InvalidEnvironment)
        }
    }

    /// Read both values from the sensor and validate them
    pub fn read<S: EnvironmentalSensor + ?Sized>(sensor: &mut S) -> SensorResult<Self> {
        let temperature_c = sensor.read_temperature_c();
        let humidity_pct = sensor.read_humidity_pct();
        Self::new(temperature_c, humidity_pct)
    }
}
