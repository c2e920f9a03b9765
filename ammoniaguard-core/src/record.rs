//! Report record and wire payload
//!
//! The backend ingests one flat JSON object per reading:
//!
//! ```text
//! {"ammonia_ppm": 12.34, "temperature": 24.5, "humidity": 61.0}
//! ```
//!
//! The payload is rendered into a fixed-capacity `heapless::String`, so the
//! firmware can build it without an allocator.

use core::fmt::Write;

use heapless::String;

use crate::{
    environment::EnvironmentalReading,
    errors::{SensorError, SensorResult},
};

/// Capacity of the rendered JSON payload in bytes
pub const PAYLOAD_CAPACITY: usize = 128;

/// Rendered JSON payload
pub type Payload = String<PAYLOAD_CAPACITY>;

/// One finished measurement, ready for the transport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRecord {
    /// Compensated NH3 concentration (ppm)
    pub ammonia_ppm: f32,

    /// Air temperature (°C)
    pub temperature_c: f32,

    /// Relative humidity (%)
    pub humidity_pct: f32,
}

impl ReportRecord {
    /// Combine a concentration with the reading it was compensated for
    pub fn new(ammonia_ppm: f32, environment: &EnvironmentalReading) -> Self {
        Self {
            ammonia_ppm,
            temperature_c: environment.temperature_c,
            humidity_pct: environment.humidity_pct,
        }
    }

    /// Render the wire payload: ppm to two decimals, climate to one
    pub fn to_json(&self) -> SensorResult<Payload> {
        let mut payload = Payload::new();
        write!(
            payload,
            "{{\"ammonia_ppm\": {:.2}, \"temperature\": {:.1}, \"humidity\": {:.1}}}",
            self.ammonia_ppm, self.temperature_c, self.humidity_pct
        )
        .map_err(|_| SensorError::PayloadOverflow)?;
        Ok(payload)
    }
}
