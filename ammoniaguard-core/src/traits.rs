//! Collaborator traits
//!
//! The measurement core never touches hardware directly. Boards (and test
//! harnesses) plug in through these seams:
//!
//! - [`AnalogInput`] - the ADC channel wired to the sensing node
//! - [`EnvironmentalSensor`] - DHT11-style temperature/humidity sensor
//! - [`Reporter`] - fire-and-forget delivery of a finished record
//! - [`Connectivity`] - network link status
//! - [`AlertSink`] - receiver for cleaning alerts
//!
//! Blocking waits go through `embedded_hal::delay::DelayNs`, so any HAL
//! delay (or a recording stub in tests) can drive the loop.

use crate::{alert::CleaningAlert, environment::EnvironmentalReading, record::ReportRecord};

/// Raw ADC channel
///
/// Reads never fail: out-of-range physical conditions clamp to code 0 or
/// full scale.
pub trait AnalogInput {
    /// Take one conversion, in `0..=adc_max`
    fn read_raw(&mut self) -> u16;
}

impl<A: AnalogInput + ?Sized> AnalogInput for &mut A {
    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}

/// Temperature and humidity sensor
///
/// A failed read is signalled with `f32::NAN`, as DHT drivers commonly do.
pub trait EnvironmentalSensor {
    /// Air temperature in °C, or NaN
    fn read_temperature_c(&mut self) -> f32;

    /// Relative humidity in %, or NaN
    fn read_humidity_pct(&mut self) -> f32;
}

impl<S: EnvironmentalSensor + ?Sized> EnvironmentalSensor for &mut S {
    fn read_temperature_c(&mut self) -> f32 {
        (**self).read_temperature_c()
    }

    fn read_humidity_pct(&mut self) -> f32 {
        (**self).read_humidity_pct()
    }
}

/// One-way delivery of a finished record
///
/// Implementations swallow their own failures. The acquisition loop does
/// not wait for or branch on the outcome.
pub trait Reporter {
    /// Hand a record to the transport
    fn report(&mut self, record: &ReportRecord);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, record: &ReportRecord) {
        (**self).report(record)
    }
}

/// Network link status
pub trait Connectivity {
    /// True once the station is associated and has an address
    fn is_connected(&self) -> bool;
}

impl<C: Connectivity + ?Sized> Connectivity for &C {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

/// Receiver for cleaning alerts
///
/// Called once per alert, on the iteration that completed the streak.
pub trait AlertSink {
    /// Deliver one alert
    fn alert(&mut self, alert: &CleaningAlert);
}

impl<S: AlertSink + ?Sized> AlertSink for &mut S {
    fn alert(&mut self, alert: &CleaningAlert) {
        (**self).alert(alert)
    }
}

/// Trait for models that correct a raw estimate for ambient conditions
pub trait EnvironmentalCompensation {
    /// Apply compensation based on environmental conditions
    fn compensate(&self, raw_value: f32, environment: &EnvironmentalReading) -> f32;
}

/// Trait for values that can be checked for numeric validity
pub trait Validatable {
    /// Check the value is a usable number (not NaN or infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validatable_floats() {
        assert!(5.0f32.is_valid());
        assert!(!f32::NAN.is_valid());
        assert!(!f32::INFINITY.is_valid());
        assert!(!f32::NEG_INFINITY.is_valid());
    }
}
