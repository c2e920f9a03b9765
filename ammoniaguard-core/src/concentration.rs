//! Ammonia Concentration Model
//!
//! ## Sensor Response
//!
//! The datasheet plots Rs/R0 against ppm on log-log axes. Over the useful
//! range the curve is close to a straight line, so it is modelled as
//!
//! ```text
//! log10(Rs/R0) = a + b · log10(ppm)
//!
//! ppm_raw = 10 ^ ((log10(Rs/R0) − a) / b)      a = 1.25, b = −0.45
//! ```
//!
//! With a negative slope the estimate falls as the ratio rises: a sensor
//! that reads close to its clean-air resistance sees little ammonia.
//!
//! ## Environmental Compensation
//!
//! Tin-dioxide sensitivity drifts with temperature and humidity. A linear
//! correction around the characterisation point (20 °C, 65 %RH) is applied:
//!
//! ```text
//! temp_comp = 1 + 0.02 · (T − 20)
//! hum_comp  = 1 + 0.01 · (H − 65)
//! ppm       = ppm_raw · temp_comp · hum_comp
//! ```
//!
//! No rounding happens here. Formatting to two decimals is the report
//! record's job.

use embedded_hal::delay::DelayNs;
use libm::{log10f, powf};

use crate::{
    calibration::BaselineResistance,
    config::{CircuitParameters, Compensation, ResponseCurve, SamplingPlan},
    environment::EnvironmentalReading,
    errors::{SensorError, SensorResult},
    estimator::average_resistance,
    traits::{AnalogInput, EnvironmentalCompensation, Validatable},
};

impl EnvironmentalCompensation for Compensation {
    fn compensate(&self, raw_value: f32, environment: &EnvironmentalReading) -> f32 {
        raw_value * self.factor(environment)
    }
}

impl Compensation {
    /// Temperature multiplier
    #[inline]
    pub fn temperature_factor(&self, temperature_c: f32) -> f32 {
        1.0 + self.temp_coefficient * (temperature_c - self.reference_temp_c)
    }

    /// Humidity multiplier
    #[inline]
    pub fn humidity_factor(&self, humidity_pct: f32) -> f32 {
        1.0 + self.humidity_coefficient * (humidity_pct - self.reference_humidity_pct)
    }

    /// Combined multiplier for a reading
    pub fn factor(&self, environment: &EnvironmentalReading) -> f32 {
        self.temperature_factor(environment.temperature_c)
            * self.humidity_factor(environment.humidity_pct)
    }
}

/// Converts resistance ratios to compensated NH3 concentrations
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcentrationModel {
    curve: ResponseCurve,
    compensation: Compensation,
}

impl ConcentrationModel {
    /// Create model from a response curve and compensation coefficients
    pub fn new(curve: ResponseCurve, compensation: Compensation) -> Self {
        Self {
            curve,
            compensation,
        }
    }

    /// Sensitivity curve in use
    pub fn curve(&self) -> &ResponseCurve {
        &self.curve
    }

    /// Compensation coefficients in use
    pub fn compensation(&self) -> &Compensation {
        &self.compensation
    }

    /// Uncompensated ppm for a resistance ratio Rs/R0
    pub fn raw_ppm(&self, ratio: f32) -> SensorResult<f32> {
        if !(ratio.is_valid() && ratio > 0.0) {
            return Err(SensorError::InvalidRatio { ratio });
        }

        let exponent = (log10f(ratio) - self.curve.intercept) / self.curve.slope;
        let ppm = powf(10.0, exponent);

        if ppm.is_valid() {
            Ok(ppm)
        } else {
            Err(SensorError::InvalidConcentration)
        }
    }

    /// Compensated ppm for an averaged resistance
    pub fn estimate(
        &self,
        mean_resistance: f32,
        baseline: &BaselineResistance,
        environment: &EnvironmentalReading,
    ) -> SensorResult<f32> {
        let ratio = mean_resistance / baseline.value();
        let raw = self.raw_ppm(ratio)?;
        let ppm = self.compensation.compensate(raw, environment);

        if ppm.is_valid() {
            Ok(ppm)
        } else {
            Err(SensorError::InvalidConcentration)
        }
    }

    /// Sample the sensor and return the compensated ppm
    ///
    /// Blocks for `plan.samples × plan.interval_ms`.
    pub fn measure<A, D>(
        &self,
        adc: &mut A,
        delay: &mut D,
        circuit: &CircuitParameters,
        plan: &SamplingPlan,
        baseline: &BaselineResistance,
        environment: &EnvironmentalReading,
    ) -> SensorResult<f32>
    where
        A: AnalogInput + ?Sized,
        D: DelayNs + ?Sized,
    {
        let mean = average_resistance(adc, delay, circuit, plan)?;
        self.estimate(mean, baseline, environment)
    }
}
