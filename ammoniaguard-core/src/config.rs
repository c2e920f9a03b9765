//! Measurement configuration
//!
//! All parameters are plain `Copy` structs built once at startup and passed
//! by reference into the estimator, calibrator and concentration model.
//! Nothing here is mutated after the acquisition loop is constructed.
//!
//! Defaults reproduce the reference board; hosts can load overrides through
//! serde when the `serde` feature is enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{board, sensors, time},
    errors::{SensorError, SensorResult},
    traits::Validatable,
};

/// Electrical model of the sensing circuit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CircuitParameters {
    /// Sensor supply voltage Vcc (V)
    pub supply_voltage: f32,

    /// Load resistor RL (kΩ)
    pub load_resistance: f32,

    /// ADC reference voltage (V)
    pub adc_reference_voltage: f32,

    /// Full-scale ADC code
    pub adc_max: u16,

    /// Multiplier from ADC pin voltage back to sensing node voltage
    pub divider_scale: f32,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self {
            supply_voltage: board::SUPPLY_VOLTAGE_V,
            load_resistance: board::LOAD_RESISTANCE_KOHM,
            adc_reference_voltage: board::ADC_REFERENCE_V,
            adc_max: board::ADC_MAX_COUNT,
            divider_scale: divider_scale(board::DIVIDER_TOP_KOHM, board::DIVIDER_BOTTOM_KOHM),
        }
    }
}

impl CircuitParameters {
    /// Create validated circuit parameters
    pub fn new(
        supply_voltage: f32,
        load_resistance: f32,
        adc_reference_voltage: f32,
        adc_max: u16,
        divider_scale: f32,
    ) -> SensorResult<Self> {
        let params = Self {
            supply_voltage,
            load_resistance,
            adc_reference_voltage,
            adc_max,
            divider_scale,
        };
        params.validate()?;
        Ok(params)
    }

    /// Replace the divider scale with the one derived from its two legs
    pub fn with_divider_legs(mut self, top_kohm: f32, bottom_kohm: f32) -> Self {
        self.divider_scale = divider_scale(top_kohm, bottom_kohm);
        self
    }

    /// Check every parameter is finite and strictly positive
    pub fn validate(&self) -> SensorResult<()> {
        check_positive(self.supply_voltage, "supply voltage must be positive")?;
        check_positive(self.load_resistance, "load resistance must be positive")?;
        check_positive(self.adc_reference_voltage, "ADC reference must be positive")?;
        check_positive(self.divider_scale, "divider scale must be positive")?;
        if self.adc_max == 0 {
            return Err(SensorError::InvalidCircuit {
                reason: "ADC full scale must be nonzero",
            });
        }
        Ok(())
    }

    /// Volts per ADC count at the ADC pin
    #[inline]
    pub fn volts_per_count(&self) -> f32 {
        self.adc_reference_voltage / self.adc_max as f32
    }
}

/// Divider scale for a two-resistor network: (top + bottom) / bottom
pub fn divider_scale(top_kohm: f32, bottom_kohm: f32) -> f32 {
    (top_kohm + bottom_kohm) / bottom_kohm
}

fn check_positive(value: f32, reason: &'static str) -> SensorResult<()> {
    if value.is_valid() && value > 0.0 {
        Ok(())
    } else {
        Err(SensorError::InvalidCircuit { reason })
    }
}

/// Log-log linear fit of the sensor sensitivity curve
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResponseCurve {
    /// log10(Rs/R0) at 1 ppm
    pub intercept: f32,

    /// d log10(Rs/R0) / d log10(ppm)
    pub slope: f32,
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self {
            intercept: sensors::CURVE_INTERCEPT,
            slope: sensors::CURVE_SLOPE,
        }
    }
}

/// First-order temperature and humidity correction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compensation {
    /// Fractional change per °C away from the reference
    pub temp_coefficient: f32,

    /// Temperature with no correction (°C)
    pub reference_temp_c: f32,

    /// Fractional change per %RH away from the reference
    pub humidity_coefficient: f32,

    /// Humidity with no correction (%)
    pub reference_humidity_pct: f32,
}

impl Default for Compensation {
    fn default() -> Self {
        Self {
            temp_coefficient: sensors::TEMP_COEFFICIENT_PER_C,
            reference_temp_c: sensors::REFERENCE_TEMP_C,
            humidity_coefficient: sensors::HUMIDITY_COEFFICIENT_PER_PCT,
            reference_humidity_pct: sensors::REFERENCE_HUMIDITY_PCT,
        }
    }
}

/// How many samples to average and how long to settle between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingPlan {
    /// Number of ADC samples
    pub samples: usize,

    /// Delay after each sample (ms)
    pub interval_ms: u32,
}

impl SamplingPlan {
    /// Clean-air baseline run: 50 samples, 100 ms apart
    pub const CALIBRATION: Self = Self {
        samples: time::CALIBRATION_SAMPLES,
        interval_ms: time::CALIBRATION_INTERVAL_MS,
    };

    /// Per-report run: 10 samples, 50 ms apart
    pub const MEASUREMENT: Self = Self {
        samples: time::MEASUREMENT_SAMPLES,
        interval_ms: time::MEASUREMENT_INTERVAL_MS,
    };
}

/// When repeated high readings should raise a cleaning alert
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertPolicy {
    /// Readings strictly above this count as high (ppm)
    pub threshold_ppm: f32,

    /// High readings in a row before the alert fires
    pub consecutive: u32,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            threshold_ppm: sensors::ALERT_THRESHOLD_PPM,
            consecutive: sensors::ALERT_CONSECUTIVE_READINGS,
        }
    }
}

impl AlertPolicy {
    /// Reject a non-finite threshold or a zero streak length
    pub fn validate(&self) -> SensorResult<()> {
        if !self.threshold_ppm.is_valid() {
            return Err(SensorError::InvalidAlertPolicy {
                reason: "threshold must be finite",
            });
        }
        if self.consecutive == 0 {
            return Err(SensorError::InvalidAlertPolicy {
                reason: "consecutive count must be nonzero",
            });
        }
        Ok(())
    }
}

/// Everything the acquisition loop needs besides its collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcquisitionConfig {
    /// Sensing circuit model
    pub circuit: CircuitParameters,

    /// Sensitivity curve
    pub curve: ResponseCurve,

    /// Environmental correction
    pub compensation: Compensation,

    /// Startup baseline sampling
    pub calibration: SamplingPlan,

    /// Per-iteration sampling
    pub measurement: SamplingPlan,

    /// Clean-air Rs/R0 ratio
    pub clean_air_factor: f32,

    /// Delay after a reported (or otherwise skipped) iteration (ms)
    pub report_interval_ms: u32,

    /// Delay after a failed environmental read (ms)
    pub retry_interval_ms: u32,

    /// Link poll interval while waiting at startup (ms)
    pub connect_poll_interval_ms: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            circuit: CircuitParameters::default(),
            curve: ResponseCurve::default(),
            compensation: Compensation::default(),
            calibration: SamplingPlan::CALIBRATION,
            measurement: SamplingPlan::MEASUREMENT,
            clean_air_factor: sensors::CLEAN_AIR_FACTOR,
            report_interval_ms: time::REPORT_INTERVAL_MS,
            retry_interval_ms: time::RETRY_INTERVAL_MS,
            connect_poll_interval_ms: time::CONNECT_POLL_INTERVAL_MS,
        }
    }
}

impl AcquisitionConfig {
    /// Validate the circuit and the calibration constants
    pub fn validate(&self) -> SensorResult<()> {
        self.circuit.validate()?;
        check_positive(self.clean_air_factor, "clean air factor must be positive")?;
        if self.calibration.samples == 0 || self.measurement.samples == 0 {
            return Err(SensorError::InvalidSamplingPlan {
                reason: "sample count must be nonzero",
            });
        }
        Ok(())
    }
}
