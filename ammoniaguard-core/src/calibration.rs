//! Baseline Calibration
//!
//! MQ sensors are specified relative to R0, the resistance at a known
//! reference concentration. The device does not know R0 in advance: it
//! measures Rs in (assumed) clean air at boot and divides by the clean-air
//! ratio from the datasheet.
//!
//! ```text
//! R0 = mean(Rs over 50 samples, 100 ms apart) / clean_air_factor
//! ```
//!
//! Calibration runs once per boot and is never persisted. The result is a
//! [`BaselineResistance`], which can only be constructed from a finite,
//! strictly positive value, so every later concentration computation can
//! rely on a usable denominator.

use embedded_hal::delay::DelayNs;

use crate::{
    config::{CircuitParameters, SamplingPlan},
    errors::{SensorError, SensorResult},
    estimator::average_resistance,
    traits::{AnalogInput, Validatable},
};

/// Clean-air reference resistance R0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineResistance(f32);

impl BaselineResistance {
    /// Wrap a raw R0 value, rejecting zero, negative and non-finite values
    pub fn new(r0: f32) -> SensorResult<Self> {
        if r0.is_valid() && r0 > 0.0 {
            Ok(Self(r0))
        } else {
            Err(SensorError::InvalidBaseline)
        }
    }

    /// R0 in the unit of the load resistor
    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Runs the startup clean-air calibration
#[derive(Debug, Clone, Copy)]
pub struct BaselineCalibrator {
    plan: SamplingPlan,
    clean_air_factor: f32,
}

impl Default for BaselineCalibrator {
    fn default() -> Self {
        Self {
            plan: SamplingPlan::CALIBRATION,
            clean_air_factor: crate::constants::CLEAN_AIR_FACTOR,
        }
    }
}

impl BaselineCalibrator {
    /// Create calibrator with a custom sampling plan and clean-air ratio
    pub fn new(plan: SamplingPlan, clean_air_factor: f32) -> Self {
        Self {
            plan,
            clean_air_factor,
        }
    }

    /// Sampling plan used for the baseline run
    pub fn plan(&self) -> &SamplingPlan {
        &self.plan
    }

    /// Derive R0 from an already averaged clean-air resistance
    pub fn baseline_from_mean(&self, mean_resistance: f32) -> SensorResult<BaselineResistance> {
        BaselineResistance::new(mean_resistance / self.clean_air_factor)
    }

    /// Sample clean air and compute R0
    ///
    /// Blocks for `samples × interval_ms` (about five seconds by default).
    pub fn calibrate<A, D>(
        &self,
        adc: &mut A,
        delay: &mut D,
        circuit: &CircuitParameters,
    ) -> SensorResult<BaselineResistance>
    where
        A: AnalogInput + ?Sized,
        D: DelayNs + ?Sized,
    {
        log_info!(
            "calibrating baseline: {} samples, {} ms apart",
            self.plan.samples,
            self.plan.interval_ms
        );

        let mean = average_resistance(adc, delay, circuit, &self.plan).map_err(|err| {
            log_warn!("baseline calibration failed: {}", err);
            err
        })?;

        let baseline = self.baseline_from_mean(mean)?;
        log_info!("baseline R0 = {} (mean Rs {})", baseline.value(), mean);
        Ok(baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_rejects_bad_values() {
        assert_eq!(BaselineResistance::new(0.0), Err(SensorError::InvalidBaseline));
        assert_eq!(BaselineResistance::new(-1.0), Err(SensorError::InvalidBaseline));
        assert_eq!(BaselineResistance::new(f32::NAN), Err(SensorError::InvalidBaseline));
        assert_eq!(
            BaselineResistance::new(f32::INFINITY),
            Err(SensorError::InvalidBaseline)
        );
        assert!(BaselineResistance::new(0.5).is_ok());
    }

    #[test]
    fn mean_divided_by_clean_air_factor() {
        let calibrator = BaselineCalibrator::default();
        let baseline = calibrator.baseline_from_mean(25.0).unwrap();
        assert!((baseline.value() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn default_plan() {
        let calibrator = BaselineCalibrator::default();
        assert_eq!(calibrator.plan().samples, 50);
        assert_eq!(calibrator.plan().interval_ms, 100);
    }
}
