//! Resistance Estimator
//!
//! ## Circuit Model
//!
//! The MQ-137 sensing element Rs and the load resistor RL form a divider
//! across the supply. The ADC sees the node voltage through a second,
//! fixed divider:
//!
//! ```text
//!   Vcc ── Rs ──┬── RL ── GND
//!               │
//!            top leg
//!               ├────── ADC pin
//!           bottom leg
//!               │
//!              GND
//!
//! V_node = raw × (Vref / ADC_MAX) × divider_scale
//! Rs     = RL × (Vcc / V_node − 1)
//! ```
//!
//! Rs is reported in the unit of RL (kΩ on the reference board).
//!
//! ## Invalid Samples
//!
//! Two ranges of ADC codes cannot come from a working sensor:
//!
//! - `raw == 0`: zero volts at the node, Rs would be infinite
//! - node voltage ≥ Vcc: Rs would be zero or negative
//!
//! Both return [`SensorError::InvalidSample`]. Averaging skips them and
//! only fails with [`SensorError::NoValidSamples`] when nothing usable is
//! left.

use embedded_hal::delay::DelayNs;

use crate::{
    config::{CircuitParameters, SamplingPlan},
    errors::{SensorError, SensorResult},
    traits::{AnalogInput, Validatable},
};

/// Voltage at the sensing node for a raw ADC code
#[inline]
pub fn node_voltage(raw: u16, circuit: &CircuitParameters) -> f32 {
    raw as f32 * circuit.volts_per_count() * circuit.divider_scale
}

/// Sensor resistance for a raw ADC code
///
/// Returns `InvalidSample` when the result is not finite and strictly
/// positive.
pub fn estimate_resistance(raw: u16, circuit: &CircuitParameters) -> SensorResult<f32> {
    let voltage = node_voltage(raw, circuit);
    let resistance = circuit.load_resistance * ((circuit.supply_voltage / voltage) - 1.0);

    if resistance.is_valid() && resistance > 0.0 {
        Ok(resistance)
    } else {
        Err(SensorError::InvalidSample { raw })
    }
}

/// Running mean over valid resistance samples
#[derive(Debug, Clone, Default)]
pub struct ResistanceAverager {
    sum: f32,
    valid: usize,
    rejected: usize,
}

impl ResistanceAverager {
    /// Create an empty averager
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            valid: 0,
            rejected: 0,
        }
    }

    /// Add one estimate; invalid ones only bump the rejected count
    pub fn push(&mut self, sample: SensorResult<f32>) {
        match sample {
            Ok(resistance) => {
                self.sum += resistance;
                self.valid += 1;
            }
            Err(_) => self.rejected += 1,
        }
    }

    /// Number of samples included in the mean
    pub fn valid(&self) -> usize {
        self.valid
    }

    /// Number of samples discarded
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Mean of the valid samples
    pub fn mean(&self) -> SensorResult<f32> {
        if self.valid == 0 {
            return Err(SensorError::NoValidSamples {
                requested: self.valid + self.rejected,
            });
        }

        let mean = self.sum / self.valid as f32;
        if mean.is_valid() {
            Ok(mean)
        } else {
            Err(SensorError::ResistanceOverflow { valid: self.valid })
        }
    }
}

/// Sample the ADC `plan.samples` times and average the valid resistances
///
/// Sleeps `plan.interval_ms` after every conversion, including the last,
/// so consecutive runs keep the same spacing.
pub fn average_resistance<A, D>(
    adc: &mut A,
    delay: &mut D,
    circuit: &CircuitParameters,
    plan: &SamplingPlan,
) -> SensorResult<f32>
where
    A: AnalogInput + ?Sized,
    D: DelayNs + ?Sized,
{
    let mut averager = ResistanceAverager::new();

    for _ in 0..plan.samples {
        let raw = adc.read_raw();
        let sample = estimate_resistance(raw, circuit);
        if sample.is_err() {
            log_debug!("discarding raw ADC code {}", raw);
        }
        averager.push(sample);
        delay.delay_ms(plan.interval_ms);
    }

    if averager.rejected() > 0 {
        log_warn!(
            "{} of {} samples rejected",
            averager.rejected(),
            plan.samples
        );
    }

    averager.mean()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_code_is_invalid() {
        let circuit = CircuitParameters::default();
        assert_eq!(
            estimate_resistance(0, &circuit),
            Err(SensorError::InvalidSample { raw: 0 })
        );
    }

    #[test]
    fn codes_above_supply_are_invalid() {
        // 4095 counts -> 8.25 V at the node, above the 5 V supply
        let circuit = CircuitParameters::default();
        assert!(estimate_resistance(4095, &circuit).is_err());
    }

    #[test]
    fn mid_scale_code() {
        let circuit = CircuitParameters::default();
        let voltage = node_voltage(2048, &circuit);
        let expected_voltage = 2048.0 * (3.3 / 4095.0) * 2.5;
        assert!((voltage - expected_voltage).abs() < 1e-4);

        let rs = estimate_resistance(2048, &circuit).unwrap();
        let expected = 2.2 * (5.0 / expected_voltage - 1.0);
        assert!((rs - expected).abs() < 1e-4);
    }

    #[test]
    fn higher_code_lower_resistance() {
        let circuit = CircuitParameters::default();
        let low = estimate_resistance(500, &circuit).unwrap();
        let high = estimate_resistance(1500, &circuit).unwrap();
        assert!(high < low);
    }

    #[test]
    fn averager_skips_invalid() {
        let mut averager = ResistanceAverager::new();
        averager.push(Ok(2.0));
        averager.push(Err(SensorError::InvalidSample { raw: 0 }));
        averager.push(Ok(4.0));

        assert_eq!(averager.valid(), 2);
        assert_eq!(averager.rejected(), 1);
        assert_eq!(averager.mean(), Ok(3.0));
    }

    #[test]
    fn averager_with_nothing_valid() {
        let mut averager = ResistanceAverager::new();
        averager.push(Err(SensorError::InvalidSample { raw: 0 }));
        averager.push(Err(SensorError::InvalidSample { raw: 0 }));

        assert_eq!(
            averager.mean(),
            Err(SensorError::NoValidSamples { requested: 2 })
        );
    }

    #[test]
    fn overflowing_sum_is_not_reported_as_no_samples() {
        let mut averager = ResistanceAverager::new();
        averager.push(Ok(f32::MAX));
        averager.push(Ok(f32::MAX));

        assert_eq!(
            averager.mean(),
            Err(SensorError::ResistanceOverflow { valid: 2 })
        );
    }

    #[test]
    fn empty_averager() {
        assert_eq!(
            ResistanceAverager::new().mean(),
            Err(SensorError::NoValidSamples { requested: 0 })
        );
    }
}
