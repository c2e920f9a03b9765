//! Error Types for Measurement Failures
//!
//! ## Design Philosophy
//!
//! The error type follows the same rules as everything else on the device:
//!
//! 1. **Small Size**: variants carry at most a couple of scalars. Errors are
//!    returned from the sampling hot path and logged over the serial link.
//!
//! 2. **No Heap Allocation**: messages are `&'static str` only.
//!
//! 3. **Copy Semantics**: errors are `Copy` so the acquisition loop can both
//!    log and return them.
//!
//! ## Error Categories
//!
//! ### Sample Errors
//! - `InvalidSample`: a single ADC code produced a non-physical resistance
//!   (zero volts at the node, or a node voltage at/above the supply)
//! - `NoValidSamples`: every sample of an averaging run was invalid
//! - `ResistanceOverflow`: valid samples summed past the `f32` range
//!
//! ### Model Errors
//! - `InvalidBaseline`: R0 is zero, negative, non-finite or was never set
//! - `InvalidRatio`: Rs/R0 is outside the domain of the response curve
//! - `InvalidConcentration`: the compensated result is not a finite number
//!
//! ### Input Errors
//! - `InvalidEnvironment`: the temperature/humidity sensor returned NaN
//! - `InvalidCircuit`: circuit parameters violate the divider model
//! - `InvalidSamplingPlan`: a sampling run would take no samples
//! - `InvalidAlertPolicy`: cleaning alert threshold or streak length is unusable
//! - `PayloadOverflow`: the report record does not fit the wire buffer
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use ammoniaguard_core::SensorError;
//!
//! fn wait_for(err: SensorError) -> u32 {
//!     match err {
//!         // Sensor glitch - try again soon
//!         SensorError::InvalidEnvironment => 2_000,
//!         // Anything else waits for the next reporting slot
//!         _ => 10_000,
//!     }
//! }
//! # assert_eq!(wait_for(SensorError::InvalidEnvironment), 2_000);
//! ```

use thiserror_no_std::Error;

/// Result type for measurement operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Measurement errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// ADC code maps to a resistance that cannot exist in the divider
    #[error("Invalid sample: raw code {raw} gives no finite positive resistance")]
    InvalidSample {
        /// The raw ADC code that was rejected
        raw: u16,
    },

    /// Averaging run finished without a single usable sample
    #[error("No valid samples out of {requested}")]
    NoValidSamples {
        /// Number of samples that were taken
        requested: usize,
    },

    /// Valid samples averaged to a non-finite mean
    #[error("Resistance mean overflowed over {valid} valid samples")]
    ResistanceOverflow {
        /// Number of samples that went into the sum
        valid: usize,
    },

    /// Baseline resistance is zero, non-finite or missing
    #[error("Invalid baseline resistance")]
    InvalidBaseline,

    /// Resistance ratio outside the domain of the logarithmic curve
    #[error("Invalid resistance ratio {ratio}")]
    InvalidRatio {
        /// The offending Rs/R0 value
        ratio: f32,
    },

    /// Compensated concentration is not a finite number
    #[error("Invalid concentration result")]
    InvalidConcentration,

    /// Temperature or humidity reading failed (NaN from the sensor)
    #[error("Invalid environmental reading")]
    InvalidEnvironment,

    /// Circuit parameters rejected at construction time
    #[error("Invalid circuit parameters: {reason}")]
    InvalidCircuit {
        /// Which parameter was rejected
        reason: &'static str,
    },

    /// Sampling plan rejected at construction time
    #[error("Invalid sampling plan: {reason}")]
    InvalidSamplingPlan {
        /// Which setting was rejected
        reason: &'static str,
    },

    /// Cleaning alert policy rejected at construction time
    #[error("Invalid alert policy: {reason}")]
    InvalidAlertPolicy {
        /// Which setting was rejected
        reason: &'static str,
    },

    /// Rendered payload exceeded the fixed wire buffer
    #[error("Report payload exceeds buffer capacity")]
    PayloadOverflow,
}

impl SensorError {
    /// True for errors caused by a failed environmental read.
    ///
    /// These are retried after the short recovery interval instead of the
    /// full reporting interval.
    pub fn is_environmental(&self) -> bool {
        matches!(self, Self::InvalidEnvironment)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidSample { raw } =>
                defmt::write!(fmt, "Invalid sample (raw {})", raw),
            Self::NoValidSamples { requested } =>
                defmt::write!(fmt, "No valid samples out of {}", requested),
            Self::ResistanceOverflow { valid } =>
                defmt::write!(fmt, "Resistance mean overflowed ({} samples)", valid),
            Self::InvalidBaseline =>
                defmt::write!(fmt, "Invalid baseline"),
            Self::InvalidRatio { ratio } =>
                defmt::write!(fmt, "Invalid ratio {}", ratio),
            Self::InvalidConcentration =>
                defmt::write!(fmt, "Invalid concentration"),
            Self::InvalidEnvironment =>
                defmt::write!(fmt, "Invalid environmental reading"),
            Self::InvalidCircuit { reason } =>
                defmt::write!(fmt, "Invalid circuit: {}", reason),
            Self::InvalidSamplingPlan { reason } =>
                defmt::write!(fmt, "Invalid sampling plan: {}", reason),
            Self::InvalidAlertPolicy { reason } =>
                defmt::write!(fmt, "Invalid alert policy: {}", reason),
            Self::PayloadOverflow =>
                defmt::write!(fmt, "Payload overflow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environmental_errors_are_classified() {
        assert!(SensorError::InvalidEnvironment.is_environmental());
        assert!(!SensorError::InvalidBaseline.is_environmental());
        assert!(!SensorError::NoValidSamples { requested: 10 }.is_environmental());
    }

    #[test]
    fn errors_stay_small() {
        assert!(core::mem::size_of::<SensorError>() <= 24);
    }
}
