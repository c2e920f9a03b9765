//! Constants for AmmoniaGuard Core
//!
//! Every numeric value the measurement chain depends on lives here, next to
//! the datasheet or board fact it comes from.
//!
//! ## Organization
//!
//! - **Board**: the analog front end (supply, load resistor, ADC, divider)
//! - **Sensors**: MQ-137 response curve, clean-air ratio, compensation and
//!   the cleaning alert threshold
//! - **Time**: sampling and reporting intervals
//!
//! Names carry their units (`_V`, `_KOHM`, `_MS`, `_PCT`, `_C`).

/// Analog front end of the reference board.
pub mod board;

/// MQ-137 characteristics and environmental compensation.
pub mod sensors;

/// Sampling, settling and reporting intervals.
pub mod time;

pub use board::{
    ADC_MAX_COUNT, ADC_REFERENCE_V, DIVIDER_BOTTOM_KOHM, DIVIDER_TOP_KOHM,
    LOAD_RESISTANCE_KOHM, SUPPLY_VOLTAGE_V,
};

pub use sensors::{
    ALERT_CONSECUTIVE_READINGS, ALERT_THRESHOLD_PPM, CLEAN_AIR_FACTOR, CURVE_INTERCEPT, CURVE_SLOPE, HUMIDITY_COEFFICIENT_PER_PCT,
    REFERENCE_HUMIDITY_PCT, REFERENCE_TEMP_C, TEMP_COEFFICIENT_PER_C,
};

pub use time::{
    CALIBRATION_INTERVAL_MS, CALIBRATION_SAMPLES, CONNECT_POLL_INTERVAL_MS,
    MEASUREMENT_INTERVAL_MS, MEASUREMENT_SAMPLES, REPORT_INTERVAL_MS, RETRY_INTERVAL_MS,
};
