//! MQ-137 Sensor Characteristics
//!
//! The sensor is a tin-dioxide element whose resistance Rs drops as the
//! ammonia concentration rises. On log-log axes the datasheet sensitivity
//! curve (Rs/R0 vs ppm) is close to a straight line:
//!
//! ```text
//! log10(Rs/R0) = intercept + slope * log10(ppm)
//! ```

// ===== RESPONSE CURVE =====

/// Intercept of the log-log sensitivity line.
///
/// Source: fitted to the MQ-137 NH3 curve, 5 - 500 ppm
pub const CURVE_INTERCEPT: f32 = 1.25;

/// Slope of the log-log sensitivity line.
///
/// Negative: resistance falls as concentration rises.
///
/// Source: fitted to the MQ-137 NH3 curve, 5 - 500 ppm
pub const CURVE_SLOPE: f32 = -0.45;

/// Rs/R0 ratio of the sensor in clean air.
///
/// Averaged clean-air resistance divided by this factor gives R0.
pub const CLEAN_AIR_FACTOR: f32 = 10.0;

// ===== ENVIRONMENTAL COMPENSATION =====

/// Temperature at which the curve was characterised (°C).
pub const REFERENCE_TEMP_C: f32 = 20.0;

/// Relative humidity at which the curve was characterised (%).
pub const REFERENCE_HUMIDITY_PCT: f32 = 65.0;

/// First-order temperature correction (fraction per °C).
///
/// Source: datasheet temperature/humidity dependency chart, linearised
pub const TEMP_COEFFICIENT_PER_C: f32 = 0.02;

/// First-order humidity correction (fraction per %RH).
///
/// Source: datasheet temperature/humidity dependency chart, linearised
pub const HUMIDITY_COEFFICIENT_PER_PCT: f32 = 0.01;

// ===== CLEANING ALERT =====

/// Concentration above which a reading counts towards the cleaning alert (ppm).
///
/// A reading exactly at the threshold is not high.
pub const ALERT_THRESHOLD_PPM: f32 = 6.0;

/// Back-to-back high readings needed to raise a cleaning alert.
pub const ALERT_CONSECUTIVE_READINGS: u32 = 4;
