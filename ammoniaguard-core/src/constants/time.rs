//! Sampling and Reporting Intervals
//!
//! All delays are blocking. During calibration the device does nothing but
//! sample, which is intended: no reading is reported before a baseline exists.

/// Number of clean-air samples averaged into R0.
pub const CALIBRATION_SAMPLES: usize = 50;

/// Delay between calibration samples (ms).
///
/// 50 × 100 ms keeps the startup calibration at about five seconds.
pub const CALIBRATION_INTERVAL_MS: u32 = 100;

/// Number of samples averaged per concentration estimate.
pub const MEASUREMENT_SAMPLES: usize = 10;

/// Delay between measurement samples (ms).
pub const MEASUREMENT_INTERVAL_MS: u32 = 50;

/// Delay between two reported records (ms).
pub const REPORT_INTERVAL_MS: u32 = 10_000;

/// Delay before retrying after a failed temperature/humidity read (ms).
///
/// DHT11 needs at least one second between reads; two gives it margin.
///
/// Source: DHT11 datasheet, sampling period
pub const RETRY_INTERVAL_MS: u32 = 2_000;

/// Poll interval while waiting for the network link at startup (ms).
pub const CONNECT_POLL_INTERVAL_MS: u32 = 250;
