//! Connectors between the AmmoniaGuard core and the outside world
//!
//! ## Overview
//!
//! The measurement core only knows the [`Reporter`] trait. This crate
//! provides the host-side pieces that sit behind it:
//!
//! - [`http`]: POSTs each record as JSON to the ingestion endpoint
//! - [`config`]: loads circuit, timing and endpoint settings from JSON
//!
//! ## Delivery Semantics
//!
//! Reporting is fire-and-forget. A record that fails to deliver is logged,
//! counted in [`ConnectionStats`], and dropped; the loop produces a fresh one
//! ten seconds later. There is no retry queue and no backoff.
//!
//! ## Example Usage
//!
//! ```no_run
//! use ammoniaguard_connectors::{config::DeviceConfig, http::HttpReporter};
//!
//! let config = DeviceConfig::from_json_file("device.json")?;
//! let reporter = HttpReporter::new(config.http_config())?;
//! // Hand `reporter` and `config.acquisition` to AcquisitionLoop::new
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Reporter`]: ammoniaguard_core::Reporter

pub mod config;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpError, HttpReporter};

use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid JSON for the expected schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration parsed but describes an unusable device
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Delivery statistics common to all reporters
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Records delivered successfully
    pub messages_sent: u64,
    /// Records that failed to deliver
    pub messages_failed: u64,
    /// Payload bytes delivered
    pub bytes_sent: u64,
    /// Last error message
    pub last_error: Option<String>,
}
