//! Device configuration
//!
//! One JSON document describes a deployed unit: the analog front end, the
//! sampling/reporting timing, the cleaning alert and where to send records.
//! Every field except the endpoint URL has a default matching the reference
//! board, so a minimal file is just
//!
//! ```json
//! { "endpoint": { "url": "http://192.168.1.20:5000/api/sensor-data" } }
//! ```
//!
//! The circuit is validated after parsing: a zero divider scale or a zero
//! sample count is rejected here rather than at the first measurement.

use std::collections::HashMap;
use std::path::Path;

use ammoniaguard_core::{AcquisitionConfig, AlertPolicy};
use serde::{Deserialize, Serialize};

use crate::ConnectorError;

/// Where and how records are delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Full URL records are POSTed to
    pub url: String,

    /// Request timeout (s)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Complete configuration of one deployed unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Measurement settings (circuit, curve, timing)
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Cleaning alert threshold and streak length
    #[serde(default)]
    pub alert: AlertPolicy,

    /// Transport settings
    pub endpoint: EndpointConfig,
}

impl DeviceConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConnectorError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the device cannot run with
    pub fn validate(&self) -> Result<(), ConnectorError> {
        self.acquisition
            .validate()
            .map_err(|e| ConnectorError::Config(e.to_string()))?;
        self.alert
            .validate()
            .map_err(|e| ConnectorError::Config(e.to_string()))?;

        if self.endpoint.url.is_empty() {
            return Err(ConnectorError::Config("endpoint URL is empty".into()));
        }
        Ok(())
    }

    /// HTTP reporter settings for this device
    #[cfg(feature = "http")]
    pub fn http_config(&self) -> crate::http::HttpConfig {
        self.endpoint.headers.iter().fold(
            crate::http::HttpConfig::new(self.endpoint.url.clone())
                .timeout_secs(self.endpoint.timeout_secs),
            |config, (name, value)| config.header(name.clone(), value.clone()),
        )
    }
}
