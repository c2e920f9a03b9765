//! HTTP Reporter - JSON POST to the ingestion endpoint
//!
//! ## Overview
//!
//! Each finished record is rendered by the core into the flat JSON payload
//! the backend expects and POSTed with `Content-Type: application/json`:
//!
//! ```text
//! POST /api/sensor-data
//! {"ammonia_ppm": 12.34, "temperature": 24.5, "humidity": 61.0}
//! ```
//!
//! ## Implementation Choices
//!
//! - Blocking `ureq` client: the acquisition loop is single-threaded and
//!   already blocking, so no async runtime is involved
//! - One attempt per record: failures are logged and counted, never retried
//! - The response body is ignored; only the status code is inspected
//!
//! ## Example Usage
//!
//! ```no_run
//! use ammoniaguard_connectors::http::{HttpConfig, HttpReporter};
//! use ammoniaguard_core::{ReportRecord, Reporter};
//!
//! let config = HttpConfig::new("http://192.168.1.20:5000/api/sensor-data")
//!     .timeout_secs(5)
//!     .header("X-Device-Id", "pen-3");
//!
//! let mut reporter = HttpReporter::new(config)?;
//! reporter.report(&ReportRecord {
//!     ammonia_ppm: 4.21,
//!     temperature_c: 26.3,
//!     humidity_pct: 71.0,
//! });
//! # Ok::<(), ammoniaguard_connectors::http::HttpError>(())
//! ```

use std::collections::HashMap;
use std::time::Duration;

use ammoniaguard_core::{ReportRecord, Reporter};
use thiserror::Error;

use crate::ConnectionStats;

/// HTTP-specific errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or transport error
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Record could not be rendered
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Full URL records are POSTed to
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl HttpConfig {
    /// Create new configuration for an endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
            headers: HashMap::new(),
            user_agent: format!("AmmoniaGuard/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Check the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), HttpError> {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            Ok(())
        } else {
            Err(HttpError::Config(
                "Endpoint must start with http:// or https://".into(),
            ))
        }
    }
}

/// Reporter that POSTs each record using a blocking ureq agent
pub struct HttpReporter {
    config: HttpConfig,
    agent: ureq::Agent,
    stats: ConnectionStats,
}

impl HttpReporter {
    /// Create new HTTP reporter
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        config.validate()?;

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: ConnectionStats::default(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Delivery statistics so far
    pub fn stats(&self) -> &ConnectionStats {
        &self.stats
    }

    /// POST one record, reporting the outcome
    pub fn send(&self, record: &ReportRecord) -> Result<usize, HttpError> {
        let payload = record
            .to_json()
            .map_err(|e| HttpError::Serialization(e.to_string()))?;

        let mut request = self
            .agent
            .post(&self.config.endpoint)
            .set("Content-Type", "application/json");
        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }

        match request.send_string(payload.as_str()) {
            Ok(_) => Ok(payload.len()),
            Err(ureq::Error::Status(status, resp)) => Err(HttpError::ServerError {
                status,
                message: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => Err(HttpError::Request(e.to_string())),
        }
    }
}

impl Reporter for HttpReporter {
    fn report(&mut self, record: &ReportRecord) {
        match self.send(record) {
            Ok(bytes) => {
                self.stats.messages_sent += 1;
                self.stats.bytes_sent += bytes as u64;
                log::debug!("delivered {} bytes to {}", bytes, self.config.endpoint);
            }
            Err(e) => {
                self.stats.messages_failed += 1;
                log::warn!("report delivery failed: {}", e);
                self.stats.last_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Accept one request, hand back its body, answer with `status`
    fn one_shot_server(status: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/sensor-data", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            tx.send(String::from_utf8(body).unwrap()).unwrap();

            let mut stream = stream;
            write!(stream, "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status)
                .unwrap();
        });

        (url, rx)
    }

    fn record() -> ReportRecord {
        ReportRecord {
            ammonia_ppm: 7.456,
            temperature_c: 27.04,
            humidity_pct: 80.0,
        }
    }

    #[test]
    fn test_config_builder() {
        let config = HttpConfig::new("https://ingest.example.com/api/sensor-data")
            .timeout_secs(3)
            .header("X-Device-Id", "pen-3");

        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.headers.get("X-Device-Id").map(String::as_str), Some("pen-3"));
        assert!(config.user_agent.starts_with("AmmoniaGuard/"));
    }

    #[test]
    fn test_url_validation() {
        assert!(HttpReporter::new(HttpConfig::new("not-a-url")).is_err());
        assert!(HttpReporter::new(HttpConfig::new("https://valid.url/ingest")).is_ok());
    }

    #[test]
    fn posts_rendered_payload() {
        let (url, body) = one_shot_server("200 OK");
        let mut reporter = HttpReporter::new(HttpConfig::new(url).timeout_secs(5)).unwrap();

        reporter.report(&record());

        assert_eq!(
            body.recv().unwrap(),
            "{\"ammonia_ppm\": 7.46, \"temperature\": 27.0, \"humidity\": 80.0}"
        );
        assert_eq!(reporter.stats().messages_sent, 1);
        assert_eq!(reporter.stats().messages_failed, 0);
    }

    #[test]
    fn server_error_is_counted_not_raised() {
        let (url, body) = one_shot_server("500 Internal Server Error");
        let mut reporter = HttpReporter::new(HttpConfig::new(url).timeout_secs(5)).unwrap();

        reporter.report(&record());
        body.recv().unwrap();

        assert_eq!(reporter.stats().messages_sent, 0);
        assert_eq!(reporter.stats().messages_failed, 1);
        assert!(reporter.stats().last_error.is_some());
    }
}
