//! Cleaning alert
//!
//! A pen needs mucking out when ammonia stays high, not when a single
//! reading spikes. The detector counts reported readings strictly above the
//! threshold; any reading at or below it clears the streak. When the streak
//! reaches the configured length an alert carrying that reading is raised
//! and the count starts over, so a pen that stays dirty alerts again after
//! another full streak.
//!
//! ```text
//! ppm:    7.1  8.0  6.0  7.2  7.5  9.1  6.3  ...
//! streak:  1    2    0    1    2    3    4 -> alert, 0
//! ```

use crate::{
    config::AlertPolicy,
    errors::SensorResult,
    record::ReportRecord,
    traits::{AlertSink, Reporter},
};

/// Reading that completed a high-concentration streak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleaningAlert {
    /// Concentration of the last reading in the streak (ppm)
    pub ammonia_ppm: f32,

    /// Air temperature at that reading (°C)
    pub temperature_c: f32,

    /// Relative humidity at that reading (%)
    pub humidity_pct: f32,
}

impl From<&ReportRecord> for CleaningAlert {
    fn from(record: &ReportRecord) -> Self {
        Self {
            ammonia_ppm: record.ammonia_ppm,
            temperature_c: record.temperature_c,
            humidity_pct: record.humidity_pct,
        }
    }
}

/// Counts consecutive high readings
#[derive(Debug, Clone)]
pub struct AlertDetector {
    policy: AlertPolicy,
    streak: u32,
}

impl AlertDetector {
    /// Create a detector with an empty streak
    pub fn new(policy: AlertPolicy) -> SensorResult<Self> {
        policy.validate()?;
        Ok(Self { policy, streak: 0 })
    }

    /// Policy in use
    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// High readings seen since the last reset
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Feed one reading; returns the alert when it completes a streak
    pub fn observe(&mut self, record: &ReportRecord) -> Option<CleaningAlert> {
        // NaN compares false and clears the streak
        if record.ammonia_ppm > self.policy.threshold_ppm {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }

        if self.streak >= self.policy.consecutive {
            self.streak = 0;
            Some(CleaningAlert::from(record))
        } else {
            None
        }
    }
}

/// Forwards every record and raises cleaning alerts on the side
///
/// Wrap it around a [`crate::ConnectedReporter`] to count every
/// measurement, or inside one to count only records that were delivered.
pub struct AlertingReporter<R, S> {
    inner: R,
    sink: S,
    detector: AlertDetector,
    raised: u32,
}

impl<R: Reporter, S: AlertSink> AlertingReporter<R, S> {
    /// Wrap a reporter with a cleaning alert
    pub fn new(inner: R, sink: S, policy: AlertPolicy) -> SensorResult<Self> {
        Ok(Self {
            inner,
            sink,
            detector: AlertDetector::new(policy)?,
            raised: 0,
        })
    }

    /// Alerts raised so far
    pub fn raised(&self) -> u32 {
        self.raised
    }

    /// Borrow the detector
    pub fn detector(&self) -> &AlertDetector {
        &self.detector
    }

    /// Borrow the wrapped reporter
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Borrow the alert sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<R: Reporter, S: AlertSink> Reporter for AlertingReporter<R, S> {
    fn report(&mut self, record: &ReportRecord) {
        self.inner.report(record);

        if let Some(alert) = self.detector.observe(record) {
            self.raised = self.raised.saturating_add(1);
            log_warn!(
                "cleaning alert: NH3 {} ppm, {} C, {} %RH",
                alert.ammonia_ppm,
                alert.temperature_c,
                alert.humidity_pct
            );
            self.sink.alert(&alert);
        }
    }
}
