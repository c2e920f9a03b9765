//! Core measurement engine for AmmoniaGuard
//!
//! Turns raw MQ-137 ADC codes into temperature/humidity compensated
//! ammonia concentrations. Designed for small microcontrollers (ESP32
//! class) running a single blocking loop.
//!
//! Key constraints:
//! - No heap allocation anywhere in the measurement path
//! - Baseline R0 calibrated once per boot, never persisted
//! - Hardware reached only through the traits in [`traits`]
//! - Sustained high readings raise a cleaning alert ([`alert`])
//!
//! ```no_run
//! use ammoniaguard_core::{
//!     AcquisitionConfig, AcquisitionLoop, AnalogInput, Connectivity,
//!     EnvironmentalSensor, ReportRecord, Reporter,
//! };
//! # struct Adc; impl AnalogInput for Adc { fn read_raw(&mut self) -> u16 { 1200 } }
//! # struct Dht; impl EnvironmentalSensor for Dht {
//! #     fn read_temperature_c(&mut self) -> f32 { 22.0 }
//! #     fn read_humidity_pct(&mut self) -> f32 { 60.0 }
//! # }
//! # struct Http; impl Reporter for Http { fn report(&mut self, _: &ReportRecord) {} }
//! # struct Wifi; impl Connectivity for Wifi { fn is_connected(&self) -> bool { true } }
//! # struct Delay; impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//!
//! let acquisition = AcquisitionLoop::new(
//!     Adc, Dht, Http, Wifi, Delay,
//!     AcquisitionConfig::default(),
//! ).unwrap();
//!
//! // Waits for the link, calibrates, then reports every 10 s
//! acquisition.run();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod acquisition;
pub mod alert;
pub mod calibration;
pub mod concentration;
pub mod config;
pub mod constants;
pub mod environment;
pub mod errors;
pub mod estimator;
pub mod record;
pub mod reporting;
pub mod traits;

// Public API
pub use acquisition::{AcquisitionLoop, IterationOutcome, LoopState};
pub use alert::{AlertDetector, AlertingReporter, CleaningAlert};
pub use calibration::{BaselineCalibrator, BaselineResistance};
pub use concentration::ConcentrationModel;
pub use config::{
    AcquisitionConfig, AlertPolicy, CircuitParameters, Compensation, ResponseCurve, SamplingPlan,
};
pub use environment::EnvironmentalReading;
pub use errors::{SensorError, SensorResult};
pub use estimator::{average_resistance, estimate_resistance, ResistanceAverager};
pub use record::{Payload, ReportRecord};
pub use reporting::ConnectedReporter;
pub use traits::{AlertSink, AnalogInput, Connectivity, EnvironmentalSensor, Reporter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
