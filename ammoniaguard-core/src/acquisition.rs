//! Acquisition Loop
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──link up──▶ Calibrating ──baseline run done──▶ Ready ⟲
//! ```
//!
//! - **Uninitialized**: polls the link every 250 ms, forever if need be.
//!   Nothing is calibrated or reported before the station is associated.
//! - **Calibrating**: one blocking clean-air run (about five seconds). It
//!   always finishes; if every sample was unusable the loop still moves to
//!   Ready, but without a baseline.
//! - **Ready**: each iteration reads temperature/humidity, samples the MQ
//!   sensor, and hands `{ppm, temperature, humidity}` to the reporter, then
//!   sleeps ten seconds. A failed climate read skips the iteration before
//!   any ADC sampling and retries after two seconds. Any other failure
//!   (no baseline, no valid samples, bad ratio) skips the report and waits
//!   the normal interval.
//!
//! There is no way back from Ready. The baseline is written once and only
//! borrowed afterwards.
//!
//! ## Concurrency
//!
//! Single task, blocking delays, no interrupts touched. The loop owns all
//! collaborators for its whole lifetime.

use embedded_hal::delay::DelayNs;

use crate::{
    calibration::{BaselineCalibrator, BaselineResistance},
    concentration::ConcentrationModel,
    config::AcquisitionConfig,
    environment::EnvironmentalReading,
    errors::{SensorError, SensorResult},
    record::ReportRecord,
    traits::{AnalogInput, Connectivity, EnvironmentalSensor, Reporter},
};

/// Lifecycle of the acquisition loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Waiting for the network link
    Uninitialized,
    /// Running the baseline calibration
    Calibrating,
    /// Measuring and reporting
    Ready,
}

/// Result of one Ready-state iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationOutcome {
    /// Record handed to the reporter
    Reported(ReportRecord),
    /// Iteration abandoned, nothing reported
    Skipped(SensorError),
}

/// Calibrate once, then measure and report forever
pub struct AcquisitionLoop<A, E, R, C, D> {
    adc: A,
    environment: E,
    reporter: R,
    link: C,
    delay: D,
    config: AcquisitionConfig,
    calibrator: BaselineCalibrator,
    model: ConcentrationModel,
    state: LoopState,
    baseline: Option<BaselineResistance>,
}

impl<A, E, R, C, D> AcquisitionLoop<A, E, R, C, D>
where
    A: AnalogInput,
    E: EnvironmentalSensor,
    R: Reporter,
    C: Connectivity,
    D: DelayNs,
{
    /// Assemble the loop from its collaborators
    ///
    /// Fails if the configuration does not describe a usable circuit.
    pub fn new(
        adc: A,
        environment: E,
        reporter: R,
        link: C,
        delay: D,
        config: AcquisitionConfig,
    ) -> SensorResult<Self> {
        config.validate()?;

        Ok(Self {
            adc,
            environment,
            reporter,
            link,
            delay,
            calibrator: BaselineCalibrator::new(config.calibration, config.clean_air_factor),
            model: ConcentrationModel::new(config.curve, config.compensation),
            config,
            state: LoopState::Uninitialized,
            baseline: None,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Calibrated R0, if calibration produced a usable value
    pub fn baseline(&self) -> Option<&BaselineResistance> {
        self.baseline.as_ref()
    }

    /// Configuration in use
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Borrow the reporter
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Borrow the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Wait for the link, then calibrate
    ///
    /// Does nothing once the loop has left `Uninitialized`.
    pub fn start(&mut self) {
        if self.state != LoopState::Uninitialized {
            return;
        }

        self.wait_for_link();

        self.calibrate();
    }

    /// Run one iteration, starting the loop first if needed
    pub fn step(&mut self) -> IterationOutcome {
        self.start();

        match self.measure() {
            Ok(record) => {
                log_info!(
                    "NH3 {} ppm, {} C, {} %RH",
                    record.ammonia_ppm,
                    record.temperature_c,
                    record.humidity_pct
                );
                self.reporter.report(&record);
                self.delay.delay_ms(self.config.report_interval_ms);
                IterationOutcome::Reported(record)
            }
            Err(err) if err.is_environmental() => {
                log_warn!("climate sensor read failed, retrying");
                self.delay.delay_ms(self.config.retry_interval_ms);
                IterationOutcome::Skipped(err)
            }
            Err(err) => {
                log_warn!("measurement skipped: {}", err);
                self.delay.delay_ms(self.config.report_interval_ms);
                IterationOutcome::Skipped(err)
            }
        }
    }

    /// Run forever
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn wait_for_link(&mut self) {
        let mut announced = false;
        while !self.link.is_connected() {
            if !announced {
                log_info!("waiting for network link");
                announced = true;
            }
            self.delay.delay_ms(self.config.connect_poll_interval_ms);
        }
        log_info!("network link up");
    }

    fn calibrate(&mut self) {
        self.state = LoopState::Calibrating;

        let result = self
            .calibrator
            .calibrate(&mut self.adc, &mut self.delay, &self.config.circuit);
        if let Err(err) = result {
            log_warn!("no usable baseline, reports suppressed: {}", err);
        }
        self.baseline = result.ok();

        self.state = LoopState::Ready;
    }

    fn measure(&mut self) -> SensorResult<ReportRecord> {
        let environment = EnvironmentalReading::read(&mut self.environment)?;
        let baseline = self.baseline.ok_or(SensorError::InvalidBaseline)?;

        let ppm = self.model.measure(
            &mut self.adc,
            &mut self.delay,
            &self.config.circuit,
            &self.config.measurement,
            &baseline,
            &environment,
        )?;

        Ok(ReportRecord::new(ppm, &environment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct ConstantAdc(u16);

    impl AnalogInput for ConstantAdc {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
    }

    struct Climate(f32, f32);

    impl EnvironmentalSensor for Climate {
        fn read_temperature_c(&mut self) -> f32 {
            self.0
        }

        fn read_humidity_pct(&mut self) -> f32 {
            self.1
        }
    }

    #[derive(Default)]
    struct CountingReporter(usize);

    impl Reporter for CountingReporter {
        fn report(&mut self, _record: &ReportRecord) {
            self.0 += 1;
        }
    }

    /// Reports connected after a number of polls
    struct SlowLink {
        polls_left: Cell<u32>,
    }

    impl Connectivity for SlowLink {
        fn is_connected(&self) -> bool {
            let left = self.polls_left.get();
            if left == 0 {
                true
            } else {
                self.polls_left.set(left - 1);
                false
            }
        }
    }

    #[derive(Default)]
    struct TotalDelay {
        total_ms: u64,
    }

    impl DelayNs for TotalDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += u64::from(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += u64::from(ms);
        }
    }

    fn build(
        raw: u16,
        climate: Climate,
        polls: u32,
    ) -> AcquisitionLoop<ConstantAdc, Climate, CountingReporter, SlowLink, TotalDelay> {
        AcquisitionLoop::new(
            ConstantAdc(raw),
            climate,
            CountingReporter::default(),
            SlowLink {
                polls_left: Cell::new(polls),
            },
            TotalDelay::default(),
            AcquisitionConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn starts_uninitialized() {
        let acquisition = build(1000, Climate(20.0, 65.0), 0);
        assert_eq!(acquisition.state(), LoopState::Uninitialized);
        assert!(acquisition.baseline().is_none());
    }

    #[test]
    fn start_waits_for_link_then_calibrates() {
        let mut acquisition = build(1000, Climate(20.0, 65.0), 4);
        acquisition.start();

        assert_eq!(acquisition.state(), LoopState::Ready);
        assert!(acquisition.baseline().is_some());
        // 4 link polls at 250 ms, then 50 calibration samples at 100 ms
        assert_eq!(acquisition.delay().total_ms, 4 * 250 + 50 * 100);
    }

    #[test]
    fn dead_sensor_leaves_no_baseline() {
        let mut acquisition = build(0, Climate(20.0, 65.0), 0);
        let outcome = acquisition.step();

        assert_eq!(acquisition.state(), LoopState::Ready);
        assert!(acquisition.baseline().is_none());
        assert_eq!(outcome, IterationOutcome::Skipped(SensorError::InvalidBaseline));
        assert_eq!(acquisition.reporter().0, 0);
    }

    #[test]
    fn failed_calibration_still_enters_ready() {
        let mut acquisition = build(0, Climate(20.0, 65.0), 2);
        acquisition.start();

        assert_eq!(acquisition.state(), LoopState::Ready);
        assert!(acquisition.baseline().is_none());
        // The full run is still spent before giving up
        assert_eq!(acquisition.delay().total_ms, 2 * 250 + 50 * 100);

        // A second start does not retry
        acquisition.start();
        assert_eq!(acquisition.delay().total_ms, 2 * 250 + 50 * 100);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = AcquisitionConfig::default();
        config.circuit.divider_scale = 0.0;

        let result = AcquisitionLoop::new(
            ConstantAdc(1000),
            Climate(20.0, 65.0),
            CountingReporter::default(),
            SlowLink {
                polls_left: Cell::new(0),
            },
            TotalDelay::default(),
            config,
        );
        assert!(result.is_err());
    }
}
