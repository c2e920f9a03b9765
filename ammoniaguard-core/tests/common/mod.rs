//! Stub collaborators shared by the integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use ammoniaguard_core::{
    AlertSink, AnalogInput, CleaningAlert, Connectivity, EnvironmentalSensor, ReportRecord,
    Reporter,
};
use embedded_hal::delay::DelayNs;

/// ADC that replays a script of codes, then repeats the last one
pub struct ScriptedAdc {
    script: VecDeque<u16>,
    last: u16,
    pub reads: usize,
}

impl ScriptedAdc {
    pub fn constant(raw: u16) -> Self {
        Self::new(&[], raw)
    }

    pub fn new(script: &[u16], then: u16) -> Self {
        Self {
            script: script.iter().copied().collect(),
            last: then,
            reads: 0,
        }
    }
}

impl AnalogInput for ScriptedAdc {
    fn read_raw(&mut self) -> u16 {
        self.reads += 1;
        if let Some(raw) = self.script.pop_front() {
            raw
        } else {
            self.last
        }
    }
}

/// Climate sensor replaying (temperature, humidity) pairs, then repeating the last
pub struct ScriptedClimate {
    script: VecDeque<(f32, f32)>,
    last: (f32, f32),
}

impl ScriptedClimate {
    pub fn constant(temperature_c: f32, humidity_pct: f32) -> Self {
        Self::new(&[], (temperature_c, humidity_pct))
    }

    pub fn new(script: &[(f32, f32)], then: (f32, f32)) -> Self {
        Self {
            script: script.iter().copied().collect(),
            last: then,
        }
    }
}

impl EnvironmentalSensor for ScriptedClimate {
    fn read_temperature_c(&mut self) -> f32 {
        if let Some(&(t, _)) = self.script.front() {
            t
        } else {
            self.last.0
        }
    }

    // Humidity is read second, so it advances the script
    fn read_humidity_pct(&mut self) -> f32 {
        if let Some((_, h)) = self.script.pop_front() {
            h
        } else {
            self.last.1
        }
    }
}

/// Keeps every record it is handed
#[derive(Default)]
pub struct CapturingReporter {
    pub records: Vec<ReportRecord>,
}

impl Reporter for CapturingReporter {
    fn report(&mut self, record: &ReportRecord) {
        self.records.push(*record);
    }
}

/// Keeps every cleaning alert it is handed
#[derive(Default)]
pub struct CapturingAlerts {
    pub alerts: Vec<CleaningAlert>,
}

impl AlertSink for CapturingAlerts {
    fn alert(&mut self, alert: &CleaningAlert) {
        self.alerts.push(*alert);
    }
}

/// Link that comes up after a number of polls
pub struct StubLink {
    polls_until_up: Cell<u32>,
}

impl StubLink {
    pub fn up() -> Self {
        Self::after(0)
    }

    pub fn after(polls: u32) -> Self {
        Self {
            polls_until_up: Cell::new(polls),
        }
    }
}

impl Connectivity for StubLink {
    fn is_connected(&self) -> bool {
        let left = self.polls_until_up.get();
        if left == 0 {
            return true;
        }
        self.polls_until_up.set(left - 1);
        false
    }
}

/// Records every millisecond delay instead of sleeping
#[derive(Default)]
pub struct RecordingDelay {
    pub calls_ms: Vec<u32>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.calls_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
    }
}
