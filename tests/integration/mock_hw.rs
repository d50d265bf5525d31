//! Mock hardware adapters for integration tests.
//!
//! Time is fully simulated: [`SimClock`] is the monotonic counter the
//! monitor schedules on, and [`MockDelay`] advances that same counter, so
//! blocking effects and cooldowns move time forward exactly as they would
//! on the device. Every output is recorded for later assertions.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use bowlwatch::app::events::AppEvent;
use bowlwatch::app::ports::{ClockPort, EventSink, LogStorage, PixelStrip, SensorPort, TimePort};
use bowlwatch::config::Rgb;
use bowlwatch::error::{ClockError, StorageError};
use bowlwatch::sample::DateTime;
use embedded_hal::delay::DelayNs;

// ── Simulated monotonic time ──────────────────────────────────

#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u32>>);

#[allow(dead_code)]
impl SimClock {
    pub fn starting_at(ms: u32) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn now(&self) -> u32 {
        self.0.get()
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }
}

impl TimePort for SimClock {
    fn millis(&self) -> u32 {
        self.0.get()
    }
}

/// Delay that advances a [`SimClock`] instead of sleeping.
pub struct MockDelay {
    clock: SimClock,
    residual_ns: u64,
    pub waited_ms: u64,
}

impl MockDelay {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            residual_ns: 0,
            waited_ms: 0,
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.residual_ns += u64::from(ns);
        let whole_ms = self.residual_ns / 1_000_000;
        self.residual_ns %= 1_000_000;
        self.waited_ms += whole_ms;
        self.clock.advance(whole_ms as u32);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waited_ms += u64::from(ms);
        self.clock.advance(ms);
    }
}

// ── Sensors ───────────────────────────────────────────────────

pub struct MockSensors {
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub pressure: u16,
    pub motion: bool,
    pub motion_reads: u32,
    /// When set, each temperature read advances this clock by the next
    /// entry of `read_latency_ms` (cycling), like a slow I²C conversion.
    pub clock: Option<SimClock>,
    pub read_latency_ms: Vec<u32>,
    pub temperature_reads: usize,
}

impl Default for MockSensors {
    /// A full bowl, nobody around, 21.5 °C at 40 %.
    fn default() -> Self {
        Self {
            temperature: Some(21.5),
            humidity: Some(40.0),
            pressure: 2000,
            motion: false,
            motion_reads: 0,
            clock: None,
            read_latency_ms: Vec::new(),
            temperature_reads: 0,
        }
    }
}

impl SensorPort for MockSensors {
    fn read_temperature(&mut self) -> Option<f32> {
        if let Some(clock) = &self.clock {
            if !self.read_latency_ms.is_empty() {
                let idx = self.temperature_reads % self.read_latency_ms.len();
                clock.advance(self.read_latency_ms[idx]);
            }
        }
        self.temperature_reads += 1;
        self.temperature
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.humidity
    }

    fn read_pressure(&mut self) -> u16 {
        self.pressure
    }

    fn read_motion(&mut self) -> bool {
        self.motion_reads += 1;
        self.motion
    }
}

// ── Real-time clock ───────────────────────────────────────────

pub struct MockRtc {
    pub ready: bool,
    pub time: DateTime,
}

#[allow(dead_code)]
impl MockRtc {
    pub fn at(time: DateTime) -> Self {
        Self { ready: true, time }
    }

    pub fn absent() -> Self {
        Self {
            ready: false,
            time: DateTime::default(),
        }
    }
}

impl ClockPort for MockRtc {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn now(&mut self) -> Result<DateTime, ClockError> {
        if self.ready { Ok(self.time) } else { Err(ClockError::NotReady) }
    }
}

// ── Storage ───────────────────────────────────────────────────

/// In-memory card. Appended lines stay pending until `flush`.
#[derive(Default)]
pub struct MemStorage {
    pub ready: bool,
    pub durable: BTreeMap<String, Vec<String>>,
    pub pending: Vec<String>,
    pub open: Option<String>,
    pub flushes: u32,
    pub fail_appends: bool,
}

#[allow(dead_code)]
impl MemStorage {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn with_files(names: &[&str]) -> Self {
        let mut storage = Self::ready();
        for name in names {
            storage.durable.insert((*name).to_string(), Vec::new());
        }
        storage
    }

    /// Every line written to `name`, flushed or not.
    pub fn lines(&self, name: &str) -> Vec<String> {
        let mut lines = self.durable.get(name).cloned().unwrap_or_default();
        if self.open.as_deref() == Some(name) {
            lines.extend(self.pending.iter().cloned());
        }
        lines
    }

    pub fn durable_lines(&self, name: &str) -> Vec<String> {
        self.durable.get(name).cloned().unwrap_or_default()
    }
}

impl LogStorage for MemStorage {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn exists(&self, name: &str) -> bool {
        self.durable.contains_key(name)
    }

    fn open_append(&mut self, name: &str) -> Result<(), StorageError> {
        if !self.ready {
            return Err(StorageError::Unavailable);
        }
        self.durable.entry(name.to_string()).or_default();
        self.open = Some(name.to_string());
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> Result<(), StorageError> {
        if self.fail_appends {
            return Err(StorageError::Io);
        }
        if self.open.is_none() {
            return Err(StorageError::NotOpen);
        }
        self.pending.push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        let name = self.open.clone().ok_or(StorageError::NotOpen)?;
        let pending = std::mem::take(&mut self.pending);
        self.durable.entry(name).or_default().extend(pending);
        self.flushes += 1;
        Ok(())
    }
}

// ── Pixel strip ───────────────────────────────────────────────

/// Records the colour pushed by every `show`; `(0, 0, 0)` is off.
#[derive(Default)]
pub struct RecordingStrip {
    staged: Rgb,
    pub shows: Vec<Rgb>,
}

impl PixelStrip for RecordingStrip {
    fn fill(&mut self, colour: Rgb) {
        self.staged = colour;
    }

    fn clear(&mut self) {
        self.staged = (0, 0, 0);
    }

    fn show(&mut self) {
        self.shows.push(self.staged);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
