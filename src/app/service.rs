//! The sampling/signalling loop: the hexagonal core.
//!
//! [`BowlMonitor`] owns every port for the lifetime of the process and
//! runs forever on a single thread. Each iteration does exactly one of:
//!
//! ```text
//!                 ┌─────────────────────┐
//!   millis() ───▶ │ log cadence due?    │
//!                 └──────┬───────┬──────┘
//!                    yes │       │ no
//!                        ▼       ▼
//!   ┌──────────────────────┐   ┌─────────────────────────────┐
//!   │ logging tick         │   │ reactive check              │
//!   │  clock + sensors     │   │  pressure ≤ threshold?      │
//!   │  append record       │   │   yes → refill alert (~1s)  │
//!   │  flush if due        │   │   no  → motion?             │
//!   │  cooldown delay      │   │          yes → presence     │
//!   └──────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! A logging tick and an indicator effect never overlap, and the
//! iteration that performs a tick skips the reactive check. The light is
//! therefore unresponsive for the length of one tick plus its cooldown.
//! Effects block the loop for their whole duration, so a tick that comes
//! due during a presence hold runs on the next iteration, up to one
//! effect late, and the cadence restarts from that tick.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::cadence::Cadence;
use crate::config::MonitorConfig;
use crate::datalog::DataLog;
use crate::error::{InitFailure, Result};
use crate::indicator::{Effect, Indicator};
use crate::sample::{DateTime, Sample};

use super::events::AppEvent;
use super::ports::{ClockPort, EventSink, LogStorage, PixelStrip, SensorPort, TimePort};

// ───────────────────────────────────────────────────────────────
// Ports bundle
// ───────────────────────────────────────────────────────────────

/// Every resource the monitor takes ownership of at startup.
pub struct MonitorPorts<S, T, C, W, P, D, E> {
    pub sensors: S,
    pub time: T,
    pub clock: C,
    pub storage: W,
    pub strip: P,
    pub delay: D,
    pub sink: E,
}

/// What a single loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A logging tick ran; `flushed` reports whether the flush cadence fired.
    Logged { flushed: bool },
    /// The reactive check ran and played this effect, if any.
    Reacted(Option<Effect>),
}

// ───────────────────────────────────────────────────────────────
// BowlMonitor
// ───────────────────────────────────────────────────────────────

pub struct BowlMonitor<S, T, C, W, P, D, E>
where
    S: SensorPort,
    T: TimePort,
    C: ClockPort,
    W: LogStorage,
    P: PixelStrip,
    D: DelayNs,
    E: EventSink,
{
    config: MonitorConfig,
    sensors: S,
    time: T,
    clock: C,
    log: DataLog<W>,
    indicator: Indicator<P>,
    delay: D,
    sink: E,
    log_cadence: Cadence,
    flush_cadence: Cadence,
    iterations: u64,
    tick_count: u64,
}

impl<S, T, C, W, P, D, E> BowlMonitor<S, T, C, W, P, D, E>
where
    S: SensorPort,
    T: TimePort,
    C: ClockPort,
    W: LogStorage,
    P: PixelStrip,
    D: DelayNs,
    E: EventSink,
{
    /// Bring the monitor up: report the config, check the clock, pick the
    /// log file and write its header, blank the strip.
    ///
    /// Only an invalid `config` is an error. Clock and storage failures are
    /// reported through the sink and the monitor starts degraded.
    pub fn start(config: MonitorConfig, ports: MonitorPorts<S, T, C, W, P, D, E>) -> Result<Self> {
        config.validate()?;

        let MonitorPorts {
            sensors,
            time,
            clock,
            storage,
            strip,
            delay,
            mut sink,
        } = ports;

        if let Ok(json) = serde_json::to_string(&config) {
            sink.emit(&AppEvent::ConfigApplied(json));
        }

        if !clock.is_ready() {
            warn!("BowlMonitor: RTC not ready, timestamps will use the default date");
            sink.emit(&AppEvent::InitFailed(InitFailure::ClockUnavailable));
        }

        let mut log = DataLog::open_or_create_unique(storage, &mut sink);
        if let Err(e) = log.write_header() {
            warn!("BowlMonitor: header write failed: {}", e);
            sink.emit(&AppEvent::StorageFault(e.into()));
        }

        let mut indicator = Indicator::new(strip, &config);
        indicator.off();

        let now = time.millis();
        let log_cadence = Cadence::new(config.log_interval_ms, now);
        let flush_cadence = Cadence::new(config.flush_interval_ms, now);

        sink.emit(&AppEvent::Started {
            log_name: log.name().cloned(),
        });
        info!(
            "BowlMonitor started: log every {}ms, flush every {}ms, fill threshold {}",
            config.log_interval_ms, config.flush_interval_ms, config.fill_threshold_raw
        );

        Ok(Self {
            config,
            sensors,
            time,
            clock,
            log,
            indicator,
            delay,
            sink,
            log_cadence,
            flush_cadence,
            iterations: 0,
            tick_count: 0,
        })
    }

    /// Run forever.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// One loop iteration: a logging tick if one is due, otherwise the
    /// reactive light check.
    pub fn step(&mut self) -> StepOutcome {
        self.iterations += 1;

        let now = self.time.millis();
        if self.log_cadence.poll(now) {
            let flushed = self.logging_tick(now);
            self.delay.delay_ms(self.config.post_tick_cooldown_ms);
            return StepOutcome::Logged { flushed };
        }

        StepOutcome::Reacted(self.reactive_check())
    }

    // ── Logging tick ──────────────────────────────────────────

    /// Sample everything, append one record, flush if the flush cadence is
    /// due. `started_ms` is the millis value the tick was scheduled on.
    fn logging_tick(&mut self, started_ms: u32) -> bool {
        self.tick_count += 1;

        let calendar = match self.clock.now() {
            Ok(t) if t.is_valid() => t,
            Ok(t) => {
                warn!("BowlMonitor: clock returned out-of-range time {}, using default", t);
                DateTime::default()
            }
            Err(e) => {
                log::debug!("BowlMonitor: clock read failed ({}), using default", e);
                DateTime::default()
            }
        };
        let temperature_c = self.sensors.read_temperature();
        let humidity_pct = self.sensors.read_humidity();
        let pressure_raw = self.sensors.read_pressure();

        let sample = Sample {
            monotonic_ms: started_ms,
            unix_seconds: calendar.unix_seconds(),
            calendar,
            temperature_c,
            humidity_pct,
            pressure_raw,
        };

        match self.log.append_sample(&sample) {
            Ok(()) if self.log.is_ready() => self.sink.emit(&AppEvent::SampleLogged(sample)),
            Ok(()) => {}
            Err(e) => {
                warn!("BowlMonitor: append failed: {}", e);
                self.sink.emit(&AppEvent::StorageFault(e));
            }
        }

        // Keyed on the tick's start, like the log cadence.
        if !self.flush_cadence.poll(started_ms) {
            return false;
        }
        match self.log.flush() {
            Ok(()) if self.log.is_ready() => self.sink.emit(&AppEvent::Flushed { at_ms: started_ms }),
            Ok(()) => {}
            Err(e) => {
                warn!("BowlMonitor: flush failed: {}", e);
                self.sink.emit(&AppEvent::StorageFault(e.into()));
            }
        }
        true
    }

    // ── Reactive check ────────────────────────────────────────

    fn reactive_check(&mut self) -> Option<Effect> {
        let pressure = self.sensors.read_pressure();
        let sensors = &mut self.sensors;
        let effect = Effect::select(pressure, self.config.fill_threshold_raw, || {
            sensors.read_motion()
        })?;

        self.indicator.play(effect, &mut self.delay);
        self.sink.emit(&AppEvent::EffectShown(effect));
        Some(effect)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Loop iterations executed since startup.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Logging ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn log_cadence(&self) -> &Cadence {
        &self.log_cadence
    }

    pub fn flush_cadence(&self) -> &Cadence {
        &self.flush_cadence
    }

    pub fn data_log(&self) -> &DataLog<W> {
        &self.log
    }

    pub fn indicator(&self) -> &Indicator<P> {
        &self.indicator
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }
}
