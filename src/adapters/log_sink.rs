//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on the device, which goes to
//! UART / USB-CDC). Effects fire constantly while a pet sits at the bowl,
//! so they are logged at debug level to keep the console readable.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { log_name } => match log_name {
                Some(name) => info!("START | logging to {}", name),
                None => warn!("START | no log file, records are dropped"),
            },
            AppEvent::ConfigApplied(json) => {
                info!("CONFIG | {}", json);
            }
            AppEvent::InitFailed(reason) => {
                warn!("INIT | {}", reason);
            }
            AppEvent::SampleLogged(s) => {
                info!(
                    "SAMPLE | t={}ms | {} | T={:?}\u{00b0}C RH={:?}% | fsr={}",
                    s.monotonic_ms, s.calendar, s.temperature_c, s.humidity_pct, s.pressure_raw,
                );
            }
            AppEvent::StorageFault(e) => {
                warn!("STORAGE | {}", e);
            }
            AppEvent::Flushed { at_ms } => {
                info!("FLUSH | at {}ms", at_ms);
            }
            AppEvent::EffectShown(effect) => {
                debug!("LIGHT | {:?}", effect);
            }
        }
    }
}
