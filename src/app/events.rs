//! Outbound diagnostics events.
//!
//! The [`BowlMonitor`](super::service::BowlMonitor) and the
//! [`DataLog`](crate::datalog::DataLog) emit these through the
//! [`EventSink`](super::ports::EventSink) port. They are advisory only:
//! nothing in the loop depends on where, or whether, they are delivered.

use crate::error::{Error, InitFailure};
use crate::indicator::Effect;
use crate::sample::Sample;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The monitor finished startup. `log_name` is `None` when no log
    /// file could be opened.
    Started { log_name: Option<heapless::String<12>> },

    /// The active configuration, serialised as JSON.
    ConfigApplied(String),

    /// A resource failed to come up; the loop continues degraded.
    InitFailed(InitFailure),

    /// A record was appended to the data log.
    SampleLogged(Sample),

    /// An append or flush was refused by the storage device.
    StorageFault(Error),

    /// Buffered records were forced to the medium.
    Flushed { at_ms: u32 },

    /// An indicator effect ran to completion.
    EffectShown(Effect),
}
