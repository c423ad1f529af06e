//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A dashboard adapter would implement the same trait.

use log::info;

use crate::app::events::{AppEvent, TelemetryValue};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
///
/// Telemetry arrives every tick; only every `telemetry_every`-th snapshot
/// is logged so a 50 Hz loop does not flood the console.
pub struct LogEventSink {
    telemetry_every: u64,
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    /// Log every telemetry snapshot.
    pub fn new() -> Self {
        Self { telemetry_every: 1 }
    }

    /// Log one telemetry snapshot in `n` (by tick number).
    pub fn every(n: u64) -> Self {
        Self {
            telemetry_every: n.max(1),
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                if t.tick % self.telemetry_every != 0 {
                    return;
                }
                let mut line = String::from("TELEM");
                for (key, value) in t.pairs() {
                    match value {
                        TelemetryValue::Text(s) => line.push_str(&format!(" | {key}={s}")),
                        TelemetryValue::Number(n) => line.push_str(&format!(" | {key}={n:.2}")),
                        TelemetryValue::Bool(b) => line.push_str(&format!(" | {key}={b}")),
                    }
                }
                info!("{}", line);
            }
            AppEvent::Transition(record) => {
                info!(
                    "STATE | {} --{:?}--> {}",
                    record.from.name(),
                    record.event,
                    record.to.name()
                );
            }
            AppEvent::Started { mode, state } => {
                info!("START | mode={} initial_state={}", mode, state.name());
            }
            AppEvent::Disabled => {
                info!("DISABLED | all actuators neutral");
            }
        }
    }
}
