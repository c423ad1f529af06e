//! Outbound application events.
//!
//! The [`AutonService`](super::service::AutonService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, push them to a dashboard.

use crate::fsm::table::RunMode;
use crate::fsm::{StateId, TransitionRecord};

/// Structured events emitted by the autonomous core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The first tick of a run (carries the mode and initial state).
    Started { mode: RunMode, state: StateId },

    /// A transition rule fired.
    Transition(TransitionRecord),

    /// Per-tick diagnostic snapshot.
    Telemetry(TelemetryData),

    /// All actuators were forced to neutral.
    Disabled,
}

/// A point-in-time telemetry snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub state: StateId,
    /// Seconds on the current action's timer.
    pub timer_secs: f64,
    pub timer_running: bool,
    pub tote_count: u32,
    pub tick: u64,
}

/// A dashboard value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryValue {
    Number(f64),
    Bool(bool),
    Text(&'static str),
}

impl TelemetryData {
    /// The snapshot as named key/value pairs, dashboard style.
    pub fn pairs(&self) -> [(&'static str, TelemetryValue); 5] {
        [
            ("State", TelemetryValue::Text(self.state.name())),
            ("timer", TelemetryValue::Number(self.timer_secs)),
            ("running", TelemetryValue::Bool(self.timer_running)),
            ("toteCount", TelemetryValue::Number(f64::from(self.tote_count))),
            ("tick", TelemetryValue::Number(self.tick as f64)),
        ]
    }
}
