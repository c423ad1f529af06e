//! Port traits: the hexagonal boundary between the autonomous core and
//! the robot.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AutonService (domain)
//! ```
//!
//! Driven adapters (drive base, intake, lift, clock, telemetry) implement
//! these traits.  The [`AutonService`](super::service::AutonService)
//! consumes them via generics, so the sequencing logic never touches
//! hardware directly.  Every actuator port is fire-and-forget: a write that
//! fails to reach hardware is the adapter's problem, never the core's.

use core::fmt;

use crate::drive::VelocityCommand;

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// A holonomic drive base.
pub trait DrivePort {
    /// Command a planar velocity intent.  Called at most once per tick.
    fn drive(&mut self, command: VelocityCommand);
}

/// A simple actuated group (intake rollers, pneumatic lift).
pub trait OutputPort {
    /// Set the output, `value` in [-1, 1].
    fn set_output(&mut self, value: f32);
}

/// A single wheel motor controller, driven in its native command range.
pub trait MotorPort {
    fn set_native(&mut self, value: f32);
}

// ───────────────────────────────────────────────────────────────
// Hardware bundle
// ───────────────────────────────────────────────────────────────

/// The actuated groups the autonomous maneuvers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareGroup {
    Drive,
    Intake,
    Lift,
}

impl fmt::Display for HardwareGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drive => write!(f, "drive"),
            Self::Intake => write!(f, "intake"),
            Self::Lift => write!(f, "lift"),
        }
    }
}

/// Access to the robot's actuated groups.  Any group may be absent on a
/// partially built robot; `None` means "skip the write".
pub trait RobotHardware {
    fn drive(&mut self) -> Option<&mut dyn DrivePort>;
    fn intake(&mut self) -> Option<&mut dyn OutputPort>;
    fn lift(&mut self) -> Option<&mut dyn OutputPort>;

    /// Whether `group` is wired up.
    fn has(&mut self, group: HardwareGroup) -> bool {
        match group {
            HardwareGroup::Drive => self.drive().is_some(),
            HardwareGroup::Intake => self.intake().is_some(),
            HardwareGroup::Lift => self.lift().is_some(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait Clock {
    /// Seconds since an arbitrary fixed origin.  Never decreases.
    fn now_secs(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, dashboard).
/// Nothing emitted here is ever read back by the core.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
