//! Shared mutable context threaded through every action tick.
//!
//! `AutonContext` is the blackboard the timed actions read from and write
//! to: the current clock sample, the actuator commands requested this
//! tick, the tote counter and the configuration.

use crate::config::AutonConfig;
use crate::drive::VelocityCommand;

// ---------------------------------------------------------------------------
// Actuator commands (written by actions; consumed by the service)
// ---------------------------------------------------------------------------

/// Actuator writes requested during one tick.  `None` leaves that group
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActuatorCommands {
    pub drive: Option<VelocityCommand>,
    /// Intake output in [-1, 1].
    pub intake: Option<f32>,
    /// Lift output in [-1, 1].
    pub lift: Option<f32>,
}

impl ActuatorCommands {
    /// Every group commanded to neutral.
    pub fn neutral() -> Self {
        Self {
            drive: Some(VelocityCommand::STOP),
            intake: Some(0.0),
            lift: Some(0.0),
        }
    }

    /// Forget this tick's requests.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.drive.is_none() && self.intake.is_none() && self.lift.is_none()
    }
}

// ---------------------------------------------------------------------------
// AutonContext
// ---------------------------------------------------------------------------

/// The shared context passed to every action and transition effect.
pub struct AutonContext {
    /// Clock sample for the current tick (seconds, monotonic).
    pub now_secs: f64,

    /// Commands to be applied to actuators after the FSM tick.
    pub commands: ActuatorCommands,

    /// Totes grabbed so far in this run.  Persists across state
    /// re-entries; only the grasp-and-lift action increments it.
    pub tote_count: u32,

    /// Tunable parameters.
    pub config: AutonConfig,
}

impl AutonContext {
    pub fn new(config: AutonConfig) -> Self {
        Self {
            now_secs: 0.0,
            commands: ActuatorCommands::default(),
            tote_count: 0,
            config,
        }
    }

    /// Whether the pickup cycle has collected its target.
    pub fn enough_totes(&self) -> bool {
        self.tote_count >= self.config.tote_target
    }
}
