//! Autonomous configuration parameters
//!
//! All tunable parameters for the autonomous routines.  The defaults are
//! the values the robot was tuned with on the field; none of them has a
//! derivation beyond that, so change them only with new field data.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::drive::VelocityCommand;
use crate::drive::mecanum::MixerConfig;
use crate::error::{Error, Result};
use crate::fsm::table::RunMode;

/// How long each timed maneuver runs, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionTimings {
    /// Approach-and-grasp: creep forward with the intake running.
    pub tote_pickup_secs: f64,
    /// Drive-straight into the auto zone.
    pub drive_to_zone_secs: f64,
    /// Rotate in place.
    pub rotate_secs: f64,
    /// Lower the lift onto the stack before raising it again.
    pub lower_stack_secs: f64,
    /// Reserved for the container push maneuver.
    pub push_secs: f64,
    /// Reserved for the back-away maneuver.
    pub back_away_secs: f64,
}

impl Default for ActionTimings {
    fn default() -> Self {
        Self {
            tote_pickup_secs: 1.5,
            drive_to_zone_secs: 2.0,
            rotate_secs: 2.0,
            lower_stack_secs: 0.5,
            push_secs: 0.9,
            back_away_secs: 1.0,
        }
    }
}

/// Actuator outputs the maneuvers emit while running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverOutputs {
    /// Drive command while approaching a tote.
    pub approach: VelocityCommand,
    /// Drive command while driving to the auto zone.
    pub drive_to_zone: VelocityCommand,
    /// Drive command while rotating in place.
    pub rotate: VelocityCommand,
    /// Intake output while approaching (negative pulls inward).
    pub intake_in: f32,
    /// Lift output while lowering onto a stack.
    pub lift_lower: f32,
    /// Lift output once the stack is grabbed.
    pub lift_raise: f32,
    /// Lift output held while stopped.
    pub lift_hold: f32,
}

impl Default for ManeuverOutputs {
    fn default() -> Self {
        Self {
            // The tote intake sits on the strafe axis, so the autonomous
            // moves run sideways.
            approach: VelocityCommand::new(0.0, -0.5, 0.0),
            drive_to_zone: VelocityCommand::new(0.0, -0.75, 0.0),
            rotate: VelocityCommand::new(0.0, 0.0, 1.0),
            intake_in: -1.0,
            lift_lower: -1.0,
            lift_raise: 1.0,
            lift_hold: -1.0,
        }
    }
}

/// Core autonomous configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonConfig {
    /// Run mode selected when none is given explicitly.
    pub mode: RunMode,
    /// Control loop interval (milliseconds).
    pub control_period_ms: u32,
    /// Number of extra totes to grab before finishing a pickup cycle.
    pub tote_target: u32,
    pub mixer: MixerConfig,
    pub timings: ActionTimings,
    pub outputs: ManeuverOutputs,
}

impl Default for AutonConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Drive,
            control_period_ms: 20, // 50 Hz
            tote_target: 2,
            mixer: MixerConfig::default(),
            timings: ActionTimings::default(),
            outputs: ManeuverOutputs::default(),
        }
    }
}

impl AutonConfig {
    /// Parse a JSON document and validate it.  Missing fields take their
    /// defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            warn!("config rejected: {}", e);
            Error::Config("malformed JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Control period in seconds.
    pub fn control_period_secs(&self) -> f64 {
        f64::from(self.control_period_ms) / 1000.0
    }

    /// Reject values that would make the routines meaningless or unsafe.
    /// Values are never clamped silently.
    pub fn validate(&self) -> Result<()> {
        if self.control_period_ms == 0 {
            return Err(Error::Config("control_period_ms must be positive"));
        }

        let t = &self.timings;
        let deadlines = [
            t.tote_pickup_secs,
            t.drive_to_zone_secs,
            t.rotate_secs,
            t.lower_stack_secs,
            t.push_secs,
            t.back_away_secs,
        ];
        if deadlines.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(Error::Config("timings must be finite and non-negative"));
        }

        let o = &self.outputs;
        let axes = [o.approach, o.drive_to_zone, o.rotate]
            .into_iter()
            .flat_map(|c| [c.forward, c.strafe, c.rotate]);
        let outputs = [o.intake_in, o.lift_lower, o.lift_raise, o.lift_hold];
        if axes.chain(outputs).any(|v| !(-1.0..=1.0).contains(&v)) {
            return Err(Error::Config("outputs must lie in [-1, 1]"));
        }

        let m = &self.mixer;
        if !m.rotation_coupling.is_finite() || m.rotation_coupling < 0.0 {
            return Err(Error::Config("mixer.rotation_coupling must be non-negative"));
        }
        if m.wheel_reversals.iter().any(|r| r.abs() != 1.0) {
            return Err(Error::Config("mixer.wheel_reversals must be +1 or -1"));
        }
        if !m.native_scale.is_finite() || m.native_scale <= 0.0 {
            return Err(Error::Config("mixer.native_scale must be positive"));
        }

        Ok(())
    }
}
