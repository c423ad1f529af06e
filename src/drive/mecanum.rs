//! Four-wheel mecanum drive base.
//!
//! Owns one [`MotorPort`] per wheel.  Each [`DrivePort::drive`] call runs
//! the mixer, flips the wheels whose gearboxes are mirrored, scales to the
//! motor controller's native range and writes all four channels.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{DEFAULT_ROTATION_COUPLING, VelocityCommand, WHEEL_COUNT, Wheel, WheelCommand, mix_with};
use crate::app::ports::{DrivePort, MotorPort};

/// Full-scale command accepted by the wheel controllers.
pub const NATIVE_FULL_SCALE: f32 = 1023.0;

/// Left-side gearboxes are mirrored, so their commands are negated.
pub const DEFAULT_WHEEL_REVERSALS: [f32; WHEEL_COUNT] = [-1.0, 1.0, -1.0, 1.0];

/// Tunable mixer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Rotation authority lost per unit of translational speed.
    pub rotation_coupling: f32,
    /// Per-wheel sign applied after mixing (`FL, FR, RL, RR`).
    pub wheel_reversals: [f32; WHEEL_COUNT],
    /// Native command for a unit wheel output.
    pub native_scale: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            rotation_coupling: DEFAULT_ROTATION_COUPLING,
            wheel_reversals: DEFAULT_WHEEL_REVERSALS,
            native_scale: NATIVE_FULL_SCALE,
        }
    }
}

pub struct MecanumDrive<M> {
    motors: [M; WHEEL_COUNT],
    config: MixerConfig,
    engaged: bool,
    last: WheelCommand,
}

impl<M: MotorPort> MecanumDrive<M> {
    /// Wheels in `FL, FR, RL, RR` order.  Starts engaged.
    pub fn new(motors: [M; WHEEL_COUNT], config: MixerConfig) -> Self {
        Self {
            motors,
            config,
            engaged: true,
            last: WheelCommand::default(),
        }
    }

    /// Accept drive commands again.
    pub fn engage(&mut self) {
        self.engaged = true;
    }

    /// Neutral all wheels and ignore drive commands until re-engaged.
    pub fn disengage(&mut self) {
        self.write(WheelCommand::default());
        self.engaged = false;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// The normalized wheel command most recently written.
    pub fn last_command(&self) -> WheelCommand {
        self.last
    }

    pub fn motor(&self, wheel: Wheel) -> &M {
        &self.motors[wheel as usize]
    }

    fn write(&mut self, wheels: WheelCommand) {
        for (i, value) in wheels.to_array().into_iter().enumerate() {
            let native = value * self.config.wheel_reversals[i] * self.config.native_scale;
            self.motors[i].set_native(native);
        }
        self.last = wheels;
    }
}

impl<M: MotorPort> DrivePort for MecanumDrive<M> {
    fn drive(&mut self, command: VelocityCommand) {
        if !self.engaged {
            debug!("drive command {:?} ignored while disengaged", command);
            return;
        }
        let wheels = mix_with(command, self.config.rotation_coupling);
        self.write(wheels);
    }
}
