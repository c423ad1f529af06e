//! Mecanum drive mixing.
//!
//! Turns a planar velocity intent into four wheel commands:
//!
//! ```text
//!          forward
//!             ▲
//!   FL ╲  ────┼────  ╱ FR        rot = -rotate - k·|(forward, strafe)|
//!             │
//!   ──────────┼─────────▶ strafe   FL =  strafe + forward + rot
//!             │                    FR = -strafe + forward - rot
//!   RL ╱  ────┼────  ╲ RR          RL = -strafe + forward + rot
//!                                  RR =  strafe + forward - rot
//! ```
//!
//! The rotation term loses a little authority as translational speed
//! grows (`k` = [`DEFAULT_ROTATION_COUPLING`]), which keeps the rollers
//! from slipping when the chassis is already moving fast.  If any wheel
//! ends up above unit magnitude, all four are divided by the largest one
//! so the heading is preserved.

pub mod mecanum;

use serde::{Deserialize, Serialize};

/// Rotation authority lost per unit of translational speed.
pub const DEFAULT_ROTATION_COUPLING: f32 = 0.01;

/// Number of wheel channels on the chassis.
pub const WHEEL_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Command types
// ---------------------------------------------------------------------------

/// Desired planar motion, each axis nominally in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityCommand {
    pub forward: f32,
    pub strafe: f32,
    pub rotate: f32,
}

impl VelocityCommand {
    pub const STOP: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(forward: f32, strafe: f32, rotate: f32) -> Self {
        Self {
            forward,
            strafe,
            rotate,
        }
    }

    /// Length of the translational component.
    pub fn translation_magnitude(&self) -> f32 {
        (self.forward * self.forward + self.strafe * self.strafe).sqrt()
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.forward * k, self.strafe * k, self.rotate * k)
    }
}

/// Wheel index, in the order wheel arrays are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Wheel {
    FrontLeft = 0,
    FrontRight = 1,
    RearLeft = 2,
    RearRight = 3,
}

impl Wheel {
    pub const ALL: [Wheel; WHEEL_COUNT] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FrontLeft => "frontLeft",
            Self::FrontRight => "frontRight",
            Self::RearLeft => "rearLeft",
            Self::RearRight => "rearRight",
        }
    }
}

/// Per-wheel output, each in [-1, 1] once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelCommand {
    pub front_left: f32,
    pub front_right: f32,
    pub rear_left: f32,
    pub rear_right: f32,
}

impl WheelCommand {
    pub const fn from_array(w: [f32; WHEEL_COUNT]) -> Self {
        Self {
            front_left: w[0],
            front_right: w[1],
            rear_left: w[2],
            rear_right: w[3],
        }
    }

    pub const fn to_array(self) -> [f32; WHEEL_COUNT] {
        [
            self.front_left,
            self.front_right,
            self.rear_left,
            self.rear_right,
        ]
    }

    pub fn get(&self, wheel: Wheel) -> f32 {
        self.to_array()[wheel as usize]
    }

    /// Largest absolute wheel value.
    pub fn max_magnitude(&self) -> f32 {
        self.to_array().iter().fold(0.0_f32, |m, w| m.max(w.abs()))
    }
}

// ---------------------------------------------------------------------------
// Mixing
// ---------------------------------------------------------------------------

/// Mix with the default rotation coupling.
pub fn mix(forward: f32, strafe: f32, rotate: f32) -> WheelCommand {
    mix_with(
        VelocityCommand::new(forward, strafe, rotate),
        DEFAULT_ROTATION_COUPLING,
    )
}

/// Mix `cmd` into four wheel commands, normalizing if any wheel exceeds 1.
pub fn mix_with(cmd: VelocityCommand, rotation_coupling: f32) -> WheelCommand {
    let rot = -cmd.rotate - rotation_coupling * cmd.translation_magnitude();

    let mut wheels = [
        cmd.strafe + cmd.forward + rot,
        -cmd.strafe + cmd.forward - rot,
        -cmd.strafe + cmd.forward + rot,
        cmd.strafe + cmd.forward - rot,
    ];

    let max = wheels.iter().fold(0.0_f32, |m, w| m.max(w.abs()));
    if max > 1.0 {
        for w in &mut wheels {
            *w /= max;
        }
    }

    WheelCommand::from_array(wheels)
}
