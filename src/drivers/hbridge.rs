//! H-bridge motor driver (PWM duty + direction pin).
//!
//! Speed goes out as a PWM duty cycle, sign as a digital direction pin.
//! The same driver serves a wheel channel ([`MotorPort`], native units)
//! and a roller group such as the intake ([`OutputPort`], [-1, 1]).
//!
//! HAL errors are logged and swallowed: the ports are fire-and-forget and
//! a dropped write is corrected on the next control tick.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{MotorPort, OutputPort};

/// Which way the bridge is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

pub struct HBridgeMotor<P, D> {
    pwm: P,
    dir: D,
    /// Native command magnitude that maps to 100 % duty.
    full_scale: f32,
    /// Last applied signed fraction in [-1, 1].
    output: f32,
}

impl<P: SetDutyCycle, D: OutputPin> HBridgeMotor<P, D> {
    /// `full_scale` is the native magnitude treated as full duty (1023 for
    /// a wheel controller).  A non-positive or non-finite value is logged
    /// and replaced by 1.
    pub fn new(pwm: P, dir: D, full_scale: f32) -> Self {
        let full_scale = if full_scale.is_finite() && full_scale > 0.0 {
            full_scale
        } else {
            warn!("H-bridge full_scale {} invalid, using 1.0", full_scale);
            1.0
        };
        Self {
            pwm,
            dir,
            full_scale,
            output: 0.0,
        }
    }

    /// Signed fraction of full power last applied.
    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn direction(&self) -> Direction {
        if self.output < 0.0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    pub fn stop(&mut self) {
        self.apply(0.0);
    }

    /// Give the pins back.
    pub fn release(self) -> (P, D) {
        (self.pwm, self.dir)
    }

    fn apply(&mut self, fraction: f32) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(-1.0, 1.0)
        };

        let dir_result = if fraction < 0.0 {
            self.dir.set_low()
        } else {
            self.dir.set_high()
        };
        if let Err(e) = dir_result {
            warn!("H-bridge direction pin write failed: {:?}", e);
        }

        let max = self.pwm.max_duty_cycle();
        let duty = (fraction.abs() * f32::from(max)).round() as u16;
        if let Err(e) = self.pwm.set_duty_cycle(duty.min(max)) {
            warn!("H-bridge duty write failed: {:?}", e);
        }

        self.output = fraction;
    }
}

impl<P: SetDutyCycle, D: OutputPin> MotorPort for HBridgeMotor<P, D> {
    fn set_native(&mut self, value: f32) {
        self.apply(value / self.full_scale);
    }
}

impl<P: SetDutyCycle, D: OutputPin> OutputPort for HBridgeMotor<P, D> {
    fn set_output(&mut self, value: f32) {
        self.apply(value);
    }
}
