//! Double-acting solenoid valve driver.
//!
//! Two coils, one per direction.  Used for the pneumatic lift: a positive
//! output extends (raise), a negative output retracts (lower), anything
//! near zero de-energises both coils.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::OutputPort;

/// Outputs with magnitude below this leave both coils off.
const DEADBAND: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolenoidState {
    Off,
    Extended,
    Retracted,
}

pub struct DoubleSolenoid<A, B> {
    extend: A,
    retract: B,
    state: SolenoidState,
}

impl<A: OutputPin, B: OutputPin> DoubleSolenoid<A, B> {
    pub fn new(extend: A, retract: B) -> Self {
        Self {
            extend,
            retract,
            state: SolenoidState::Off,
        }
    }

    pub fn state(&self) -> SolenoidState {
        self.state
    }

    pub fn set(&mut self, state: SolenoidState) {
        // Never energise both coils at once: drop one before raising the other.
        let failed = match state {
            SolenoidState::Off => {
                self.extend.set_low().is_err() | self.retract.set_low().is_err()
            }
            SolenoidState::Extended => {
                self.retract.set_low().is_err() | self.extend.set_high().is_err()
            }
            SolenoidState::Retracted => {
                self.extend.set_low().is_err() | self.retract.set_high().is_err()
            }
        };
        if failed {
            warn!("solenoid coil write failed while switching to {:?}", state);
        }
        self.state = state;
    }

    pub fn release(self) -> (A, B) {
        (self.extend, self.retract)
    }
}

impl<A: OutputPin, B: OutputPin> OutputPort for DoubleSolenoid<A, B> {
    fn set_output(&mut self, value: f32) {
        let state = if value >= DEADBAND {
            SolenoidState::Extended
        } else if value <= -DEADBAND {
            SolenoidState::Retracted
        } else {
            SolenoidState::Off
        };
        self.set(state);
    }
}
