//! Hardware adapter: bundles the robot's actuated groups.
//!
//! [`RobotHardwareAdapter`] owns whatever drive base, intake and lift the
//! robot actually has and exposes them through [`RobotHardware`].  Any of
//! them may be `None`; the service decides whether that is acceptable for
//! the chosen run mode.

use crate::app::ports::{DrivePort, OutputPort, RobotHardware};

/// Concrete hardware bundle over three optional actuator groups.
pub struct RobotHardwareAdapter<D, I, L> {
    pub drive: Option<D>,
    pub intake: Option<I>,
    pub lift: Option<L>,
}

impl<D, I, L> RobotHardwareAdapter<D, I, L> {
    pub fn new(drive: Option<D>, intake: Option<I>, lift: Option<L>) -> Self {
        Self {
            drive,
            intake,
            lift,
        }
    }
}

impl<D, I, L> RobotHardware for RobotHardwareAdapter<D, I, L>
where
    D: DrivePort,
    I: OutputPort,
    L: OutputPort,
{
    fn drive(&mut self) -> Option<&mut dyn DrivePort> {
        self.drive.as_mut().map(|d| d as &mut dyn DrivePort)
    }

    fn intake(&mut self) -> Option<&mut dyn OutputPort> {
        self.intake.as_mut().map(|i| i as &mut dyn OutputPort)
    }

    fn lift(&mut self) -> Option<&mut dyn OutputPort> {
        self.lift.as_mut().map(|l| l as &mut dyn OutputPort)
    }
}
