//! Mock hardware for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real pins.

use autonbot::adapters::hardware::RobotHardwareAdapter;
use autonbot::app::events::AppEvent;
use autonbot::app::ports::{DrivePort, EventSink, MotorPort, OutputPort};
use autonbot::drive::VelocityCommand;
use autonbot::fsm::TransitionRecord;

// ── Drive base ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDrive {
    pub calls: Vec<VelocityCommand>,
}

impl DrivePort for MockDrive {
    fn drive(&mut self, command: VelocityCommand) {
        self.calls.push(command);
    }
}

// ── Intake / lift ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockOutput {
    pub calls: Vec<f32>,
}

#[allow(dead_code)]
impl MockOutput {
    pub fn last(&self) -> Option<f32> {
        self.calls.last().copied()
    }
}

impl OutputPort for MockOutput {
    fn set_output(&mut self, value: f32) {
        self.calls.push(value);
    }
}

// ── Wheel motor ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockMotor {
    pub calls: Vec<f32>,
}

impl MotorPort for MockMotor {
    fn set_native(&mut self, value: f32) {
        self.calls.push(value);
    }
}

// ── Bundles ───────────────────────────────────────────────────

pub type MockRobot = RobotHardwareAdapter<MockDrive, MockOutput, MockOutput>;

/// A robot with every group present.
pub fn full_robot() -> MockRobot {
    RobotHardwareAdapter::new(
        Some(MockDrive::default()),
        Some(MockOutput::default()),
        Some(MockOutput::default()),
    )
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn transitions(&self) -> Vec<TransitionRecord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Transition(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
