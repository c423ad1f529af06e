//! The service driving a real `MecanumDrive` over mock wheel motors.

use super::mock_hw::{MockMotor, MockOutput};

use autonbot::adapters::hardware::RobotHardwareAdapter;
use autonbot::adapters::time::ManualClock;
use autonbot::app::events::AppEvent;
use autonbot::app::ports::EventSink;
use autonbot::app::service::AutonService;
use autonbot::config::AutonConfig;
use autonbot::drive::Wheel;
use autonbot::drive::mecanum::MecanumDrive;
use autonbot::fsm::StateId;
use autonbot::fsm::table::RunMode;

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

type Robot = RobotHardwareAdapter<MecanumDrive<MockMotor>, MockOutput, MockOutput>;

fn make_robot(config: &AutonConfig) -> Robot {
    let motors = [(); 4].map(|()| MockMotor::default());
    RobotHardwareAdapter::new(
        Some(MecanumDrive::new(motors, config.mixer)),
        Some(MockOutput::default()),
        Some(MockOutput::default()),
    )
}

fn last_native(robot: &Robot, wheel: Wheel) -> f32 {
    *robot.drive.as_ref().unwrap().motor(wheel).calls.last().unwrap()
}

#[test]
fn rotate_in_place_spins_every_wheel_the_same_native_way() {
    let config = AutonConfig::default();
    let hw = make_robot(&config);
    let mut app = AutonService::init(RunMode::Drive, config, hw, ManualClock::new()).unwrap();
    app.tick(&mut NullSink);

    // Left side is reversed, so a pure spin is one native sign on all four.
    for wheel in Wheel::ALL {
        assert!((last_native(app.hardware(), wheel) - 1023.0).abs() < 1e-3, "{}", wheel.name());
    }
}

#[test]
fn expiry_writes_zero_to_every_wheel() {
    let config = AutonConfig::default();
    let hw = make_robot(&config);
    let clock = ManualClock::new();
    let mut app = AutonService::init(RunMode::Drive, config, hw, clock.clone()).unwrap();
    app.tick(&mut NullSink);
    clock.set(2.0);
    app.tick(&mut NullSink);
    assert_eq!(app.state(), StateId::DriveToZone);

    for wheel in Wheel::ALL {
        assert_eq!(last_native(app.hardware(), wheel), 0.0);
    }
}
