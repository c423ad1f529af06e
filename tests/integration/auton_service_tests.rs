//! Integration tests for the AutonService → FSM → actuators pipeline.

use super::mock_hw::{MockDrive, MockOutput, MockRobot, RecordingSink, full_robot};

use autonbot::Error;
use autonbot::adapters::hardware::RobotHardwareAdapter;
use autonbot::adapters::time::ManualClock;
use autonbot::app::events::{AppEvent, TelemetryValue};
use autonbot::app::ports::HardwareGroup;
use autonbot::app::service::AutonService;
use autonbot::config::AutonConfig;
use autonbot::drive::VelocityCommand;
use autonbot::fsm::table::RunMode;
use autonbot::fsm::{Event, StateId, TransitionRecord};

fn make_app(mode: RunMode, config: AutonConfig) -> (AutonService<MockRobot, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let app = AutonService::init(mode, config, full_robot(), clock.clone()).unwrap();
    (app, clock)
}

/// Tick every control period until `secs` have passed.
fn run_for(
    app: &mut AutonService<MockRobot, ManualClock>,
    clock: &ManualClock,
    sink: &mut RecordingSink,
    secs: f64,
) {
    let period = app.config().control_period_secs();
    let ticks = (secs / period).ceil() as u64;
    for _ in 0..ticks {
        app.tick(sink);
        clock.advance(period);
    }
}

fn drive_calls(app: &AutonService<MockRobot, ManualClock>) -> &[VelocityCommand] {
    &app.hardware().drive.as_ref().unwrap().calls
}

// ── Drive mode, tick by tick ──────────────────────────────────

#[test]
fn drive_mode_rotates_then_drives_then_stops() {
    let (mut app, clock) = make_app(RunMode::Drive, AutonConfig::default());
    let mut sink = RecordingSink::default();
    assert_eq!(app.state(), StateId::Rotate);

    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::Rotate);
    assert_eq!(drive_calls(&app).last(), Some(&VelocityCommand::new(0.0, 0.0, 1.0)));

    clock.set(1.99);
    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::Rotate);

    clock.set(2.0);
    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::DriveToZone);
    assert_eq!(drive_calls(&app).last(), Some(&VelocityCommand::STOP));

    // DriveToZone's timer starts on its first tick.
    clock.set(2.5);
    app.tick(&mut sink);
    assert_eq!(drive_calls(&app).last(), Some(&VelocityCommand::new(0.0, -0.75, 0.0)));

    clock.set(4.4);
    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::DriveToZone);

    clock.set(4.5);
    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::Stopped);

    let drives_before = drive_calls(&app).len();
    for t in [5.0, 10.0, 100.0] {
        clock.set(t);
        app.tick(&mut sink);
        assert_eq!(app.state(), StateId::Stopped);
    }
    assert_eq!(drive_calls(&app).len(), drives_before, "Stopped never drives");
    assert_eq!(app.hardware().lift.as_ref().unwrap().last(), Some(-1.0));

    assert_eq!(
        sink.transitions(),
        vec![
            TransitionRecord { from: StateId::Rotate, event: Event::TimerExpired, to: StateId::DriveToZone },
            TransitionRecord { from: StateId::DriveToZone, event: Event::TimerExpired, to: StateId::Stopped },
        ]
    );
}

#[test]
fn drive_mode_never_touches_the_intake() {
    let clock = ManualClock::new();
    let hw: MockRobot =
        RobotHardwareAdapter::new(Some(MockDrive::default()), None, Some(MockOutput::default()));
    let mut app = AutonService::init(RunMode::Drive, AutonConfig::default(), hw, clock.clone()).unwrap();
    let mut sink = RecordingSink::default();
    run_for(&mut app, &clock, &mut sink, 6.0);
    assert_eq!(app.state(), StateId::Stopped);
}

#[test]
fn absent_intake_is_skipped_without_stalling_the_timer() {
    let clock = ManualClock::new();
    let hw: MockRobot =
        RobotHardwareAdapter::new(Some(MockDrive::default()), None, Some(MockOutput::default()));
    let mut app = AutonService::init(RunMode::Drive, AutonConfig::default(), hw, clock.clone()).unwrap();
    let mut sink = RecordingSink::default();

    app.tick(&mut sink);
    // Neutral goes to every group, including the missing intake.
    app.disable(&mut sink);
    assert_eq!(app.hardware().lift.as_ref().unwrap().calls, vec![0.0]);
    assert!(app.hardware().intake.is_none());

    clock.set(1.0);
    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::Rotate);

    clock.set(2.0);
    app.tick(&mut sink);
    assert_eq!(app.state(), StateId::DriveToZone);
    assert_eq!(drive_calls(&app).last(), Some(&VelocityCommand::STOP));
    assert_eq!(app.hardware().lift.as_ref().unwrap().calls, vec![0.0]);
}

// ── Three-tote cycle ──────────────────────────────────────────

#[test]
fn three_tote_grabs_until_target_then_transports() {
    let (mut app, clock) = make_app(RunMode::ThreeTote, AutonConfig::default());
    let mut sink = RecordingSink::default();
    run_for(&mut app, &clock, &mut sink, 15.0);

    let path: Vec<(StateId, Event)> = sink.transitions().iter().map(|r| (r.from, r.event)).collect();
    assert_eq!(
        path,
        vec![
            (StateId::GettingTote, Event::TimerExpired),
            (StateId::ForkGrab, Event::NextTote),
            (StateId::GettingTote, Event::TimerExpired),
            (StateId::ForkGrab, Event::NextTote),
            (StateId::GettingTote, Event::TimerExpired),
            (StateId::ForkGrab, Event::Finish),
            (StateId::Rotate, Event::TimerExpired),
            (StateId::DriveToZone, Event::TimerExpired),
        ]
    );
    assert_eq!(app.state(), StateId::Stopped);
    assert_eq!(app.tote_count(), 2);
    assert_eq!(app.fsm().action(StateId::GettingTote).activations(), 3);

    let intake = app.hardware().intake.as_ref().unwrap();
    assert!(intake.calls.contains(&-1.0));
    assert_eq!(intake.last(), Some(0.0));
}

#[test]
fn zero_tote_target_finishes_on_first_grab() {
    let config = AutonConfig::from_json(r#"{ "tote_target": 0 }"#).unwrap();
    let (mut app, clock) = make_app(RunMode::ThreeTote, config);
    let mut sink = RecordingSink::default();
    run_for(&mut app, &clock, &mut sink, 3.0);

    let path: Vec<StateId> = sink.transitions().iter().map(|r| r.to).collect();
    assert_eq!(path[..2], [StateId::ForkGrab, StateId::Rotate]);
    assert_eq!(app.tote_count(), 0);
}

#[test]
fn drive_with_tote_visits_rotate_before_zone() {
    let (mut app, clock) = make_app(RunMode::DriveWithTote, AutonConfig::default());
    let mut sink = RecordingSink::default();
    run_for(&mut app, &clock, &mut sink, 8.0);

    let path: Vec<StateId> = sink.transitions().iter().map(|r| r.to).collect();
    assert_eq!(path, vec![StateId::Rotate, StateId::DriveToZone, StateId::Stopped]);
}

// ── Fail-fast init ────────────────────────────────────────────

#[test]
fn three_tote_without_intake_is_rejected() {
    let hw: MockRobot =
        RobotHardwareAdapter::new(Some(MockDrive::default()), None, Some(MockOutput::default()));
    let result = AutonService::init(RunMode::ThreeTote, AutonConfig::default(), hw, ManualClock::new());
    assert!(matches!(result, Err(Error::MissingHardware(HardwareGroup::Intake))));
}

#[test]
fn unknown_mode_name_is_rejected() {
    assert_eq!("four-tote".parse::<RunMode>(), Err(Error::UnknownMode));
    assert_eq!("three-tote".parse::<RunMode>(), Ok(RunMode::ThreeTote));
}

// ── Disable / telemetry ───────────────────────────────────────

#[test]
fn disable_forces_neutral_everywhere() {
    let (mut app, clock) = make_app(RunMode::ThreeTote, AutonConfig::default());
    let mut sink = RecordingSink::default();
    run_for(&mut app, &clock, &mut sink, 0.5);
    assert_eq!(app.hardware().intake.as_ref().unwrap().last(), Some(-1.0));

    app.disable(&mut sink);

    let hw = app.hardware();
    assert_eq!(hw.drive.as_ref().unwrap().calls.last(), Some(&VelocityCommand::STOP));
    assert_eq!(hw.intake.as_ref().unwrap().last(), Some(0.0));
    assert_eq!(hw.lift.as_ref().unwrap().last(), Some(0.0));
    assert_eq!(sink.events.last(), Some(&AppEvent::Disabled));
}

#[test]
fn started_then_telemetry_every_tick() {
    let (mut app, clock) = make_app(RunMode::Drive, AutonConfig::default());
    let mut sink = RecordingSink::default();
    run_for(&mut app, &clock, &mut sink, 0.1);

    assert_eq!(
        sink.events.first(),
        Some(&AppEvent::Started { mode: RunMode::Drive, state: StateId::Rotate })
    );
    let telemetry: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(telemetry.len() as u64, app.tick_count());

    let last = telemetry.last().unwrap();
    assert_eq!(last.pairs()[0], ("State", TelemetryValue::Text("rotate")));
    assert_eq!(last.tick, app.tick_count());
}
