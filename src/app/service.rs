//! Application service: the hexagonal core.
//!
//! [`AutonService`] owns the FSM, its context, the hardware bundle and the
//! clock.  The surrounding application only ever calls two things:
//! [`AutonService::init`] once per autonomous run and
//! [`AutonService::tick`] once per control period.
//!
//! ```text
//!  Clock ──▶ ┌────────────────────────┐ ──▶ EventSink
//!            │      AutonService       │
//! Hardware ◀─│  FSM · TimedActions     │
//!            └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::AutonConfig;
use crate::error::{Error, Result};
use crate::fsm::action::TimedAction;
use crate::fsm::context::{ActuatorCommands, AutonContext};
use crate::fsm::table::{RunMode, build_transition_table};
use crate::fsm::{Fsm, StateId};

use super::events::{AppEvent, TelemetryData};
use super::ports::{Clock, EventSink, RobotHardware};

// ───────────────────────────────────────────────────────────────
// AutonService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates one autonomous run.
pub struct AutonService<H, C> {
    fsm: Fsm,
    ctx: AutonContext,
    hardware: H,
    clock: C,
    mode: RunMode,
    tick_count: u64,
}

impl<H: RobotHardware, C: Clock> AutonService<H, C> {
    /// Validate the configuration and hardware for `mode`, build its table
    /// and enter the initial state.
    ///
    /// Fails without constructing anything if the configuration is invalid
    /// or a hardware group the mode's states command is missing.
    pub fn init(mode: RunMode, config: AutonConfig, mut hardware: H, clock: C) -> Result<Self> {
        config.validate()?;

        for group in mode.required_hardware() {
            if !hardware.has(group) {
                warn!("{} mode needs {} hardware, none supplied", mode, group);
                return Err(Error::MissingHardware(group));
            }
        }

        let table = build_transition_table(mode)?;
        let actions = TimedAction::roster(&config.timings);
        let fsm = Fsm::init(table, actions, mode.initial_state())?;

        let mut ctx = AutonContext::new(config);
        ctx.now_secs = clock.now_secs();

        info!(
            "AutonService ready: mode={} rules={} initial={}",
            mode,
            fsm.table().len(),
            fsm.current_state().name()
        );

        Ok(Self {
            fsm,
            ctx,
            hardware,
            clock,
            mode,
            tick_count: 0,
        })
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control period: sample clock → FSM → actuators → telemetry.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        if self.tick_count == 0 {
            sink.emit(&AppEvent::Started {
                mode: self.mode,
                state: self.fsm.current_state(),
            });
        }
        self.tick_count += 1;

        // 1. Sample the clock and forget last tick's requests
        self.ctx.now_secs = self.clock.now_secs();
        self.ctx.commands.clear();

        // 2. FSM tick (pure state logic)
        let fired = self.fsm.tick(&mut self.ctx);

        // 3. Apply actuator commands via the hardware ports
        self.apply_actuators();

        // 4. Report
        if let Some(record) = fired {
            sink.emit(&AppEvent::Transition(record));
        }
        sink.emit(&AppEvent::Telemetry(self.telemetry()));
    }

    /// Force every actuator to neutral.  The FSM is left untouched; the
    /// next `tick` resumes whatever the current action was doing.
    pub fn disable(&mut self, sink: &mut impl EventSink) {
        self.ctx.commands = ActuatorCommands::neutral();
        self.apply_actuators();
        sink.emit(&AppEvent::Disabled);
        info!("AutonService disabled: all actuators neutral");
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn telemetry(&self) -> TelemetryData {
        let action = self.fsm.current_action();
        TelemetryData {
            state: self.fsm.current_state(),
            timer_secs: action.elapsed_secs(),
            timer_running: action.is_running(),
            tote_count: self.ctx.tote_count,
            tick: self.tick_count,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn tote_count(&self) -> u32 {
        self.ctx.tote_count
    }

    /// Total control ticks executed since `init`.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn config(&self) -> &AutonConfig {
        &self.ctx.config
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate this tick's commands into port calls.  Absent hardware is
    /// skipped.
    fn apply_actuators(&mut self) {
        let cmds = self.ctx.commands;

        if let Some(cmd) = cmds.drive {
            match self.hardware.drive() {
                Some(drive) => drive.drive(cmd),
                None => debug!("no drive base; {:?} dropped", cmd),
            }
        }

        if let Some(value) = cmds.intake {
            match self.hardware.intake() {
                Some(intake) => intake.set_output(value),
                None => debug!("no intake; {} dropped", value),
            }
        }

        if let Some(value) = cmds.lift {
            match self.hardware.lift() {
                Some(lift) => lift.set_output(value),
                None => debug!("no lift; {} dropped", value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::hardware::RobotHardwareAdapter;
    use crate::adapters::time::ManualClock;
    use crate::app::ports::{DrivePort, HardwareGroup, OutputPort};
    use crate::drive::VelocityCommand;

    struct NullDrive;
    impl DrivePort for NullDrive {
        fn drive(&mut self, _command: VelocityCommand) {}
    }

    struct NullOutput;
    impl OutputPort for NullOutput {
        fn set_output(&mut self, _value: f32) {}
    }

    struct NullSink;
    impl EventSink for NullSink {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    type Hw = RobotHardwareAdapter<NullDrive, NullOutput, NullOutput>;

    #[test]
    fn missing_lift_fails_fast() {
        let hw: Hw = RobotHardwareAdapter::new(Some(NullDrive), None, None);
        let err = AutonService::init(RunMode::Drive, AutonConfig::default(), hw, ManualClock::new())
            .err()
            .unwrap();
        assert_eq!(err, Error::MissingHardware(HardwareGroup::Lift));
    }

    #[test]
    fn drive_mode_does_not_need_an_intake() {
        let hw: Hw = RobotHardwareAdapter::new(Some(NullDrive), None, Some(NullOutput));
        assert!(
            AutonService::init(RunMode::Drive, AutonConfig::default(), hw, ManualClock::new())
                .is_ok()
        );
    }

    #[test]
    fn invalid_config_fails_fast() {
        let hw: Hw = RobotHardwareAdapter::new(Some(NullDrive), Some(NullOutput), Some(NullOutput));
        let mut config = AutonConfig::default();
        config.control_period_ms = 0;
        let err = AutonService::init(RunMode::ThreeTote, config, hw, ManualClock::new())
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn telemetry_tracks_ticks() {
        let hw: Hw = RobotHardwareAdapter::new(Some(NullDrive), Some(NullOutput), Some(NullOutput));
        let clock = ManualClock::new();
        let mut app =
            AutonService::init(RunMode::ThreeTote, AutonConfig::default(), hw, clock.clone())
                .unwrap();
        app.tick(&mut NullSink);
        clock.advance(0.5);
        app.tick(&mut NullSink);

        let t = app.telemetry();
        assert_eq!(t.state, StateId::GettingTote);
        assert_eq!(t.tick, 2);
        assert!(t.timer_running);
        assert!((t.timer_secs - 0.5).abs() < 1e-9);
    }
}
