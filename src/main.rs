//! autonbot-sim: runs one autonomous mode against simulated hardware.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  MecanumDrive<HBridgeMotor>  HBridgeMotor  DoubleSolenoid│
//! │  (drive)                     (intake)      (lift)        │
//! │  ManualClock (Clock)         LogEventSink (EventSink)    │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ─────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           AutonService (pure logic)                │  │
//! │  │  FSM · TimedActions · TransitionTable              │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `autonbot-sim [--mode NAME] [--config FILE] [--seconds N]`

use std::convert::Infallible;
use std::io::Write;

use anyhow::{Context, Result, bail};
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use log::info;

use autonbot::adapters::hardware::RobotHardwareAdapter;
use autonbot::adapters::log_sink::LogEventSink;
use autonbot::adapters::time::ManualClock;
use autonbot::app::service::AutonService;
use autonbot::config::AutonConfig;
use autonbot::drive::Wheel;
use autonbot::drive::mecanum::MecanumDrive;
use autonbot::drivers::hbridge::HBridgeMotor;
use autonbot::drivers::solenoid::DoubleSolenoid;
use autonbot::fsm::table::RunMode;

/// Length of a standard autonomous period.
const DEFAULT_RUN_SECS: f64 = 15.0;

/// Log one telemetry line per this many ticks (0.5 s at 50 Hz).
const TELEMETRY_EVERY: u64 = 25;

// ── Simulated peripherals ─────────────────────────────────────

#[derive(Default)]
struct SimPwm {
    duty: u16,
}

impl PwmErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

#[derive(Default)]
struct SimPin {
    high: bool,
}

impl PinErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

type SimMotor = HBridgeMotor<SimPwm, SimPin>;
type SimHardware =
    RobotHardwareAdapter<MecanumDrive<SimMotor>, SimMotor, DoubleSolenoid<SimPin, SimPin>>;

fn build_hardware(config: &AutonConfig) -> SimHardware {
    let scale = config.mixer.native_scale;
    let wheels = [(); 4].map(|()| HBridgeMotor::new(SimPwm::default(), SimPin::default(), scale));
    RobotHardwareAdapter::new(
        Some(MecanumDrive::new(wheels, config.mixer)),
        Some(HBridgeMotor::new(SimPwm::default(), SimPin::default(), 1.0)),
        Some(DoubleSolenoid::new(SimPin::default(), SimPin::default())),
    )
}

// ── Command line ──────────────────────────────────────────────

struct Args {
    mode: Option<String>,
    config: Option<String>,
    seconds: f64,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        mode: None,
        config: None,
        seconds: DEFAULT_RUN_SECS,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--mode" => args.mode = Some(it.next().context("--mode needs a value")?),
            "--config" => args.config = Some(it.next().context("--config needs a value")?),
            "--seconds" => {
                let raw = it.next().context("--seconds needs a value")?;
                args.seconds = raw
                    .parse()
                    .with_context(|| format!("invalid --seconds value '{raw}'"))?;
            }
            "-h" | "--help" => {
                println!("usage: autonbot-sim [--mode NAME] [--config FILE] [--seconds N]");
                let names: Vec<_> = RunMode::ALL.iter().map(|m| m.name()).collect();
                println!("modes: {}", names.join(", "));
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            AutonConfig::from_json(&text).with_context(|| format!("loading config {path}"))?
        }
        None => AutonConfig::default(),
    };

    let mode = match &args.mode {
        Some(name) => name
            .parse::<RunMode>()
            .with_context(|| format!("mode '{name}'"))?,
        None => config.mode,
    };

    let period = config.control_period_secs();
    let hardware = build_hardware(&config);
    let clock = ManualClock::new();
    let mut sink = LogEventSink::every(TELEMETRY_EVERY);

    let mut app = AutonService::init(mode, config, hardware, clock.clone())?;

    let ticks = (args.seconds / period).ceil() as u64;
    info!("simulating {} ticks of {:.0} ms", ticks, period * 1000.0);
    for _ in 0..ticks {
        app.tick(&mut sink);
        clock.advance(period);
    }
    let hw = app.hardware();
    if let Some(drive) = &hw.drive {
        for wheel in Wheel::ALL {
            info!("{:>10}: last output {:+.2}", wheel.name(), drive.motor(wheel).output());
        }
    }
    info!(
        "finished in {} after {} ticks, {} extra totes",
        app.state().name(),
        app.tick_count(),
        app.tote_count()
    );
    app.disable(&mut sink);
    Ok(())
}
