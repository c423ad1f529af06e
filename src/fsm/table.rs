//! Transition tables and the run modes that select them.
//!
//! Each rule is plain data: `(source, event, effect, dest)`.  Lookup scans
//! in order and the first match wins, so an earlier rule overrides a later
//! one for the same `(source, event)` pair.
//!
//! ```text
//!  drive             ROTATE ──▶ DRIVE_TO_ZONE ──▶ STOPPED
//!
//!  drive-with-tote   GETTING_TOTE ──▶ ROTATE ──▶ DRIVE_TO_ZONE ──▶ STOPPED
//!
//!  three-tote        GETTING_TOTE ──[expired]──▶ FORK_GRAB
//!                         ▲                          │
//!                         └──────[next tote]─────────┤
//!                                                [finish]
//!                                                    ▼
//!                              ROTATE ──▶ DRIVE_TO_ZONE ──▶ STOPPED
//! ```
//!
//! A table that sends the machine into a state with no outgoing rules
//! leaves it there for good.  That is intended for `Stopped` and a
//! table-authoring mistake anywhere else; nothing checks for it at run
//! time, see [`TransitionTable::is_source`].

use core::fmt;
use core::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use super::context::AutonContext;
use super::{Event, StateId};
use crate::app::ports::HardwareGroup;
use crate::drive::VelocityCommand;
use crate::error::{Error, Result};

/// Rule capacity of a single table.
pub const MAX_TRANSITIONS: usize = 15;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Side effects a rule may trigger when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Command the drive base to stop this tick.
    StopDrive,
    /// Command the intake to stop this tick.
    StopIntake,
    /// Start a fresh pickup cycle.
    ResetToteCount,
}

impl Effect {
    /// Runs after the source action's tick and before `dest` is entered.
    pub fn apply(self, event: Event, source: StateId, dest: StateId, ctx: &mut AutonContext) {
        info!(
            "FSM effect {:?} on {:?}: {} -> {}",
            self,
            event,
            source.name(),
            dest.name()
        );
        match self {
            Self::StopDrive => ctx.commands.drive = Some(VelocityCommand::STOP),
            Self::StopIntake => ctx.commands.intake = Some(0.0),
            Self::ResetToteCount => ctx.tote_count = 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: StateId,
    pub event: Event,
    pub effect: Option<Effect>,
    pub dest: StateId,
}

impl Transition {
    pub const fn new(source: StateId, event: Event, dest: StateId) -> Self {
        Self {
            source,
            event,
            effect: None,
            dest,
        }
    }

    pub const fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Ordered, fixed-capacity rule list.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rules: heapless::Vec<Transition, MAX_TRANSITIONS>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: &[Transition]) -> Result<Self> {
        let mut table = Self::new();
        for rule in rules {
            table.push(*rule)?;
        }
        Ok(table)
    }

    /// Append a rule.  Fails once the table is full.
    pub fn push(&mut self, rule: Transition) -> Result<()> {
        self.rules.push(rule).map_err(|_| Error::TableFull)
    }

    /// First rule matching `(source, event)`.
    pub fn lookup(&self, source: StateId, event: Event) -> Option<&Transition> {
        self.rules
            .iter()
            .find(|r| r.source == source && r.event == event)
    }

    /// Whether any rule leaves `state`.
    pub fn is_source(&self, state: StateId) -> bool {
        self.rules.iter().any(|r| r.source == state)
    }

    pub fn rules(&self) -> &[Transition] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Run modes
// ---------------------------------------------------------------------------

const DRIVE_RULES: &[Transition] = &[
    Transition::new(StateId::Rotate, Event::TimerExpired, StateId::DriveToZone),
    Transition::new(StateId::DriveToZone, Event::TimerExpired, StateId::Stopped),
];

const DRIVE_WITH_TOTE_RULES: &[Transition] = &[
    Transition::new(StateId::GettingTote, Event::TimerExpired, StateId::Rotate),
    Transition::new(StateId::Rotate, Event::TimerExpired, StateId::DriveToZone),
    Transition::new(StateId::DriveToZone, Event::TimerExpired, StateId::Stopped),
];

const THREE_TOTE_RULES: &[Transition] = &[
    Transition::new(StateId::GettingTote, Event::TimerExpired, StateId::ForkGrab),
    Transition::new(StateId::ForkGrab, Event::NextTote, StateId::GettingTote),
    Transition::new(StateId::ForkGrab, Event::Finish, StateId::Rotate),
    Transition::new(StateId::Rotate, Event::TimerExpired, StateId::DriveToZone),
    Transition::new(StateId::DriveToZone, Event::TimerExpired, StateId::Stopped),
];

/// Named preset selecting the maneuver sequence for one autonomous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Rotate in place, then drive into the auto zone.
    Drive,
    /// Pick up one tote, then rotate and drive into the auto zone.
    DriveWithTote,
    /// Stack totes until the target is reached, then rotate and drive.
    ThreeTote,
}

impl RunMode {
    pub const ALL: [RunMode; 3] = [RunMode::Drive, RunMode::DriveWithTote, RunMode::ThreeTote];

    pub fn name(self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::DriveWithTote => "drive-with-tote",
            Self::ThreeTote => "three-tote",
        }
    }

    pub fn initial_state(self) -> StateId {
        match self {
            Self::Drive => StateId::Rotate,
            Self::DriveWithTote | Self::ThreeTote => StateId::GettingTote,
        }
    }

    pub fn rules(self) -> &'static [Transition] {
        match self {
            Self::Drive => DRIVE_RULES,
            Self::DriveWithTote => DRIVE_WITH_TOTE_RULES,
            Self::ThreeTote => THREE_TOTE_RULES,
        }
    }

    /// Every state this mode can visit.
    pub fn states(self) -> heapless::Vec<StateId, { StateId::COUNT }> {
        let mut states = heapless::Vec::new();
        let reachable = core::iter::once(self.initial_state())
            .chain(self.rules().iter().flat_map(|r| [r.source, r.dest]));
        for state in reachable {
            if !states.contains(&state) {
                // Bounded by StateId::COUNT distinct values.
                let _ = states.push(state);
            }
        }
        states
    }

    /// Hardware groups the mode's states command, in `Drive, Intake, Lift`
    /// order.
    pub fn required_hardware(self) -> heapless::Vec<HardwareGroup, 3> {
        let states = self.states();
        let mut groups = heapless::Vec::new();
        for group in [HardwareGroup::Drive, HardwareGroup::Intake, HardwareGroup::Lift] {
            if states.iter().any(|s| s.required_hardware().contains(&group)) {
                let _ = groups.push(group);
            }
        }
        groups
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "drive" | "rotate-then-drive" => Ok(Self::Drive),
            "drive-with-tote" => Ok(Self::DriveWithTote),
            "three-tote" | "multi-cycle-pickup" => Ok(Self::ThreeTote),
            _ => Err(Error::UnknownMode),
        }
    }
}

/// Build the transition table for `mode`.  Called once per run.
pub fn build_transition_table(mode: RunMode) -> Result<TransitionTable> {
    TransitionTable::from_rules(mode.rules())
}
