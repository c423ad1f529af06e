//! Table-driven finite state machine engine.
//!
//! States are [`TimedAction`]s; inputs are the [`Event`]s those actions
//! return from `tick`:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  TransitionTable (first match wins)                      │
//! │  ┌──────────────┬──────────────┬─────────┬─────────────┐ │
//! │  │ source       │ event        │ effect  │ dest        │ │
//! │  ├──────────────┼──────────────┼─────────┼─────────────┤ │
//! │  │ Rotate       │ TimerExpired │ -       │ DriveToZone │ │
//! │  │ DriveToZone  │ TimerExpired │ -       │ Stopped     │ │
//! │  └──────────────┴──────────────┴─────────┴─────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine ticks the **current** action, looks up the first
//! rule for `(current, event)`, applies its effect, enters the destination
//! if it differs from the current state, and moves the current pointer.
//! An event with no rule leaves the machine where it is: "keep doing this"
//! is the default, so tables only list the edges they care about.

pub mod action;
pub mod context;
pub mod table;

use action::TimedAction;
use context::AutonContext;
use log::{debug, info, warn};
use table::TransitionTable;

use crate::app::ports::HardwareGroup;
use crate::error::Error;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every maneuver the robot knows.  Must stay in sync with
/// [`TimedAction::roster`], which is indexed by `StateId as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Approach-and-grasp: creep toward a tote with the intake running.
    GettingTote = 0,
    /// Drive straight into the auto zone.
    DriveToZone = 1,
    /// Lower onto the stack, then raise it with the new tote.
    ForkGrab = 2,
    /// Rotate in place.
    Rotate = 3,
    /// Terminal: hold the lift and never leave.
    Stopped = 4,
    PushContainer = 5,
    BackAway = 6,
}

impl StateId {
    /// Total number of states.
    pub const COUNT: usize = 7;

    pub const ALL: [StateId; Self::COUNT] = [
        StateId::GettingTote,
        StateId::DriveToZone,
        StateId::ForkGrab,
        StateId::Rotate,
        StateId::Stopped,
        StateId::PushContainer,
        StateId::BackAway,
    ];

    /// Name published to the dashboard.
    pub fn name(self) -> &'static str {
        match self {
            Self::GettingTote => "gettingTote",
            Self::DriveToZone => "driveToZone",
            Self::ForkGrab => "grabTote",
            Self::Rotate => "rotate",
            Self::Stopped => "stopped",
            Self::PushContainer => "pushContainer",
            Self::BackAway => "backAway",
        }
    }

    /// Hardware groups this state's action commands.
    pub fn required_hardware(self) -> &'static [HardwareGroup] {
        match self {
            Self::GettingTote => &[HardwareGroup::Drive, HardwareGroup::Intake],
            Self::DriveToZone | Self::Rotate => &[HardwareGroup::Drive],
            Self::ForkGrab | Self::Stopped => &[HardwareGroup::Lift],
            Self::PushContainer | Self::BackAway => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Completion codes returned by [`TimedAction::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Still working; no transition wanted.
    NoUpdate,
    /// The pickup cycle collected its target.
    Finish,
    /// The action's deadline passed.
    TimerExpired,
    /// One more tote was grabbed; go fetch another.
    NextTote,
    /// Reserved for tables that route an abort signal.
    EmergencyStop,
}

/// A rule that fired during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub from: StateId,
    pub event: Event,
    pub to: StateId,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns one [`TimedAction`] per [`StateId`], the transition table for the
/// selected run mode and the current-state pointer.  The pointer is always
/// valid: it is set at construction and only moved by [`Fsm::tick`].
pub struct Fsm {
    actions: [TimedAction; StateId::COUNT],
    table: TransitionTable,
    current: StateId,
}

impl Fsm {
    /// Record the table, make `initial` current and enter it.
    ///
    /// `actions` must be laid out like [`StateId::ALL`] (as
    /// [`TimedAction::roster`] builds it); anything else is rejected.
    pub fn init(
        table: TransitionTable,
        actions: [TimedAction; StateId::COUNT],
        initial: StateId,
    ) -> crate::error::Result<Self> {
        if actions.iter().zip(StateId::ALL).any(|(a, id)| a.id() != id) {
            warn!("FSM rejected: action roster out of order");
            return Err(Error::Config("action roster out of order"));
        }

        let mut fsm = Self {
            actions,
            table,
            current: initial,
        };
        info!("FSM starting in state: {}", initial.name());
        fsm.action_mut(initial).enter();
        Ok(fsm)
    }

    /// Advance the FSM by one tick.  Returns the rule that fired, if any.
    pub fn tick(&mut self, ctx: &mut AutonContext) -> Option<TransitionRecord> {
        let from = self.current;
        let event = self.action_mut(from).tick(ctx);

        let Some(rule) = self.table.lookup(from, event).copied() else {
            if event != Event::NoUpdate {
                debug!("FSM: {:?} absorbed in {}", event, from.name());
            }
            return None;
        };

        if let Some(effect) = rule.effect {
            effect.apply(event, from, rule.dest, ctx);
        }

        if rule.dest != from {
            info!(
                "FSM transition: {} -> {} on {:?}",
                from.name(),
                rule.dest.name(),
                event
            );
            self.action_mut(rule.dest).enter();
        }
        self.current = rule.dest;

        Some(TransitionRecord {
            from,
            event,
            to: rule.dest,
        })
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// The action backing the current state.
    pub fn current_action(&self) -> &TimedAction {
        self.action(self.current)
    }

    pub fn action(&self, id: StateId) -> &TimedAction {
        &self.actions[id as usize]
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    fn action_mut(&mut self, id: StateId) -> &mut TimedAction {
        &mut self.actions[id as usize]
    }
}
