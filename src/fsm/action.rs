//! Timed maneuvers.
//!
//! Every maneuver shares one policy: the first tick after [`enter`] starts
//! a timer; until the deadline passes the maneuver emits its in-progress
//! outputs and reports [`Event::NoUpdate`]; on the first tick at or past the
//! deadline it emits its terminal outputs and reports its completion event.
//! Only the timer is shared state, so there is one struct and the behavior
//! is picked by matching on the state identity.
//!
//! [`enter`]: TimedAction::enter

use super::context::AutonContext;
use super::{Event, StateId};
use crate::config::ActionTimings;
use crate::drive::VelocityCommand;

#[derive(Debug, Clone)]
pub struct TimedAction {
    id: StateId,
    deadline_secs: f64,
    running: bool,
    started_at: f64,
    elapsed_secs: f64,
    activations: u32,
}

impl TimedAction {
    pub fn new(id: StateId, deadline_secs: f64) -> Self {
        Self {
            id,
            deadline_secs,
            running: false,
            started_at: 0.0,
            elapsed_secs: 0.0,
            activations: 0,
        }
    }

    /// The action for `id` with its configured deadline.
    pub fn for_state(id: StateId, timings: &ActionTimings) -> Self {
        let deadline = match id {
            StateId::GettingTote => timings.tote_pickup_secs,
            StateId::DriveToZone => timings.drive_to_zone_secs,
            StateId::ForkGrab => timings.lower_stack_secs,
            StateId::Rotate => timings.rotate_secs,
            StateId::PushContainer => timings.push_secs,
            StateId::BackAway => timings.back_away_secs,
            StateId::Stopped => f64::INFINITY,
        };
        Self::new(id, deadline)
    }

    /// One action per state, indexed by `StateId as usize`.
    pub fn roster(timings: &ActionTimings) -> [TimedAction; StateId::COUNT] {
        StateId::ALL.map(|id| Self::for_state(id, timings))
    }

    /// Reset for a fresh activation.  Safe to call mid-run.
    pub fn enter(&mut self) {
        self.running = false;
        self.elapsed_secs = 0.0;
        self.activations = self.activations.saturating_add(1);
    }

    /// Run one control period.
    pub fn tick(&mut self, ctx: &mut AutonContext) -> Event {
        match self.id {
            StateId::Stopped => {
                ctx.commands.lift = Some(ctx.config.outputs.lift_hold);
                Event::NoUpdate
            }
            // Not built yet.
            StateId::PushContainer | StateId::BackAway => Event::NoUpdate,
            _ => {
                if self.advance(ctx.now_secs) {
                    self.running = false;
                    self.expire(ctx)
                } else {
                    self.in_progress(ctx);
                    Event::NoUpdate
                }
            }
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn deadline_secs(&self) -> f64 {
        self.deadline_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the timer started (as of the last tick).
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// How many times [`enter`](Self::enter) has run.
    pub fn activations(&self) -> u32 {
        self.activations
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Start the timer if needed and report whether the deadline passed.
    fn advance(&mut self, now: f64) -> bool {
        if !self.running {
            self.running = true;
            self.started_at = now;
        }
        self.elapsed_secs = (now - self.started_at).max(0.0);
        self.elapsed_secs >= self.deadline_secs
    }

    fn in_progress(&self, ctx: &mut AutonContext) {
        let out = ctx.config.outputs;
        match self.id {
            StateId::GettingTote => {
                ctx.commands.drive = Some(out.approach);
                ctx.commands.intake = Some(out.intake_in);
            }
            StateId::DriveToZone => ctx.commands.drive = Some(out.drive_to_zone),
            StateId::Rotate => ctx.commands.drive = Some(out.rotate),
            StateId::ForkGrab => ctx.commands.lift = Some(out.lift_lower),
            StateId::Stopped | StateId::PushContainer | StateId::BackAway => {}
        }
    }

    fn expire(&self, ctx: &mut AutonContext) -> Event {
        match self.id {
            StateId::GettingTote => {
                ctx.commands.drive = Some(VelocityCommand::STOP);
                ctx.commands.intake = Some(0.0);
                Event::TimerExpired
            }
            StateId::DriveToZone | StateId::Rotate => {
                ctx.commands.drive = Some(VelocityCommand::STOP);
                Event::TimerExpired
            }
            StateId::ForkGrab => {
                ctx.commands.lift = Some(ctx.config.outputs.lift_raise);
                if ctx.enough_totes() {
                    Event::Finish
                } else {
                    ctx.tote_count += 1;
                    Event::NextTote
                }
            }
            StateId::Stopped | StateId::PushContainer | StateId::BackAway => Event::NoUpdate,
        }
    }
}
