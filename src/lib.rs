//! Autonomous maneuver sequencer and mecanum drive mixer.
//!
//! Exposes the pure-logic modules (FSM, mixer, configuration) together
//! with the port traits, adapters and `embedded-hal` drivers that connect
//! them to a robot.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drive;
pub mod drivers;
pub mod fsm;

mod error;

pub use error::{Error, Result};
