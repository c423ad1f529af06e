//! Application core: sequencing logic, zero I/O.
//!
//! The autonomous service owns the FSM and its context.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer testable without a robot.

pub mod events;
pub mod ports;
pub mod service;
