//! Unified error types for the autonomous core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! entry points' error handling uniform.  All variants are `Copy` so they
//! can be passed around the control loop without allocation.

use core::fmt;

use crate::app::ports::HardwareGroup;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    /// The `&'static str` names the offending field.
    Config(&'static str),
    /// A run-mode name did not match any known mode.
    UnknownMode,
    /// The selected run mode needs a hardware group that was not supplied.
    MissingHardware(HardwareGroup),
    /// A transition table exceeded its fixed capacity.
    TableFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::UnknownMode => write!(f, "unknown run mode"),
            Self::MissingHardware(group) => write!(f, "missing hardware: {group}"),
            Self::TableFull => write!(f, "transition table full"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
