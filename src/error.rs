//! Unified error types for the lockgame crate.
//!
//! The tick-level model itself cannot fail: every value is fixed-width and
//! every counter saturates or wraps.  Errors only appear at the edges:
//! configuration loading, pin I/O in the hardware adapter, and stimulus
//! scripts for the simulator.  All variants are `Copy` so adapters can hand
//! them back without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
    /// A board pin could not be read or driven.
    Pin(PinFault),
    /// A stimulus script is malformed.
    Script(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Pin(e) => write!(f, "pin: {e}"),
            Self::Script(msg) => write!(f, "script: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin faults
// ---------------------------------------------------------------------------

/// Which pin group failed, with the index inside that group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFault {
    ButtonRead(u8),
    SwitchRead(u8),
    LedWrite(u8),
    SegmentWrite(u8),
    DigitWrite(u8),
}

impl fmt::Display for PinFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ButtonRead(i) => write!(f, "button {i} read failed"),
            Self::SwitchRead(i) => write!(f, "switch {i} read failed"),
            Self::LedWrite(i) => write!(f, "LED {i} write failed"),
            Self::SegmentWrite(i) => write!(f, "segment {i} write failed"),
            Self::DigitWrite(i) => write!(f, "digit select {i} write failed"),
        }
    }
}

impl From<PinFault> for Error {
    fn from(e: PinFault) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
