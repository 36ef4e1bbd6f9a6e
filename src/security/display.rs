//! Security lock display: lockout countdown or remaining attempts.
//!
//! | Condition | pos 3 | pos 2 | pos 1  | pos 0    |
//! |-----------|-------|-------|--------|----------|
//! | locked    | blank | blank | tens   | units    |
//! | otherwise | blank | blank | blank  | attempts |

use crate::drivers::seven_seg::{DisplayBus, Glyph, ScanCounter, multiplex, two_digits};
use crate::pins::DIGIT_COUNT;

/// Logical frame for the current lock status.  Index 0 is the rightmost digit.
pub fn frame(locked: bool, lockout_secs: u8, attempts: u8) -> [Glyph; DIGIT_COUNT] {
    if locked {
        let (tens, units) = two_digits(lockout_secs);
        [units, tens, Glyph::Blank, Glyph::Blank]
    } else {
        [Glyph::Digit(attempts), Glyph::Blank, Glyph::Blank, Glyph::Blank]
    }
}

/// Owns the scan counter that time-shares the bus between digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityDisplayMux {
    scan: ScanCounter,
}

impl SecurityDisplayMux {
    pub fn new(scan_bits: u8) -> Self {
        Self {
            scan: ScanCounter::new(scan_bits),
        }
    }

    /// Advance the scan one tick and drive the selected digit.
    pub fn step(
        &mut self,
        locked: bool,
        lockout_secs: u8,
        attempts: u8,
        reset: bool,
    ) -> DisplayBus {
        self.scan.step(reset);
        multiplex(&frame(locked, lockout_secs, attempts), self.scan.position())
    }
}
