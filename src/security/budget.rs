//! Attempt budget: a saturating life counter.
//!
//! Each tick is evaluated with fixed priority:
//!
//! 1. rising edge of `refill` → `remaining = max`
//! 2. else rising edge of `fail` with lives left → `remaining -= 1`
//! 3. else unchanged
//!
//! A simultaneous refill and fail therefore refills; it never applies both.
//! Owners that drive the budget from FSM actions use [`refill`] and
//! [`consume`] directly instead of pulses.
//!
//! [`refill`]: AttemptBudget::refill
//! [`consume`]: AttemptBudget::consume

use crate::drivers::debounce::EdgeDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptBudget {
    remaining: u8,
    max: u8,
    refill_edge: EdgeDetector,
    fail_edge: EdgeDetector,
}

impl AttemptBudget {
    /// A full budget of `max` attempts.
    pub fn new(max: u8) -> Self {
        Self {
            remaining: max,
            max,
            refill_edge: EdgeDetector::new(),
            fail_edge: EdgeDetector::new(),
        }
    }

    /// Advance one tick on pulse inputs.  Returns the remaining count.
    pub fn step(&mut self, refill: bool, fail: bool, reset: bool) -> u8 {
        let refill = self.refill_edge.rising(refill);
        let fail = self.fail_edge.rising(fail);

        if reset {
            *self = Self::new(self.max);
        } else if refill {
            self.refill();
        } else if fail {
            self.consume();
        }

        self.remaining
    }

    pub fn refill(&mut self) {
        self.remaining = self.max;
    }

    /// Spend one attempt.  Returns `false` (and does nothing) when empty.
    pub fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// True while no attempt has been spent since the last refill.
    pub fn is_full(&self) -> bool {
        self.remaining == self.max
    }
}
