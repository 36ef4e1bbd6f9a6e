//! One-shot lockout countdown.
//!
//! ```text
//!  IDLE ──[start↑]──▶ COUNTING ──[remaining reaches 0]──▶ IDLE (+expired pulse)
//! ```
//!
//! While counting, a prescaler divides the tick down to 1 Hz; each second
//! decrements `remaining_secs`.  The prescaler restarts on entry so the
//! lockout always lasts exactly `duration × tick_hz` ticks.

use log::info;

use crate::drivers::debounce::EdgeDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutState {
    Idle,
    Counting,
}

/// Registered outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockoutStatus {
    pub locked: bool,
    pub remaining_secs: u8,
    /// One-tick pulse on the Counting → Idle transition.
    pub expired: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutTimer {
    state: LockoutState,
    remaining_secs: u8,
    duration_secs: u8,
    prescaler: u32,
    ticks_per_second: u32,
    expired: bool,
    start: EdgeDetector,
}

impl LockoutTimer {
    pub fn new(duration_secs: u8, ticks_per_second: u32) -> Self {
        Self {
            state: LockoutState::Idle,
            remaining_secs: 0,
            duration_secs,
            prescaler: 0,
            ticks_per_second: ticks_per_second.max(1),
            expired: false,
            start: EdgeDetector::new(),
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, start: bool, reset: bool) -> LockoutStatus {
        let start = self.start.rising(start);
        self.expired = false;

        if reset {
            *self = Self::new(self.duration_secs, self.ticks_per_second);
            return self.status();
        }

        match self.state {
            LockoutState::Idle => {
                if start {
                    self.state = LockoutState::Counting;
                    self.remaining_secs = self.duration_secs;
                    self.prescaler = 0;
                    info!("LOCKOUT: armed for {}s", self.duration_secs);
                }
            }
            LockoutState::Counting => {
                self.prescaler += 1;
                if self.prescaler >= self.ticks_per_second {
                    self.prescaler = 0;
                    self.remaining_secs = self.remaining_secs.saturating_sub(1);
                    if self.remaining_secs == 0 {
                        self.state = LockoutState::Idle;
                        self.expired = true;
                        info!("LOCKOUT: penalty served");
                    }
                }
            }
        }

        self.status()
    }

    pub fn status(&self) -> LockoutStatus {
        LockoutStatus {
            locked: self.state == LockoutState::Counting,
            remaining_secs: self.remaining_secs,
            expired: self.expired,
        }
    }

    pub fn state(&self) -> LockoutState {
        self.state
    }
}
