//! Synchronous debounce filter and edge detection for raw board inputs.
//!
//! ## Filter
//!
//! Each raw input first passes a two-stage synchroniser.  A counter then
//! runs while the synchronised value disagrees with the stable output and
//! clears the moment they agree again.  Only when the disagreement has
//! lasted `threshold` consecutive ticks does the stable output flip.
//!
//! | Raw input behaviour                     | Stable output        |
//! |----------------------------------------|----------------------|
//! | Glitch shorter than threshold          | unchanged            |
//! | New level held >= threshold (+2 sync)  | adopts the new level |
//! | Reset asserted                         | false, immediately   |
//!
//! ## Edges
//!
//! [`EdgeDetector`] keeps the previous tick's value of a signal so owners
//! can turn levels into one-tick pulses.

use crate::board::PanelInputs;

/// Registered previous value of a boolean signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { previous: false }
    }

    /// Register `now` and report a false → true transition.
    pub fn rising(&mut self, now: bool) -> bool {
        let edge = now && !self.previous;
        self.previous = now;
        edge
    }

    /// Register `now` and report any transition.
    pub fn changed(&mut self, now: bool) -> bool {
        let edge = now != self.previous;
        self.previous = now;
        edge
    }

    /// Value registered on the previous tick.
    pub fn previous(&self) -> bool {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = false;
    }
}

/// Stability-window debounce filter for one raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFilter {
    sync: [bool; 2],
    counter: u32,
    stable: bool,
    threshold: u32,
}

impl DebounceFilter {
    /// `threshold` is the number of consecutive disagreeing ticks required
    /// to flip the output.  Clamped to at least one.
    pub fn new(threshold: u32) -> Self {
        Self {
            sync: [false; 2],
            counter: 0,
            stable: false,
            threshold: threshold.max(1),
        }
    }

    /// Advance one tick.  Returns the (registered) stable output.
    pub fn step(&mut self, raw: bool, reset: bool) -> bool {
        if reset {
            self.sync = [false; 2];
            self.counter = 0;
            self.stable = false;
            return false;
        }

        let synced = self.sync[1];
        self.sync = [raw, self.sync[0]];

        if synced == self.stable {
            self.counter = 0;
        } else {
            self.counter += 1;
            if self.counter >= self.threshold {
                self.stable = synced;
                self.counter = 0;
            }
        }

        self.stable
    }

    pub fn stable(&self) -> bool {
        self.stable
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

/// Debounced view of the inputs one application consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionedInputs {
    pub validate: bool,
    pub config: bool,
    /// Four debounced code switches.
    pub code: u8,
}

/// One debounce filter per button/switch an application reads.
#[derive(Debug, Clone)]
pub struct InputConditioner {
    validate: DebounceFilter,
    config: DebounceFilter,
    code: [DebounceFilter; 4],
}

impl InputConditioner {
    pub fn new(threshold: u32) -> Self {
        let filter = DebounceFilter::new(threshold);
        Self {
            validate: filter,
            config: filter,
            code: [filter; 4],
        }
    }

    /// Stable values registered on the previous tick.
    pub fn outputs(&self) -> ConditionedInputs {
        let code = self
            .code
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, f)| acc | (u8::from(f.stable()) << bit));
        ConditionedInputs {
            validate: self.validate.stable(),
            config: self.config.stable(),
            code,
        }
    }

    /// Advance every filter one tick and return the new stable values.
    pub fn step(&mut self, raw: &PanelInputs, reset: bool) -> ConditionedInputs {
        self.validate.step(raw.validate, reset);
        self.config.step(raw.config, reset);
        let code = raw.code();
        for (bit, filter) in self.code.iter_mut().enumerate() {
            filter.step(code & (1 << bit) != 0, reset);
        }
        self.outputs()
    }
}
