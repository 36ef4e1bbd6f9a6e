//! Game timebase: 1 Hz enable pulse and the display scan / seed counter.
//!
//! Both counters free-run from power-up and have exactly one writer.  Their
//! outputs are registered, so readers see the previous tick's values.

use crate::config::BoardConfig;
use crate::drivers::seven_seg::ScanCounter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimebaseOutputs {
    /// One-tick pulse once per second.
    pub one_hz: bool,
    /// Scan counter value, doubling as the random seed.
    pub seed: u32,
    /// Digit position currently selected by the scan.
    pub digit: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTimebase {
    prescaler: u32,
    ticks_per_second: u32,
    one_hz: bool,
    scan: ScanCounter,
}

impl GameTimebase {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            prescaler: 0,
            ticks_per_second: config.ticks_per_second(),
            one_hz: false,
            scan: ScanCounter::new(config.scan_counter_bits),
        }
    }

    pub fn step(&mut self, reset: bool) -> TimebaseOutputs {
        self.scan.step(reset);
        if reset {
            self.prescaler = 0;
            self.one_hz = false;
            return self.outputs();
        }

        self.prescaler += 1;
        self.one_hz = self.prescaler >= self.ticks_per_second;
        if self.one_hz {
            self.prescaler = 0;
        }
        self.outputs()
    }

    pub fn outputs(&self) -> TimebaseOutputs {
        TimebaseOutputs {
            one_hz: self.one_hz,
            seed: self.scan.value(),
            digit: self.scan.position(),
        }
    }
}
