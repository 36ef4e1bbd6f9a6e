//! LED bus patterns shared by the applications and the mode arbiter.
//!
//! ## Patterns
//!
//! | Pattern      | Description                               | Rate          |
//! |-------------|-------------------------------------------|---------------|
//! | Lives bar    | Contiguous run of lit LEDs, one per life  | -             |
//! | Chase        | Every third LED lit, shifting one place   | 0.15 s/phase  |
//! | All on       | Whole bus lit (grant / win)               | -             |

use crate::config::BoardConfig;

/// Number of phases in the loading chase.
pub const CHASE_PHASES: u8 = 3;

/// LED masks for each chase phase: LED `i` is lit in phase `i % 3`.
const CHASE_FRAMES: [u16; CHASE_PHASES as usize] = [0x9249, 0x2492, 0x4924];

/// A bar of `count` lit LEDs starting at bit 0, saturating at `width`.
pub fn lives_bar(count: u8, width: u8) -> u16 {
    let lit = u32::from(count.min(width).min(16));
    ((1u32 << lit) - 1) as u16
}

/// Three-phase chase played while the arbiter is loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseAnimation {
    phase: u8,
    elapsed: u32,
    phase_ticks: u32,
}

impl ChaseAnimation {
    pub fn new(phase_ticks: u32) -> Self {
        Self {
            phase: 0,
            elapsed: 0,
            phase_ticks: phase_ticks.max(1),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.ticks_for_ms(config.chase_phase_ms))
    }

    /// Jump back to the first phase.
    pub fn restart(&mut self) {
        self.phase = 0;
        self.elapsed = 0;
    }

    /// Current phase's LEDs, then advance one tick.
    pub fn step(&mut self) -> u16 {
        let leds = CHASE_FRAMES[usize::from(self.phase)];
        self.elapsed += 1;
        if self.elapsed >= self.phase_ticks {
            self.elapsed = 0;
            self.phase = (self.phase + 1) % CHASE_PHASES;
        }
        leds
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// LEDs lit in a given phase.  Out-of-range phases are dark.
    pub fn frame(phase: u8) -> u16 {
        CHASE_FRAMES.get(usize::from(phase)).copied().unwrap_or(0)
    }
}
