//! Board configuration parameters
//!
//! All tunable timing and sizing parameters for the controller.  Durations
//! are stored in human units and converted to tick counts at the configured
//! tick rate; every component works in ticks only.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Target persistence-of-vision frame rate used to size the scan counter.
const FRAME_RATE_TARGET_HZ: u32 = 100;

/// Core board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    // --- Clock ---
    /// Tick rate in Hz (one tick = one clock period).
    pub tick_hz: u32,
    /// Width of the free-running scan counter.  The top two bits select the
    /// active digit; the whole value doubles as the game's random seed.
    pub scan_counter_bits: u8,

    // --- Inputs ---
    /// Debounce stability window (milliseconds)
    pub debounce_ms: u32,

    // --- Security lock ---
    /// Failed verifications allowed before lockout
    pub security_attempts: u8,
    /// Lockout penalty (seconds)
    pub lockout_secs: u8,
    /// How long a grant stays asserted (milliseconds)
    pub grant_hold_ms: u32,
    /// Cool-down after a denial during which verify presses are ignored (milliseconds)
    pub cooldown_ms: u32,

    // --- Guessing game ---
    /// Lives per round
    pub game_lives: u8,
    /// Hint message duration (milliseconds)
    pub hint_ms: u32,
    /// Win celebration duration (milliseconds)
    pub win_ms: u32,
    /// "FAIL" message duration before the penalty starts (milliseconds)
    pub fail_ms: u32,
    /// Penalty countdown (seconds)
    pub penalty_secs: u8,

    // --- Mode arbiter ---
    /// Loading overlay duration after a mode change (milliseconds)
    pub loading_ms: u32,
    /// Duration of one phase of the loading chase (milliseconds)
    pub chase_phase_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::for_tick_rate(100_000_000) // 100 MHz board oscillator
    }
}

impl BoardConfig {
    /// Default timings at an arbitrary tick rate.  Simulation and tests use
    /// low rates so that multi-second scenarios stay cheap to step through.
    pub fn for_tick_rate(tick_hz: u32) -> Self {
        Self {
            tick_hz,
            scan_counter_bits: scan_bits_for(tick_hz),

            debounce_ms: 5,

            security_attempts: 3,
            lockout_secs: 30,
            grant_hold_ms: 2000,
            cooldown_ms: 1000,

            game_lives: 5,
            hint_ms: 2000,
            win_ms: 2000,
            fail_ms: 2000,
            penalty_secs: 15,

            loading_ms: 1000,
            chase_phase_ms: 150,
        }
    }

    /// Convert a duration to ticks.  Never returns less than one tick.
    pub fn ticks_for_ms(&self, ms: u32) -> u32 {
        let ticks = u64::from(self.tick_hz) * u64::from(ms) / 1000;
        ticks.clamp(1, u64::from(u32::MAX)) as u32
    }

    /// Ticks per second, the prescaler limit of every 1 Hz source.
    pub fn ticks_per_second(&self) -> u32 {
        self.tick_hz.max(1)
    }

    pub fn debounce_ticks(&self) -> u32 {
        self.ticks_for_ms(self.debounce_ms)
    }

    /// Reject parameter sets the hardware model cannot represent.
    pub fn validate(&self) -> Result<()> {
        if self.tick_hz == 0 {
            return Err(Error::Config("tick_hz must be non-zero"));
        }
        if !(4..=31).contains(&self.scan_counter_bits) {
            return Err(Error::Config("scan_counter_bits must be within 4..=31"));
        }
        // One display digit each.
        if !(1..=9).contains(&self.security_attempts) {
            return Err(Error::Config("security_attempts must be within 1..=9"));
        }
        if !(1..=9).contains(&self.game_lives) {
            return Err(Error::Config("game_lives must be within 1..=9"));
        }
        // Two display digits each.
        if !(1..=99).contains(&self.lockout_secs) {
            return Err(Error::Config("lockout_secs must be within 1..=99"));
        }
        if !(1..=99).contains(&self.penalty_secs) {
            return Err(Error::Config("penalty_secs must be within 1..=99"));
        }
        if self.chase_phase_ms == 0 || self.loading_ms == 0 {
            return Err(Error::Config("loading timings must be non-zero"));
        }
        Ok(())
    }
}

/// Smallest scan width whose wrap period covers one frame at the target
/// refresh rate, but never below four bits so the seed spans `0..16`.
fn scan_bits_for(tick_hz: u32) -> u8 {
    let per_frame = (tick_hz / FRAME_RATE_TARGET_HZ).max(1);
    let bits = u32::BITS - (per_frame - 1).leading_zeros();
    bits.clamp(4, 31) as u8
}
