//! PIN-code security lock.
//!
//! ```text
//!  raw buttons/switches ─▶ InputConditioner
//!                              │ config, validate, code
//!            ┌─────────────────┼──────────────────────┐
//!            ▼                 ▼                      ▼
//!     CredentialStore   VerificationSession ◀── LockoutTimer.locked
//!            │ code            │ grant / deny          ▲ start
//!            └───────▶ compare │                       │
//!                              ▼                       │
//!                        AttemptBudget ──[exhausted↑]──┘
//!                              ▲
//!                   refill on grant or lockout expiry
//! ```
//!
//! Every arrow carries a value registered on the previous tick: the
//! controller snapshots all children first, then steps each child with
//! that snapshot, so no child ever sees a sibling's same-tick update.

pub mod budget;
pub mod credential;
pub mod display;
pub mod lockout;

use crate::board::{PanelInputs, PanelOutputs};
use crate::config::BoardConfig;
use crate::drivers::debounce::{EdgeDetector, InputConditioner};
use crate::drivers::led_patterns::lives_bar;
use crate::fsm::session::{SessionState, VerificationSession, VerifyInputs};
use crate::pins;

use budget::AttemptBudget;
use credential::{Credential, CredentialStore};
use display::SecurityDisplayMux;
use lockout::{LockoutStatus, LockoutTimer};

/// Registered status of the whole lock, for rendering and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityStatus {
    pub credential: Credential,
    pub attempts: u8,
    pub lockout: LockoutStatus,
    pub session: SessionState,
    pub grant: bool,
    pub deny: bool,
    pub config_mode: bool,
    /// One-tick pulse after a credential write was accepted.
    pub credential_written: bool,
}

pub struct SecurityController {
    inputs: InputConditioner,
    credential: CredentialStore,
    budget: AttemptBudget,
    lockout: LockoutTimer,
    session: VerificationSession,
    display: SecurityDisplayMux,
    exhausted: EdgeDetector,
    written: bool,
}

impl SecurityController {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            inputs: InputConditioner::new(config.debounce_ticks()),
            credential: CredentialStore::new(),
            budget: AttemptBudget::new(config.security_attempts),
            lockout: LockoutTimer::new(config.lockout_secs, config.ticks_per_second()),
            session: VerificationSession::new(config),
            display: SecurityDisplayMux::new(config.scan_counter_bits),
            exhausted: EdgeDetector::new(),
            written: false,
        }
    }

    /// Advance the lock one tick.
    pub fn step(&mut self, raw: &PanelInputs, reset: bool) -> PanelOutputs {
        // Registered values from the previous tick.
        let keys = self.inputs.outputs();
        let stored = self.credential.read();
        let verdict = self.session.outputs();
        let lock = self.lockout.status();
        let exhausted = self.budget.exhausted();

        // Coordination, in priority order.
        let start_lockout = self.exhausted.rising(exhausted);
        let refill = lock.expired || verdict.grant;

        self.inputs.step(raw, reset);
        self.written = self.credential.step(keys.config, keys.validate, keys.code, reset);
        self.budget.step(refill, verdict.deny, reset);
        self.lockout.step(start_lockout, reset);
        self.session.step(VerifyInputs {
            // In configuration mode the validate button confirms writes only.
            verify: keys.validate,
            suppressed: keys.config,
            locked: lock.locked,
            guess: keys.code,
            credential: stored.code,
            reset,
        });
        if reset {
            self.exhausted.reset();
        }

        let status = self.status();
        let display = self.display.step(
            status.lockout.locked,
            status.lockout.remaining_secs,
            status.attempts,
            reset,
        );
        PanelOutputs {
            leds: render_leds(&status, raw.code()),
            display,
        }
    }

    pub fn status(&self) -> SecurityStatus {
        let verdict = self.session.outputs();
        SecurityStatus {
            credential: self.credential.read(),
            attempts: self.budget.remaining(),
            lockout: self.lockout.status(),
            session: verdict.state,
            grant: verdict.grant,
            deny: verdict.deny,
            config_mode: self.inputs.outputs().config,
            credential_written: self.written,
        }
    }
}

/// LED bus for the lock.  `raw_code` is echoed undebounced.
pub fn render_leds(status: &SecurityStatus, raw_code: u8) -> u16 {
    if status.grant {
        return pins::LED_ALL;
    }

    let mut leds = u16::from(raw_code) & pins::LED_CODE_MASK;
    leds |= lives_bar(status.attempts, pins::LED_SEC_LIVES_WIDTH) << pins::LED_SEC_LIVES_SHIFT;
    if status.lockout.locked {
        leds |= pins::LED_SEC_LOCKED;
    }
    if status.credential.programmed {
        leds |= pins::LED_SEC_PROGRAMMED;
    }
    if status.config_mode {
        leds |= pins::LED_SEC_CONFIG_MODE;
        // Debug view of the stored secret while the config button is held.
        leds |= u16::from(status.credential.code) << pins::LED_SEC_DEBUG_SHIFT;
    }
    leds
}
