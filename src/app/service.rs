//! Application service, the hexagonal core.
//!
//! [`PanelService`] owns the [`ModeArbiter`] and everything below it.  It
//! exposes a hardware-agnostic per-tick API; all I/O flows through port
//! traits injected at call sites, so the whole board is testable with
//! mock adapters.
//!
//! ```text
//!  InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                │      PanelService      │
//! OutputPort ◀── │  Arbiter · Lock · Game │
//!                └────────────────────────┘
//! ```
//!
//! Events are derived by diffing the registered status of every
//! application between consecutive ticks; the tick model itself knows
//! nothing about them.

use log::info;

use crate::arbiter::{ModeArbiter, ModeContext, Transition};
use crate::board::{PanelInputs, PanelOutputs};
use crate::config::BoardConfig;
use crate::error::Result;
use crate::fsm::game::{GameState, GameStatus};
use crate::security::SecurityStatus;

use super::events::{PanelEvent, PanelStats, Telemetry};
use super::ports::{EventSink, InputPort, OutputPort};

/// Registered status of the whole board at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    mode: ModeContext,
    security: SecurityStatus,
    game: GameStatus,
}

// ───────────────────────────────────────────────────────────────
// PanelService
// ───────────────────────────────────────────────────────────────

pub struct PanelService {
    arbiter: ModeArbiter,
    previous: Snapshot,
    last_outputs: PanelOutputs,
    stats: PanelStats,
}

impl PanelService {
    pub fn new(config: &BoardConfig) -> Self {
        let arbiter = ModeArbiter::new(config);
        let previous = snapshot(&arbiter);
        Self {
            arbiter,
            previous,
            last_outputs: PanelOutputs::OFF,
            stats: PanelStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        let mode = self.arbiter.context().mode;
        sink.emit(&PanelEvent::Started(mode));
        info!("PanelService started in {:?} mode", mode);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one tick against real ports: read → step → drive → events.
    ///
    /// `io` satisfies **both** [`InputPort`] and [`OutputPort`] so a single
    /// adapter can own the whole pin bank.
    pub fn tick(
        &mut self,
        io: &mut (impl InputPort + OutputPort),
        sink: &mut impl EventSink,
    ) -> Result<PanelOutputs> {
        let inputs = io.read_inputs()?;
        let outputs = self.step_inputs(&inputs, sink);
        io.drive(&outputs)?;
        Ok(outputs)
    }

    /// Advance one tick on an already-sampled input.
    pub fn step_inputs(&mut self, inputs: &PanelInputs, sink: &mut impl EventSink) -> PanelOutputs {
        self.stats.ticks += 1;
        let outputs = self.arbiter.step(inputs);
        self.last_outputs = outputs;

        let now = snapshot(&self.arbiter);
        if inputs.reset {
            self.stats.resets += 1;
            sink.emit(&PanelEvent::Reset);
        } else {
            self.emit_changes(&now, sink);
        }
        self.previous = now;
        outputs
    }

    /// Emit the current [`Telemetry`] through `sink`.
    pub fn publish_telemetry(&self, sink: &mut impl EventSink) {
        sink.emit(&PanelEvent::Telemetry(self.telemetry()));
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn telemetry(&self) -> Telemetry {
        let now = &self.previous;
        Telemetry {
            tick: self.stats.ticks,
            mode: now.mode.mode,
            transition: now.mode.transition,
            leds: self.last_outputs.leds,
            session: now.security.session,
            attempts_left: now.security.attempts,
            locked: now.security.lockout.locked,
            lockout_secs: now.security.lockout.remaining_secs,
            programmed: now.security.credential.programmed,
            game: now.game.state,
            lives: now.game.lives,
            countdown: now.game.countdown,
        }
    }

    pub fn stats(&self) -> PanelStats {
        self.stats
    }

    /// Total ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.stats.ticks
    }

    pub fn arbiter(&self) -> &ModeArbiter {
        &self.arbiter
    }

    pub fn last_outputs(&self) -> PanelOutputs {
        self.last_outputs
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_changes(&mut self, now: &Snapshot, sink: &mut impl EventSink) {
        let prev = self.previous;

        // Mode arbiter
        if now.mode.mode != prev.mode.mode {
            self.stats.mode_changes += 1;
            sink.emit(&PanelEvent::ModeChanged { to: now.mode.mode });
        }
        if prev.mode.transition == Transition::Loading
            && now.mode.transition == Transition::Stable
        {
            sink.emit(&PanelEvent::LoadingFinished { mode: now.mode.mode });
        }

        // Security lock
        let (was, is) = (&prev.security, &now.security);
        if is.credential_written {
            self.stats.credentials_programmed += 1;
            sink.emit(&PanelEvent::CredentialProgrammed);
        }
        if is.grant && !was.grant {
            self.stats.grants += 1;
            sink.emit(&PanelEvent::AccessGranted);
        }
        if is.deny && !was.deny {
            self.stats.denials += 1;
            sink.emit(&PanelEvent::AccessDenied);
        }
        if is.lockout.locked && !was.lockout.locked {
            self.stats.lockouts += 1;
            sink.emit(&PanelEvent::LockoutStarted {
                secs: is.lockout.remaining_secs,
            });
        }
        if is.lockout.expired {
            sink.emit(&PanelEvent::LockoutCleared);
        }

        // Guessing game
        let (was, is) = (&prev.game, &now.game);
        if is.state == was.state {
            return;
        }
        match is.state {
            GameState::AwaitingGuess if was.state == GameState::Init => {
                sink.emit(&PanelEvent::RoundStarted);
            }
            GameState::HintUp | GameState::HintDown => {
                sink.emit(&PanelEvent::HintShown {
                    guess: is.guess,
                    higher: is.state == GameState::HintUp,
                    lives_left: is.lives,
                });
            }
            GameState::Win => {
                self.stats.rounds_won += 1;
                sink.emit(&PanelEvent::RoundWon {
                    secret: is.secret,
                    lives_left: is.lives,
                });
            }
            GameState::ShowFail => {
                self.stats.rounds_lost += 1;
                sink.emit(&PanelEvent::RoundLost { secret: is.secret });
            }
            GameState::Init if was.state == GameState::Penalty => {
                sink.emit(&PanelEvent::PenaltyServed);
            }
            _ => {}
        }
    }
}

fn snapshot(arbiter: &ModeArbiter) -> Snapshot {
    Snapshot {
        mode: arbiter.context(),
        security: arbiter.security().status(),
        game: arbiter.game().status(),
    }
}
