//! Outbound application events.
//!
//! The [`PanelService`](super::service::PanelService) emits these through
//! the [`EventSink`](super::ports::EventSink) port by diffing registered
//! status snapshots between ticks.

use serde::Serialize;

use crate::arbiter::{AppMode, Transition};
use crate::fsm::game::GameState;
use crate::fsm::session::SessionState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The service has started (carries the initial mode).
    Started(AppMode),
    /// The mode switch settled on a new application; loading begins.
    ModeChanged { to: AppMode },
    /// The loading overlay ended and `mode` now owns the outputs.
    LoadingFinished { mode: AppMode },

    // -- Security lock --
    CredentialProgrammed,
    AccessGranted,
    AccessDenied,
    LockoutStarted { secs: u8 },
    LockoutCleared,

    // -- Guessing game --
    RoundStarted,
    HintShown { guess: u8, higher: bool, lives_left: u8 },
    RoundWon { secret: u8, lives_left: u8 },
    RoundLost { secret: u8 },
    PenaltyServed,

    /// Global reset was asserted this tick.
    Reset,

    /// Periodic snapshot.
    Telemetry(Telemetry),
}

/// A point-in-time snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Telemetry {
    pub tick: u64,
    pub mode: AppMode,
    pub transition: Transition,
    pub leds: u16,

    pub session: SessionState,
    pub attempts_left: u8,
    pub locked: bool,
    pub lockout_secs: u8,
    pub programmed: bool,

    pub game: GameState,
    pub lives: u8,
    pub countdown: u8,
}

/// Lifetime counters kept by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PanelStats {
    pub ticks: u64,
    pub resets: u32,
    pub mode_changes: u32,
    pub credentials_programmed: u32,
    pub grants: u32,
    pub denials: u32,
    pub lockouts: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
}
