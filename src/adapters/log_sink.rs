//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured panel events through the
//! `log` facade (console in the simulator, UART on a board).

use log::{info, warn};

use crate::app::events::PanelEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PanelEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PanelEvent) {
        match event {
            PanelEvent::Telemetry(t) => {
                info!(
                    "TELEM | tick={} | mode={:?} ({:?}) | leds=0x{:04X} | \
                     lock: {:?} attempts={} locked={} ({}s) programmed={} | \
                     game: {:?} lives={} countdown={}",
                    t.tick,
                    t.mode,
                    t.transition,
                    t.leds,
                    t.session,
                    t.attempts_left,
                    t.locked,
                    t.lockout_secs,
                    t.programmed,
                    t.game,
                    t.lives,
                    t.countdown,
                );
            }
            PanelEvent::Started(mode) => info!("START | mode={:?}", mode),
            PanelEvent::ModeChanged { to } => info!("MODE  | -> {:?}, loading", to),
            PanelEvent::LoadingFinished { mode } => info!("MODE  | {:?} ready", mode),
            PanelEvent::CredentialProgrammed => info!("LOCK  | credential programmed"),
            PanelEvent::AccessGranted => info!("LOCK  | access granted"),
            PanelEvent::AccessDenied => warn!("LOCK  | access denied"),
            PanelEvent::LockoutStarted { secs } => warn!("LOCK  | locked out for {}s", secs),
            PanelEvent::LockoutCleared => info!("LOCK  | lockout cleared"),
            PanelEvent::RoundStarted => info!("GAME  | new round"),
            PanelEvent::HintShown {
                guess,
                higher,
                lives_left,
            } => info!(
                "GAME  | guess {} -> {} ({} lives left)",
                guess,
                if *higher { "SUBE" } else { "bAJA" },
                lives_left
            ),
            PanelEvent::RoundWon { secret, lives_left } => {
                info!("GAME  | won, secret={} lives_left={}", secret, lives_left)
            }
            PanelEvent::RoundLost { secret } => warn!("GAME  | lost, secret was {}", secret),
            PanelEvent::PenaltyServed => info!("GAME  | penalty served"),
            PanelEvent::Reset => warn!("RESET | global reset"),
        }
    }
}
