//! Mode arbiter: runs both applications every tick and decides whose
//! outputs reach the board.
//!
//! ```text
//!              ┌──────────────────────┐
//!  raw ───────▶│ SecurityController   │── outputs ──┐
//!     │        └──────────────────────┘             │
//!     │        ┌──────────────────────┐             ▼
//!     ├───────▶│ GameConsole          │── outputs ─▶ MUX ─▶ LEDs / display
//!     │        └──────────────────────┘             ▲
//!     └─ sw4 ─▶ debounce ─▶ [changed] ─▶ LOADING ───┘ (chase + blank)
//! ```
//!
//! | Transition | LEDs                 | Display           |
//! |------------|----------------------|-------------------|
//! | Stable     | selected application | selected app      |
//! | Loading    | three-phase chase    | all digits off    |

use log::info;

use crate::board::{PanelInputs, PanelOutputs};
use crate::config::BoardConfig;
use crate::drivers::debounce::{DebounceFilter, EdgeDetector};
use crate::drivers::led_patterns::ChaseAnimation;
use crate::drivers::seven_seg::DisplayBus;
use crate::game::GameConsole;
use crate::security::SecurityController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    Security,
    Game,
}

impl AppMode {
    pub fn from_select(select: bool) -> Self {
        if select { Self::Game } else { Self::Security }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stable,
    Loading,
}

/// Registered arbiter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeContext {
    pub mode: AppMode,
    /// `Loading` exactly on the ticks whose output was the overlay.
    pub transition: Transition,
    pub loading_ticks_left: u32,
    /// Chase phase shown this tick; 0 while stable.
    pub animation_phase: u8,
}

pub struct ModeArbiter {
    security: SecurityController,
    game: GameConsole,
    select: DebounceFilter,
    select_edge: EdgeDetector,
    chase: ChaseAnimation,
    loading_ticks: u32,
    loading_left: u32,
    /// Chase phase driven on the last tick, if the overlay was shown.
    overlay: Option<u8>,
}

impl ModeArbiter {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            security: SecurityController::new(config),
            game: GameConsole::new(config),
            select: DebounceFilter::new(config.debounce_ticks()),
            select_edge: EdgeDetector::new(),
            chase: ChaseAnimation::from_config(config),
            loading_ticks: config.ticks_for_ms(config.loading_ms),
            loading_left: 0,
            overlay: None,
        }
    }

    /// Advance the whole board one tick.
    pub fn step(&mut self, raw: &PanelInputs) -> PanelOutputs {
        let reset = raw.reset;
        let selected = self.select.stable();
        let changed = self.select_edge.changed(selected);

        self.select.step(raw.mode_select(), reset);
        let security = self.security.step(raw, reset);
        let game = self.game.step(raw, reset);
        self.overlay = None;

        if reset {
            self.select_edge.reset();
            self.loading_left = 0;
            self.chase.restart();
            return security;
        }

        if changed {
            self.loading_left = self.loading_ticks;
            self.chase.restart();
            info!("MODE: switching to {:?}", AppMode::from_select(selected));
        }

        if self.loading_left > 0 {
            self.loading_left -= 1;
            self.overlay = Some(self.chase.phase());
            return PanelOutputs {
                leds: self.chase.step(),
                display: DisplayBus::BLANK,
            };
        }

        match AppMode::from_select(selected) {
            AppMode::Security => security,
            AppMode::Game => game,
        }
    }

    pub fn context(&self) -> ModeContext {
        ModeContext {
            mode: AppMode::from_select(self.select_edge.previous()),
            transition: if self.overlay.is_some() {
                Transition::Loading
            } else {
                Transition::Stable
            },
            loading_ticks_left: self.loading_left,
            animation_phase: self.overlay.unwrap_or(0),
        }
    }

    pub fn security(&self) -> &SecurityController {
        &self.security
    }

    pub fn game(&self) -> &GameConsole {
        &self.game
    }
}
