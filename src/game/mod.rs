//! Number-guessing game.
//!
//! ```text
//!  raw validate/switches ─▶ InputConditioner ─┐
//!                                              ├─▶ GameCore ─▶ state, lives, countdown
//!  GameTimebase ── one_hz, seed ───────────────┘        │
//!        └── scan position ───────────▶ display::render ◀┘
//! ```
//!
//! Like the lock, the console snapshots its children's registered outputs
//! before stepping any of them.

pub mod display;
pub mod timebase;

use crate::board::{PanelInputs, PanelOutputs};
use crate::config::BoardConfig;
use crate::drivers::debounce::InputConditioner;
use crate::drivers::led_patterns::lives_bar;
use crate::drivers::seven_seg::DisplayBus;
use crate::fsm::game::{GameCore, GameInputs, GameState, GameStatus};
use crate::pins;

use timebase::GameTimebase;

pub struct GameConsole {
    inputs: InputConditioner,
    timebase: GameTimebase,
    core: GameCore,
}

impl GameConsole {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            inputs: InputConditioner::new(config.debounce_ticks()),
            timebase: GameTimebase::new(config),
            core: GameCore::new(config),
        }
    }

    /// Advance the game one tick.
    pub fn step(&mut self, raw: &PanelInputs, reset: bool) -> PanelOutputs {
        let keys = self.inputs.outputs();
        let time = self.timebase.outputs();

        self.inputs.step(raw, reset);
        self.timebase.step(reset);
        let status = self.core.step(GameInputs {
            validate: keys.validate,
            switches: keys.code,
            seed: time.seed,
            one_hz: time.one_hz,
            reset,
        });

        let digit = self.timebase.outputs().digit;
        let glyph = display::render(status.state.code(), raw.switches, status.countdown, digit);
        PanelOutputs {
            leds: render_leds(&status, raw.code()),
            display: DisplayBus::drive(glyph, digit),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.core.status()
    }
}

/// LED bus for the game.  `raw_code` is echoed undebounced.
pub fn render_leds(status: &GameStatus, raw_code: u8) -> u16 {
    match status.state {
        GameState::Win => pins::LED_ALL,
        state if state.is_guessing() => {
            let bar = lives_bar(status.lives, pins::LED_GAME_LIVES_WIDTH);
            (bar << pins::LED_GAME_LIVES_SHIFT) | (u16::from(raw_code) & pins::LED_CODE_MASK)
        }
        _ => 0,
    }
}
