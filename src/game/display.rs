//! Game display driver: a pure lookup from round state to the glyph shown
//! at one digit position.
//!
//! | State            | Frame (left to right) |
//! |------------------|-----------------------|
//! | Init             | blank                 |
//! | AwaitingGuess    | `  nn` switch value   |
//! | Validating       | `  nn` switch value   |
//! | HintUp           | `SUbE`                |
//! | HintDown         | `bAJA`                |
//! | Win              | `  OH`                |
//! | ShowFail         | `FAIL`                |
//! | Penalty          | `  nn` countdown      |
//!
//! Unknown state codes and positions past the last digit are blank.

use crate::drivers::seven_seg::{Glyph, two_digits};
use crate::fsm::game::GameState;
use crate::pins::{DIGIT_COUNT, SW_CODE_MASK};

// Index 0 is the rightmost digit.
const SUBE: [Glyph; DIGIT_COUNT] = [Glyph::E, Glyph::B, Glyph::U, Glyph::S];
const BAJA: [Glyph; DIGIT_COUNT] = [Glyph::A, Glyph::J, Glyph::A, Glyph::B];
const OH: [Glyph; DIGIT_COUNT] = [Glyph::H, Glyph::O, Glyph::Blank, Glyph::Blank];
const FAIL: [Glyph; DIGIT_COUNT] = [Glyph::L, Glyph::I, Glyph::A, Glyph::F];

/// Glyph for `position` given the FSM state code, the raw switch bus and
/// the penalty countdown.
pub fn render(state_code: u8, raw_switches: u8, countdown: u8, position: u8) -> Glyph {
    let Some(state) = GameState::from_code(state_code) else {
        return Glyph::Blank;
    };
    let pos = usize::from(position);
    if pos >= DIGIT_COUNT {
        return Glyph::Blank;
    }

    match state {
        GameState::Init => Glyph::Blank,
        GameState::AwaitingGuess | GameState::Validating => {
            number(raw_switches & SW_CODE_MASK, pos)
        }
        GameState::HintUp => SUBE[pos],
        GameState::HintDown => BAJA[pos],
        GameState::Win => OH[pos],
        GameState::ShowFail => FAIL[pos],
        GameState::Penalty => number(countdown, pos),
    }
}

/// Whole logical frame, for tests and frame comparison.
pub fn frame(state_code: u8, raw_switches: u8, countdown: u8) -> [Glyph; DIGIT_COUNT] {
    core::array::from_fn(|pos| render(state_code, raw_switches, countdown, pos as u8))
}

fn number(value: u8, pos: usize) -> Glyph {
    let (tens, units) = two_digits(value);
    match pos {
        0 => units,
        1 => tens,
        _ => Glyph::Blank,
    }
}
