//! Hardware adapter: bridges board pins to the domain port traits.
//!
//! [`PinBank`] owns every GPIO the controller uses, exposing them through
//! [`InputPort`] and [`OutputPort`].  It is written against the
//! `embedded-hal` 1.0 digital traits, so any HAL whose pins erase to a
//! single type per direction can back it.
//!
//! | Group          | Count | Direction | Level convention              |
//! |----------------|-------|-----------|-------------------------------|
//! | Buttons        | 4     | in        | high = pressed                |
//! | Switches       | 5     | in        | high = on                     |
//! | LEDs           | 16    | out       | high = lit                    |
//! | Segments a..g  | 7     | out       | low = lit (bus value as-is)   |
//! | Digit selects  | 4     | out       | low = enabled (bus value)     |

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::app::ports::{InputPort, OutputPort};
use crate::board::{PanelInputs, PanelOutputs};
use crate::error::{PinFault, Result};
use crate::pins::{BUTTON_COUNT, DIGIT_COUNT, LED_COUNT, SEGMENT_COUNT, SWITCH_COUNT};

/// Every board pin, grouped by function.
pub struct PinBank<I, O> {
    buttons: [I; BUTTON_COUNT],
    switches: [I; SWITCH_COUNT],
    leds: [O; LED_COUNT],
    segments: [O; SEGMENT_COUNT],
    digits: [O; DIGIT_COUNT],
}

impl<I: InputPin, O: OutputPin> PinBank<I, O> {
    pub fn new(
        buttons: [I; BUTTON_COUNT],
        switches: [I; SWITCH_COUNT],
        leds: [O; LED_COUNT],
        segments: [O; SEGMENT_COUNT],
        digits: [O; DIGIT_COUNT],
    ) -> Self {
        Self {
            buttons,
            switches,
            leds,
            segments,
            digits,
        }
    }
}

/// Sample a pin group into a bool array, tagging failures with the pin index.
fn sample<I: InputPin, const N: usize>(
    pins: &mut [I; N],
    fault: fn(u8) -> PinFault,
) -> Result<[bool; N]> {
    let mut levels = [false; N];
    for (i, pin) in pins.iter_mut().enumerate() {
        levels[i] = pin.is_high().map_err(|_| fault(i as u8))?;
    }
    Ok(levels)
}

/// Drive a pin group from the low bits of `bits`.
fn write<O: OutputPin, const N: usize>(
    pins: &mut [O; N],
    bits: u16,
    fault: fn(u8) -> PinFault,
) -> Result<()> {
    for (i, pin) in pins.iter_mut().enumerate() {
        let state = PinState::from(bits & (1 << i) != 0);
        pin.set_state(state).map_err(|_| fault(i as u8))?;
    }
    Ok(())
}

// ── InputPort implementation ──────────────────────────────────

impl<I: InputPin, O: OutputPin> InputPort for PinBank<I, O> {
    fn read_inputs(&mut self) -> Result<PanelInputs> {
        let buttons = sample(&mut self.buttons, PinFault::ButtonRead)?;
        let switches = sample(&mut self.switches, PinFault::SwitchRead)?;
        Ok(PanelInputs::from_groups(buttons, switches))
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> OutputPort for PinBank<I, O> {
    fn drive(&mut self, outputs: &PanelOutputs) -> Result<()> {
        // Deselect first so the old digit never shows the new pattern.
        write(&mut self.digits, u16::from(outputs.display.digits) | 0xF, PinFault::DigitWrite)?;
        write(&mut self.segments, u16::from(outputs.display.segments), PinFault::SegmentWrite)?;
        write(&mut self.digits, u16::from(outputs.display.digits), PinFault::DigitWrite)?;
        write(&mut self.leds, outputs.leds, PinFault::LedWrite)?;
        Ok(())
    }
}
