//! Board-level I/O snapshots exchanged once per tick.
//!
//! [`PanelInputs`] is the raw, undebounced state of every button and switch
//! sampled for one tick.  [`PanelOutputs`] is what the logic drives onto the
//! LED and seven-segment busses for that tick.

use crate::drivers::seven_seg::DisplayBus;
use crate::pins;

/// Raw input sample for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelInputs {
    pub validate: bool,
    pub config: bool,
    /// Global reset.  Acts immediately and is never debounced.
    pub reset: bool,
    pub spare: bool,
    /// Five slide switches, bit 0 = switch 0.
    pub switches: u8,
}

impl PanelInputs {
    /// The four code/guess switches.
    pub fn code(&self) -> u8 {
        self.switches & pins::SW_CODE_MASK
    }

    /// Application select switch.
    pub fn mode_select(&self) -> bool {
        self.switches & (1 << pins::SW_MODE_BIT) != 0
    }

    /// Build a sample from button and switch groups in pin order.
    pub fn from_groups(
        buttons: [bool; pins::BUTTON_COUNT],
        switches: [bool; pins::SWITCH_COUNT],
    ) -> Self {
        let switches = switches
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, on)| acc | (u8::from(*on) << i));
        Self {
            validate: buttons[pins::BTN_VALIDATE],
            config: buttons[pins::BTN_CONFIG],
            reset: buttons[pins::BTN_RESET],
            spare: buttons[pins::BTN_SPARE],
            switches,
        }
    }
}

/// Everything the logic drives for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOutputs {
    pub leds: u16,
    pub display: DisplayBus,
}

impl PanelOutputs {
    /// All LEDs dark and the display blank: the power-up output.
    pub const OFF: Self = Self {
        leds: 0,
        display: DisplayBus::BLANK,
    };
}

impl Default for PanelOutputs {
    fn default() -> Self {
        Self::OFF
    }
}
