//! Bus bit assignments for the controller board.
//!
//! Every renderer and adapter references this module rather than
//! hard-coding bit positions.

// ---------------------------------------------------------------------------
// Push buttons (index into the raw button group)
// ---------------------------------------------------------------------------

/// Validate a guess / confirm a credential write.
pub const BTN_VALIDATE: usize = 0;
/// Held down = configuration mode.
pub const BTN_CONFIG: usize = 1;
/// Global synchronous reset.  Not debounced.
pub const BTN_RESET: usize = 2;
/// Present on the board, unused by the logic.
pub const BTN_SPARE: usize = 3;

pub const BUTTON_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Slide switches
// ---------------------------------------------------------------------------

/// Switches 0–3 carry the 4-bit code / guess.
pub const SW_CODE_MASK: u8 = 0b0_1111;
/// Switch 4 selects the application: low = security, high = game.
pub const SW_MODE_BIT: u8 = 4;

pub const SWITCH_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// LED bus (16 bits)
// ---------------------------------------------------------------------------

pub const LED_COUNT: usize = 16;
pub const LED_ALL: u16 = 0xFFFF;

/// Both applications echo the code switches on LEDs 0–3.
pub const LED_CODE_MASK: u16 = 0x000F;

/// Security: remaining-attempts bar, LEDs 4–6.
pub const LED_SEC_LIVES_SHIFT: u32 = 4;
pub const LED_SEC_LIVES_WIDTH: u8 = 3;
/// Security: stored credential while the config button is held, LEDs 8–11.
pub const LED_SEC_DEBUG_SHIFT: u32 = 8;
pub const LED_SEC_CONFIG_MODE: u16 = 1 << 13;
pub const LED_SEC_PROGRAMMED: u16 = 1 << 14;
pub const LED_SEC_LOCKED: u16 = 1 << 15;

/// Game: lives bar on the leftmost LEDs, 11–15.
pub const LED_GAME_LIVES_SHIFT: u32 = 11;
pub const LED_GAME_LIVES_WIDTH: u8 = 5;

// ---------------------------------------------------------------------------
// Seven-segment display (active low)
// ---------------------------------------------------------------------------

/// Segment `a` is bit 0 through segment `g` at bit 6.
pub const SEGMENT_COUNT: usize = 7;
pub const SEGMENT_MASK: u8 = 0x7F;

/// Digit position 0 is the rightmost digit.
pub const DIGIT_COUNT: usize = 4;
pub const DIGIT_MASK: u8 = 0x0F;
