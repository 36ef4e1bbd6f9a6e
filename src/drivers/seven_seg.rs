//! Four-digit seven-segment display: character table, scan multiplexing,
//! and frame reconstruction.
//!
//! ```text
//!      a
//!     ───
//!  f │   │ b        bit:  g f e d c b a
//!     ─g─                 6 5 4 3 2 1 0
//!  e │   │ c
//!     ───
//!      d
//! ```
//!
//! The physical bus is active low: a `0` on a segment line lights that
//! segment, and a `0` on a digit-select line enables that digit.  Only one
//! digit is driven per tick; a full frame exists only as a composite over
//! one scan period.

use heapless::String;

use crate::pins::{DIGIT_COUNT, DIGIT_MASK, SEGMENT_MASK};

/// A renderable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    /// Decimal digit; values above 9 render blank.
    Digit(u8),
    A,
    /// Lower-case `b` (upper-case would read as `8`).
    B,
    E,
    F,
    H,
    I,
    J,
    L,
    O,
    S,
    U,
}

const DIGIT_SEGMENTS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

/// Decode preference order: where two glyphs share a pattern (0/O, 5/S)
/// the digit wins.
const DECODE_ORDER: [Glyph; 20] = [
    Glyph::Blank,
    Glyph::Digit(0),
    Glyph::Digit(1),
    Glyph::Digit(2),
    Glyph::Digit(3),
    Glyph::Digit(4),
    Glyph::Digit(5),
    Glyph::Digit(6),
    Glyph::Digit(7),
    Glyph::Digit(8),
    Glyph::Digit(9),
    Glyph::A,
    Glyph::B,
    Glyph::E,
    Glyph::F,
    Glyph::H,
    Glyph::I,
    Glyph::J,
    Glyph::L,
    Glyph::U,
];

impl Glyph {
    /// Active-high segment pattern, bit 0 = segment `a`.
    pub const fn segments(self) -> u8 {
        match self {
            Self::Blank => 0x00,
            Self::Digit(d) => {
                if d < 10 {
                    DIGIT_SEGMENTS[d as usize]
                } else {
                    0x00
                }
            }
            Self::A => 0x77,
            Self::B => 0x7C,
            Self::E => 0x79,
            Self::F => 0x71,
            Self::H => 0x76,
            Self::I => 0x30,
            Self::J => 0x1E,
            Self::L => 0x38,
            Self::O => 0x3F,
            Self::S => 0x6D,
            Self::U => 0x3E,
        }
    }

    /// Best-effort inverse of [`segments`](Self::segments).
    pub fn from_segments(pattern: u8) -> Option<Self> {
        let pattern = pattern & SEGMENT_MASK;
        DECODE_ORDER.into_iter().find(|g| g.segments() == pattern)
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Blank => ' ',
            Self::Digit(d) if d < 10 => char::from(b'0' + d),
            Self::Digit(_) => ' ',
            Self::A => 'A',
            Self::B => 'b',
            Self::E => 'E',
            Self::F => 'F',
            Self::H => 'H',
            Self::I => 'I',
            Self::J => 'J',
            Self::L => 'L',
            Self::O => 'O',
            Self::S => 'S',
            Self::U => 'U',
        }
    }
}

/// Split a two-digit value into `(tens, units)` glyphs.
pub fn two_digits(value: u8) -> (Glyph, Glyph) {
    let value = value % 100;
    (Glyph::Digit(value / 10), Glyph::Digit(value % 10))
}

// ---------------------------------------------------------------------------
// Physical bus
// ---------------------------------------------------------------------------

/// One tick's worth of segment and digit-select lines (active low).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBus {
    pub segments: u8,
    pub digits: u8,
}

impl DisplayBus {
    /// Every digit disabled, every segment dark.
    pub const BLANK: Self = Self {
        segments: SEGMENT_MASK,
        digits: DIGIT_MASK,
    };

    /// Drive `glyph` on digit `position`.  Out-of-range positions blank.
    pub fn drive(glyph: Glyph, position: u8) -> Self {
        if usize::from(position) >= DIGIT_COUNT {
            return Self::BLANK;
        }
        Self {
            segments: !glyph.segments() & SEGMENT_MASK,
            digits: !(1u8 << position) & DIGIT_MASK,
        }
    }

    /// The single enabled digit, if exactly one is enabled.
    pub fn active_position(&self) -> Option<u8> {
        let enabled = !self.digits & DIGIT_MASK;
        if enabled.count_ones() == 1 {
            Some(enabled.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Active-high segment pattern currently on the bus.
    pub fn pattern(&self) -> u8 {
        !self.segments & SEGMENT_MASK
    }

    pub fn is_blank(&self) -> bool {
        self.digits & DIGIT_MASK == DIGIT_MASK
    }
}

/// Drive the glyph for the scan position out of a logical frame.
/// `frame[0]` is the rightmost digit.
pub fn multiplex(frame: &[Glyph; DIGIT_COUNT], position: u8) -> DisplayBus {
    match frame.get(usize::from(position)) {
        Some(glyph) => DisplayBus::drive(*glyph, position),
        None => DisplayBus::BLANK,
    }
}

// ---------------------------------------------------------------------------
// Scan counter
// ---------------------------------------------------------------------------

/// Free-running wrapping counter whose top two bits select the active digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCounter {
    value: u32,
    bits: u8,
}

impl ScanCounter {
    pub fn new(bits: u8) -> Self {
        Self {
            value: 0,
            bits: bits.clamp(2, 31),
        }
    }

    pub fn step(&mut self, reset: bool) -> u32 {
        self.value = if reset {
            0
        } else {
            self.value.wrapping_add(1) & self.mask()
        };
        self.value
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Digit position selected by the two most significant bits.
    pub fn position(&self) -> u8 {
        ((self.value >> (self.bits - 2)) & 0b11) as u8
    }

    /// Ticks for one full four-digit scan.
    pub fn period(&self) -> u32 {
        1 << self.bits
    }

    fn mask(&self) -> u32 {
        (1u32 << self.bits) - 1
    }
}

// ---------------------------------------------------------------------------
// Persistence-of-vision capture
// ---------------------------------------------------------------------------

/// Rebuilds the visible frame from the multiplexed bus, the way an eye does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCapture {
    patterns: [u8; DIGIT_COUNT],
    seen: u8,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whatever digit the bus is driving this tick.
    pub fn observe(&mut self, bus: DisplayBus) {
        if let Some(pos) = bus.active_position() {
            self.patterns[usize::from(pos)] = bus.pattern();
            self.seen |= 1 << pos;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True once every digit has been driven since the last clear.
    pub fn complete(&self) -> bool {
        self.seen == DIGIT_MASK
    }

    /// Compare against a logical frame (index 0 = rightmost digit).
    pub fn matches(&self, frame: &[Glyph; DIGIT_COUNT]) -> bool {
        self.patterns
            .iter()
            .zip(frame.iter())
            .all(|(p, g)| *p == g.segments())
    }

    /// Left-to-right text.  Undecodable patterns show as `?`.
    pub fn text(&self) -> String<DIGIT_COUNT> {
        let mut text = String::new();
        for pattern in self.patterns.iter().rev() {
            let c = Glyph::from_segments(*pattern).map_or('?', Glyph::as_char);
            if text.push(c).is_err() {
                break;
            }
        }
        text
    }
}
