//! Input conditioning, LED patterns, and seven-segment display primitives.

pub mod debounce;
pub mod led_patterns;
pub mod seven_seg;
