//! Fuzz target: `ModeArbiter::step`
//!
//! Every pair of bytes is one held input level: the first byte packs the
//! buttons and switches, the second is how many ticks to hold it.  Asserts
//! the bus invariants on every tick.
//!
//! cargo fuzz run fuzz_panel_inputs

#![no_main]

use libfuzzer_sys::fuzz_target;
use lockgame::arbiter::ModeArbiter;
use lockgame::board::PanelInputs;
use lockgame::config::BoardConfig;
use lockgame::pins;

fuzz_target!(|data: &[u8]| {
    let mut arbiter = ModeArbiter::new(&BoardConfig::for_tick_rate(100));

    for pair in data.chunks(2) {
        let levels = pair[0];
        let ticks = pair.get(1).copied().unwrap_or(1);
        let inputs = PanelInputs {
            validate: levels & 0x01 != 0,
            config: levels & 0x02 != 0,
            // Keep resets rare so runs get deep into the state machines.
            reset: levels & 0xE0 == 0xE0,
            spare: false,
            switches: (levels >> 2) & 0x1F,
        };

        for _ in 0..ticks {
            let out = arbiter.step(&inputs);
            let enabled = (!out.display.digits & pins::DIGIT_MASK).count_ones();
            assert!(enabled <= 1, "more than one digit enabled");
            assert_eq!(out.display.segments & !pins::SEGMENT_MASK, 0);

            let lock = arbiter.security().status();
            assert!(lock.attempts <= 3);
            assert!(!(lock.grant && lock.lockout.locked));
            assert!(arbiter.game().status().secret < 16);
        }
    }
});
