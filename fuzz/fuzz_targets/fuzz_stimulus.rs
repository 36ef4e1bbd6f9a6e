//! Fuzz target: `Stimulus::from_json` and replay
//!
//! Arbitrary text must either be rejected with a typed error or replay to
//! the end without a tick failing.
//!
//! cargo fuzz run fuzz_stimulus

#![no_main]

use libfuzzer_sys::fuzz_target;
use lockgame::adapters::script::{ScriptedPanel, Stimulus};
use lockgame::app::events::PanelEvent;
use lockgame::app::service::PanelService;
use lockgame::config::BoardConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(stimulus) = Stimulus::from_json(text) else {
        return;
    };

    let config = BoardConfig::for_tick_rate(100);
    let Ok(mut panel) = ScriptedPanel::new(stimulus, &config) else {
        return;
    };
    // Bound the run so huge hold times don't time the fuzzer out.
    if panel.total_ticks() > 100_000 {
        return;
    }

    let mut service = PanelService::new(&config);
    let mut events: Vec<PanelEvent> = Vec::new();
    while !panel.is_finished() {
        service.tick(&mut panel, &mut events).expect("scripted tick");
    }
    assert_eq!(service.tick_count(), panel.total_ticks());
});
