//! Full-service runs through real adapters: the `embedded-hal` pin bank
//! over mock pins, and the stimulus-script panel.

use lockgame::adapters::hardware::PinBank;
use lockgame::adapters::script::{ScriptedPanel, Stimulus};
use lockgame::app::events::PanelEvent;
use lockgame::app::ports::InputPort;
use lockgame::app::service::PanelService;
use lockgame::config::BoardConfig;
use lockgame::error::{Error, PinFault};
use lockgame::pins;

use crate::mock_hw::{MockPin, TICK_HZ, pin_group};

/// Test-side handles onto the same pins the bank owns.
struct Board {
    buttons: [MockPin; pins::BUTTON_COUNT],
    switches: [MockPin; pins::SWITCH_COUNT],
    leds: [MockPin; pins::LED_COUNT],
    digits: [MockPin; pins::DIGIT_COUNT],
}

impl Board {
    fn led_bus(&self) -> u16 {
        self.leds
            .iter()
            .enumerate()
            .fold(0, |acc, (i, pin)| acc | (u16::from(pin.is_set()) << i))
    }

    fn enabled_digits(&self) -> usize {
        self.digits.iter().filter(|pin| !pin.is_set()).count()
    }
}

fn wire() -> (Board, PinBank<MockPin, MockPin>) {
    let board = Board {
        buttons: pin_group(),
        switches: pin_group(),
        leds: pin_group(),
        digits: pin_group(),
    };
    let bank = PinBank::new(
        board.buttons.clone(),
        board.switches.clone(),
        board.leds.clone(),
        pin_group(),
        board.digits.clone(),
    );
    (board, bank)
}

fn service() -> PanelService {
    PanelService::new(&BoardConfig::for_tick_rate(TICK_HZ))
}

// ── Pin bank ──────────────────────────────────────────────────

#[test]
fn pin_bank_samples_buttons_and_switches() {
    let (board, mut bank) = wire();
    board.buttons[pins::BTN_VALIDATE].set(true);
    board.switches[0].set(true);
    board.switches[2].set(true);
    board.switches[4].set(true);

    let inputs = bank.read_inputs().expect("pins readable");
    assert!(inputs.validate);
    assert!(!inputs.config);
    assert_eq!(inputs.code(), 0b0101);
    assert!(inputs.mode_select());
}

#[test]
fn idle_board_lights_attempts_bar_and_scans_one_digit() {
    let (board, mut bank) = wire();
    let mut svc = service();
    let mut events: Vec<PanelEvent> = Vec::new();

    for _ in 0..40 {
        svc.tick(&mut bank, &mut events).expect("tick");
        assert_eq!(board.enabled_digits(), 1);
    }
    assert_eq!(board.led_bus(), 0x0070);
}

#[test]
fn validate_button_on_pins_grants_unprogrammed_lock() {
    let (board, mut bank) = wire();
    let mut svc = service();
    let mut events: Vec<PanelEvent> = Vec::new();

    board.buttons[pins::BTN_VALIDATE].set(true);
    for _ in 0..10 {
        svc.tick(&mut bank, &mut events).expect("tick");
    }
    board.buttons[pins::BTN_VALIDATE].set(false);
    for _ in 0..10 {
        svc.tick(&mut bank, &mut events).expect("tick");
    }

    assert!(events.contains(&PanelEvent::AccessGranted));
    assert_eq!(board.led_bus(), pins::LED_ALL);
}

#[test]
fn broken_button_is_reported_with_its_index() {
    let (board, mut bank) = wire();
    let mut svc = service();
    board.buttons[pins::BTN_RESET].break_pin();

    let err = svc.tick(&mut bank, &mut Vec::<PanelEvent>::new()).unwrap_err();
    assert_eq!(err, Error::Pin(PinFault::ButtonRead(pins::BTN_RESET as u8)));
    assert_eq!(svc.tick_count(), 0);
}

#[test]
fn broken_led_is_reported_after_the_step() {
    let (board, mut bank) = wire();
    let mut svc = service();
    board.leds[3].break_pin();

    let err = svc.tick(&mut bank, &mut Vec::<PanelEvent>::new()).unwrap_err();
    assert_eq!(err, Error::Pin(PinFault::LedWrite(3)));
    assert_eq!(svc.tick_count(), 1);
}

// ── Scripted panel ────────────────────────────────────────────

const PROGRAM_AND_UNLOCK: &str = r#"{ "steps": [
    { "label": "hold config", "hold_ms": 100, "config": true, "switches": 10 },
    { "label": "write", "hold_ms": 100, "config": true, "validate": true, "switches": 10 },
    { "hold_ms": 100, "config": true, "switches": 10 },
    { "hold_ms": 100, "switches": 10 },
    { "label": "unlock", "hold_ms": 100, "validate": true, "switches": 10 },
    { "label": "granted", "hold_ms": 300, "switches": 10 }
] }"#;

#[test]
fn script_programs_then_unlocks() {
    let config = BoardConfig::for_tick_rate(TICK_HZ);
    let stimulus = Stimulus::from_json(PROGRAM_AND_UNLOCK).expect("valid script");
    let mut panel = ScriptedPanel::new(stimulus, &config).expect("panel");
    let mut svc = PanelService::new(&config);
    let mut events: Vec<PanelEvent> = Vec::new();
    svc.start(&mut events);

    let mut reports = Vec::new();
    while !panel.is_finished() {
        svc.tick(&mut panel, &mut events).expect("tick");
        reports.extend(panel.take_report());
    }

    assert_eq!(reports.len(), 6);
    assert_eq!(svc.tick_count(), panel.total_ticks());

    let granted = &reports[5];
    assert_eq!(granted.label.as_deref(), Some("granted"));
    assert_eq!(granted.ticks, 30);
    assert_eq!(granted.leds, pins::LED_ALL);
    assert_eq!(granted.frame.as_str(), "   3");

    let stats = svc.stats();
    assert_eq!(stats.credentials_programmed, 1);
    assert_eq!(stats.grants, 1);
    assert_eq!(stats.denials, 0);
}

#[test]
fn reading_past_the_script_is_an_error() {
    let config = BoardConfig::for_tick_rate(TICK_HZ);
    let stimulus =
        Stimulus::from_json(r#"{ "steps": [{ "hold_ms": 20 }] }"#).expect("valid script");
    let mut panel = ScriptedPanel::new(stimulus, &config).expect("panel");
    let mut svc = PanelService::new(&config);

    svc.tick(&mut panel, &mut Vec::<PanelEvent>::new()).expect("tick 1");
    svc.tick(&mut panel, &mut Vec::<PanelEvent>::new()).expect("tick 2");
    assert!(panel.is_finished());
    assert_eq!(
        svc.tick(&mut panel, &mut Vec::<PanelEvent>::new()).unwrap_err(),
        Error::Script("script exhausted")
    );
}

#[test]
fn telemetry_reflects_the_last_tick() {
    let (_board, mut bank) = wire();
    let mut svc = service();
    let mut events: Vec<PanelEvent> = Vec::new();
    for _ in 0..5 {
        svc.tick(&mut bank, &mut events).expect("tick");
    }
    svc.publish_telemetry(&mut events);

    let Some(PanelEvent::Telemetry(t)) = events.last() else {
        panic!("telemetry not published");
    };
    assert_eq!(t.tick, 5);
    assert_eq!(t.attempts_left, 3);
    assert_eq!(t.leds, 0x0070);
    assert!(!t.locked);
}
