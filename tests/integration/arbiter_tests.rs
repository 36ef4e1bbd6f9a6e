//! Mode switching between the lock and the game.

use lockgame::app::events::PanelEvent;
use lockgame::arbiter::{AppMode, Transition};
use lockgame::board::PanelInputs;
use lockgame::drivers::led_patterns::{CHASE_PHASES, ChaseAnimation};
use lockgame::fsm::game::GameState;

use crate::mock_hw::{Bench, game, lock};

fn is_chase_frame(leds: u16) -> bool {
    (0..CHASE_PHASES).any(|phase| ChaseAnimation::frame(phase) == leds)
}

#[test]
fn mode_switch_reports_change_then_loading_done() {
    let mut b = Bench::new();
    assert_eq!(b.events[0], PanelEvent::Started(AppMode::Security));

    b.hold(game(0), 150);
    let changed = b
        .events
        .iter()
        .position(|e| *e == PanelEvent::ModeChanged { to: AppMode::Game })
        .expect("mode change reported");
    let loaded = b
        .events
        .iter()
        .position(|e| *e == PanelEvent::LoadingFinished { mode: AppMode::Game })
        .expect("loading end reported");
    assert!(changed < loaded);
    assert_eq!(b.service.stats().mode_changes, 1);
}

#[test]
fn loading_overlay_is_one_second_of_chase() {
    let mut b = Bench::new();
    b.hold(lock(0), 20);

    let mut loading = 0;
    for _ in 0..300 {
        let out = b.tick(game(0));
        if out.display.is_blank() {
            assert!(is_chase_frame(out.leds), "not a chase frame: {:#06x}", out.leds);
            loading += 1;
        }
    }
    assert_eq!(loading, 100);
}

#[test]
fn loading_finished_arrives_with_the_first_application_frame() {
    let mut b = Bench::new();
    b.hold(lock(0), 20);

    let done = PanelEvent::LoadingFinished { mode: AppMode::Game };
    let mut blank_before = 0;
    loop {
        let out = b.tick(game(0));
        if b.count(&done) == 1 {
            assert!(!out.display.is_blank(), "overlay still on the bus");
            break;
        }
        if out.display.is_blank() {
            blank_before += 1;
        }
    }
    assert_eq!(blank_before, 100);
}

#[test]
fn switching_back_plays_overlay_again() {
    let mut b = Bench::new();
    b.hold(game(0), 150);
    b.hold(lock(0), 150);
    assert_eq!(b.count(&PanelEvent::LoadingFinished { mode: AppMode::Security }), 1);
    assert_eq!(b.service.arbiter().context().mode, AppMode::Security);
    assert_eq!(b.frame(lock(0)).text().as_str(), "   3");
}

#[test]
fn reset_returns_to_lock_outputs() {
    let mut b = Bench::new();
    b.hold(game(0), 20);
    assert_eq!(b.service.arbiter().context().transition, Transition::Loading);

    let out = b.tick(PanelInputs {
        reset: true,
        ..game(0)
    });
    let ctx = b.service.arbiter().context();
    assert_eq!(ctx.transition, Transition::Stable);
    assert_eq!(ctx.mode, AppMode::Security);
    // Full attempts bar, nothing programmed.
    assert_eq!(out.leds, 0x0070);
    assert!(!out.display.is_blank());
}

#[test]
fn lockout_keeps_counting_while_playing() {
    let mut b = Bench::new();
    b.program(0xA);
    for _ in 0..3 {
        b.press(lock(0x3));
        b.hold(lock(0x3), 120);
    }
    assert!(b.security().lockout.locked);

    b.hold(game(0), 2000);
    b.hold(lock(0), 150);
    let status = b.security();
    assert!(status.lockout.locked);
    assert!(status.lockout.remaining_secs <= 8, "{} s left", status.lockout.remaining_secs);

    b.hold(lock(0), 900);
    assert!(!b.security().lockout.locked);
    assert_eq!(b.count(&PanelEvent::LockoutCleared), 1);
}

#[test]
fn credential_survives_a_game_session() {
    let mut b = Bench::new();
    b.program(0xA);
    b.hold(game(0), 300);
    assert_eq!(b.game().state, GameState::AwaitingGuess);
    b.hold(lock(0xA), 150);

    b.press(lock(0xA));
    assert_eq!(b.count(&PanelEvent::AccessGranted), 1);
}

#[test]
fn game_keeps_its_round_across_a_lock_visit() {
    let mut b = Bench::new();
    b.hold(game(0), 150);
    b.press(game(0));
    let before = b.game();
    if before.state == GameState::Win {
        return;
    }

    b.hold(lock(0), 150);
    b.hold(game(0), 150);
    let after = b.game();
    assert_eq!(after.lives, before.lives);
    assert_eq!(after.secret, before.secret);
}
