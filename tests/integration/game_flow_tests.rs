//! End-to-end guessing-game scenarios through the full panel service.

use lockgame::app::events::PanelEvent;
use lockgame::arbiter::{AppMode, Transition};
use lockgame::drivers::seven_seg::Glyph;
use lockgame::fsm::game::GameState;
use lockgame::pins;

use crate::mock_hw::{Bench, SCAN_TICKS, game};

/// Switch to the game and wait out the loading overlay.
fn enter_game(b: &mut Bench) {
    b.hold(game(0), 150);
    let ctx = b.service.arbiter().context();
    assert_eq!(ctx.mode, AppMode::Game);
    assert_eq!(ctx.transition, Transition::Stable);
}

/// Guess 0 until a round does not end in an instant win.  Returns with
/// one life spent and the secret known.
fn miss_first_guess(b: &mut Bench) -> u8 {
    for _ in 0..20 {
        b.press(game(0));
        if b.game().state != GameState::Win {
            return b.game().secret;
        }
        b.hold(game(0), 250);
    }
    panic!("secret kept coming up 0");
}

/// Play a round to the last life with wrong guesses and wait for FAIL.
fn lose_round(b: &mut Bench) -> u8 {
    let secret = miss_first_guess(b);
    for _ in 0..4 {
        b.hold(game(0), 200);
        b.press(game(0));
    }
    b.hold(game(0), 200);
    secret
}

#[test]
fn guessing_display_echoes_switches() {
    let mut b = Bench::new();
    enter_game(&mut b);
    assert_eq!(b.game().state, GameState::AwaitingGuess);
    let frame = b.frame(game(13));
    assert_eq!(frame.text().as_str(), "  13");
    assert_eq!(b.last.leds, 0xF80D);
}

#[test]
fn first_guess_draws_secret_and_hints() {
    let mut b = Bench::new();
    enter_game(&mut b);
    b.press(game(0));
    let status = b.game();
    assert!(status.secret < 16);
    if status.secret == 0 {
        assert_eq!(status.state, GameState::Win);
        return;
    }
    assert_eq!(status.state, GameState::HintUp);
    assert_eq!(status.lives, 4);
    let frame = b.frame(game(0));
    assert!(frame.matches(&[Glyph::E, Glyph::B, Glyph::U, Glyph::S]));
    assert_eq!(b.last.leds, 0x7800);
}

#[test]
fn high_guess_says_go_down() {
    let mut b = Bench::new();
    enter_game(&mut b);
    b.press(game(15));
    let status = b.game();
    if status.secret == 15 {
        assert_eq!(status.state, GameState::Win);
        return;
    }
    assert_eq!(status.state, GameState::HintDown);
    assert_eq!(b.frame(game(15)).text().as_str(), "bAJA");
    assert_eq!(
        b.count(&PanelEvent::HintShown {
            guess: 15,
            higher: false,
            lives_left: 4
        }),
        1
    );
}

#[test]
fn exact_guess_wins_and_starts_new_round() {
    let mut b = Bench::new();
    enter_game(&mut b);
    let secret = miss_first_guess(&mut b);
    b.hold(game(0), 200);
    assert_eq!(b.game().state, GameState::AwaitingGuess);

    b.press(game(secret));
    assert_eq!(b.game().state, GameState::Win);
    assert_eq!(b.last.leds, pins::LED_ALL);
    assert!(b.frame(game(secret)).matches(&[Glyph::H, Glyph::O, Glyph::Blank, Glyph::Blank]));
    assert_eq!(
        b.count(&PanelEvent::RoundWon {
            secret,
            lives_left: 4
        }),
        1
    );

    b.hold(game(0), 250);
    let status = b.game();
    assert_eq!(status.state, GameState::AwaitingGuess);
    assert_eq!(status.lives, 5);
}

#[test]
fn exact_guess_on_last_life_still_wins() {
    let mut b = Bench::new();
    enter_game(&mut b);
    let secret = miss_first_guess(&mut b);
    for _ in 0..3 {
        b.hold(game(0), 200);
        b.press(game(0));
    }
    b.hold(game(0), 200);
    assert_eq!(b.game().lives, 1);
    b.press(game(secret));
    assert_eq!(b.game().state, GameState::Win);
}

#[test]
fn last_miss_shows_fail_with_dark_leds() {
    let mut b = Bench::new();
    enter_game(&mut b);
    let secret = lose_round(&mut b);
    assert_eq!(b.game().state, GameState::ShowFail);
    assert_eq!(b.game().lives, 0);
    assert_eq!(b.count(&PanelEvent::RoundLost { secret }), 1);
    assert_eq!(b.frame(game(0)).text().as_str(), "FAIL");
    assert_eq!(b.last.leds, 0);
}

#[test]
fn penalty_lasts_exactly_fifteen_seconds() {
    let mut b = Bench::new();
    enter_game(&mut b);
    lose_round(&mut b);

    let mut waited = 0;
    while b.game().state != GameState::Penalty {
        b.tick(game(0));
        waited += 1;
        assert!(waited < 400, "FAIL never handed off to the penalty");
    }
    assert_eq!(b.game().countdown, 15);

    assert_eq!(b.frame(game(0)).text().as_str(), "  15");
    let mut elapsed = SCAN_TICKS;
    while b.game().state == GameState::Penalty {
        b.tick(game(0));
        elapsed += 1;
    }
    assert_eq!(elapsed, 1500);
    assert_eq!(b.count(&PanelEvent::PenaltyServed), 1);

    b.tick(game(0));
    let status = b.game();
    assert_eq!(status.state, GameState::AwaitingGuess);
    assert_eq!(status.lives, 5);
}
