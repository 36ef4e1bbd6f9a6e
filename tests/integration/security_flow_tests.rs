//! End-to-end lock scenarios through the full panel service: programming,
//! verification, attempt budget, lockout and reset.

use lockgame::app::events::PanelEvent;
use lockgame::board::PanelInputs;
use lockgame::pins;

use crate::mock_hw::{Bench, lock, with_config, with_validate};

#[test]
fn idle_lock_shows_three_attempts() {
    let mut b = Bench::new();
    let frame = b.frame(lock(0));
    assert!(frame.complete());
    assert_eq!(frame.text().as_str(), "   3");
    assert_eq!(b.last.leds, 0x0070);
}

#[test]
fn programmed_code_grants_access() {
    let mut b = Bench::new();
    b.program(0xA);
    assert_eq!(b.count(&PanelEvent::CredentialProgrammed), 1);
    assert!(b.security().credential.programmed);
    assert_eq!(b.security().credential.code, 0xA);

    b.press(lock(0xA));
    assert_eq!(b.count(&PanelEvent::AccessGranted), 1);
    assert!(b.security().grant);
    assert_eq!(b.last.leds, pins::LED_ALL);
}

#[test]
fn grant_releases_after_two_seconds() {
    let mut b = Bench::new();
    b.program(0x5);
    b.press(lock(0x5));
    assert!(b.security().grant);
    b.hold(lock(0x5), 200);
    assert!(!b.security().grant);
    assert_ne!(b.last.leds, pins::LED_ALL);
}

#[test]
fn unprogrammed_lock_accepts_zero() {
    let mut b = Bench::new();
    b.press(lock(0));
    assert_eq!(b.count(&PanelEvent::AccessGranted), 1);
}

#[test]
fn wrong_code_costs_one_attempt() {
    let mut b = Bench::new();
    b.program(0xA);
    b.press(lock(0x3));
    assert_eq!(b.count(&PanelEvent::AccessDenied), 1);
    assert_eq!(b.security().attempts, 2);

    let frame = b.frame(lock(0x3));
    assert_eq!(frame.text().as_str(), "   2");
    // Raw code, two-LED bar, programmed flag.
    assert_eq!(b.last.leds, 0x4033);
}

#[test]
fn held_validate_is_one_attempt() {
    let mut b = Bench::new();
    b.program(0xA);
    b.hold(with_validate(lock(0x2)), 500);
    assert_eq!(b.count(&PanelEvent::AccessDenied), 1);
    assert_eq!(b.security().attempts, 2);
}

#[test]
fn three_failures_lock_out_then_refill() {
    let mut b = Bench::new();
    b.program(0xA);
    for _ in 0..3 {
        b.press(lock(0x3));
        // Outlast the one-second cool-down.
        b.hold(lock(0x3), 120);
    }
    assert_eq!(b.count(&PanelEvent::AccessDenied), 3);
    assert_eq!(b.count(&PanelEvent::LockoutStarted { secs: 30 }), 1);
    let status = b.security();
    assert!(status.lockout.locked);
    assert_eq!(status.attempts, 0);
    assert_ne!(b.last.leds & pins::LED_SEC_LOCKED, 0);

    let frame = b.frame(lock(0));
    let text = frame.text();
    assert!(text.starts_with("  "), "countdown is right-aligned: {text:?}");
    let secs: u8 = text.trim().parse().expect("countdown digits");
    assert!((28..=29).contains(&secs), "unexpected countdown {secs}");

    // The right code is ignored while locked.
    b.press(lock(0xA));
    assert_eq!(b.count(&PanelEvent::AccessGranted), 0);

    b.hold(lock(0), 3000);
    assert_eq!(b.count(&PanelEvent::LockoutCleared), 1);
    let status = b.security();
    assert!(!status.lockout.locked);
    assert_eq!(status.attempts, 3);

    b.press(lock(0xA));
    assert_eq!(b.count(&PanelEvent::AccessGranted), 1);
}

#[test]
fn lockout_lasts_thirty_seconds() {
    let mut b = Bench::new();
    b.program(0xA);
    for _ in 0..3 {
        b.press(lock(0x3));
        b.hold(lock(0x3), 120);
    }
    let mut locked_ticks = 0;
    while b.security().lockout.locked {
        b.tick(lock(0));
        locked_ticks += 1;
    }
    // Locked since partway through the third press.
    assert!((2850..3000).contains(&locked_ticks), "locked for {locked_ticks}");
}

#[test]
fn config_mode_exposes_credential_and_skips_verification() {
    let mut b = Bench::new();
    b.program(0x6);

    let out = b.hold(with_config(lock(0x1)), 10);
    // Code, full bar, debug credential, config + programmed flags.
    assert_eq!(out.leds, 0x6671);

    b.hold(with_validate(with_config(lock(0x1))), 10);
    b.hold(with_config(lock(0x1)), 10);
    b.hold(lock(0x1), 10);
    assert_eq!(b.count(&PanelEvent::AccessDenied), 0);
    assert_eq!(b.count(&PanelEvent::CredentialProgrammed), 2);
    assert_eq!(b.security().credential.code, 0x1);
}

#[test]
fn validate_held_past_config_release_is_not_a_verification() {
    let mut b = Bench::new();
    b.program(0xA);

    b.hold(with_validate(with_config(lock(0x3))), 10);
    b.hold(with_validate(with_config(lock(0x5))), 10);
    // Config released first, validate still down.
    b.hold(with_validate(lock(0x5)), 20);
    b.hold(lock(0x5), 10);
    assert_eq!(b.count(&PanelEvent::AccessDenied), 0);
    assert_eq!(b.count(&PanelEvent::AccessGranted), 0);
    assert_eq!(b.security().attempts, 3);

    // A fresh press outside config mode still verifies.
    b.press(lock(0x5));
    assert_eq!(b.count(&PanelEvent::AccessDenied), 1);
    assert_eq!(b.security().attempts, 2);
}

#[test]
fn reset_clears_credential_and_budget() {
    let mut b = Bench::new();
    b.program(0xA);
    b.press(lock(0x3));
    assert_eq!(b.security().attempts, 2);

    b.tick(PanelInputs {
        reset: true,
        ..lock(0)
    });
    assert_eq!(b.count(&PanelEvent::Reset), 1);
    let status = b.security();
    assert_eq!(status.attempts, 3);
    assert!(!status.credential.programmed);
    assert_eq!(status.credential.code, 0);
}
