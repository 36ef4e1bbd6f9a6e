//! Lockgame board controller library.
//!
//! A tick-accurate model of a panel running two applications, a PIN lock
//! with lockout and a number-guessing game, behind a mode arbiter.  Every
//! component advances under a single synchronous tick and reads only the
//! values its siblings registered on the previous tick.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod arbiter;
pub mod board;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod game;
pub mod logging;
pub mod pins;
pub mod security;
