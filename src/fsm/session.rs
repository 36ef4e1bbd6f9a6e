//! PIN verification session: state handlers, context, and wrapper.
//!
//! ```text
//!  IDLE ──[verify↑ & !locked]──▶ COMPARING
//!   ▲                              │
//!   │                 [match]      │      [mismatch]
//!   │                    ▼         │          ▼
//!   ├──[hold elapsed]── GRANTED    └──────▶ DENIED (1 tick)
//!   │                                         │
//!   └─────────[cool-down elapsed]──── COOLDOWN ◀┘
//! ```
//!
//! `grant` is asserted for the whole of GRANTED; `deny` is a one-tick
//! pulse while DENIED, so an attempt budget fed from it decrements exactly
//! once per failure no matter how long the button is held.  COOLDOWN
//! rate-limits guessing: verify edges are only looked at in IDLE.

use log::{info, warn};

use super::{Fsm, MachineContext, StateDescriptor, StateId};
use crate::config::BoardConfig;
use crate::drivers::debounce::EdgeDetector;

// ═══════════════════════════════════════════════════════════════════════════
//  State identity
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SessionState {
    Idle = 0,
    Comparing = 1,
    Granted = 2,
    Denied = 3,
    Cooldown = 4,
}

impl SessionState {
    pub const COUNT: usize = 5;
}

impl StateId for SessionState {
    fn index(self) -> usize {
        self as usize
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Context
// ═══════════════════════════════════════════════════════════════════════════

/// Shared context passed to every session handler.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    // -- Timing --
    pub ticks_in_state: u64,
    pub grant_hold_ticks: u64,
    pub cooldown_ticks: u64,

    // -- Inputs (latched by the owner before each tick) --
    pub verify_edge: bool,
    pub locked: bool,
    pub guess: u8,
    pub credential: u8,

    // -- Outputs --
    pub grant: bool,
    pub deny: bool,
}

impl MachineContext for SessionContext {
    fn set_ticks_in_state(&mut self, ticks: u64) {
        self.ticks_in_state = ticks;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_session_table()
-> [StateDescriptor<SessionState, SessionContext>; SessionState::COUNT] {
    [
        StateDescriptor {
            id: SessionState::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_update: idle_update,
        },
        StateDescriptor {
            id: SessionState::Comparing,
            name: "Comparing",
            on_enter: None,
            on_exit: None,
            on_update: comparing_update,
        },
        StateDescriptor {
            id: SessionState::Granted,
            name: "Granted",
            on_enter: Some(granted_enter),
            on_exit: Some(granted_exit),
            on_update: granted_update,
        },
        StateDescriptor {
            id: SessionState::Denied,
            name: "Denied",
            on_enter: Some(denied_enter),
            on_exit: Some(denied_exit),
            on_update: denied_update,
        },
        StateDescriptor {
            id: SessionState::Cooldown,
            name: "Cooldown",
            on_enter: None,
            on_exit: None,
            on_update: cooldown_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Handlers
// ═══════════════════════════════════════════════════════════════════════════

fn idle_update(ctx: &mut SessionContext) -> Option<SessionState> {
    (ctx.verify_edge && !ctx.locked).then_some(SessionState::Comparing)
}

fn comparing_update(ctx: &mut SessionContext) -> Option<SessionState> {
    if ctx.guess == ctx.credential {
        Some(SessionState::Granted)
    } else {
        Some(SessionState::Denied)
    }
}

fn granted_enter(ctx: &mut SessionContext) {
    ctx.grant = true;
    info!("SESSION: access granted");
}

fn granted_exit(ctx: &mut SessionContext) {
    ctx.grant = false;
}

fn granted_update(ctx: &mut SessionContext) -> Option<SessionState> {
    (ctx.ticks_in_state >= ctx.grant_hold_ticks).then_some(SessionState::Idle)
}

fn denied_enter(ctx: &mut SessionContext) {
    ctx.deny = true;
    warn!("SESSION: access denied (code 0x{:X})", ctx.guess);
}

fn denied_exit(ctx: &mut SessionContext) {
    ctx.deny = false;
}

fn denied_update(_ctx: &mut SessionContext) -> Option<SessionState> {
    Some(SessionState::Cooldown)
}

fn cooldown_update(ctx: &mut SessionContext) -> Option<SessionState> {
    (ctx.ticks_in_state >= ctx.cooldown_ticks).then_some(SessionState::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  Session wrapper
// ═══════════════════════════════════════════════════════════════════════════

/// Per-tick inputs, all registered values from the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyInputs {
    /// Debounced verify button level.
    pub verify: bool,
    /// Verify presses belong to another consumer this tick.  Their edges
    /// are still registered, so releasing this never fakes a press.
    pub suppressed: bool,
    pub locked: bool,
    pub guess: u8,
    pub credential: u8,
    pub reset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOutputs {
    pub state: SessionState,
    pub grant: bool,
    pub deny: bool,
}

/// The verification FSM plus its verify-button edge register.
pub struct VerificationSession {
    fsm: Fsm<SessionState, SessionContext, { SessionState::COUNT }>,
    ctx: SessionContext,
    verify: EdgeDetector,
}

impl VerificationSession {
    pub fn new(config: &BoardConfig) -> Self {
        let mut ctx = SessionContext {
            grant_hold_ticks: u64::from(config.ticks_for_ms(config.grant_hold_ms)),
            cooldown_ticks: u64::from(config.ticks_for_ms(config.cooldown_ms)),
            ..SessionContext::default()
        };
        let mut fsm = Fsm::new("session", build_session_table(), SessionState::Idle);
        fsm.start(&mut ctx);
        Self {
            fsm,
            ctx,
            verify: EdgeDetector::new(),
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, inputs: VerifyInputs) -> VerifyOutputs {
        let verify_edge = self.verify.rising(inputs.verify) && !inputs.suppressed;

        if inputs.reset {
            self.reset();
            return self.outputs();
        }

        self.ctx.verify_edge = verify_edge;
        self.ctx.locked = inputs.locked;
        self.ctx.guess = inputs.guess;
        self.ctx.credential = inputs.credential;
        self.fsm.tick(&mut self.ctx);

        self.outputs()
    }

    /// Registered outputs.
    pub fn outputs(&self) -> VerifyOutputs {
        VerifyOutputs {
            state: self.fsm.current_state(),
            grant: self.ctx.grant,
            deny: self.ctx.deny,
        }
    }

    pub fn state(&self) -> SessionState {
        self.fsm.current_state()
    }

    fn reset(&mut self) {
        self.verify.reset();
        self.ctx.grant = false;
        self.ctx.deny = false;
        self.ctx.verify_edge = false;
        self.fsm.reset(&mut self.ctx);
    }
}
