//! Number-guessing game rules: state handlers, context, and wrapper.
//!
//! ```text
//!  INIT ──▶ AWAITING_GUESS ──[validate↑]──▶ VALIDATING
//!   ▲            ▲                            │
//!   │            │ [lives left]     [hit]     │   [miss: lives - 1]
//!   │            │                    ▼       ▼
//!   ├──[hold]── WIN           HINT_UP / HINT_DOWN
//!   │                                 │ [hold & no lives]
//!   │                                 ▼
//!   └──[countdown 0]── PENALTY ◀──[hold, then 1 Hz]── SHOW_FAIL
//! ```
//!
//! The secret is drawn from the free-running seed on the first guess of a
//! round, i.e. while the lives budget is still full.  Penalty seconds are
//! counted on the shared 1 Hz pulse, and SHOW_FAIL hands off on such a
//! pulse so that the penalty always spans whole seconds.

use log::{info, warn};

use super::{Fsm, MachineContext, StateDescriptor, StateId};
use crate::config::BoardConfig;
use crate::drivers::debounce::EdgeDetector;
use crate::pins::SW_CODE_MASK;
use crate::security::budget::AttemptBudget;

// ═══════════════════════════════════════════════════════════════════════════
//  State identity
// ═══════════════════════════════════════════════════════════════════════════

/// Game states.  The discriminant is the state code handed to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameState {
    Init = 0,
    AwaitingGuess = 1,
    Validating = 2,
    Win = 3,
    HintUp = 4,
    HintDown = 5,
    ShowFail = 6,
    Penalty = 7,
}

impl GameState {
    pub const COUNT: usize = 8;

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Init),
            1 => Some(Self::AwaitingGuess),
            2 => Some(Self::Validating),
            3 => Some(Self::Win),
            4 => Some(Self::HintUp),
            5 => Some(Self::HintDown),
            6 => Some(Self::ShowFail),
            7 => Some(Self::Penalty),
            _ => None,
        }
    }

    /// States in which a round is in progress and the lives bar is shown.
    pub fn is_guessing(self) -> bool {
        matches!(
            self,
            Self::AwaitingGuess | Self::Validating | Self::HintUp | Self::HintDown
        )
    }
}

impl StateId for GameState {
    fn index(self) -> usize {
        self as usize
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Context
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct GameContext {
    // -- Timing --
    pub ticks_in_state: u64,
    pub hint_ticks: u64,
    pub win_ticks: u64,
    pub fail_ticks: u64,
    pub penalty_secs: u8,

    // -- Inputs (latched by the owner before each tick) --
    pub validate_edge: bool,
    pub switches: u8,
    pub seed: u32,
    pub one_hz: bool,

    // -- Round state --
    pub secret: u8,
    pub guess: u8,
    pub lives: AttemptBudget,
    pub countdown: u8,
}

impl GameContext {
    fn from_config(config: &BoardConfig) -> Self {
        Self {
            ticks_in_state: 0,
            hint_ticks: u64::from(config.ticks_for_ms(config.hint_ms)),
            win_ticks: u64::from(config.ticks_for_ms(config.win_ms)),
            fail_ticks: u64::from(config.ticks_for_ms(config.fail_ms)),
            penalty_secs: config.penalty_secs,
            validate_edge: false,
            switches: 0,
            seed: 0,
            one_hz: false,
            secret: 0,
            guess: 0,
            lives: AttemptBudget::new(config.game_lives),
            countdown: 0,
        }
    }
}

impl MachineContext for GameContext {
    fn set_ticks_in_state(&mut self, ticks: u64) {
        self.ticks_in_state = ticks;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_game_table() -> [StateDescriptor<GameState, GameContext>; GameState::COUNT] {
    [
        StateDescriptor {
            id: GameState::Init,
            name: "Init",
            on_enter: Some(init_enter),
            on_exit: None,
            on_update: init_update,
        },
        StateDescriptor {
            id: GameState::AwaitingGuess,
            name: "AwaitingGuess",
            on_enter: None,
            on_exit: None,
            on_update: awaiting_update,
        },
        StateDescriptor {
            id: GameState::Validating,
            name: "Validating",
            on_enter: None,
            on_exit: None,
            on_update: validating_update,
        },
        StateDescriptor {
            id: GameState::Win,
            name: "Win",
            on_enter: Some(win_enter),
            on_exit: None,
            on_update: win_update,
        },
        StateDescriptor {
            id: GameState::HintUp,
            name: "HintUp",
            on_enter: None,
            on_exit: None,
            on_update: hint_update,
        },
        StateDescriptor {
            id: GameState::HintDown,
            name: "HintDown",
            on_enter: None,
            on_exit: None,
            on_update: hint_update,
        },
        StateDescriptor {
            id: GameState::ShowFail,
            name: "ShowFail",
            on_enter: Some(show_fail_enter),
            on_exit: None,
            on_update: show_fail_update,
        },
        StateDescriptor {
            id: GameState::Penalty,
            name: "Penalty",
            on_enter: None,
            on_exit: Some(penalty_exit),
            on_update: penalty_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Handlers
// ═══════════════════════════════════════════════════════════════════════════

fn init_enter(ctx: &mut GameContext) {
    ctx.lives.refill();
    ctx.countdown = 0;
}

fn init_update(_ctx: &mut GameContext) -> Option<GameState> {
    Some(GameState::AwaitingGuess)
}

fn awaiting_update(ctx: &mut GameContext) -> Option<GameState> {
    if !ctx.validate_edge {
        return None;
    }
    ctx.guess = ctx.switches & SW_CODE_MASK;
    if ctx.lives.is_full() {
        ctx.secret = (ctx.seed % 16) as u8;
    }
    Some(GameState::Validating)
}

fn validating_update(ctx: &mut GameContext) -> Option<GameState> {
    if ctx.guess == ctx.secret {
        return Some(GameState::Win);
    }
    ctx.lives.consume();
    if ctx.guess < ctx.secret {
        Some(GameState::HintUp)
    } else {
        Some(GameState::HintDown)
    }
}

fn hint_update(ctx: &mut GameContext) -> Option<GameState> {
    if ctx.ticks_in_state < ctx.hint_ticks {
        return None;
    }
    if ctx.lives.exhausted() {
        Some(GameState::ShowFail)
    } else {
        Some(GameState::AwaitingGuess)
    }
}

fn win_enter(ctx: &mut GameContext) {
    info!("GAME: round won, secret was {}", ctx.secret);
}

fn win_update(ctx: &mut GameContext) -> Option<GameState> {
    (ctx.ticks_in_state >= ctx.win_ticks).then_some(GameState::Init)
}

fn show_fail_enter(ctx: &mut GameContext) {
    warn!("GAME: out of lives, secret was {}", ctx.secret);
}

fn show_fail_update(ctx: &mut GameContext) -> Option<GameState> {
    if ctx.ticks_in_state >= ctx.fail_ticks && ctx.one_hz {
        ctx.countdown = ctx.penalty_secs;
        return Some(GameState::Penalty);
    }
    None
}

fn penalty_update(ctx: &mut GameContext) -> Option<GameState> {
    if ctx.one_hz {
        ctx.countdown = ctx.countdown.saturating_sub(1);
    }
    (ctx.countdown == 0).then_some(GameState::Init)
}

fn penalty_exit(_ctx: &mut GameContext) {
    info!("GAME: penalty served");
}

// ═══════════════════════════════════════════════════════════════════════════
//  Game core wrapper
// ═══════════════════════════════════════════════════════════════════════════

/// Per-tick inputs, all registered values from the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameInputs {
    /// Debounced validate button level.
    pub validate: bool,
    /// Debounced code switches.
    pub switches: u8,
    pub seed: u32,
    pub one_hz: bool,
    pub reset: bool,
}

/// Registered round status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatus {
    pub state: GameState,
    pub lives: u8,
    pub countdown: u8,
    pub secret: u8,
    pub guess: u8,
}

/// The game FSM plus its validate-button edge register.
pub struct GameCore {
    fsm: Fsm<GameState, GameContext, { GameState::COUNT }>,
    ctx: GameContext,
    validate: EdgeDetector,
}

impl GameCore {
    pub fn new(config: &BoardConfig) -> Self {
        let mut ctx = GameContext::from_config(config);
        let mut fsm = Fsm::new("game", build_game_table(), GameState::Init);
        fsm.start(&mut ctx);
        Self {
            fsm,
            ctx,
            validate: EdgeDetector::new(),
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, inputs: GameInputs) -> GameStatus {
        let validate_edge = self.validate.rising(inputs.validate);

        if inputs.reset {
            self.validate.reset();
            self.ctx.validate_edge = false;
            self.ctx.one_hz = false;
            self.ctx.secret = 0;
            self.ctx.guess = 0;
            self.fsm.reset(&mut self.ctx);
            return self.status();
        }

        self.ctx.validate_edge = validate_edge;
        self.ctx.switches = inputs.switches;
        self.ctx.seed = inputs.seed;
        self.ctx.one_hz = inputs.one_hz;
        self.fsm.tick(&mut self.ctx);

        self.status()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            state: self.fsm.current_state(),
            lives: self.ctx.lives.remaining(),
            countdown: self.ctx.countdown,
            secret: self.ctx.secret,
            guess: self.ctx.guess,
        }
    }

    pub fn state(&self) -> GameState {
        self.fsm.current_state()
    }
}
