//! Function-pointer finite state machine engine.
//!
//! Classic table-driven FSM, generic over the state identity and the
//! context each machine threads through its handlers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable<S, C>                                        │
//! │  ┌──────────┬───────────┬──────────┬─────────────────┐   │
//! │  │ S        │ on_enter  │ on_exit  │ on_update       │   │
//! │  ├──────────┼───────────┼──────────┼─────────────────┤   │
//! │  │ S::A     │ fn(&mut C)│ fn(&mut C)│ fn(&mut C)->S? │   │
//! │  │ S::B     │ ...       │ ...      │ ...             │   │
//! │  └──────────┴───────────┴──────────┴─────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.  If
//! it returns `Some(next)`, the engine runs `on_exit` for the current
//! state, then `on_enter` for the next, and updates the current pointer,
//! all within the same tick, so entry actions are visible as soon as the
//! transition happens.  The engine also publishes how many ticks have
//! elapsed in the current state, which is what every hold/cool-down
//! duration in this crate is measured against.
//!
//! Machines built on this engine:
//! - [`session`]: PIN verification session
//! - [`game`]: guessing-game rules

pub mod game;
pub mod session;

use core::fmt::Debug;
use log::debug;

// ---------------------------------------------------------------------------
// State identity and context contracts
// ---------------------------------------------------------------------------

/// A state identity usable as a table index.
pub trait StateId: Copy + Eq + Debug {
    /// Position of this state's row in the table.
    fn index(self) -> usize;
}

/// Context threaded through every handler.
pub trait MachineContext {
    /// Called by the engine before each `on_update`, and with `0` on entry.
    fn set_ticks_in_state(&mut self, ticks: u64);
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn<C> = fn(&mut C);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn<S, C> = fn(&mut C) -> Option<S>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array, no heap.
pub struct StateDescriptor<S, C> {
    pub id: S,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<C>>,
    pub on_exit: Option<StateActionFn<C>>,
    pub on_update: StateUpdateFn<S, C>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table; the context is owned by the caller and passed in
/// on every call so that it can be inspected between ticks.
pub struct Fsm<S: StateId, C: MachineContext, const N: usize> {
    /// Machine name used in log lines.
    label: &'static str,
    /// Fixed-size table indexed by `S::index()`.
    table: [StateDescriptor<S, C>; N],
    /// Index of the currently active state.
    current: usize,
    /// State entered on construction and on reset.
    initial: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl<S: StateId, C: MachineContext, const N: usize> Fsm<S, C, N> {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(label: &'static str, table: [StateDescriptor<S, C>; N], initial: S) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, row)| row.id.index() == i),
            "{label}: state table rows out of order"
        );
        Self {
            label,
            table,
            current: initial.index(),
            initial: initial.index(),
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut C) {
        debug!("{}: starting in {}", self.label, self.table[self.current].name);
        ctx.set_ticks_in_state(0);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Increment the tick counter and publish ticks-in-state.
    /// 2. Call `on_update` for the current state.
    /// 3. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    ///
    /// Returns the transition taken, if any.
    pub fn tick(&mut self, ctx: &mut C) -> Option<(S, S)> {
        self.tick_count += 1;
        ctx.set_ticks_in_state(self.tick_count - self.state_entry_tick);

        let from = self.table[self.current].id;
        let next = (self.table[self.current].on_update)(ctx)?;
        self.transition(next, ctx);
        Some((from, next))
    }

    /// Synchronous reset: back to the initial state without running exit
    /// actions, then re-run the initial state's entry action.
    pub fn reset(&mut self, ctx: &mut C) {
        self.current = self.initial;
        self.tick_count = 0;
        self.state_entry_tick = 0;
        self.start(ctx);
    }

    /// The current state's identity.
    pub fn current_state(&self) -> S {
        self.table[self.current].id
    }

    /// Name of the current state, as given in the table.
    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: S, ctx: &mut C) {
        let next_idx = next.index();

        debug!(
            "{}: {} -> {}",
            self.label, self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.set_ticks_in_state(0);

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
