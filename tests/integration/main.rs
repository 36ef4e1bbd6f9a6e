//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one part of the board
//! through the full [`PanelService`](lockgame::app::service::PanelService)
//! against mock adapters.  All tests run on the host at a 100 Hz tick rate.

mod arbiter_tests;
mod game_flow_tests;
mod security_flow_tests;
mod service_tests;
