//! Application core.  Pure domain logic, zero I/O.
//!
//! Wraps the tick model in a service that talks to the outside world only
//! through the **port traits** defined in [`ports`], keeping this layer
//! fully testable without real pins.

pub mod events;
pub mod ports;
pub mod service;
