//! Concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements            | Connects to                    |
//! |------------|-----------------------|--------------------------------|
//! | `hardware` | InputPort, OutputPort | embedded-hal GPIO pins         |
//! | `log_sink` | EventSink             | `log` facade                   |
//! | `script`   | InputPort, OutputPort | JSON stimulus + frame capture  |

pub mod hardware;
pub mod log_sink;
pub mod script;
