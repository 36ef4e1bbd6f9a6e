//! Port traits: the hexagonal boundary between the tick model and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PanelService (domain)
//! ```
//!
//! Driven adapters (pin banks, stimulus scripts, event sinks) implement
//! these traits.  The [`PanelService`](super::service::PanelService)
//! consumes them via generics, so the domain core never touches pins
//! directly.

use crate::board::{PanelInputs, PanelOutputs};
use crate::error::Result;

use super::events::PanelEvent;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: board → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: sampled once at the start of every tick.
pub trait InputPort {
    /// Raw, undebounced state of every button and switch.
    fn read_inputs(&mut self) -> Result<PanelInputs>;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → board)
// ───────────────────────────────────────────────────────────────

/// Write-side port: driven once at the end of every tick.
pub trait OutputPort {
    fn drive(&mut self, outputs: &PanelOutputs) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`PanelEvent`]s through this port.
/// Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &PanelEvent);
}

/// Collecting sink, handy for tests and for post-run summaries.
impl EventSink for Vec<PanelEvent> {
    fn emit(&mut self, event: &PanelEvent) {
        self.push(event.clone());
    }
}
