//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::{DecompositionEvent, EventKind};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &DecompositionEvent);

    /// Called once when the run ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a shared `Vec` for tests and inspection.
///
/// Clones share the same storage, so a handle kept by the caller sees the
/// events delivered to the boxed copy registered on the bus.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<DecompositionEvent>>>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected events.
    pub fn events(&self) -> Vec<DecompositionEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &DecompositionEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`: failures and degenerate axes at `warn`,
/// everything else at `debug`.
#[derive(Debug, Default)]
pub struct TracingSink {
    failures: u32,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &DecompositionEvent) {
        match &event.kind {
            EventKind::Failed { reason } => {
                self.failures += 1;
                tracing::warn!(index = event.index, %reason, "decomposition failed");
            }
            EventKind::DegenerateAxis { axis, coefficient } => {
                tracing::warn!(index = event.index, ?axis, coefficient, "degenerate axis");
            }
            kind => tracing::debug!(index = event.index, event = ?kind, "decomposition_event"),
        }
    }

    fn finalize(&mut self) {
        tracing::info!(failures = self.failures, "telemetry finished");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
