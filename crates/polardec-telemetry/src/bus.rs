//! Event bus: channel-backed dispatch to pluggable sinks.
//!
//! Producers call `emit` (which only needs `&self`); `flush` drains the
//! channel into every registered sink.

use std::sync::mpsc;

use crate::events::DecompositionEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for decomposition telemetry.
///
/// Every sink sees every event, in emission order. Events queue up until
/// the owner calls `flush` or `finish`.
pub struct EventBus {
    /// Producer end; `emit` borrows the bus immutably, so a batch runner
    /// can hold `&EventBus` while the caller keeps ownership.
    sender: mpsc::Sender<DecompositionEvent>,
    /// Queue of events not yet handed to the sinks.
    receiver: mpsc::Receiver<DecompositionEvent>,
    /// Sinks in registration order.
    sinks: Vec<Box<dyn EventSink>>,
    /// When false, `emit` drops events before they reach the queue.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. A disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event. No-op when the bus is disabled.
    pub fn emit(&self, event: DecompositionEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus.
        let _ = self.sender.send(event);
    }

    /// Delivers all pending events to the registered sinks.
    ///
    /// Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flushes pending events, then finalizes every sink.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
