//! # polardec-telemetry
//!
//! Event bus for decomposition telemetry. Batch runs emit structured
//! events (stage results, degenerate axes, reconstruction residuals,
//! failures) that are consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{DecompositionEvent, EventKind};
pub use sinks::{EventSink, TracingSink, VecSink};
