//! Decomposition event types.
//!
//! Events are lightweight value types tagged with the index of the matrix
//! in its batch.

use serde::{Deserialize, Serialize};

/// A telemetry event for one matrix of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionEvent {
    /// Position of the matrix in its batch (0-indexed).
    pub index: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Decomposition of a matrix started.
    DecompositionBegin {
        /// Caller-supplied label.
        label: String,
        /// M00 of the input.
        m00: f64,
    },

    /// Diattenuator factor extracted.
    DiattenuatorExtracted {
        /// T = M00.
        transmittance: f64,
        /// |D|.
        diattenuation: f64,
    },

    /// Depolarizer and retarder separated.
    DepolarizerSplit {
        /// Δ = 1 − |tr m_Δ| / 3.
        depolarization_power: f64,
        /// Total retardance in radians.
        retardance: f64,
    },

    /// A depolarization axis collapsed; the retarder is only partially determined.
    DegenerateAxis {
        axis: [f64; 3],
        coefficient: f64,
    },

    /// Reconstruction check passed.
    Reconstruction {
        /// Relative Frobenius residual.
        residual: f64,
    },

    /// Decomposition failed.
    Failed {
        /// Error message.
        reason: String,
    },
}

impl DecompositionEvent {
    /// Creates an event for the matrix at `index`.
    pub fn new(index: u32, kind: EventKind) -> Self {
        Self { index, kind }
    }

    /// True for `Failed` events.
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, EventKind::Failed { .. })
    }
}
