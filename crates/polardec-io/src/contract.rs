//! Batch input/output contract types.
//!
//! Matrices travel as row-major `[[f64; 4]; 4]` arrays.

use std::path::Path;

use serde::{Deserialize, Serialize};

use polardec_core::{Decomposition, DecompositionConfig, DegenerateAxisWarning, PolarParameters};
use polardec_optics::MuellerMatrix;
use polardec_types::{PolarError, PolarResult};

/// A batch of matrices to decompose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionInput {
    /// Matrices in submission order.
    pub matrices: Vec<LabeledMatrix>,

    /// Overrides the default decomposition configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DecompositionConfig>,
}

/// One input matrix with a caller-chosen label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledMatrix {
    pub label: String,
    /// Row-major Mueller matrix.
    pub rows: [[f64; 4]; 4],
}

impl LabeledMatrix {
    pub fn new(label: impl Into<String>, matrix: &MuellerMatrix) -> Self {
        Self {
            label: label.into(),
            rows: matrix.to_rows(),
        }
    }

    pub fn matrix(&self) -> MuellerMatrix {
        MuellerMatrix::from_rows(self.rows)
    }
}

impl DecompositionInput {
    pub fn from_json_str(text: &str) -> PolarResult<Self> {
        serde_json::from_str(text).map_err(|e| PolarError::Serialization(e.to_string()))
    }

    pub fn from_path(path: &Path) -> PolarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> PolarResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PolarError::Serialization(e.to_string()))
    }
}

/// Outcome of one matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// All three factors determined.
    Ok,
    /// Decomposed, but at least one depolarization axis collapsed.
    Degenerate,
    /// Rejected; see `error`.
    Failed,
}

/// Decomposition result for one labeled matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixResult {
    pub label: String,
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diattenuator: Option<MuellerMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retarder: Option<MuellerMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depolarizer: Option<MuellerMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<PolarParameters>,
    #[serde(default)]
    pub warnings: Vec<DegenerateAxisWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatrixResult {
    /// Result for a successful decomposition of `m`.
    pub fn decomposed(label: &str, m: &MuellerMatrix, d: &Decomposition) -> Self {
        let status = if d.has_degenerate_axes() {
            ResultStatus::Degenerate
        } else {
            ResultStatus::Ok
        };
        Self {
            label: label.to_string(),
            status,
            diattenuator: Some(d.diattenuator),
            retarder: Some(d.retarder),
            depolarizer: Some(d.depolarizer),
            parameters: Some(PolarParameters::from_decomposition(m, d)),
            warnings: d.warnings.clone(),
            residual: Some(d.residual),
            error: None,
        }
    }

    /// Result for a rejected matrix.
    pub fn failed(label: &str, error: &PolarError) -> Self {
        Self {
            label: label.to_string(),
            status: ResultStatus::Failed,
            diattenuator: None,
            retarder: None,
            depolarizer: None,
            parameters: None,
            warnings: Vec::new(),
            residual: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == ResultStatus::Failed
    }
}

/// Results of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecompositionOutput {
    pub results: Vec<MatrixResult>,
}

impl DecompositionOutput {
    /// Number of matrices that decomposed (including degenerate ones).
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| !r.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    pub fn get(&self, label: &str) -> Option<&MatrixResult> {
        self.results.iter().find(|r| r.label == label)
    }

    pub fn to_json_string(&self) -> PolarResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PolarError::Serialization(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> PolarResult<Self> {
        serde_json::from_str(text).map_err(|e| PolarError::Serialization(e.to_string()))
    }

    pub fn write_to(&self, path: &Path) -> PolarResult<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
