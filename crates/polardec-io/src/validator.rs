//! Batch input validation.
//!
//! Catches structural problems before any matrix is decomposed. Physical
//! problems with individual matrices are reported per matrix by the batch
//! runner instead.

use std::collections::HashSet;

use polardec_types::{PolarError, PolarResult};

use crate::contract::DecompositionInput;

/// Validates a batch input.
///
/// Checks:
/// - At least one matrix
/// - Labels are non-empty and unique
/// - The configuration override, if any, is valid
pub fn validate_input(input: &DecompositionInput) -> PolarResult<()> {
    if input.matrices.is_empty() {
        return Err(PolarError::InvalidConfig("input contains no matrices".into()));
    }

    let mut seen = HashSet::new();
    for (i, entry) in input.matrices.iter().enumerate() {
        if entry.label.trim().is_empty() {
            return Err(PolarError::InvalidConfig(format!(
                "matrix {i} has an empty label"
            )));
        }
        if !seen.insert(entry.label.as_str()) {
            return Err(PolarError::InvalidConfig(format!(
                "duplicate label '{}'",
                entry.label
            )));
        }
    }

    if let Some(config) = &input.config {
        config.validate()?;
    }

    Ok(())
}
