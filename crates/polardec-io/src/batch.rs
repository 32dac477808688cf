//! Batch runner: decomposes every matrix of an input, reporting failures
//! per matrix instead of aborting the batch.

use polardec_core::parameters::{depolarization_power, retardance};
use polardec_core::PolarDecomposer;
use polardec_telemetry::{DecompositionEvent, EventBus, EventKind};
use polardec_types::PolarResult;

use crate::contract::{DecompositionInput, DecompositionOutput, LabeledMatrix, MatrixResult};
use crate::validator::validate_input;

/// Decomposes a validated batch, emitting telemetry to `bus` when given.
///
/// Only structural input errors fail the whole call.
pub fn run_batch(
    input: &DecompositionInput,
    bus: Option<&EventBus>,
) -> PolarResult<DecompositionOutput> {
    validate_input(input)?;
    let decomposer = PolarDecomposer::new(input.config.clone().unwrap_or_default())?;

    let results: Vec<MatrixResult> = input
        .matrices
        .iter()
        .enumerate()
        .map(|(i, entry)| decompose_entry(&decomposer, i as u32, entry, bus))
        .collect();

    let output = DecompositionOutput { results };
    tracing::info!(
        matrices = input.matrices.len(),
        failed = output.failed(),
        "batch complete"
    );
    Ok(output)
}

fn decompose_entry(
    decomposer: &PolarDecomposer,
    index: u32,
    entry: &LabeledMatrix,
    bus: Option<&EventBus>,
) -> MatrixResult {
    let emit = |kind: EventKind| {
        if let Some(bus) = bus {
            bus.emit(DecompositionEvent::new(index, kind));
        }
    };

    let m = entry.matrix();
    emit(EventKind::DecompositionBegin {
        label: entry.label.clone(),
        m00: m.m00(),
    });

    match decomposer.decompose_depolarizer_all(&m) {
        Ok(d) => {
            emit(EventKind::DiattenuatorExtracted {
                transmittance: d.diattenuator.m00(),
                diattenuation: d.diattenuator.diattenuation(),
            });
            emit(EventKind::DepolarizerSplit {
                depolarization_power: depolarization_power(&d.depolarizer),
                retardance: retardance(&d.retarder),
            });
            for warning in &d.warnings {
                emit(EventKind::DegenerateAxis {
                    axis: warning.axis,
                    coefficient: warning.coefficient,
                });
            }
            emit(EventKind::Reconstruction { residual: d.residual });
            MatrixResult::decomposed(&entry.label, &m, &d)
        }
        Err(e) => {
            tracing::debug!(label = %entry.label, error = %e, "matrix rejected");
            emit(EventKind::Failed {
                reason: e.to_string(),
            });
            MatrixResult::failed(&entry.label, &e)
        }
    }
}
