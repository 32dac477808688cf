//! Benchmark scenarios: seeded random factor triples and their products.
//!
//! Four canonical scenarios:
//! 1. **Pure diattenuator**: linear diattenuators only
//! 2. **Retarder-diattenuator**: elliptical retarder after a diattenuator
//! 3. **Full depolarizing**: all three factors, depolarizer with polarizance
//! 4. **Near singular**: diattenuation close to 1 and one collapsed depolarization axis

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use polardec_core::diattenuator_from_vector;
use polardec_math::{DMat3, DVec3};
use polardec_optics::builders::{
    depolarizer, elliptical_retarder, linear_diattenuator, polarizing_depolarizer,
};
use polardec_optics::MuellerMatrix;
use polardec_types::PolarResult;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    PureDiattenuator,
    RetarderDiattenuator,
    FullDepolarizing,
    NearSingular,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::PureDiattenuator,
            ScenarioKind::RetarderDiattenuator,
            ScenarioKind::FullDepolarizing,
            ScenarioKind::NearSingular,
        ]
    }

    /// Returns the snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::PureDiattenuator => "pure_diattenuator",
            ScenarioKind::RetarderDiattenuator => "retarder_diattenuator",
            ScenarioKind::FullDepolarizing => "full_depolarizing",
            ScenarioKind::NearSingular => "near_singular",
        }
    }

    /// Parses a name produced by [`Self::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A synthesized matrix together with the factors it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub matrix: MuellerMatrix,
    pub depolarizer: MuellerMatrix,
    pub retarder: MuellerMatrix,
    pub diattenuator: MuellerMatrix,
}

impl Sample {
    /// Builds the sample M = M_Δ·M_R·M_D.
    pub fn new(depolarizer: MuellerMatrix, retarder: MuellerMatrix, diattenuator: MuellerMatrix) -> Self {
        Self {
            matrix: depolarizer * retarder * diattenuator,
            depolarizer,
            retarder,
            diattenuator,
        }
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    pub kind: ScenarioKind,
    /// RNG seed the samples were drawn with.
    pub seed: u64,
    pub samples: Vec<Sample>,
}

/// Samples per scenario for [`Scenario::from_kind`].
pub const DEFAULT_SAMPLES: usize = 200;

/// Seed for [`Scenario::from_kind`].
pub const DEFAULT_SEED: u64 = 42;

impl Scenario {
    /// Draws `count` samples of `kind` from a generator seeded with `seed`.
    pub fn generate(kind: ScenarioKind, count: usize, seed: u64) -> PolarResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (0..count)
            .map(|_| match kind {
                ScenarioKind::PureDiattenuator => pure_diattenuator(&mut rng),
                ScenarioKind::RetarderDiattenuator => retarder_diattenuator(&mut rng),
                ScenarioKind::FullDepolarizing => full_depolarizing(&mut rng),
                ScenarioKind::NearSingular => near_singular(&mut rng),
            })
            .collect::<PolarResult<Vec<_>>>()?;
        Ok(Self { kind, seed, samples })
    }

    /// Default-sized scenario of `kind`.
    pub fn from_kind(kind: ScenarioKind) -> PolarResult<Self> {
        Self::generate(kind, DEFAULT_SAMPLES, DEFAULT_SEED)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn unit_vector(rng: &mut StdRng) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len = v.length();
        if len > 0.1 && len <= 1.0 {
            return v / len;
        }
    }
}

fn random_retarder(rng: &mut StdRng) -> PolarResult<MuellerMatrix> {
    elliptical_retarder(unit_vector(rng), rng.gen_range(0.05..PI - 0.05))
}

fn random_diattenuator(rng: &mut StdRng, max_diattenuation: f64) -> PolarResult<MuellerMatrix> {
    let d = unit_vector(rng) * rng.gen_range(0.0..max_diattenuation);
    diattenuator_from_vector(d, rng.gen_range(0.1..1.0))
}

/// Symmetric depolarizer block with eigenvalues drawn from `range` about a random frame.
fn random_depolarizer_block(rng: &mut StdRng, lo: f64, hi: f64) -> PolarResult<DMat3> {
    let frame = random_retarder(rng)?.sub_block();
    let coefficients = DVec3::new(
        rng.gen_range(lo..hi),
        rng.gen_range(lo..hi),
        rng.gen_range(lo..hi),
    );
    Ok(frame * DMat3::from_diagonal(coefficients) * frame.transpose())
}

fn pure_diattenuator(rng: &mut StdRng) -> PolarResult<Sample> {
    let t_max = rng.gen_range(0.2..1.0);
    let t_min = t_max * rng.gen_range(0.01..1.0);
    let md = linear_diattenuator(rng.gen_range(0.0..PI), t_min, t_max)?;
    Ok(Sample::new(MuellerMatrix::IDENTITY, MuellerMatrix::IDENTITY, md))
}

fn retarder_diattenuator(rng: &mut StdRng) -> PolarResult<Sample> {
    let mr = random_retarder(rng)?;
    let md = random_diattenuator(rng, 0.95)?;
    Ok(Sample::new(MuellerMatrix::IDENTITY, mr, md))
}

fn full_depolarizing(rng: &mut StdRng) -> PolarResult<Sample> {
    let block = random_depolarizer_block(rng, 0.05, 0.95)?;
    let polarizance = unit_vector(rng) * rng.gen_range(0.0..0.3);
    let mdelta = polarizing_depolarizer(polarizance, block)?;
    let mr = random_retarder(rng)?;
    let md = random_diattenuator(rng, 0.9)?;
    Ok(Sample::new(mdelta, mr, md))
}

fn near_singular(rng: &mut StdRng) -> PolarResult<Sample> {
    let mdelta = depolarizer(
        rng.gen_range(0.0..PI),
        rng.gen_range(0.3..0.95),
        rng.gen_range(0.3..0.95),
        rng.gen_range(0.0..1e-12),
    )?;
    let mr = random_retarder(rng)?;
    let d = unit_vector(rng) * rng.gen_range(0.99..0.999);
    let md = diattenuator_from_vector(d, rng.gen_range(0.5..1.0))?;
    Ok(Sample::new(mdelta, mr, md))
}
