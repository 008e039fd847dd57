//! Reusable parameter sets and engine builders.
//!
//! Three standard parameter sets cover most scenarios:
//!
//! - [`collapse_params`]: fast load, slow regeneration; constant forcing
//!   `(1, 2)` at `dt = 0.01` collapses at step 39.
//! - [`canonical_params`]: distinct values for every coefficient, so a
//!   swapped term in the update shows up in a single step.
//! - [`eta_dominant_params`]: `eta = 2.0` is the largest rate, which
//!   puts the stability bound at `dt < 0.5`.

use maxcore_core::{ParameterSet, StructuralState};
use maxcore_engine::{EngineConfig, MaxCore};

/// Fast-collapse parameters used by the reference scenario.
pub fn collapse_params() -> ParameterSet {
    ParameterSet {
        alpha: 1.0,
        eta: 0.1,
        beta: 0.5,
        gamma: 0.1,
        rho: 0.05,
        lambda_phi: 0.25,
        lambda_m: 0.25,
        kappa_max: 10.0,
    }
}

/// Parameters with a distinct value per coefficient.
pub fn canonical_params() -> ParameterSet {
    ParameterSet {
        alpha: 2.0,
        eta: 0.5,
        beta: 0.25,
        gamma: 0.5,
        rho: 0.1,
        lambda_phi: 0.2,
        lambda_m: 0.3,
        kappa_max: 10.0,
    }
}

/// Parameters whose largest rate coefficient is `eta = 2.0`.
pub fn eta_dominant_params() -> ParameterSet {
    ParameterSet {
        alpha: 1.0,
        eta: 2.0,
        beta: 0.5,
        gamma: 0.1,
        rho: 0.2,
        lambda_phi: 0.1,
        lambda_m: 0.1,
        kappa_max: 10.0,
    }
}

/// Slow-load parameters that survive dozens of steps under a sweeping
/// forcing before collapsing.
pub fn slow_params() -> ParameterSet {
    ParameterSet {
        alpha: 1.0,
        eta: 0.1,
        beta: 0.5,
        gamma: 0.1,
        rho: 0.2,
        lambda_phi: 0.1,
        lambda_m: 0.1,
        kappa_max: 10.0,
    }
}

/// Engine at genesis `(0, 0, kappa_max)` with no magnitude guard.
///
/// # Panics
///
/// Panics if `params` is invalid or `delta_dim` is zero.
pub fn genesis_engine(params: ParameterSet, delta_dim: usize) -> MaxCore {
    MaxCore::new(EngineConfig::fresh_genesis(params, delta_dim, None))
        .expect("fixture config must be valid")
}

/// Engine starting from `initial` with an optional magnitude guard.
///
/// # Panics
///
/// Panics if the configuration is invalid.
pub fn engine_from(
    params: ParameterSet,
    delta_dim: usize,
    initial: StructuralState,
    delta_max: Option<f64>,
) -> MaxCore {
    MaxCore::new(EngineConfig {
        params,
        delta_dim,
        initial_state: initial,
        delta_max,
    })
    .expect("fixture config must be valid")
}

/// Genesis engine with magnitude guard `delta_max`.
pub fn guarded_engine(params: ParameterSet, delta_dim: usize, delta_max: f64) -> MaxCore {
    engine_from(
        params,
        delta_dim,
        StructuralState::genesis(&params),
        Some(delta_max),
    )
}
