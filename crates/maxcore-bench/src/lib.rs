//! Benchmark profiles for the MAX-Core engine.
//!
//! - [`steady_profile`]: an engine that settles to a fixed point under
//!   [`steady_forcing`] and never collapses, so every benchmark iteration
//!   runs the full transition rather than the terminal short-circuit.
//! - [`collapse_profile`]: the fast-collapse reference scenario
//!   (collapse at step 39 under constant forcing `(1, 2)` at `dt = 0.01`).

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use maxcore_core::ParameterSet;
use maxcore_engine::EngineConfig;

/// Time step used by every profile; well inside the stability bound.
pub const PROFILE_DT: f64 = 0.01;

/// Genesis config whose fixed point under [`steady_forcing`] sits close to
/// `kappa_max`.
pub fn steady_profile(delta_dim: usize) -> EngineConfig {
    let params = ParameterSet {
        alpha: 1.0,
        eta: 0.5,
        beta: 0.5,
        gamma: 0.5,
        rho: 0.5,
        lambda_phi: 0.1,
        lambda_m: 0.1,
        kappa_max: 10.0,
    };
    EngineConfig::fresh_genesis(params, delta_dim, None)
}

/// Same as [`steady_profile`] with a magnitude guard that always binds for
/// [`steady_forcing`].
pub fn guarded_steady_profile(delta_dim: usize) -> EngineConfig {
    EngineConfig {
        delta_max: Some(1e-4),
        ..steady_profile(delta_dim)
    }
}

/// Forcing with squared norm `1e-6` spread evenly over `delta_dim`
/// components.
pub fn steady_forcing(delta_dim: usize) -> Vec<f64> {
    let component = (1e-6 / delta_dim as f64).sqrt();
    vec![component; delta_dim]
}

/// The fast-collapse reference scenario.
pub fn collapse_profile() -> EngineConfig {
    let params = ParameterSet {
        alpha: 1.0,
        eta: 0.1,
        beta: 0.5,
        gamma: 0.1,
        rho: 0.05,
        lambda_phi: 0.25,
        lambda_m: 0.25,
        kappa_max: 10.0,
    };
    EngineConfig::fresh_genesis(params, 2, None)
}
