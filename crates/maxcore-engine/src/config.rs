//! Engine configuration and validation.
//!
//! [`EngineConfig`] is the builder-input for [`MaxCore::new`](crate::MaxCore::new).
//! [`validate()`](EngineConfig::validate) checks every construction
//! invariant without producing an engine, so drivers can pre-flight a
//! configuration.

use maxcore_core::validate::{
    validate_dimension, validate_guard, validate_initial_state, validate_params,
};
use maxcore_core::{ParameterSet, StructuralState};

pub use maxcore_core::ConfigError;

/// Complete configuration for constructing an engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Canonical coefficients.
    pub params: ParameterSet,
    /// Required length of every forcing vector. Must be at least 1.
    pub delta_dim: usize,
    /// State committed as both current and previous at construction.
    pub initial_state: StructuralState,
    /// Optional cap on the forcing vector's Euclidean norm.
    pub delta_max: Option<f64>,
}

impl EngineConfig {
    /// Configuration starting from the genesis state `(0, 0, kappa_max)`.
    pub fn fresh_genesis(params: ParameterSet, delta_dim: usize, delta_max: Option<f64>) -> Self {
        Self {
            params,
            delta_dim,
            initial_state: StructuralState::genesis(&params),
            delta_max,
        }
    }

    /// Validate all construction invariants.
    ///
    /// Checks run in a fixed order (dimension, parameters, initial state,
    /// guard) and the first failure is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimension(self.delta_dim)?;
        validate_params(&self.params)?;
        validate_initial_state(&self.initial_state, self.params.kappa_max)?;
        validate_guard(self.delta_max)?;
        Ok(())
    }
}
