//! Read-only diagnostic projection over a committed snapshot.
//!
//! [`compute_derived`] is a pure function: the same inputs always give the
//! same [`DerivedFrame`], and it never touches an engine. It is what
//! [`MaxCore::derived()`](crate::MaxCore::derived) calls with the engine's
//! own snapshot.

use maxcore_core::{LifecycleContext, ParameterSet, ProjectionError, StructuralState};

/// Metrics derived from one committed `(current, previous)` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedFrame {
    /// `current.phi - previous.phi`.
    pub d_phi: f64,
    /// `current.memory - previous.memory`.
    pub d_memory: f64,
    /// `current.kappa - previous.kappa`.
    pub d_kappa: f64,
    /// `d_phi / dt`.
    pub phi_rate: f64,
    /// `d_memory / dt`.
    pub memory_rate: f64,
    /// `d_kappa / dt`.
    pub kappa_rate: f64,
    /// `current.kappa / kappa_max`, clamped to `[0, 1]`.
    pub kappa_ratio: f64,
    /// Distance to collapse; equal to `current.kappa`.
    pub kappa_distance: f64,
    /// `lambda_phi * phi + lambda_m * memory`.
    pub load_term: f64,
    /// `rho * (kappa_max - kappa)`.
    pub regen_term: f64,
    /// Mirror of [`LifecycleContext::step_counter`].
    pub step_counter: u64,
    /// Mirror of [`LifecycleContext::terminal`].
    pub terminal: bool,
    /// Mirror of [`LifecycleContext::collapse_emitted`].
    pub collapse_emitted: bool,
}

fn finite_input(what: &'static str, value: f64) -> Result<f64, ProjectionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::NonFiniteInput { what })
    }
}

fn finite_output(what: &'static str, value: f64) -> Result<f64, ProjectionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::NonFiniteOutput { what })
    }
}

/// Project a snapshot into a [`DerivedFrame`].
///
/// # Errors
///
/// Fails on a non-finite state component or used coefficient, on
/// `kappa_max <= 0`, on a non-finite or non-positive `dt`, on any
/// non-finite metric, and on a negative `current.kappa`.
pub fn compute_derived(
    current: &StructuralState,
    previous: &StructuralState,
    lifecycle: &LifecycleContext,
    params: &ParameterSet,
    dt: f64,
) -> Result<DerivedFrame, ProjectionError> {
    finite_input("current.phi", current.phi)?;
    finite_input("current.memory", current.memory)?;
    finite_input("current.kappa", current.kappa)?;
    finite_input("previous.phi", previous.phi)?;
    finite_input("previous.memory", previous.memory)?;
    finite_input("previous.kappa", previous.kappa)?;
    finite_input("lambda_phi", params.lambda_phi)?;
    finite_input("lambda_m", params.lambda_m)?;
    finite_input("rho", params.rho)?;
    let kappa_max = finite_input("kappa_max", params.kappa_max)?;
    if kappa_max <= 0.0 {
        return Err(ProjectionError::InvalidKappaMax { kappa_max });
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ProjectionError::InvalidDt { dt });
    }

    let d_phi = finite_output("d_phi", current.phi - previous.phi)?;
    let d_memory = finite_output("d_memory", current.memory - previous.memory)?;
    let d_kappa = finite_output("d_kappa", current.kappa - previous.kappa)?;

    let phi_rate = finite_output("phi_rate", d_phi / dt)?;
    let memory_rate = finite_output("memory_rate", d_memory / dt)?;
    let kappa_rate = finite_output("kappa_rate", d_kappa / dt)?;

    let kappa_ratio = finite_output("kappa_ratio", current.kappa / kappa_max)?.clamp(0.0, 1.0);

    let kappa_distance = current.kappa;
    if kappa_distance < 0.0 {
        return Err(ProjectionError::NegativeDistance {
            kappa: kappa_distance,
        });
    }

    let load_term = finite_output(
        "load_term",
        params.lambda_phi * current.phi + params.lambda_m * current.memory,
    )?;
    let regen_term = finite_output(
        "regen_term",
        params.rho * (kappa_max - current.kappa),
    )?;

    Ok(DerivedFrame {
        d_phi,
        d_memory,
        d_kappa,
        phi_rate,
        memory_rate,
        kappa_rate,
        kappa_ratio,
        kappa_distance,
        load_term,
        regen_term,
        step_counter: lifecycle.step_counter,
        terminal: lifecycle.terminal,
        collapse_emitted: lifecycle.collapse_emitted,
    })
}
