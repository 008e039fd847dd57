//! Error types for MAX-Core.
//!
//! Organized by when they can occur: construction ([`ConfigError`]),
//! transition ([`StepError`]), and derived projection
//! ([`ProjectionError`]). All are local and recoverable; none leaves an
//! engine in a modified state.

use std::error::Error;
use std::fmt;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an engine configuration.
///
/// Construction either yields a fully valid engine or one of these; no
/// partially formed engine ever exists.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The forcing-vector dimension is zero.
    ZeroDimension,
    /// A coefficient is NaN, infinite, zero, or negative.
    InvalidParameter {
        /// Coefficient name (e.g. `"lambda_phi"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The initial state violates its invariants.
    InvalidInitialState {
        /// Which invariant was violated.
        reason: String,
    },
    /// The magnitude guard is NaN, infinite, zero, or negative.
    InvalidGuard {
        /// The rejected threshold.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "forcing dimension must be at least 1"),
            Self::InvalidParameter { name, value } => {
                write!(f, "parameter {name} must be finite and > 0, got {value}")
            }
            Self::InvalidInitialState { reason } => {
                write!(f, "invalid initial state: {reason}")
            }
            Self::InvalidGuard { value } => {
                write!(f, "magnitude guard must be finite and > 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── StepError ──────────────────────────────────────────────────────

/// Coarse classification of a [`StepError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller supplied a malformed forcing vector or time step.
    InvalidInput,
    /// The time step violates the explicit-Euler stability bound.
    NumericInstability,
    /// An intermediate or candidate value was not finite.
    ComputationFailure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::NumericInstability => write!(f, "numeric instability"),
            Self::ComputationFailure => write!(f, "computation failure"),
        }
    }
}

/// Reasons a transition was rejected.
///
/// A rejected transition leaves current state, previous state, and
/// lifecycle bit-identical to their values before the call. The engine
/// stays usable; retrying with corrected input needs no reconstruction.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// No forcing vector was supplied.
    MissingForcing,
    /// The forcing vector length differs from the configured dimension.
    DimensionMismatch {
        /// Configured dimension.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The rejected time step.
        dt: f64,
    },
    /// The largest rate coefficient is not finite.
    NonFiniteRate {
        /// The offending maximum rate.
        max_rate: f64,
    },
    /// `dt * max_rate` is not strictly below 1.
    UnstableTimestep {
        /// The requested time step.
        dt: f64,
        /// The largest rate coefficient.
        max_rate: f64,
    },
    /// A forcing component is NaN or infinite.
    NonFiniteForcing {
        /// Index of the first bad component.
        index: usize,
        /// Its value.
        value: f64,
    },
    /// The squared norm of the forcing vector overflowed.
    NonFiniteNorm {
        /// The accumulated squared norm.
        norm2: f64,
    },
    /// The squared magnitude guard overflowed.
    NonFiniteGuard {
        /// The configured guard.
        delta_max: f64,
    },
    /// A candidate state component was not finite.
    NonFiniteCandidate {
        /// Which state variable (`"phi"`, `"memory"`, `"kappa"`).
        variable: &'static str,
        /// The candidate value.
        value: f64,
    },
}

impl StepError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingForcing
            | Self::DimensionMismatch { .. }
            | Self::InvalidDt { .. }
            | Self::NonFiniteForcing { .. } => ErrorCategory::InvalidInput,
            Self::NonFiniteRate { .. } | Self::UnstableTimestep { .. } => {
                ErrorCategory::NumericInstability
            }
            Self::NonFiniteNorm { .. }
            | Self::NonFiniteGuard { .. }
            | Self::NonFiniteCandidate { .. } => ErrorCategory::ComputationFailure,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingForcing => write!(f, "forcing vector is missing"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "forcing vector has length {got}, expected {expected}")
            }
            Self::InvalidDt { dt } => write!(f, "dt must be finite and > 0, got {dt}"),
            Self::NonFiniteRate { max_rate } => {
                write!(f, "maximum rate coefficient is not finite: {max_rate}")
            }
            Self::UnstableTimestep { dt, max_rate } => write!(
                f,
                "dt * max_rate must be < 1 (dt={dt}, max_rate={max_rate})"
            ),
            Self::NonFiniteForcing { index, value } => {
                write!(f, "forcing component {index} is not finite: {value}")
            }
            Self::NonFiniteNorm { norm2 } => {
                write!(f, "squared forcing norm is not finite: {norm2}")
            }
            Self::NonFiniteGuard { delta_max } => {
                write!(f, "squared magnitude guard is not finite (delta_max={delta_max})")
            }
            Self::NonFiniteCandidate { variable, value } => {
                write!(f, "candidate {variable} is not finite: {value}")
            }
        }
    }
}

impl Error for StepError {}

// ── ProjectionError ────────────────────────────────────────────────

/// Reasons the derived projection produced no frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectionError {
    /// A state or parameter input was NaN or infinite.
    NonFiniteInput {
        /// Which input (e.g. `"current.phi"`, `"rho"`).
        what: &'static str,
    },
    /// `kappa_max` is not strictly positive.
    InvalidKappaMax {
        /// The rejected bound.
        kappa_max: f64,
    },
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The rejected time step.
        dt: f64,
    },
    /// A computed metric was NaN or infinite.
    NonFiniteOutput {
        /// Which metric (e.g. `"phi_rate"`).
        what: &'static str,
    },
    /// The current stability is negative.
    NegativeDistance {
        /// The offending `kappa`.
        kappa: f64,
    },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteInput { what } => write!(f, "projection input {what} is not finite"),
            Self::InvalidKappaMax { kappa_max } => {
                write!(f, "kappa_max must be > 0, got {kappa_max}")
            }
            Self::InvalidDt { dt } => write!(f, "dt must be finite and > 0, got {dt}"),
            Self::NonFiniteOutput { what } => write!(f, "derived {what} is not finite"),
            Self::NegativeDistance { kappa } => {
                write!(f, "distance to collapse is negative (kappa={kappa})")
            }
        }
    }
}

impl Error for ProjectionError {}
