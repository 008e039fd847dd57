//! Value types for parameters, committed state, and lifecycle metadata.
//!
//! Everything here is `Copy`: the engine hands out copies of its snapshots,
//! never references into its own storage.

use std::fmt;

/// The eight canonical coefficients of the update rule.
///
/// Every coefficient must be finite and strictly positive; this is checked
/// once by [`validate_params`](crate::validate::validate_params) when an
/// engine is built, after which the set is immutable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    /// Energy injection per unit of squared forcing norm.
    pub alpha: f64,
    /// Energy decay rate.
    pub eta: f64,
    /// Memory gain from energy.
    pub beta: f64,
    /// Memory decay rate.
    pub gamma: f64,
    /// Stability regeneration rate toward `kappa_max`.
    pub rho: f64,
    /// Stability load from energy.
    pub lambda_phi: f64,
    /// Stability load from memory.
    pub lambda_m: f64,
    /// Upper bound for stability.
    pub kappa_max: f64,
}

impl ParameterSet {
    /// Coefficient names in declaration order, matching [`values`](Self::values).
    pub const NAMES: [&'static str; 8] = [
        "alpha",
        "eta",
        "beta",
        "gamma",
        "rho",
        "lambda_phi",
        "lambda_m",
        "kappa_max",
    ];

    /// All coefficients in declaration order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.alpha,
            self.eta,
            self.beta,
            self.gamma,
            self.rho,
            self.lambda_phi,
            self.lambda_m,
            self.kappa_max,
        ]
    }

    /// `(name, value)` pairs in declaration order.
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::NAMES.into_iter().zip(self.values())
    }

    /// Largest of the five rate coefficients (`eta`, `gamma`, `rho`,
    /// `lambda_phi`, `lambda_m`).
    ///
    /// The explicit-Euler step is only accepted while `dt * max_rate() < 1`.
    pub fn max_rate(&self) -> f64 {
        self.eta
            .max(self.gamma)
            .max(self.rho)
            .max(self.lambda_phi)
            .max(self.lambda_m)
    }
}

/// A committed `(phi, memory, kappa)` snapshot.
///
/// After every successful commit `phi >= 0`, `memory >= 0` and
/// `0 <= kappa <= kappa_max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructuralState {
    /// Energy.
    pub phi: f64,
    /// Accumulated memory of past energy.
    pub memory: f64,
    /// Stability; zero is terminal.
    pub kappa: f64,
}

impl StructuralState {
    /// Build a state from its three components.
    pub const fn new(phi: f64, memory: f64, kappa: f64) -> Self {
        Self { phi, memory, kappa }
    }

    /// The genesis state for `params`: no energy, no memory, full stability.
    pub fn genesis(params: &ParameterSet) -> Self {
        Self::new(0.0, 0.0, params.kappa_max)
    }

    /// Whether all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.phi.is_finite() && self.memory.is_finite() && self.kappa.is_finite()
    }

    /// Whether stability has reached exactly zero.
    pub fn is_collapsed(&self) -> bool {
        self.kappa == 0.0
    }

    /// Bitwise equality of all three components.
    ///
    /// Stricter than `==`: distinguishes `0.0` from `-0.0` and treats
    /// identical NaN payloads as equal.
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.phi.to_bits() == other.phi.to_bits()
            && self.memory.to_bits() == other.memory.to_bits()
            && self.kappa.to_bits() == other.kappa.to_bits()
    }
}

impl fmt::Display for StructuralState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phi={} memory={} kappa={}",
            self.phi, self.memory, self.kappa
        )
    }
}

/// Lifecycle metadata committed together with the state pair.
///
/// `terminal` always equals `current.kappa == 0`. `collapse_emitted` is
/// monotonic: once set it stays set for the life of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LifecycleContext {
    /// Number of successful commits.
    pub step_counter: u64,
    /// Whether the engine is in the absorbing terminal state.
    pub terminal: bool,
    /// Whether a collapse event has ever been emitted.
    pub collapse_emitted: bool,
}

/// The three discriminated outcomes of a transition.
///
/// Values are ABI-stable and match `MaxcoreEvent` in the C bridge.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepEvent {
    /// A step was committed without collapse, or the engine is terminal
    /// and silently absorbed the call.
    Normal = 0,
    /// This step committed `kappa == 0`. Emitted at most once per engine.
    Collapse = 1,
    /// The step was rejected; nothing was mutated.
    Error = 2,
}

impl StepEvent {
    /// Whether this is [`StepEvent::Error`].
    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    /// Whether this is [`StepEvent::Collapse`].
    pub fn is_collapse(self) -> bool {
        self == Self::Collapse
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Collapse => write!(f, "COLLAPSE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}
