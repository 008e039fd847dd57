//! The state engine: construction, transition, and terminal absorption.
//!
//! [`MaxCore`] owns one `(current, previous)` state pair and its
//! [`LifecycleContext`]. [`try_step()`](MaxCore::try_step) is the only
//! mutator. It builds the complete candidate state from `&self` first and
//! commits only once every check has passed, so a rejected step cannot
//! leave a partial update behind.
//!
//! # Ownership model
//!
//! `MaxCore` is a plain value: `Send`, `Sync`, and `Clone`. Stepping takes
//! `&mut self`, so the borrow checker rules out concurrent transitions and
//! guarantees that readers observe only committed snapshots. There is no
//! reset: after a collapse, drop the engine and build a fresh one.

use maxcore_core::validate::{check_stability, forcing_slice, squared_norm, validate_dt};
use maxcore_core::{
    state_hash, ConfigError, LifecycleContext, ParameterSet, ProjectionError, StepError,
    StepEvent, StructuralState,
};
use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::derived::{compute_derived, DerivedFrame};

// Compile-time assertion: engines can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<MaxCore>();
    }
};

// ── StepOutcome ──────────────────────────────────────────────────

/// Successful result of [`MaxCore::try_step()`].
///
/// Finer-grained than [`StepEvent`]: it separates a committed step from a
/// call absorbed by a terminal engine, both of which report
/// [`StepEvent::Normal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// A new state was committed and stability is still positive.
    Committed,
    /// A new state was committed and stability reached zero on this step.
    Collapsed,
    /// The engine was already terminal; nothing was validated or changed.
    Absorbed,
}

impl StepOutcome {
    /// The three-way event reported for this outcome.
    pub fn event(self) -> StepEvent {
        match self {
            Self::Committed | Self::Absorbed => StepEvent::Normal,
            Self::Collapsed => StepEvent::Collapse,
        }
    }
}

// ── MaxCore ──────────────────────────────────────────────────────

/// A single structural dynamics instance.
///
/// # Example
///
/// ```
/// use maxcore_core::{ParameterSet, StepEvent};
/// use maxcore_engine::{EngineConfig, MaxCore};
///
/// let params = ParameterSet {
///     alpha: 1.0, eta: 0.1, beta: 0.5, gamma: 0.1,
///     rho: 0.05, lambda_phi: 0.25, lambda_m: 0.25, kappa_max: 10.0,
/// };
/// let mut core = MaxCore::new(EngineConfig::fresh_genesis(params, 2, None)).unwrap();
/// let mut event = StepEvent::Normal;
/// while event != StepEvent::Collapse {
///     event = core.step(Some(&[1.0, 2.0]), 0.01);
/// }
/// assert!(core.lifecycle().terminal);
/// ```
#[derive(Clone, Debug)]
pub struct MaxCore {
    params: ParameterSet,
    delta_dim: usize,
    delta_max: Option<f64>,
    current: StructuralState,
    previous: StructuralState,
    lifecycle: LifecycleContext,
}

impl MaxCore {
    /// Validate `config` and build an engine from it.
    ///
    /// The initial state becomes both current and previous, the step
    /// counter starts at zero, and the engine starts terminal iff the
    /// initial `kappa` is zero.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by
    /// [`EngineConfig::validate()`]. No engine exists on failure.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            debug!(error = %e, "engine construction rejected");
            return Err(e);
        }
        let initial = config.initial_state;
        let lifecycle = LifecycleContext {
            step_counter: 0,
            terminal: initial.is_collapsed(),
            collapse_emitted: false,
        };
        debug!(
            delta_dim = config.delta_dim,
            delta_max = ?config.delta_max,
            terminal = lifecycle.terminal,
            "engine created"
        );
        Ok(Self {
            params: config.params,
            delta_dim: config.delta_dim,
            delta_max: config.delta_max,
            current: initial,
            previous: initial,
            lifecycle,
        })
    }

    /// Advance one step and report the three-way event.
    ///
    /// Thin wrapper over [`try_step()`](Self::try_step) that discards the
    /// error detail.
    pub fn step(&mut self, delta: Option<&[f64]>, dt: f64) -> StepEvent {
        match self.try_step(delta, dt) {
            Ok(outcome) => outcome.event(),
            Err(_) => StepEvent::Error,
        }
    }

    /// Advance one step.
    ///
    /// A terminal engine returns [`StepOutcome::Absorbed`] before looking
    /// at its inputs, so even a missing forcing vector or a NaN `dt` is
    /// accepted there.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] for a missing or wrongly sized forcing
    /// vector, a non-finite component, a bad `dt`, a `dt` violating
    /// `dt * max_rate < 1`, or a non-finite candidate. Nothing is mutated
    /// on error.
    pub fn try_step(&mut self, delta: Option<&[f64]>, dt: f64) -> Result<StepOutcome, StepError> {
        if self.current.is_collapsed() {
            return Ok(StepOutcome::Absorbed);
        }

        let next = match self.candidate(delta, dt) {
            Ok(next) => next,
            Err(e) => {
                debug!(
                    step_counter = self.lifecycle.step_counter,
                    category = %e.category(),
                    error = %e,
                    "step rejected"
                );
                return Err(e);
            }
        };

        let collapse_now = self.current.kappa > 0.0 && next.kappa == 0.0;

        self.previous = self.current;
        self.current = next;
        self.lifecycle.step_counter += 1;
        self.lifecycle.terminal = self.current.is_collapsed();
        if collapse_now {
            self.lifecycle.collapse_emitted = true;
        }

        trace!(
            step_counter = self.lifecycle.step_counter,
            phi = self.current.phi,
            memory = self.current.memory,
            kappa = self.current.kappa,
            "state committed"
        );

        if collapse_now {
            info!(
                step_counter = self.lifecycle.step_counter,
                kappa_before = self.previous.kappa,
                "collapse"
            );
            Ok(StepOutcome::Collapsed)
        } else {
            Ok(StepOutcome::Committed)
        }
    }

    /// Validate the inputs and compute the next state without committing.
    fn candidate(&self, delta: Option<&[f64]>, dt: f64) -> Result<StructuralState, StepError> {
        let delta = forcing_slice(delta, self.delta_dim)?;
        validate_dt(dt)?;
        check_stability(&self.params, dt)?;

        let mut norm2 = squared_norm(delta)?;
        // Only the squared norm feeds the update, so capping it at the
        // guard's square equals rescaling the vector to norm delta_max.
        if let Some(delta_max) = self.delta_max {
            let cap = delta_max * delta_max;
            if !cap.is_finite() {
                return Err(StepError::NonFiniteGuard { delta_max });
            }
            if norm2 > cap {
                norm2 = cap;
            }
        }

        canonical_update(&self.params, &self.current, norm2, dt)
    }

    /// Read-only copy of the current state.
    pub fn current(&self) -> StructuralState {
        self.current
    }

    /// Read-only copy of the state before the most recent commit.
    pub fn previous(&self) -> StructuralState {
        self.previous
    }

    /// Read-only copy of the lifecycle context.
    pub fn lifecycle(&self) -> LifecycleContext {
        self.lifecycle
    }

    /// The coefficients this engine was built with.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Required forcing-vector length.
    pub fn delta_dim(&self) -> usize {
        self.delta_dim
    }

    /// Configured magnitude guard, if any.
    pub fn delta_max(&self) -> Option<f64> {
        self.delta_max
    }

    /// Whether the engine is in the absorbing terminal state.
    pub fn is_terminal(&self) -> bool {
        self.lifecycle.terminal
    }

    /// Derived diagnostics for the committed snapshot at time step `dt`.
    pub fn derived(&self, dt: f64) -> Result<DerivedFrame, ProjectionError> {
        compute_derived(
            &self.current,
            &self.previous,
            &self.lifecycle,
            &self.params,
            dt,
        )
    }

    /// Bit-exact fingerprint of the committed snapshot.
    pub fn state_hash(&self) -> u64 {
        state_hash(&self.current, &self.previous, &self.lifecycle)
    }
}

// ── Canonical update ─────────────────────────────────────────────

/// Clamp negatives to `+0.0`, leaving every other value (including `-0.0`)
/// untouched.
#[inline]
fn floor_zero(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        x
    }
}

fn ensure_finite(variable: &'static str, value: f64) -> Result<f64, StepError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StepError::NonFiniteCandidate { variable, value })
    }
}

/// One explicit-Euler step of the canonical model.
///
/// Evaluation order is fixed (energy, then memory using the new energy,
/// then stability using both) and each expression associates left to
/// right, which keeps results bit-reproducible across builds.
fn canonical_update(
    p: &ParameterSet,
    s: &StructuralState,
    norm2: f64,
    dt: f64,
) -> Result<StructuralState, StepError> {
    let phi = ensure_finite("phi", s.phi + p.alpha * norm2 - p.eta * s.phi * dt)?;
    let phi = floor_zero(phi);

    let memory = ensure_finite(
        "memory",
        s.memory + p.beta * phi * dt - p.gamma * s.memory * dt,
    )?;
    let memory = floor_zero(memory);

    let kappa = ensure_finite(
        "kappa",
        s.kappa + p.rho * (p.kappa_max - s.kappa) * dt
            - p.lambda_phi * phi * dt
            - p.lambda_m * memory * dt,
    )?;
    let kappa = kappa.clamp(0.0, p.kappa_max);

    Ok(StructuralState::new(phi, memory, kappa))
}
