//! Test fixtures and deterministic forcing generators for MAX-Core
//! development.
//!
//! Provides standard parameter sets and engine builders ([`fixtures`]),
//! seeded and sweeping forcing sequences, and small drivers for running an
//! engine until it collapses while recording what happened.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use maxcore_core::{LifecycleContext, StepEvent, StructuralState};
use maxcore_engine::MaxCore;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use fixtures::{
    canonical_params, collapse_params, engine_from, eta_dominant_params, genesis_engine,
    guarded_engine, slow_params,
};

// ── Forcing generators ──────────────────────────────────────────────

/// Deterministic pseudo-random forcing vectors.
///
/// Each component is drawn uniformly from `[-amplitude, amplitude)` by a
/// ChaCha8 stream seeded from `seed`, so two generators with the same seed
/// produce bit-identical sequences on every platform.
pub struct SeededForcing {
    rng: ChaCha8Rng,
    dim: usize,
    amplitude: f64,
}

impl SeededForcing {
    pub fn new(seed: u64, dim: usize, amplitude: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            dim,
            amplitude,
        }
    }

    /// Draw the next forcing vector.
    pub fn next_vector(&mut self) -> Vec<f64> {
        (0..self.dim)
            .map(|_| (self.rng.random::<f64>() * 2.0 - 1.0) * self.amplitude)
            .collect()
    }
}

impl Iterator for SeededForcing {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        Some(self.next_vector())
    }
}

/// The slowly sweeping two-component forcing used by long-run tests:
/// `(1 + 0.001 * (i % 100), 2 - 0.001 * (i % 100))`.
pub fn sweep_forcing(i: u64) -> [f64; 2] {
    let phase = (i % 100) as f64;
    [1.0 + 0.001 * phase, 2.0 - 0.001 * phase]
}

// ── Drivers ─────────────────────────────────────────────────────────

/// One recorded transition, as returned by [`run_trace`].
///
/// Captured right after the step, so a rejected step records the
/// unchanged state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRecord {
    /// What the step reported.
    pub event: StepEvent,
    /// Current state after the step.
    pub current: StructuralState,
    /// Lifecycle after the step.
    pub lifecycle: LifecycleContext,
}

/// Step `core` with `forcing(i)` for `i` in `0..max_steps`, stopping
/// after the first `Collapse` or `Error`.
///
/// Returns every recorded transition in order.
pub fn run_trace<F, V>(core: &mut MaxCore, dt: f64, max_steps: u64, mut forcing: F) -> Vec<StepRecord>
where
    F: FnMut(u64) -> V,
    V: AsRef<[f64]>,
{
    let mut trace = Vec::new();
    for i in 0..max_steps {
        let delta = forcing(i);
        let event = core.step(Some(delta.as_ref()), dt);
        trace.push(StepRecord {
            event,
            current: core.current(),
            lifecycle: core.lifecycle(),
        });
        if event != StepEvent::Normal {
            break;
        }
    }
    trace
}

/// Step with a constant forcing until collapse.
///
/// Returns the step counter at which `Collapse` was reported, or `None` if
/// the engine did not collapse within `max_steps` (or a step errored).
pub fn run_until_collapse(core: &mut MaxCore, delta: &[f64], dt: f64, max_steps: u64) -> Option<u64> {
    let trace = run_trace(core, dt, max_steps, |_| delta);
    match trace.last() {
        Some(r) if r.event == StepEvent::Collapse => Some(r.lifecycle.step_counter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_forcing_is_reproducible() {
        let a: Vec<_> = SeededForcing::new(42, 3, 2.0).take(10).collect();
        let b: Vec<_> = SeededForcing::new(42, 3, 2.0).take(10).collect();
        assert_eq!(a, b);
        assert!(a.iter().flatten().all(|x| (-2.0..2.0).contains(x)));
        assert!(a.iter().all(|v| v.len() == 3));
    }

    #[test]
    fn different_seeds_differ() {
        let a = SeededForcing::new(1, 4, 1.0).next_vector();
        let b = SeededForcing::new(2, 4, 1.0).next_vector();
        assert_ne!(a, b);
    }

    #[test]
    fn sweep_wraps_every_hundred_steps() {
        assert_eq!(sweep_forcing(0), [1.0, 2.0]);
        assert_eq!(sweep_forcing(100), sweep_forcing(0));
        assert_eq!(sweep_forcing(37), sweep_forcing(137));
    }

    #[test]
    fn run_trace_stops_on_error() {
        let mut core = genesis_engine(collapse_params(), 2);
        let trace = run_trace(&mut core, 0.01, 10, |i| {
            if i == 3 {
                vec![1.0]
            } else {
                vec![1.0, 2.0]
            }
        });
        assert_eq!(trace.len(), 4);
        assert_eq!(trace[3].event, StepEvent::Error);
        assert_eq!(trace[3].lifecycle.step_counter, 3);
        assert!(trace[3].current.bits_eq(&trace[2].current));
        assert_eq!(trace[3].lifecycle, trace[2].lifecycle);
    }

    #[test]
    fn records_capture_state_after_each_step() {
        let mut core = genesis_engine(collapse_params(), 2);
        let trace = run_trace(&mut core, 0.01, 3, |_| [1.0, 2.0]);
        assert_eq!(trace.len(), 3);
        for (i, r) in trace.iter().enumerate() {
            assert_eq!(r.event, StepEvent::Normal);
            assert_eq!(r.lifecycle.step_counter, i as u64 + 1);
            assert!(!r.lifecycle.terminal);
        }
        // First step from genesis: phi = alpha * |(1, 2)|^2 = 5.
        assert_eq!(trace[0].current.phi, 5.0);
        assert!(trace[2].current.bits_eq(&core.current()));
        assert_eq!(trace[2].lifecycle, core.lifecycle());
    }
}
