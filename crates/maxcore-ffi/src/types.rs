//! `repr(C)` mirrors of the engine's value types.
//!
//! Booleans cross the boundary as `u8` (0 or 1).

use maxcore_core::{LifecycleContext, ParameterSet, StepEvent, StructuralState};
use maxcore_engine::DerivedFrame;

/// The eight canonical coefficients.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxcoreParams {
    /// Energy injection per unit of squared forcing norm.
    pub alpha: f64,
    /// Energy decay rate.
    pub eta: f64,
    /// Memory gain from energy.
    pub beta: f64,
    /// Memory decay rate.
    pub gamma: f64,
    /// Stability regeneration rate.
    pub rho: f64,
    /// Stability load from energy.
    pub lambda_phi: f64,
    /// Stability load from memory.
    pub lambda_m: f64,
    /// Upper bound for stability.
    pub kappa_max: f64,
}

const _: () = assert!(std::mem::size_of::<MaxcoreParams>() == 64);

impl From<MaxcoreParams> for ParameterSet {
    fn from(p: MaxcoreParams) -> Self {
        ParameterSet {
            alpha: p.alpha,
            eta: p.eta,
            beta: p.beta,
            gamma: p.gamma,
            rho: p.rho,
            lambda_phi: p.lambda_phi,
            lambda_m: p.lambda_m,
            kappa_max: p.kappa_max,
        }
    }
}

impl From<ParameterSet> for MaxcoreParams {
    fn from(p: ParameterSet) -> Self {
        MaxcoreParams {
            alpha: p.alpha,
            eta: p.eta,
            beta: p.beta,
            gamma: p.gamma,
            rho: p.rho,
            lambda_phi: p.lambda_phi,
            lambda_m: p.lambda_m,
            kappa_max: p.kappa_max,
        }
    }
}

/// A `(phi, memory, kappa)` snapshot.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxcoreState {
    /// Energy.
    pub phi: f64,
    /// Memory.
    pub memory: f64,
    /// Stability.
    pub kappa: f64,
}

const _: () = assert!(std::mem::size_of::<MaxcoreState>() == 24);

impl From<MaxcoreState> for StructuralState {
    fn from(s: MaxcoreState) -> Self {
        StructuralState::new(s.phi, s.memory, s.kappa)
    }
}

impl From<StructuralState> for MaxcoreState {
    fn from(s: StructuralState) -> Self {
        MaxcoreState {
            phi: s.phi,
            memory: s.memory,
            kappa: s.kappa,
        }
    }
}

/// Lifecycle metadata.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxcoreLifecycle {
    /// Number of successful commits.
    pub step_counter: u64,
    /// 1 if the engine is terminal.
    pub terminal: u8,
    /// 1 once a collapse has been emitted.
    pub collapse_emitted: u8,
}

const _: () = assert!(std::mem::size_of::<MaxcoreLifecycle>() == 16);

impl From<LifecycleContext> for MaxcoreLifecycle {
    fn from(lc: LifecycleContext) -> Self {
        MaxcoreLifecycle {
            step_counter: lc.step_counter,
            terminal: u8::from(lc.terminal),
            collapse_emitted: u8::from(lc.collapse_emitted),
        }
    }
}

/// Derived diagnostics; see [`DerivedFrame`] for field meanings.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaxcoreDerivedFrame {
    /// Energy change over the last commit.
    pub d_phi: f64,
    /// Memory change over the last commit.
    pub d_memory: f64,
    /// Stability change over the last commit.
    pub d_kappa: f64,
    /// `d_phi / dt`.
    pub phi_rate: f64,
    /// `d_memory / dt`.
    pub memory_rate: f64,
    /// `d_kappa / dt`.
    pub kappa_rate: f64,
    /// `kappa / kappa_max` clamped to `[0, 1]`.
    pub kappa_ratio: f64,
    /// Distance to collapse.
    pub kappa_distance: f64,
    /// Stability load.
    pub load_term: f64,
    /// Stability regeneration.
    pub regen_term: f64,
    /// Number of successful commits.
    pub step_counter: u64,
    /// 1 if the engine is terminal.
    pub terminal: u8,
    /// 1 once a collapse has been emitted.
    pub collapse_emitted: u8,
}

const _: () = assert!(std::mem::size_of::<MaxcoreDerivedFrame>() == 96);

impl From<DerivedFrame> for MaxcoreDerivedFrame {
    fn from(f: DerivedFrame) -> Self {
        MaxcoreDerivedFrame {
            d_phi: f.d_phi,
            d_memory: f.d_memory,
            d_kappa: f.d_kappa,
            phi_rate: f.phi_rate,
            memory_rate: f.memory_rate,
            kappa_rate: f.kappa_rate,
            kappa_ratio: f.kappa_ratio,
            kappa_distance: f.kappa_distance,
            load_term: f.load_term,
            regen_term: f.regen_term,
            step_counter: f.step_counter,
            terminal: u8::from(f.terminal),
            collapse_emitted: u8::from(f.collapse_emitted),
        }
    }
}

/// Outcome of `maxcore_step`.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxcoreEvent {
    /// Committed without collapse, or absorbed by a terminal engine.
    Normal = 0,
    /// Committed and stability reached zero on this step.
    Collapse = 1,
    /// Rejected; nothing changed. See `maxcore_last_error`.
    Error = 2,
}

impl From<StepEvent> for MaxcoreEvent {
    fn from(ev: StepEvent) -> Self {
        match ev {
            StepEvent::Normal => MaxcoreEvent::Normal,
            StepEvent::Collapse => MaxcoreEvent::Collapse,
            StepEvent::Error => MaxcoreEvent::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_values_match_core() {
        for ev in [StepEvent::Normal, StepEvent::Collapse, StepEvent::Error] {
            assert_eq!(MaxcoreEvent::from(ev) as i32, ev as u8 as i32);
        }
    }

    #[test]
    fn lifecycle_flags_are_zero_or_one() {
        let lc = MaxcoreLifecycle::from(LifecycleContext {
            step_counter: 9,
            terminal: true,
            collapse_emitted: false,
        });
        assert_eq!(lc.step_counter, 9);
        assert_eq!(lc.terminal, 1);
        assert_eq!(lc.collapse_emitted, 0);
    }

    #[test]
    fn params_convert_both_ways() {
        let p = ParameterSet {
            alpha: 1.0,
            eta: 2.0,
            beta: 3.0,
            gamma: 4.0,
            rho: 5.0,
            lambda_phi: 6.0,
            lambda_m: 7.0,
            kappa_max: 8.0,
        };
        assert_eq!(ParameterSet::from(MaxcoreParams::from(p)), p);
    }
}
