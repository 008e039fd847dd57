//! Pure validation predicates.
//!
//! Construction runs the `validate_*` checks once; the transition re-runs
//! the input checks ([`forcing_slice`], [`validate_dt`],
//! [`check_stability`], [`squared_norm`]) on every call, in that order.
//! None of these functions has side effects.

use crate::error::{ConfigError, StepError};
use crate::types::{ParameterSet, StructuralState};

/// `x` is finite and strictly greater than zero.
#[inline]
pub fn is_finite_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// The forcing dimension must be at least 1.
pub fn validate_dimension(delta_dim: usize) -> Result<(), ConfigError> {
    if delta_dim == 0 {
        return Err(ConfigError::ZeroDimension);
    }
    Ok(())
}

/// Every coefficient must be finite and strictly positive.
///
/// Reports the first offending coefficient in declaration order.
pub fn validate_params(params: &ParameterSet) -> Result<(), ConfigError> {
    for (name, value) in params.named_values() {
        if !is_finite_positive(value) {
            return Err(ConfigError::InvalidParameter { name, value });
        }
    }
    Ok(())
}

/// The initial state must be finite, non-negative, and have
/// `kappa <= kappa_max`.
pub fn validate_initial_state(
    state: &StructuralState,
    kappa_max: f64,
) -> Result<(), ConfigError> {
    let invalid = |reason: String| Err(ConfigError::InvalidInitialState { reason });
    if !state.is_finite() {
        return invalid(format!("components must be finite ({state})"));
    }
    if state.phi < 0.0 {
        return invalid(format!("phi must be >= 0, got {}", state.phi));
    }
    if state.memory < 0.0 {
        return invalid(format!("memory must be >= 0, got {}", state.memory));
    }
    if state.kappa < 0.0 {
        return invalid(format!("kappa must be >= 0, got {}", state.kappa));
    }
    if state.kappa > kappa_max {
        return invalid(format!(
            "kappa {} exceeds kappa_max {kappa_max}",
            state.kappa
        ));
    }
    Ok(())
}

/// A configured magnitude guard must be finite and strictly positive.
pub fn validate_guard(delta_max: Option<f64>) -> Result<(), ConfigError> {
    match delta_max {
        Some(value) if !is_finite_positive(value) => Err(ConfigError::InvalidGuard { value }),
        _ => Ok(()),
    }
}

/// The forcing vector must be present with exactly `delta_dim` components.
pub fn forcing_slice(delta: Option<&[f64]>, delta_dim: usize) -> Result<&[f64], StepError> {
    let delta = delta.ok_or(StepError::MissingForcing)?;
    if delta.len() != delta_dim {
        return Err(StepError::DimensionMismatch {
            expected: delta_dim,
            got: delta.len(),
        });
    }
    Ok(delta)
}

/// `dt` must be finite and strictly positive.
pub fn validate_dt(dt: f64) -> Result<(), StepError> {
    if !is_finite_positive(dt) {
        return Err(StepError::InvalidDt { dt });
    }
    Ok(())
}

/// Explicit-Euler stability bound: `dt * max_rate < 1`, strictly.
pub fn check_stability(params: &ParameterSet, dt: f64) -> Result<(), StepError> {
    let max_rate = params.max_rate();
    if !max_rate.is_finite() {
        return Err(StepError::NonFiniteRate { max_rate });
    }
    let product = dt * max_rate;
    if !product.is_finite() || !(product < 1.0) {
        return Err(StepError::UnstableTimestep { dt, max_rate });
    }
    Ok(())
}

/// Sum of squares of `delta`, accumulated in index order.
///
/// Every component must be finite and the sum must be finite.
pub fn squared_norm(delta: &[f64]) -> Result<f64, StepError> {
    let mut norm2 = 0.0;
    for (index, &value) in delta.iter().enumerate() {
        if !value.is_finite() {
            return Err(StepError::NonFiniteForcing { index, value });
        }
        norm2 += value * value;
    }
    if !norm2.is_finite() || norm2 < 0.0 {
        return Err(StepError::NonFiniteNorm { norm2 });
    }
    Ok(norm2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> ParameterSet {
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

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(validate_dimension(0), Err(ConfigError::ZeroDimension));
        assert!(validate_dimension(1).is_ok());
    }

    #[test]
    fn each_parameter_checked_by_name() {
        for (i, name) in ParameterSet::NAMES.iter().enumerate() {
            for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
                let mut values = params().values();
                values[i] = bad;
                let p = ParameterSet {
                    alpha: values[0],
                    eta: values[1],
                    beta: values[2],
                    gamma: values[3],
                    rho: values[4],
                    lambda_phi: values[5],
                    lambda_m: values[6],
                    kappa_max: values[7],
                };
                match validate_params(&p) {
                    Err(ConfigError::InvalidParameter { name: got, .. }) => {
                        assert_eq!(got, *name)
                    }
                    other => panic!("{name}={bad} should be rejected, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn initial_state_bounds() {
        let ok = StructuralState::new(0.0, 0.0, 10.0);
        assert!(validate_initial_state(&ok, 10.0).is_ok());
        assert!(validate_initial_state(&StructuralState::new(0.0, 0.0, 0.0), 10.0).is_ok());

        let bad = [
            StructuralState::new(-1e-9, 0.0, 1.0),
            StructuralState::new(0.0, -1.0, 1.0),
            StructuralState::new(0.0, 0.0, -0.5),
            StructuralState::new(0.0, 0.0, 10.000001),
            StructuralState::new(f64::NAN, 0.0, 1.0),
            StructuralState::new(0.0, f64::INFINITY, 1.0),
        ];
        for s in &bad {
            assert!(
                matches!(
                    validate_initial_state(s, 10.0),
                    Err(ConfigError::InvalidInitialState { .. })
                ),
                "{s} should be rejected"
            );
        }
    }

    #[test]
    fn guard_optional_but_positive() {
        assert!(validate_guard(None).is_ok());
        assert!(validate_guard(Some(5.0)).is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            assert!(validate_guard(Some(bad)).is_err(), "guard {bad} accepted");
        }
    }

    #[test]
    fn forcing_shape_checked() {
        let v = [1.0, 2.0];
        assert_eq!(forcing_slice(None, 2), Err(StepError::MissingForcing));
        assert_eq!(
            forcing_slice(Some(&v[..1]), 2),
            Err(StepError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(forcing_slice(Some(&v), 2), Ok(&v[..]));
    }

    #[test]
    fn dt_must_be_positive_and_finite() {
        assert!(validate_dt(0.01).is_ok());
        for bad in [0.0, -0.0, -0.01, f64::NAN, f64::INFINITY] {
            assert!(validate_dt(bad).is_err(), "dt {bad} accepted");
        }
    }

    #[test]
    fn stability_bound_is_strict() {
        // max_rate = eta = 2.0
        assert!(check_stability(&params(), 0.49).is_ok());
        assert_eq!(
            check_stability(&params(), 0.5),
            Err(StepError::UnstableTimestep {
                dt: 0.5,
                max_rate: 2.0
            })
        );
        assert!(check_stability(&params(), f64::MAX).is_err());
    }

    #[test]
    fn squared_norm_accumulates_in_order() {
        assert_eq!(squared_norm(&[3.0, 4.0]), Ok(25.0));
        assert_eq!(squared_norm(&[0.0]), Ok(0.0));
        // First bad component wins.
        assert!(matches!(
            squared_norm(&[1.0, f64::NAN, f64::INFINITY]),
            Err(StepError::NonFiniteForcing { index: 1, value }) if value.is_nan()
        ));
    }

    #[test]
    fn squared_norm_overflow_rejected() {
        assert!(matches!(
            squared_norm(&[1e200, 1e200]),
            Err(StepError::NonFiniteNorm { .. })
        ));
    }

    proptest! {
        #[test]
        fn squared_norm_is_non_negative(v in prop::collection::vec(-1e6f64..1e6, 1..16)) {
            let n2 = squared_norm(&v).unwrap();
            prop_assert!(n2 >= 0.0);
            prop_assert!(n2.is_finite());
        }

        #[test]
        fn stability_matches_product(dt in 1e-6f64..2.0, eta in 1e-3f64..4.0) {
            let mut p = params();
            p.eta = eta;
            let ok = check_stability(&p, dt).is_ok();
            prop_assert_eq!(ok, dt * p.max_rate() < 1.0);
        }
    }
}
