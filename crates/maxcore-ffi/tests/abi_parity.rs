//! Property tests: stepping through the C ABI matches the Rust engine bit
//! for bit, including rejected steps.

use maxcore_core::{ParameterSet, StructuralState};
use maxcore_engine::{EngineConfig, MaxCore};
use maxcore_ffi::{
    maxcore_create, maxcore_destroy, maxcore_get_current, maxcore_get_lifecycle,
    maxcore_get_previous, maxcore_step, MaxcoreEvent, MaxcoreLifecycle, MaxcoreParams,
    MaxcoreState, MaxcoreStatus,
};
use proptest::prelude::*;

const DIM: usize = 2;

fn arb_params() -> impl Strategy<Value = ParameterSet> {
    (
        1e-3f64..5.0,
        1e-3f64..2.0,
        1e-3f64..2.0,
        1e-3f64..2.0,
        1e-3f64..2.0,
        1e-3f64..2.0,
        1e-3f64..2.0,
        1e-2f64..100.0,
    )
        .prop_map(
            |(alpha, eta, beta, gamma, rho, lambda_phi, lambda_m, kappa_max)| ParameterSet {
                alpha,
                eta,
                beta,
                gamma,
                rho,
                lambda_phi,
                lambda_m,
                kappa_max,
            },
        )
}

/// A forcing vector, sometimes of the wrong length or non-finite.
fn arb_forcing() -> impl Strategy<Value = Vec<f64>> {
    prop_oneof![
        8 => prop::collection::vec(-10.0f64..10.0, DIM),
        1 => prop::collection::vec(-10.0f64..10.0, 0..5),
        1 => Just(vec![f64::NAN, 1.0]),
    ]
}

fn arb_dt() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => 1e-4f64..0.05,
        1 => Just(0.0),
        1 => Just(5.0),
    ]
}

fn abi_state(h: u64, read: extern "C" fn(u64, *mut MaxcoreState) -> i32) -> MaxcoreState {
    let mut s = MaxcoreState::default();
    assert_eq!(read(h, &mut s), MaxcoreStatus::Ok as i32);
    s
}

fn bits(s: MaxcoreState) -> [u64; 3] {
    [s.phi.to_bits(), s.memory.to_bits(), s.kappa.to_bits()]
}

proptest! {
    #[test]
    fn abi_steps_match_engine(
        params in arb_params(),
        guard in prop::option::of(0.1f64..10.0),
        inputs in prop::collection::vec((arb_forcing(), arb_dt()), 1..60),
    ) {
        let genesis = StructuralState::genesis(&params);
        let mut core = MaxCore::new(EngineConfig::fresh_genesis(params, DIM, guard)).unwrap();

        let abi_params = MaxcoreParams::from(params);
        let abi_init = MaxcoreState::from(genesis);
        let guard_ptr = guard.as_ref().map_or(std::ptr::null(), |g| g as *const f64);
        let mut h = 0u64;
        prop_assert_eq!(
            maxcore_create(&abi_params, DIM, &abi_init, guard_ptr, &mut h),
            MaxcoreStatus::Ok as i32
        );

        for (delta, dt) in &inputs {
            let expected = MaxcoreEvent::from(core.step(Some(delta.as_slice()), *dt));
            let got = maxcore_step(h, delta.as_ptr(), delta.len(), *dt);
            prop_assert_eq!(got, expected);

            let cur = abi_state(h, maxcore_get_current);
            let prev = abi_state(h, maxcore_get_previous);
            prop_assert_eq!(bits(cur), bits(MaxcoreState::from(core.current())));
            prop_assert_eq!(bits(prev), bits(MaxcoreState::from(core.previous())));

            let mut lc = MaxcoreLifecycle::default();
            prop_assert_eq!(maxcore_get_lifecycle(h, &mut lc), MaxcoreStatus::Ok as i32);
            prop_assert_eq!(lc, MaxcoreLifecycle::from(core.lifecycle()));
        }

        prop_assert_eq!(maxcore_destroy(h), MaxcoreStatus::Ok as i32);
    }
}
