//! Fresh-genesis pipeline: drive an engine through repeated collapses.
//!
//! Runs a constant forcing for a fixed number of steps. Every time the
//! engine collapses it is dropped and replaced by a new engine at the
//! genesis state `(0, 0, kappa_max)`, starting the next lifecycle. Each
//! step prints the committed state and its derived metrics.
//!
//! Run with:
//!   cargo run -p maxcore --example pipeline
//!
//! Set `RUST_LOG=maxcore_engine=debug` to see engine logging on stderr.

use std::error::Error;

use maxcore::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

// ─── Pipeline parameters ────────────────────────────────────────

const DELTA_DIM: usize = 2;
const DT: f64 = 0.01;
const TOTAL_STEPS: u64 = 220;
const FORCING: [f64; DELTA_DIM] = [1.0, 2.0];

fn params() -> ParameterSet {
    ParameterSet {
        alpha: 1.0,
        eta: 0.1,
        beta: 0.5,
        gamma: 0.1,
        rho: 0.05,
        lambda_phi: 0.25,
        lambda_m: 0.25,
        kappa_max: 10.0,
    }
}

fn fresh_genesis() -> Result<MaxCore, ConfigError> {
    MaxCore::new(EngineConfig::fresh_genesis(params(), DELTA_DIM, None))
}

fn flag(b: bool) -> u8 {
    u8::from(b)
}

fn event_name(ev: StepEvent) -> &'static str {
    match ev {
        StepEvent::Normal => "NORMAL",
        StepEvent::Collapse => "COLLAPSE",
        StepEvent::Error => "ERROR",
    }
}

fn print_snapshot(label: &str, lifecycle_id: u64, core: &MaxCore) {
    let st = core.current();
    let lc = core.lifecycle();
    println!(
        "[{label}] lifecycle={lifecycle_id} phi={:.6} m={:.6} k={:.6} sc={} term={} collapse_emitted={}",
        st.phi,
        st.memory,
        st.kappa,
        lc.step_counter,
        flag(lc.terminal),
        flag(lc.collapse_emitted),
    );
}

fn print_step(t: u64, lifecycle_id: u64, ev: StepEvent, core: &MaxCore, d: &DerivedFrame) {
    let st = core.current();
    println!(
        "[t={t}] lifecycle={lifecycle_id} ev={} phi={:.6} m={:.6} k={:.6} sc={} \
         d_phi={:.6} d_m={:.6} d_k={:.6} k_ratio={:.6} k_dist={:.6} load={:.6} regen={:.6}",
        event_name(ev),
        st.phi,
        st.memory,
        st.kappa,
        d.step_counter,
        d.d_phi,
        d.d_memory,
        d.d_kappa,
        d.kappa_ratio,
        d.kappa_distance,
        d.load_term,
        d.regen_term,
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    println!("=== MAX-Core pipeline ===");
    println!("steps={TOTAL_STEPS} dt={DT} forcing={FORCING:?}");

    let mut lifecycle_id: u64 = 0;
    let mut core = fresh_genesis()?;
    print_snapshot("init", lifecycle_id, &core);

    for t in 0..TOTAL_STEPS {
        let ev = core.step(Some(&FORCING), DT);
        if ev == StepEvent::Error {
            println!("STOP: ERROR at t={t}");
            break;
        }

        let frame = core.derived(DT)?;
        print_step(t, lifecycle_id, ev, &core, &frame);

        if ev == StepEvent::Collapse {
            lifecycle_id += 1;
            core = fresh_genesis()?;
            println!("=== fresh genesis -> lifecycle={lifecycle_id} ===");
            print_snapshot("genesis", lifecycle_id, &core);
        }
    }

    println!("=== done: {} lifecycles ===", lifecycle_id + 1);
    Ok(())
}
