//! MAX-Core: a deterministic engine over energy, memory, and stability.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! MAX-Core sub-crates. Adding `maxcore` as a single dependency is enough for
//! Rust callers; C callers link `maxcore-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use maxcore::prelude::*;
//!
//! let params = ParameterSet {
//!     alpha: 1.0,
//!     eta: 0.1,
//!     beta: 0.5,
//!     gamma: 0.1,
//!     rho: 0.05,
//!     lambda_phi: 0.25,
//!     lambda_m: 0.25,
//!     kappa_max: 10.0,
//! };
//! let mut core = MaxCore::new(EngineConfig::fresh_genesis(params, 2, None)).unwrap();
//!
//! let mut steps = 0;
//! while core.step(Some(&[1.0, 2.0]), 0.01) != StepEvent::Collapse {
//!     steps += 1;
//! }
//! assert_eq!(steps + 1, core.lifecycle().step_counter);
//! assert!(core.is_terminal());
//!
//! // Terminal engines absorb every further step.
//! assert_eq!(core.step(None, -1.0), StepEvent::Normal);
//!
//! let frame = core.derived(0.01).unwrap();
//! assert_eq!(frame.kappa_ratio, 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `maxcore-core` | Value types, errors, validators, state hash |
//! | [`engine`] | `maxcore-engine` | `MaxCore`, `EngineConfig`, derived projection |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Value types, errors, and validators (`maxcore-core`).
///
/// Contains [`types::ParameterSet`], [`types::StructuralState`],
/// [`types::LifecycleContext`], the error enums, and
/// [`types::state_hash`].
pub use maxcore_core as types;

/// The state-transition engine (`maxcore-engine`).
///
/// [`engine::MaxCore`] owns and advances the state;
/// [`engine::compute_derived`] is the read-only diagnostic projection.
pub use maxcore_engine as engine;

/// Common imports for typical MAX-Core usage.
///
/// ```rust
/// use maxcore::prelude::*;
/// ```
pub mod prelude {
    // Value types
    pub use maxcore_core::{LifecycleContext, ParameterSet, StepEvent, StructuralState};

    // Errors
    pub use maxcore_core::{ConfigError, ErrorCategory, ProjectionError, StepError};

    // Engine
    pub use maxcore_engine::{compute_derived, DerivedFrame, EngineConfig, MaxCore, StepOutcome};
}
