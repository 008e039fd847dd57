//! State-transition engine for MAX-Core.
//!
//! Provides [`MaxCore`], the sole owner and mutator of a structural state
//! pair and its lifecycle, and [`compute_derived`], the read-only
//! diagnostic projection over committed snapshots. Engines are built from
//! an [`EngineConfig`] and validated atomically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod derived;
pub mod engine;

pub use config::{ConfigError, EngineConfig};
pub use derived::{compute_derived, DerivedFrame};
pub use engine::{MaxCore, StepOutcome};
