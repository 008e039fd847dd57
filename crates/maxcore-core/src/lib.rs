//! Core types and validators for the MAX-Core structural dynamics engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! committed-state value types (parameters, state triplet, lifecycle), the
//! three-way step event, the error taxonomy, and the pure predicates the
//! engine runs at construction and on every transition.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod hash;
pub mod types;
pub mod validate;

pub use error::{ConfigError, ErrorCategory, ProjectionError, StepError};
pub use hash::state_hash;
pub use types::{LifecycleContext, ParameterSet, StepEvent, StructuralState};
