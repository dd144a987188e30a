//! uq-core: measured values with automatic uncertainty propagation.
//!
//! Contains:
//! - quantity (`UncertainQuantity` + operator overloads + special functions)
//! - config (zero-value policy, strict/permissive propagation settings)
//! - propagator (validated, fallible propagation with tracing)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod config;
pub mod error;
pub mod numeric;
pub mod propagator;
pub mod quantity;

// Re-exports
pub use config::{PropagationConfig, ZeroValuePolicy};
pub use error::{UqError, UqResult};
pub use numeric::*;
pub use propagator::Propagator;
pub use quantity::{Operand, UncertainQuantity};
