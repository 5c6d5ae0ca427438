//! hmsim-registry: the reaction registry and equation parsing.
//!
//! A registry is loaded once from JSON, validated for structure only,
//! and then shared read-only by every simulation. Equation text is
//! parsed lazily per rule; see [`equation`].

mod error;

pub mod deserialize;
pub mod equation;
pub mod types;

pub use deserialize::{load_registry, load_registry_str};
pub use equation::{MalformedEquationError, ParsedEquation};
pub use error::ConfigError;
pub use types::*;
