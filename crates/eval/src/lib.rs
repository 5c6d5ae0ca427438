//! hmsim reaction simulator -- accepts a loaded registry + input
//! compounds, produces the chain of reactions that fire.
//!
//! The simulator does forward chaining with first-match priority: it
//! repeatedly fires the highest-priority rule whose reactants are all
//! present and whose product is new, until nothing fires or the depth
//! bound is reached. Equations that cannot be parsed are skipped and
//! reported through a [`DiagnosticSink`].

pub mod chain;
pub mod diagnostics;
pub mod environment;
pub mod simulator;

pub use chain::{ChainError, ReactionChain, ReactionStep};
pub use diagnostics::{CollectingSink, DiagnosticSink, SkippedEquation, TracingSink};
pub use environment::Environment;
pub use hmsim_registry::{load_registry, ConfigError, Registry};
pub use simulator::{SimulationReport, Simulator, SimulatorConfig, WorkingSet, MAX_DEPTH};

/// Simulate with the default depth bound, logging skipped equations
/// through `tracing`.
///
/// This is the top-level public API. Use [`Simulator`] to change the
/// depth bound or collect diagnostics.
pub fn simulate<S: AsRef<str>>(
    registry: &Registry,
    inputs: &[S],
    environment: &Environment,
) -> ReactionChain {
    Simulator::new(registry).run(inputs, environment)
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
