//! Bounded forward chaining over a reaction registry.
//!
//! Each iteration walks the registry's flattened rule list in priority
//! order and fires the first rule whose reactants are all present and
//! whose product is not. One rule fires per iteration; the next
//! iteration starts again from the top. The run ends at a fixpoint (a
//! full pass with nothing fired) or after `max_depth` iterations.

use std::collections::HashSet;

use hmsim_registry::{Compound, ParsedEquation, Registry};

use crate::chain::{ReactionChain, ReactionStep};
use crate::diagnostics::{DiagnosticSink, SkippedEquation, TracingSink};
use crate::environment::Environment;

/// Default bound on the number of iterations, and so on chain length.
pub const MAX_DEPTH: usize = 10;

static DEFAULT_SINK: TracingSink = TracingSink;

/// Tunables for a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub max_depth: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Compounds known to be present during one run. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    order: Vec<Compound>,
    members: HashSet<Compound>,
}

impl WorkingSet {
    /// Seed from caller input: entries are trimmed, blanks dropped and
    /// duplicates collapsed keeping first occurrence.
    pub fn from_inputs<S: AsRef<str>>(inputs: &[S]) -> Self {
        let mut set = WorkingSet::default();
        for input in inputs {
            let compound = input.as_ref().trim();
            if !compound.is_empty() {
                set.insert(compound.to_string());
            }
        }
        set
    }

    pub fn contains(&self, compound: &str) -> bool {
        self.members.contains(compound)
    }

    /// Returns false if the compound was already present.
    pub fn insert(&mut self, compound: Compound) -> bool {
        if self.members.contains(&compound) {
            return false;
        }
        self.members.insert(compound.clone());
        self.order.push(compound);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members in insertion order.
    pub fn compounds(&self) -> &[Compound] {
        &self.order
    }

    fn satisfies(&self, equation: &ParsedEquation) -> bool {
        !self.contains(&equation.product) && equation.reactants.iter().all(|r| self.contains(r))
    }
}

/// Everything a run produced, for callers that want more than the chain.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub chain: ReactionChain,
    /// Inputs followed by products, in the order they entered the set.
    pub working_set: WorkingSet,
    /// Registry passes performed, including the final empty one.
    pub iterations: usize,
    /// True if the run stopped because nothing more could fire.
    pub fixpoint: bool,
}

/// Runs simulations against one registry.
///
/// Holds the registry by reference; the registry is never mutated, so
/// any number of simulators may share it across threads.
pub struct Simulator<'a> {
    registry: &'a Registry,
    config: SimulatorConfig,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Simulator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Simulator {
            registry,
            config: SimulatorConfig::default(),
            sink: &DEFAULT_SINK,
        }
    }

    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> SimulatorConfig {
        self.config
    }

    /// Run and return only the chain.
    pub fn run<S: AsRef<str>>(&self, inputs: &[S], environment: &Environment) -> ReactionChain {
        self.run_detailed(inputs, environment).chain
    }

    /// Run and return the chain along with the final working set.
    ///
    /// `_environment` is accepted for callers that already collect it;
    /// rule matching does not look at it.
    pub fn run_detailed<S: AsRef<str>>(
        &self,
        inputs: &[S],
        _environment: &Environment,
    ) -> SimulationReport {
        let mut working_set = WorkingSet::from_inputs(inputs);
        let mut chain = ReactionChain::new();
        // Positions in the flattened rule list already reported as malformed.
        let mut skipped: HashSet<usize> = HashSet::new();
        let mut iterations = 0;
        let mut fixpoint = false;

        while iterations < self.config.max_depth {
            iterations += 1;
            let mut applied = false;

            for (position, rule) in self.registry.rules().enumerate() {
                if skipped.contains(&position) {
                    continue;
                }

                let parsed = match rule.parsed() {
                    Ok(parsed) => parsed,
                    Err(reason) => {
                        skipped.insert(position);
                        self.sink.skipped_equation(&SkippedEquation {
                            equation: rule.equation().to_string(),
                            reason: reason.clone(),
                        });
                        continue;
                    }
                };

                if working_set.satisfies(parsed) {
                    working_set.insert(parsed.product.clone());
                    chain.push(ReactionStep {
                        equation: rule.equation().to_string(),
                        reaction_type: rule.reaction_type(),
                        product: parsed.product.clone(),
                    });
                    applied = true;
                    break;
                }
            }

            if !applied {
                fixpoint = true;
                break;
            }
        }

        SimulationReport {
            chain,
            working_set,
            iterations,
            fixpoint,
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
