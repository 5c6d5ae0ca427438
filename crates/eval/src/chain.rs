//! Simulation output: the reaction chain.

use hmsim_registry::{Compound, ReactionType};
use serde::{Deserialize, Serialize, Serializer};

/// One firing event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionStep {
    /// The rule's equation text as written in the registry.
    pub equation: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub product: Compound,
}

/// A list of steps that cannot be a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("product '{product}' is formed more than once")]
    DuplicateProduct { product: Compound },
}

/// Steps in firing order. Serializes as a plain JSON array.
///
/// Every product appears at most once. Chains are built by the
/// simulator or read back through [`TryFrom`] / `Deserialize`, both of
/// which check that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<ReactionStep>")]
pub struct ReactionChain(Vec<ReactionStep>);

impl ReactionChain {
    pub fn new() -> Self {
        ReactionChain(Vec::new())
    }

    pub(crate) fn push(&mut self, step: ReactionStep) {
        self.0.push(step);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[ReactionStep] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReactionStep> {
        self.0.iter()
    }

    /// Products in the order they were formed.
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.product.as_str())
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn into_steps(self) -> Vec<ReactionStep> {
        self.0
    }
}

impl TryFrom<Vec<ReactionStep>> for ReactionChain {
    type Error = ChainError;

    fn try_from(steps: Vec<ReactionStep>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::new();
        for step in &steps {
            if !seen.insert(step.product.as_str()) {
                return Err(ChainError::DuplicateProduct {
                    product: step.product.clone(),
                });
            }
        }
        Ok(ReactionChain(steps))
    }
}

impl Serialize for ReactionChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a ReactionChain {
    type Item = &'a ReactionStep;
    type IntoIter = std::slice::Iter<'a, ReactionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
