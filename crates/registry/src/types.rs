//! Typed registry model.
//!
//! A [`Registry`] is an ordered list of [`ElementBlock`]s. Block order is
//! firing priority: the simulator always prefers earlier blocks, and
//! within a block prefers heavy-metal rules over environment rules.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::equation::{self, MalformedEquationError, ParsedEquation};

/// A chemical species identifier. Compared as exact text.
pub type Compound = String;

/// Field name of the metal-metal rule list.
pub const HEAVY_METAL_FIELD: &str = "reactions_with_heavy_metals";
/// Field name of the metal-environment rule list.
pub const ENVIRONMENT_FIELD: &str = "reactions_with_environment";

/// Rule category within an element block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    HeavyMetal,
    Environment,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionType::HeavyMetal => "heavy_metal",
            ReactionType::Environment => "environment",
        }
    }
}

impl std::fmt::Display for ReactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate transformation.
///
/// The equation text is parsed on first use and the outcome is cached,
/// so a malformed rule stays malformed for the life of the registry.
#[derive(Debug)]
pub struct Rule {
    equation: String,
    reaction_type: ReactionType,
    parsed: OnceLock<Result<ParsedEquation, MalformedEquationError>>,
}

impl Rule {
    pub fn new(equation: impl Into<String>, reaction_type: ReactionType) -> Self {
        Rule {
            equation: equation.into(),
            reaction_type,
            parsed: OnceLock::new(),
        }
    }

    /// The equation exactly as it appeared in the registry source.
    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn reaction_type(&self) -> ReactionType {
        self.reaction_type
    }

    /// Parsed reactants and product, computed once.
    pub fn parsed(&self) -> Result<&ParsedEquation, &MalformedEquationError> {
        self.parsed
            .get_or_init(|| equation::parse(&self.equation))
            .as_ref()
    }
}

impl Clone for Rule {
    fn clone(&self) -> Self {
        Rule::new(self.equation.clone(), self.reaction_type)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.equation == other.equation && self.reaction_type == other.reaction_type
    }
}

/// Rules concerning one metal or element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBlock {
    /// Informational label (e.g. "Arsenic"). Never used for matching.
    pub element: Option<String>,
    pub heavy_metal: Vec<Rule>,
    pub environment: Vec<Rule>,
}

impl ElementBlock {
    /// Rules of this block in firing priority order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.heavy_metal.iter().chain(self.environment.iter())
    }

    pub fn rule_count(&self) -> usize {
        self.heavy_metal.len() + self.environment.len()
    }
}

/// The immutable, ordered collection of element blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Registry {
    blocks: Vec<ElementBlock>,
}

impl Registry {
    pub fn new(blocks: Vec<ElementBlock>) -> Self {
        Registry { blocks }
    }

    pub fn blocks(&self) -> &[ElementBlock] {
        &self.blocks
    }

    /// Number of element blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.blocks.iter().map(ElementBlock::rule_count).sum()
    }

    /// Every rule flattened into firing priority order: block order,
    /// then heavy-metal before environment, then list order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.blocks.iter().flat_map(ElementBlock::rules)
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            block_count: self.len(),
            rule_count: self.rule_count(),
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockSummary {
                    element: b.element.clone(),
                    heavy_metal_rules: b.heavy_metal.len(),
                    environment_rules: b.environment.len(),
                })
                .collect(),
        }
    }
}

/// Counts describing a loaded registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub block_count: usize,
    pub rule_count: usize,
    pub blocks: Vec<BlockSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub heavy_metal_rules: usize,
    pub environment_rules: usize,
}
