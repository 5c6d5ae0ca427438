//! Equation text parsing.
//!
//! Equations are written as `A + B -> C`. Registry sources in the wild
//! use several arrow glyphs (and mis-encoded renderings of them), so
//! every variant is rewritten to the canonical [`ARROW`] before the
//! text is split.
//!
//! Everything here is pure: no logging, no state. Callers decide how to
//! report a [`MalformedEquationError`].

use crate::types::Compound;

/// The canonical arrow token.
pub const ARROW: &str = "->";

/// Arrow spellings rewritten to [`ARROW`] by [`normalize`].
///
/// `â†’` is U+2192 encoded as UTF-8 and decoded as Windows-1252, which is
/// how the arrow survives a round trip through spreadsheet exports.
const ARROW_VARIANTS: &[&str] = &["â†’", "\u{27F6}", "\u{2192}", "\u{21D2}", "=>"];

/// Why an equation could not be split into reactants and a product.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedEquationError {
    #[error("no reaction arrow found")]
    MissingArrow,
    #[error("nothing to the right of the reaction arrow")]
    MissingProduct,
}

/// Reactants and product of one equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEquation {
    /// Left-hand side tokens in order of first appearance, duplicates removed.
    pub reactants: Vec<Compound>,
    /// The right-hand side as a single literal token.
    pub product: Compound,
}

/// Trim the equation and rewrite every known arrow variant to [`ARROW`].
pub fn normalize(equation: &str) -> String {
    let mut text = equation.trim().to_string();
    for variant in ARROW_VARIANTS {
        if text.contains(variant) {
            text = text.replace(variant, ARROW);
        }
    }
    text
}

/// Split a normalized equation into its left and right segments.
///
/// With more than one arrow only the first split counts: the right
/// segment runs up to the second arrow.
fn sides(normalized: &str) -> Result<(&str, &str), MalformedEquationError> {
    let mut segments = normalized.split(ARROW);
    let lhs = segments.next().unwrap_or_default();
    let rhs = segments
        .next()
        .ok_or(MalformedEquationError::MissingArrow)?;
    Ok((lhs, rhs))
}

fn reactants_of(lhs: &str) -> Vec<Compound> {
    let mut reactants: Vec<Compound> = Vec::new();
    for token in lhs.split('+').map(str::trim).filter(|t| !t.is_empty()) {
        if !reactants.iter().any(|r| r == token) {
            reactants.push(token.to_string());
        }
    }
    reactants
}

fn product_of(rhs: &str) -> Result<Compound, MalformedEquationError> {
    let product = rhs.trim();
    if product.is_empty() {
        return Err(MalformedEquationError::MissingProduct);
    }
    Ok(product.to_string())
}

/// The reactants on the left of the arrow.
pub fn extract_reactants(equation: &str) -> Result<Vec<Compound>, MalformedEquationError> {
    let normalized = normalize(equation);
    let (lhs, _) = sides(&normalized)?;
    Ok(reactants_of(lhs))
}

/// The single product token on the right of the arrow.
pub fn extract_product(equation: &str) -> Result<Compound, MalformedEquationError> {
    let normalized = normalize(equation);
    let (_, rhs) = sides(&normalized)?;
    product_of(rhs)
}

/// Reactants and product in one pass.
pub fn parse(equation: &str) -> Result<ParsedEquation, MalformedEquationError> {
    let normalized = normalize(equation);
    let (lhs, rhs) = sides(&normalized)?;
    Ok(ParsedEquation {
        reactants: reactants_of(lhs),
        product: product_of(rhs)?,
    })
}
