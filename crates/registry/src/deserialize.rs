//! Loading a [`Registry`] from its JSON source.
//!
//! The main entry point is [`load_registry`], which takes a
//! `&serde_json::Value` and checks its shape. Equations themselves are
//! copied through untouched; they are parsed lazily by the simulator.

use std::path::Path;

use crate::error::{json_kind, ConfigError};
use crate::types::*;

/// Build a registry from an already-decoded JSON value.
///
/// Expected shape:
///
/// ```json
/// [
///   {
///     "metal": "Arsenic",
///     "reactions_with_heavy_metals": ["As + Pb -> AsPb"],
///     "reactions_with_environment": ["As + O2 -> AsO2"]
///   }
/// ]
/// ```
///
/// A block may omit one of the two rule lists but not both.
pub fn load_registry(source: &serde_json::Value) -> Result<Registry, ConfigError> {
    let entries = source.as_array().ok_or_else(|| ConfigError::NotAList {
        found: json_kind(source),
    })?;

    let mut blocks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        blocks.push(parse_block(index, entry)?);
    }

    Ok(Registry::new(blocks))
}

/// Build a registry from JSON text.
pub fn load_registry_str(text: &str) -> Result<Registry, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
    load_registry(&value)
}

impl Registry {
    /// Read and load a registry file.
    pub fn from_path(path: &Path) -> Result<Registry, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        load_registry_str(&text)
    }
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn parse_block(index: usize, entry: &serde_json::Value) -> Result<ElementBlock, ConfigError> {
    let obj = entry.as_object().ok_or_else(|| ConfigError::BlockNotObject {
        index,
        found: json_kind(entry),
    })?;

    if !obj.contains_key(HEAVY_METAL_FIELD) && !obj.contains_key(ENVIRONMENT_FIELD) {
        return Err(ConfigError::MissingRuleLists {
            index,
            heavy: HEAVY_METAL_FIELD,
            environment: ENVIRONMENT_FIELD,
        });
    }

    let element = parse_element(index, entry)?;
    let heavy_metal = parse_rules(index, entry, HEAVY_METAL_FIELD, ReactionType::HeavyMetal)?;
    let environment = parse_rules(index, entry, ENVIRONMENT_FIELD, ReactionType::Environment)?;

    Ok(ElementBlock {
        element,
        heavy_metal,
        environment,
    })
}

fn parse_element(index: usize, entry: &serde_json::Value) -> Result<Option<String>, ConfigError> {
    for field in ["metal", "element"] {
        match entry.get(field) {
            None | Some(serde_json::Value::Null) => continue,
            Some(serde_json::Value::String(s)) => return Ok(Some(s.clone())),
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    index,
                    field: field.to_string(),
                    expected: "a string",
                    found: json_kind(other),
                })
            }
        }
    }
    Ok(None)
}

fn parse_rules(
    index: usize,
    entry: &serde_json::Value,
    field: &str,
    reaction_type: ReactionType,
) -> Result<Vec<Rule>, ConfigError> {
    let list = match entry.get(field) {
        None => return Ok(Vec::new()),
        Some(v) => v.as_array().ok_or_else(|| ConfigError::InvalidField {
            index,
            field: field.to_string(),
            expected: "an array of equation strings",
            found: json_kind(v),
        })?,
    };

    list.iter()
        .enumerate()
        .map(|(position, item)| {
            item.as_str()
                .map(|equation| Rule::new(equation, reaction_type))
                .ok_or_else(|| ConfigError::InvalidField {
                    index,
                    field: format!("{}[{}]", field, position),
                    expected: "a string",
                    found: json_kind(item),
                })
        })
        .collect()
}
