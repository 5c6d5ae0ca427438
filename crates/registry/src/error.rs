/// Errors raised while loading a reaction registry.
///
/// Loading only checks structure. Individual equations are never
/// inspected here; see [`crate::equation::MalformedEquationError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The registry text is not valid JSON.
    #[error("registry is not valid JSON: {0}")]
    InvalidJson(String),

    /// The registry file could not be read.
    #[error("cannot read registry {path}: {message}")]
    Io { path: String, message: String },

    /// The top-level value is not an array of element blocks.
    #[error("registry must be a list of element blocks, found {found}")]
    NotAList { found: String },

    /// An element block is not a JSON object.
    #[error("element block {index} must be an object, found {found}")]
    BlockNotObject { index: usize, found: String },

    /// An element block carries neither rule list.
    #[error("element block {index} has neither '{heavy}' nor '{environment}'")]
    MissingRuleLists {
        index: usize,
        heavy: &'static str,
        environment: &'static str,
    },

    /// A block field has the wrong JSON type.
    #[error("element block {index}: field '{field}' must be {expected}, found {found}")]
    InvalidField {
        index: usize,
        field: String,
        expected: &'static str,
        found: String,
    },
}

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
    .to_string()
}
