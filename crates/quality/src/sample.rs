//! Sample input types.

use serde::{Deserialize, Serialize};

use crate::error::QualityError;

/// One measured parameter of a water sample.
///
/// Field names follow the column names used by field laboratories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "ParameterName", alias = "parameter")]
    pub parameter: String,
    /// Measured concentration.
    #[serde(rename = "Ci", alias = "ci")]
    pub ci: f64,
    /// Standard permissible value.
    #[serde(rename = "Si", alias = "si")]
    pub si: f64,
    /// Ideal value.
    #[serde(rename = "Ii", alias = "ii")]
    pub ii: f64,
    /// Maximum allowable concentration.
    #[serde(rename = "MACi", alias = "maci")]
    pub maci: f64,
}

/// A sample and its measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "SampleID", alias = "sample_id")]
    pub sample_id: i64,
    #[serde(default)]
    pub parameters: Vec<Measurement>,
}

impl Sample {
    pub fn from_json(text: &str) -> Result<Sample, QualityError> {
        Ok(serde_json::from_str(text)?)
    }
}
