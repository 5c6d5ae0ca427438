//! Heavy-metal pollution indices.
//!
//! - HPI (Heavy-metal Pollution Index): weighted mean of sub-indices
//!   `Qi = (Ci - Ii) / (Si - Ii) * 100` with weights proportional to `1 / Si`.
//! - HEI (Heavy-metal Evaluation Index): `Σ Ci / Si`.
//! - Cd (contamination degree): `Σ Ci / MACi`.
//!
//! Rows whose standard value `Si` is missing, non-finite, or not
//! positive carry no weight and are dropped before any sum.

use serde::Serialize;

use crate::sample::Measurement;

/// Computed indices for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indices {
    /// `None` when no row has a usable standard value.
    pub hpi: Option<f64>,
    pub hei: f64,
    pub cd: f64,
}

pub fn compute_indices(rows: &[Measurement]) -> Indices {
    let usable: Vec<&Measurement> = rows
        .iter()
        .filter(|m| m.si.is_finite() && m.si > 0.0)
        .collect();

    if usable.is_empty() {
        return Indices {
            hpi: None,
            hei: 0.0,
            cd: 0.0,
        };
    }

    let inverse_total: f64 = usable.iter().map(|m| 1.0 / m.si).sum();

    let mut weighted = 0.0;
    let mut weight_total = 0.0;
    for m in &usable {
        let qi = (m.ci - m.ii) / (m.si - m.ii) * 100.0;
        let wi = (1.0 / m.si) / inverse_total;
        weighted += qi * wi;
        weight_total += wi;
    }

    Indices {
        hpi: Some(weighted / weight_total),
        hei: usable.iter().map(|m| m.ci / m.si).sum(),
        cd: usable.iter().map(|m| m.ci / m.maci).sum(),
    }
}
