//! Category thresholds and the overall verdict for a sample.

use serde::{Serialize, Serializer};

use crate::indices::{compute_indices, Indices};
use crate::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpiCategory {
    Safe,
    Caution,
    Unsafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeiCategory {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdCategory {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    Safe,
    Caution,
    Unsafe,
}

impl HpiCategory {
    /// An absent HPI is treated as unsafe.
    pub fn of(hpi: Option<f64>) -> Self {
        match hpi {
            Some(v) if v < 100.0 => HpiCategory::Safe,
            Some(v) if v < 200.0 => HpiCategory::Caution,
            _ => HpiCategory::Unsafe,
        }
    }
}

impl HeiCategory {
    pub fn of(hei: f64) -> Self {
        if hei < 10.0 {
            HeiCategory::Low
        } else if hei < 20.0 {
            HeiCategory::Medium
        } else {
            HeiCategory::High
        }
    }
}

impl CdCategory {
    pub fn of(cd: f64) -> Self {
        if cd < 1.0 {
            CdCategory::Low
        } else if cd < 3.0 {
            CdCategory::Medium
        } else {
            CdCategory::High
        }
    }
}

macro_rules! labelled {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

labelled!(HpiCategory { Safe => "safe", Caution => "caution", Unsafe => "unsafe" });
labelled!(HeiCategory { Low => "low pollution", Medium => "medium", High => "high" });
labelled!(CdCategory { Low => "low contamination", Medium => "medium", High => "high" });
labelled!(Conclusion { Safe => "Safe", Caution => "Moderate / Caution", Unsafe => "Unsafe" });

/// Categories for each index plus the overall conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub hpi: HpiCategory,
    pub hei: HeiCategory,
    pub cd: CdCategory,
    pub conclusion: Conclusion,
}

/// HEI is reported but does not affect the conclusion.
pub fn categorize(indices: &Indices) -> Assessment {
    let hpi = HpiCategory::of(indices.hpi);
    let hei = HeiCategory::of(indices.hei);
    let cd = CdCategory::of(indices.cd);

    let conclusion = if hpi == HpiCategory::Unsafe || cd == CdCategory::High {
        Conclusion::Unsafe
    } else if hpi == HpiCategory::Caution || cd == CdCategory::Medium {
        Conclusion::Caution
    } else {
        Conclusion::Safe
    };

    Assessment {
        hpi,
        hei,
        cd,
        conclusion,
    }
}

/// Result record for one analyzed sample. Index values are rounded to
/// two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "SampleID")]
    pub sample_id: i64,
    #[serde(rename = "HPI")]
    pub hpi: Option<f64>,
    #[serde(rename = "HPI_Category")]
    pub hpi_category: HpiCategory,
    #[serde(rename = "HEI")]
    pub hei: Option<f64>,
    #[serde(rename = "HEI_Category")]
    pub hei_category: HeiCategory,
    #[serde(rename = "Cd")]
    pub cd: Option<f64>,
    #[serde(rename = "Cd_Category")]
    pub cd_category: CdCategory,
    #[serde(rename = "OverallConclusion")]
    pub conclusion: Conclusion,
}

fn round2(value: f64) -> Option<f64> {
    value.is_finite().then(|| (value * 100.0).round() / 100.0)
}

pub fn analyze(sample: &Sample) -> AnalysisResult {
    let indices = compute_indices(&sample.parameters);
    let assessment = categorize(&indices);
    AnalysisResult {
        sample_id: sample.sample_id,
        hpi: indices.hpi.and_then(round2),
        hpi_category: assessment.hpi,
        hei: round2(indices.hei),
        hei_category: assessment.hei,
        cd: round2(indices.cd),
        cd_category: assessment.cd,
        conclusion: assessment.conclusion,
    }
}
