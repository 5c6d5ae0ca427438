//! hmsim-quality: heavy-metal water-quality indices.
//!
//! Computes HPI, HEI and Cd for a sample's measurements and maps them
//! onto the usual safe / caution / unsafe scales.

mod error;

pub mod assessment;
pub mod indices;
pub mod sample;

pub use assessment::{
    analyze, categorize, AnalysisResult, Assessment, CdCategory, Conclusion, HeiCategory,
    HpiCategory,
};
pub use error::QualityError;
pub use indices::{compute_indices, Indices};
pub use sample::{Measurement, Sample};
