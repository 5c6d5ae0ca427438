/// Errors raised while reading a water sample.
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    /// The sample is not valid JSON or does not have the expected fields.
    #[error("invalid sample: {0}")]
    InvalidSample(#[from] serde_json::Error),
}
