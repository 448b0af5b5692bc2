//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Skill dictionary error: {0}")]
    Dictionary(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Failure inside a similarity backend. Never crosses the pipeline boundary:
/// the orchestrator collapses it to a zero similarity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringFailure {
    #[error("embedding dimensions don't match: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    #[error("similarity is not a finite number")]
    NonFinite,

    #[error("encoder failed: {0}")]
    Encoder(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Model2Vec reports loading problems through anyhow
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::ModelLoading(err.to_string())
    }
}

impl From<toml::de::Error> for MatcherError {
    fn from(err: toml::de::Error) -> Self {
        MatcherError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for MatcherError {
    fn from(err: toml::ser::Error) -> Self {
        MatcherError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
