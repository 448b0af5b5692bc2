//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result, ScoringFailure};
pub use processing::pipeline::{MatchOutcome, MatchPipeline, MatchResult};
pub use processing::recommendation::RecommendationTier;
