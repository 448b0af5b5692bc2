//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use crate::processing::recommendation::RecommendationThresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub recommendation: RecommendationThresholds,
    pub skills: SkillsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub strategy: SimilarityStrategy,
    pub embedding_model: String,
    pub models_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityStrategy {
    /// TF-IDF vectors over the two-document corpus
    Lexical,
    /// Model2Vec static embeddings
    Semantic,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Labels added on top of the built-in technical dictionary
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub save_artifacts: bool,
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            strategy: SimilarityStrategy::Semantic,
            embedding_model: "minishlab/potion-base-8M".to_string(),
            models_dir,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data").join("processed"),
            save_artifacts: true,
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl std::str::FromStr for SimilarityStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexical" | "tfidf" | "tf-idf" => Ok(SimilarityStrategy::Lexical),
            "semantic" | "embedding" | "embeddings" => Ok(SimilarityStrategy::Semantic),
            _ => Err(format!("Invalid similarity strategy: {}. Supported: lexical, semantic", s)),
        }
    }
}

impl std::fmt::Display for SimilarityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityStrategy::Lexical => write!(f, "lexical"),
            SimilarityStrategy::Semantic => write!(f, "semantic"),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.recommendation.validate()?;

        if self.matching.embedding_model.trim().is_empty() {
            return Err(MatcherError::Configuration(
                "matching.embedding_model must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Local model directory if it was downloaded there, otherwise the hub repo id
    pub fn embedding_model_location(&self) -> PathBuf {
        let local_path = self.matching.models_dir.join(&self.matching.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.matching.embedding_model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching.strategy, SimilarityStrategy::Semantic);
        assert_eq!(config.recommendation.strong_similarity, 0.70);
    }

    #[test]
    fn test_round_trip_through_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.matching.strategy = SimilarityStrategy::Lexical;
        config.skills.extra = vec!["rust".to_string(), "kubernetes".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.matching.strategy, SimilarityStrategy::Lexical);
        assert_eq!(loaded.skills.extra, vec!["rust", "kubernetes"]);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nstrategy = \"lexical\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.matching.strategy, SimilarityStrategy::Lexical);
        assert_eq!(loaded.recommendation.max_strong_missing, 2);
        assert!(loaded.output.save_artifacts);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[recommendation]\nstrong_similarity = 0.3\nmoderate_similarity = 0.5\n",
        )
        .unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("TF-IDF".parse::<SimilarityStrategy>(), Ok(SimilarityStrategy::Lexical));
        assert_eq!("semantic".parse::<SimilarityStrategy>(), Ok(SimilarityStrategy::Semantic));
        assert!("bm25".parse::<SimilarityStrategy>().is_err());
    }
}
