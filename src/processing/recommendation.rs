//! Threshold-based apply recommendation

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationTier {
    Weak,
    Moderate,
    Strong,
}

impl RecommendationTier {
    pub fn verdict(&self) -> &'static str {
        match self {
            RecommendationTier::Strong => "STRONG MATCH – Recommended to Apply",
            RecommendationTier::Moderate => "MODERATE MATCH – You Can Apply",
            RecommendationTier::Weak => "WEAK MATCH – Not Recommended",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationTier::Strong => write!(f, "STRONG"),
            RecommendationTier::Moderate => write!(f, "MODERATE"),
            RecommendationTier::Weak => write!(f, "WEAK"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// Minimum similarity for a strong match
    pub strong_similarity: f32,
    /// Minimum similarity for a moderate match
    pub moderate_similarity: f32,
    /// Most missing skills a strong match may have
    pub max_strong_missing: usize,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            strong_similarity: 0.70,
            moderate_similarity: 0.40,
            max_strong_missing: 2,
        }
    }
}

impl RecommendationThresholds {
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);

        if !in_range(self.strong_similarity) || !in_range(self.moderate_similarity) {
            return Err(MatcherError::Configuration(format!(
                "similarity thresholds must be within [0, 1], got strong={} moderate={}",
                self.strong_similarity, self.moderate_similarity
            )));
        }

        if self.moderate_similarity > self.strong_similarity {
            return Err(MatcherError::Configuration(format!(
                "moderate threshold {} exceeds strong threshold {}",
                self.moderate_similarity, self.strong_similarity
            )));
        }

        Ok(())
    }

    /// First matching row wins: strong, then moderate, then weak.
    /// NaN compares false everywhere and lands on `Weak`.
    pub fn classify(&self, similarity: f32, missing_skills: usize) -> RecommendationTier {
        if similarity >= self.strong_similarity && missing_skills <= self.max_strong_missing {
            RecommendationTier::Strong
        } else if similarity >= self.moderate_similarity {
            RecommendationTier::Moderate
        } else {
            RecommendationTier::Weak
        }
    }
}

/// Classify with the default thresholds
pub fn classify(similarity: f32, missing_skills: usize) -> RecommendationTier {
    RecommendationThresholds::default().classify(similarity, missing_skills)
}
