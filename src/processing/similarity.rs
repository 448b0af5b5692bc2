//! Similarity scoring behind interchangeable backends

use crate::error::ScoringFailure;
use log::{debug, warn};
use std::sync::Arc;

/// A strategy that scores two normalized texts.
///
/// Implementations are shared across threads, so any interior state must be
/// synchronized by the backend itself.
pub trait SimilarityBackend: Send + Sync {
    fn name(&self) -> &str;

    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32, ScoringFailure>;
}

/// Front end over a shared backend
#[derive(Clone)]
pub struct SimilarityScorer {
    backend: Arc<dyn SimilarityBackend>,
}

impl SimilarityScorer {
    pub fn new(backend: Arc<dyn SimilarityBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn score(&self, text_a: &str, text_b: &str) -> Result<f32, ScoringFailure> {
        let score = self.backend.similarity(text_a, text_b)?;
        if !score.is_finite() {
            return Err(ScoringFailure::NonFinite);
        }
        debug!("{} similarity: {:.4}", self.backend.name(), score);
        Ok(score)
    }

    /// Failed scoring degrades to 0.0 so skill and gap analysis still complete
    pub fn score_or_zero(&self, text_a: &str, text_b: &str) -> f32 {
        match self.score(text_a, text_b) {
            Ok(score) => score,
            Err(e) => {
                warn!("{} similarity failed, using 0.0: {}", self.backend.name(), e);
                0.0
            }
        }
    }
}

/// Cosine similarity; zero vectors score 0.0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ScoringFailure> {
    if a.len() != b.len() {
        return Err(ScoringFailure::DimensionMismatch(a.len(), b.len()));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
