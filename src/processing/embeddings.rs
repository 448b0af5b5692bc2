//! Semantic similarity using Model2Vec static embeddings

use crate::config::Config;
use crate::error::{Result, ScoringFailure};
use crate::processing::similarity::{cosine_similarity, SimilarityBackend};
use log::info;
use model2vec_rs::model::StaticModel;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

/// Turns a text into a fixed-size dense vector
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Vec<f32>;
}

impl TextEncoder for StaticModel {
    fn encode(&self, text: &str) -> Vec<f32> {
        self.encode_single(text)
    }
}

/// Texts whose embeddings are kept before the oldest is evicted
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Insertion-ordered embedding cache; the oldest entry goes first when full
#[derive(Default)]
struct EmbeddingCache {
    entries: HashMap<String, Vec<f32>>,
    order: VecDeque<String>,
}

impl EmbeddingCache {
    fn insert(&mut self, text: &str, embedding: Vec<f32>, capacity: usize) {
        if capacity == 0 || self.entries.contains_key(text) {
            return;
        }
        while self.entries.len() >= capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(text.to_string());
        self.entries.insert(text.to_string(), embedding);
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

pub struct EmbeddingBackend<E: TextEncoder = StaticModel> {
    encoder: E,
    model_name: String,
    cache: Mutex<EmbeddingCache>,
    cache_capacity: usize,
}

impl EmbeddingBackend<StaticModel> {
    /// Load a Model2Vec model from a local folder or a hub repo id
    pub fn load(model: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model.display());

        let encoder = StaticModel::from_pretrained(model, None, None, None)?;

        info!("Model loaded successfully in {:.2?}", start_time.elapsed());
        Ok(Self::with_encoder(encoder, model_name))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::load(&config.embedding_model_location(), &config.matching.embedding_model)
    }
}

impl<E: TextEncoder> EmbeddingBackend<E> {
    pub fn with_encoder(encoder: E, model_name: &str) -> Self {
        Self {
            encoder,
            model_name: model_name.to_string(),
            cache: Mutex::new(EmbeddingCache::default()),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Limit the number of cached embeddings; 0 disables caching
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Encode with caching. Encoder panics are reported as a scoring failure.
    pub fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, ScoringFailure> {
        if let Some(cached) = self.cache.lock().entries.get(text) {
            return Ok(cached.clone());
        }

        let embedding = panic::catch_unwind(AssertUnwindSafe(|| self.encoder.encode(text)))
            .map_err(|_| ScoringFailure::Encoder(format!("{} panicked while encoding", self.model_name)))?;

        self.cache.lock().insert(text, embedding.clone(), self.cache_capacity);
        Ok(embedding)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.lock().entries.len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

impl<E: TextEncoder> SimilarityBackend for EmbeddingBackend<E> {
    fn name(&self) -> &str {
        "model2vec"
    }

    fn similarity(&self, text_a: &str, text_b: &str) -> std::result::Result<f32, ScoringFailure> {
        let embedding_a = self.embed(text_a)?;
        let embedding_b = self.embed(text_b)?;
        cosine_similarity(&embedding_a, &embedding_b)
    }
}
