//! Lexical similarity: TF-IDF vectors over a two-document corpus

use crate::error::ScoringFailure;
use crate::processing::similarity::{cosine_similarity, SimilarityBackend};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

pub struct TfIdfBackend {
    token_regex: Regex,
}

impl Default for TfIdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfBackend {
    pub fn new() -> Self {
        // Runs of two or more word characters
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");
        Self { token_regex }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Fit on `documents` and return one L2-normalized vector per document.
    /// Vocabulary is ordered so vectors are reproducible.
    pub fn fit_transform(&self, documents: &[&str]) -> Vec<Vec<f32>> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.tokenize(d)).collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f32;
        let vocabulary: Vec<(&str, f32)> = doc_freq
            .iter()
            .map(|(term, df)| (*term, ((1.0 + n_docs) / (1.0 + *df as f32)).ln() + 1.0))
            .collect();

        tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
                for token in tokens {
                    *counts.entry(token.as_str()).or_insert(0) += 1;
                }

                let mut vector: Vec<f32> = vocabulary
                    .iter()
                    .map(|(term, idf)| counts.get(term).copied().unwrap_or(0) as f32 * idf)
                    .collect();

                let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
                if norm > 0.0 {
                    vector.iter_mut().for_each(|v| *v /= norm);
                }
                vector
            })
            .collect()
    }
}

impl SimilarityBackend for TfIdfBackend {
    fn name(&self) -> &str {
        "tf-idf"
    }

    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32, ScoringFailure> {
        if text_a.trim().is_empty() || text_b.trim().is_empty() {
            return Ok(0.0);
        }

        let vectors = self.fit_transform(&[text_a, text_b]);
        // Empty vocabulary (e.g. only one-letter tokens) yields empty vectors
        cosine_similarity(&vectors[0], &vectors[1])
    }
}
