//! Matching pipeline: normalization, skills, similarity, gap and recommendation

pub mod embeddings;
pub mod gap;
pub mod normalizer;
pub mod pipeline;
pub mod recommendation;
pub mod similarity;
pub mod skills;
pub mod tfidf;
