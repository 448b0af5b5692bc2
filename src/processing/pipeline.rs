//! Matching pipeline: skills, similarity, gap and recommendation for one pair

use crate::config::{Config, SimilarityStrategy};
use crate::error::Result;
use crate::processing::embeddings::EmbeddingBackend;
use crate::processing::gap;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::recommendation::{RecommendationThresholds, RecommendationTier};
use crate::processing::similarity::{SimilarityBackend, SimilarityScorer};
use crate::processing::skills::{SkillDictionary, SkillExtractor, SkillSet};
use crate::processing::tfidf::TfIdfBackend;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of matching one resume against one job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub similarity: f32,
    pub recommendation: RecommendationTier,
}

impl MatchResult {
    pub fn matched_skills(&self) -> SkillSet {
        gap::matched(&self.resume_skills, &self.jd_skills)
    }
}

/// A `MatchResult` together with the normalized texts it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub cleaned_resume: String,
    pub cleaned_jd: String,
    pub result: MatchResult,
}

pub struct MatchPipeline {
    normalizer: TextNormalizer,
    extractor: SkillExtractor,
    scorer: SimilarityScorer,
    thresholds: RecommendationThresholds,
}

impl MatchPipeline {
    pub fn new(
        extractor: SkillExtractor,
        scorer: SimilarityScorer,
        thresholds: RecommendationThresholds,
    ) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            extractor,
            scorer,
            thresholds,
        }
    }

    /// Build a pipeline around an already constructed backend
    pub fn with_backend(config: &Config, backend: Arc<dyn SimilarityBackend>) -> Result<Self> {
        config.recommendation.validate()?;
        let dictionary = SkillDictionary::technical().extended(&config.skills.extra)?;
        let extractor = SkillExtractor::new(dictionary)?;

        Ok(Self::new(
            extractor,
            SimilarityScorer::new(backend),
            config.recommendation,
        ))
    }

    /// Construct the configured backend once and wire up the pipeline
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = build_backend(config)?;
        Self::with_backend(config, backend)
    }

    pub fn backend_name(&self) -> &str {
        self.scorer.backend_name()
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Match two already normalized texts. Never fails: scoring errors
    /// degrade to a similarity of 0.0.
    pub fn run(&self, resume_normalized: &str, jd_normalized: &str) -> MatchResult {
        let resume_skills = self.extractor.extract(resume_normalized);
        let jd_skills = self.extractor.extract(jd_normalized);
        debug!("Resume skills: {:?}", resume_skills);
        debug!("Job description skills: {:?}", jd_skills);

        let similarity = self.scorer.score_or_zero(resume_normalized, jd_normalized);

        let missing_skills = gap::gap(&resume_skills, &jd_skills);
        let recommendation = self.thresholds.classify(similarity, missing_skills.len());

        info!(
            "Match computed: similarity={:.3}, missing={}, recommendation={}",
            similarity,
            missing_skills.len(),
            recommendation
        );

        MatchResult {
            resume_skills,
            jd_skills,
            missing_skills,
            similarity,
            recommendation,
        }
    }

    /// Normalize raw texts, then match them
    pub fn run_raw(&self, resume_raw: &str, jd_raw: &str) -> MatchOutcome {
        let cleaned_resume = self.normalizer.normalize(resume_raw);
        let cleaned_jd = self.normalizer.normalize(jd_raw);
        let result = self.run(&cleaned_resume, &cleaned_jd);

        MatchOutcome {
            cleaned_resume,
            cleaned_jd,
            result,
        }
    }
}

pub fn build_backend(config: &Config) -> Result<Arc<dyn SimilarityBackend>> {
    let backend: Arc<dyn SimilarityBackend> = match config.matching.strategy {
        SimilarityStrategy::Lexical => Arc::new(TfIdfBackend::new()),
        SimilarityStrategy::Semantic => Arc::new(EmbeddingBackend::from_config(config)?),
    };
    info!("Using {} similarity backend", backend.name());
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::similarity::testing::{FailingBackend, FixedBackend};

    const RESUME: &str = "python developer experience django sql git";
    const JD: &str = "python developer fastapi django sql machine learning";

    fn lexical_pipeline() -> MatchPipeline {
        MatchPipeline::with_backend(&Config::default(), Arc::new(TfIdfBackend::new())).unwrap()
    }

    fn set(items: &[&str]) -> SkillSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_lexical() {
        let result = lexical_pipeline().run(RESUME, JD);

        assert!(result.resume_skills.is_superset(&set(&["python", "django", "sql", "git"])));
        assert!(result.jd_skills.is_superset(&set(&["python", "django", "sql", "machine learning"])));
        assert!(result.missing_skills.contains("machine learning"));
        assert!(!result.missing_skills.contains("fastapi"));
        assert!(result.similarity > 0.4);
        assert!(matches!(
            result.recommendation,
            RecommendationTier::Moderate | RecommendationTier::Strong
        ));
    }

    #[test]
    fn test_run_is_idempotent() {
        let pipeline = lexical_pipeline();
        assert_eq!(pipeline.run(RESUME, JD), pipeline.run(RESUME, JD));
    }

    #[test]
    fn test_empty_inputs() {
        let result = lexical_pipeline().run("", "");
        assert!(result.resume_skills.is_empty());
        assert!(result.jd_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.similarity, 0.0);
        assert_eq!(result.recommendation, RecommendationTier::Weak);
    }

    #[test]
    fn test_scoring_failure_still_produces_result() {
        let pipeline =
            MatchPipeline::with_backend(&Config::default(), Arc::new(FailingBackend)).unwrap();
        let result = pipeline.run(RESUME, JD);

        assert_eq!(result.similarity, 0.0);
        assert_eq!(result.recommendation, RecommendationTier::Weak);
        assert_eq!(result.missing_skills, set(&["machine learning"]));
    }

    #[test]
    fn test_thresholds_from_config() {
        let mut config = Config::default();
        config.recommendation.strong_similarity = 0.5;
        config.recommendation.max_strong_missing = 1;

        let pipeline = MatchPipeline::with_backend(&config, Arc::new(FixedBackend(0.55))).unwrap();
        assert_eq!(pipeline.run(RESUME, JD).recommendation, RecommendationTier::Strong);
    }

    #[test]
    fn test_extra_skills_from_config() {
        let mut config = Config::default();
        config.skills.extra = vec!["fastapi".to_string()];

        let pipeline = MatchPipeline::with_backend(&config, Arc::new(FixedBackend(0.9))).unwrap();
        let result = pipeline.run(RESUME, JD);
        assert_eq!(result.missing_skills, set(&["fastapi", "machine learning"]));
        assert_eq!(result.recommendation, RecommendationTier::Strong);
    }

    #[test]
    fn test_unmatchable_extra_skill_rejected() {
        let mut config = Config::default();
        config.skills.extra = vec!["Node.js".to_string()];

        let result = MatchPipeline::with_backend(&config, Arc::new(FixedBackend(0.9)));
        assert!(matches!(result, Err(crate::error::MatcherError::Dictionary(_))));
    }

    #[test]
    fn test_run_raw_normalizes_first() {
        let outcome = lexical_pipeline().run_raw(
            "Python Developer. Experience: Django, SQL, Git (5 years).",
            "We need a Python developer; FastAPI or Django, SQL. Machine Learning is a plus!",
        );

        assert_eq!(outcome.cleaned_resume, "python developer experience django sql git years");
        assert!(outcome.result.missing_skills.contains("machine learning"));
        assert_eq!(
            outcome.result.matched_skills(),
            set(&["django", "python", "sql"])
        );
    }

    #[test]
    fn test_lexical_backend_from_config() {
        let mut config = Config::default();
        config.matching.strategy = SimilarityStrategy::Lexical;

        let pipeline = MatchPipeline::from_config(&config).unwrap();
        assert_eq!(pipeline.backend_name(), "tf-idf");
    }
}
