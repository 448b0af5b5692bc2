//! Integration tests for the resume matcher

use resume_matcher::config::{Config, SimilarityStrategy};
use resume_matcher::error::MatcherError;
use resume_matcher::input::InputManager;
use resume_matcher::output::artifacts::ArtifactWriter;
use resume_matcher::output::cover_letter;
use resume_matcher::processing::pipeline::MatchPipeline;
use resume_matcher::RecommendationTier;
use std::path::Path;
use tempfile::TempDir;

fn lexical_pipeline() -> MatchPipeline {
    let mut config = Config::default();
    config.matching.strategy = SimilarityStrategy::Lexical;
    MatchPipeline::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Django"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("PostgreSQL"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(MatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(MatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_corrupt_pdf_is_extraction_error() {
    let mut manager = InputManager::new().with_cache(false);
    let result = manager.extract_text(Path::new("tests/fixtures/corrupt.pdf")).await;
    assert!(matches!(result, Err(MatcherError::PdfExtraction(_))));
}

#[tokio::test]
async fn test_match_from_fixture_files() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let outcome = lexical_pipeline().run_raw(&resume, &job);
    let result = &outcome.result;

    for skill in ["python", "django", "sql", "git", "rest api"] {
        assert!(result.resume_skills.contains(skill), "resume should list {}", skill);
        assert!(result.jd_skills.contains(skill), "job should list {}", skill);
    }
    assert_eq!(
        result.missing_skills.iter().collect::<Vec<_>>(),
        vec!["machine learning"]
    );
    assert!(result.similarity > 0.0 && result.similarity <= 1.0);
}

#[test]
fn test_normalized_developer_scenario() {
    let result = lexical_pipeline().run(
        "python developer experience django sql git",
        "python developer fastapi django sql machine learning",
    );

    assert!(result.missing_skills.contains("machine learning"));
    assert!(result.similarity > 0.4);
    assert_ne!(result.recommendation, RecommendationTier::Weak);
}

#[test]
fn test_artifacts_written() {
    let temp_dir = TempDir::new().unwrap();
    let outcome = lexical_pipeline().run_raw(
        "Python developer with Django and Git",
        "Python developer, Django, machine learning",
    );
    let letter = cover_letter::generate(&outcome);

    let writer = ArtifactWriter::new(temp_dir.path().join("processed"));
    let saved = writer
        .save(&outcome, &letter, Some(Path::new("resume.pdf")))
        .unwrap();

    assert_eq!(std::fs::read_to_string(&saved.resume_text).unwrap(), outcome.cleaned_resume);
    assert_eq!(std::fs::read_to_string(&saved.jd_text).unwrap(), outcome.cleaned_jd);
    assert_eq!(std::fs::read_to_string(&saved.cover_letter).unwrap(), letter);

    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&saved.meta).unwrap()).unwrap();
    assert_eq!(meta["uid"].as_str().unwrap().len(), 8);
    assert_eq!(meta["resume_path"], "resume.pdf");
    assert_eq!(meta["missing_skills"][0], "machine learning");
    assert!(meta["similarity"].is_number());

    let file_name = saved.meta.file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("meta_"));
    assert!(file_name.ends_with(".json"));
}

#[test]
fn test_two_saves_do_not_collide() {
    let temp_dir = TempDir::new().unwrap();
    let outcome = lexical_pipeline().run_raw("python", "python");
    let writer = ArtifactWriter::new(temp_dir.path());

    let first = writer.save(&outcome, "letter", None).unwrap();
    let second = writer.save(&outcome, "letter", None).unwrap();
    assert_ne!(first.meta, second.meta);
}
