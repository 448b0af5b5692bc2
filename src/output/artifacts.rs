//! Persisting normalized texts, cover letter and match metadata

use crate::error::Result;
use crate::processing::pipeline::MatchOutcome;
use crate::processing::recommendation::RecommendationTier;
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub uid: String,
    pub timestamp: String,
    pub resume_path: Option<String>,
    pub resume_saved: PathBuf,
    pub jd_saved: PathBuf,
    pub cover_letter_saved: PathBuf,
    pub similarity: f32,
    pub recommendation: RecommendationTier,
    pub resume_skills: Vec<String>,
    pub jd_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedArtifacts {
    pub resume_text: PathBuf,
    pub jd_text: PathBuf,
    pub cover_letter: PathBuf,
    pub meta: PathBuf,
}

pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one set of artifacts, named `<kind>_<uid>_<timestamp>`
    pub fn save(
        &self,
        outcome: &MatchOutcome,
        cover_letter: &str,
        resume_path: Option<&Path>,
    ) -> Result<SavedArtifacts> {
        fs::create_dir_all(&self.output_dir)?;

        let uid = Uuid::new_v4().simple().to_string()[..8].to_string();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path_for = |kind: &str, ext: &str| {
            self.output_dir.join(format!("{}_{}_{}.{}", kind, uid, timestamp, ext))
        };

        let saved = SavedArtifacts {
            resume_text: path_for("resume", "txt"),
            jd_text: path_for("jd", "txt"),
            cover_letter: path_for("cover_letter", "txt"),
            meta: path_for("meta", "json"),
        };

        fs::write(&saved.resume_text, &outcome.cleaned_resume)?;
        fs::write(&saved.jd_text, &outcome.cleaned_jd)?;
        fs::write(&saved.cover_letter, cover_letter)?;

        let result = &outcome.result;
        let meta = MatchMetadata {
            uid,
            timestamp,
            resume_path: resume_path.map(|p| p.display().to_string()),
            resume_saved: saved.resume_text.clone(),
            jd_saved: saved.jd_text.clone(),
            cover_letter_saved: saved.cover_letter.clone(),
            similarity: result.similarity,
            recommendation: result.recommendation,
            resume_skills: result.resume_skills.iter().cloned().collect(),
            jd_skills: result.jd_skills.iter().cloned().collect(),
            missing_skills: result.missing_skills.iter().cloned().collect(),
        };
        fs::write(&saved.meta, serde_json::to_string_pretty(&meta)?)?;

        info!("Saved match artifacts to {}", self.output_dir.display());
        Ok(saved)
    }
}
