//! Skill dictionary and keyword-based skill extraction
//!
//! Single-word labels match whole whitespace tokens. Multi-word labels match by
//! substring containment over the whole text, so a phrase embedded in longer
//! words ("rest api" inside "interest apis") is still reported.
//!
//! Text is normalized before extraction, so user supplied labels must already
//! be in normalized form or they could never match.

use crate::error::{MatcherError, Result};
use crate::processing::normalizer::TextNormalizer;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::{BTreeSet, HashSet};

/// Sorted, de-duplicated set of skill labels
pub type SkillSet = BTreeSet<String>;

/// Immutable vocabulary of recognized skill labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDictionary {
    labels: BTreeSet<String>,
}

impl SkillDictionary {
    /// Build from arbitrary labels; labels are trimmed, lower-cased and
    /// internal whitespace is collapsed.
    ///
    /// A label that the text normalizer would rewrite ("node.js", "html5",
    /// "ruby on rails") is rejected, with the normalized form in the error.
    pub fn from_labels<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalizer = TextNormalizer::new();
        let mut normalized = BTreeSet::new();

        for label in labels {
            let label = label
                .as_ref()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();

            if label.is_empty() {
                return Err(MatcherError::Dictionary("skill labels must not be empty".to_string()));
            }

            let matchable = normalizer.normalize(&label);
            if matchable.is_empty() {
                return Err(MatcherError::Dictionary(format!(
                    "skill label '{}' is removed entirely by text normalization",
                    label
                )));
            }
            if matchable != label {
                return Err(MatcherError::Dictionary(format!(
                    "skill label '{}' can never match normalized text; use '{}' instead",
                    label, matchable
                )));
            }
            normalized.insert(label);
        }

        Ok(Self { labels: normalized })
    }

    /// Default technical skills taxonomy. "c++" and "c#" are kept for parity
    /// with the published list even though normalized text never contains them.
    pub fn technical() -> Self {
        let labels = [
            "python", "java", "c++", "c#", "javascript", "html", "css",
            "django", "flask", "react", "node", "sql", "mysql", "postgresql",
            "nlp", "machine learning", "deep learning", "tensorflow",
            "pytorch", "pyspark", "aws", "azure", "docker", "rest api",
            "git", "linux", "computer vision", "api", "ml",
        ];

        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Copy of this dictionary with additional labels
    pub fn extended<I, S>(&self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = Self::from_labels(extra)?;
        let mut labels = self.labels.clone();
        labels.extend(extra.labels);
        Ok(Self { labels })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::technical()
    }
}

/// Scans normalized text against a skill dictionary
pub struct SkillExtractor {
    dictionary: SkillDictionary,
    single_word: HashSet<String>,
    phrases: Vec<String>,
    phrase_matcher: Option<AhoCorasick>,
}

impl SkillExtractor {
    pub fn new(dictionary: SkillDictionary) -> Result<Self> {
        let (phrases, single_word): (Vec<String>, Vec<String>) = dictionary
            .labels()
            .map(str::to_string)
            .partition(|label| label.contains(' '));

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            // Standard match kind so overlapping phrases are all reported
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&phrases)
                .map_err(|e| MatcherError::Dictionary(format!("Failed to build phrase matcher: {}", e)))?;
            Some(matcher)
        };

        Ok(Self {
            dictionary,
            single_word: single_word.into_iter().collect(),
            phrases,
            phrase_matcher,
        })
    }

    pub fn dictionary(&self) -> &SkillDictionary {
        &self.dictionary
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        let mut found = SkillSet::new();

        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            if self.single_word.contains(&token) {
                found.insert(token);
            }
        }

        if let Some(matcher) = &self.phrase_matcher {
            for mat in matcher.find_overlapping_iter(text) {
                found.insert(self.phrases[mat.pattern().as_usize()].clone());
            }
        }

        found
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(SkillDictionary::technical()).expect("built-in skill dictionary is valid")
    }
}
