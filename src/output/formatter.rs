//! Console and JSON rendering of match outcomes

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::artifacts::SavedArtifacts;
use crate::processing::pipeline::MatchOutcome;
use crate::processing::recommendation::RecommendationTier;
use crate::processing::skills::SkillSet;
use colored::{Color, Colorize};
use serde::Serialize;

/// Everything a formatter may show for one run
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport<'a> {
    pub backend: &'a str,
    #[serde(flatten)]
    pub outcome: &'a MatchOutcome,
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_paths: Option<&'a SavedArtifacts>,
}

impl<'a> MatchReport<'a> {
    pub fn new(backend: &'a str, outcome: &'a MatchOutcome) -> Self {
        Self {
            backend,
            outcome,
            verdict: outcome.result.recommendation.verdict(),
            cover_letter: None,
            saved_paths: None,
        }
    }
}

pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport<'_>) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn tier_color(tier: RecommendationTier) -> Color {
        match tier {
            RecommendationTier::Strong => Color::Green,
            RecommendationTier::Moderate => Color::Yellow,
            RecommendationTier::Weak => Color::Red,
        }
    }

    fn skill_line(label: &str, skills: &SkillSet) -> String {
        let list = if skills.is_empty() {
            "(none)".to_string()
        } else {
            skills.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        };
        format!("  • {:<16} {}\n", label, list)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport<'_>) -> Result<String> {
        let result = &report.outcome.result;
        let mut out = String::new();

        out.push_str(&self.paint("Resume Match Report", Color::Cyan));
        out.push('\n');
        out.push_str(&format!(
            "  • {:<16} {:.1}% ({})\n",
            "Similarity:",
            result.similarity * 100.0,
            report.backend
        ));
        out.push_str(&Self::skill_line("Resume skills:", &result.resume_skills));
        out.push_str(&Self::skill_line("Job skills:", &result.jd_skills));
        out.push_str(&Self::skill_line("Matched:", &result.matched_skills()));
        out.push_str(&Self::skill_line("Missing:", &result.missing_skills));
        out.push('\n');
        out.push_str(&self.paint(report.verdict, Self::tier_color(result.recommendation)));
        out.push('\n');

        if let Some(letter) = report.cover_letter {
            out.push('\n');
            out.push_str(&self.paint("Cover Letter", Color::Cyan));
            out.push_str("\n\n");
            out.push_str(letter);
        }

        if let Some(saved) = report.saved_paths {
            out.push('\n');
            out.push_str(&format!("Cover letter saved to: {}\n", saved.cover_letter.display()));
            out.push_str(&format!("Metadata saved to: {}\n", saved.meta.display()));
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport<'_>) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        json.map_err(|e| MatcherError::OutputFormatting(format!("Failed to render JSON report: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
