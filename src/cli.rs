//! CLI interface for the resume matcher

use crate::config::{OutputFormat, SimilarityStrategy};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Match a resume against a job description")]
#[command(long_about = "Extract skills from a resume and a job description, score their similarity, list missing skills and recommend whether to apply")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume with a job description
    Match(MatchArgs),

    /// List dictionary skills found in a file
    Skills {
        /// Path to a resume or job description (PDF, TXT, MD)
        file: PathBuf,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct MatchArgs {
    /// Path to resume file (PDF, TXT, MD)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to job description file (TXT, MD), or `-` to read stdin
    #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description passed inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Similarity strategy: lexical or semantic
    #[arg(short, long)]
    pub strategy: Option<SimilarityStrategy>,

    /// Output format: console or json
    #[arg(short, long, value_parser = parse_output_format)]
    pub output: Option<OutputFormat>,

    /// Print the generated cover letter
    #[arg(long)]
    pub cover_letter: bool,

    /// Do not write artifacts to the output directory
    #[arg(long)]
    pub no_save: bool,

    /// Override the artifact output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// `-` in place of a path means standard input
pub fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
