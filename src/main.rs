//! Resume matcher: skill gap analysis and apply recommendation for one job

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, MatchArgs};
use resume_matcher::config::{Config, SimilarityStrategy};
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::InputManager;
use resume_matcher::output::artifacts::ArtifactWriter;
use resume_matcher::output::cover_letter;
use resume_matcher::output::formatter::{formatter_for, MatchReport};
use resume_matcher::processing::normalizer::TextNormalizer;
use resume_matcher::processing::pipeline::{build_backend, MatchPipeline};
use resume_matcher::processing::skills::{SkillDictionary, SkillExtractor};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Match(args) => run_match(args, config).await,
        Commands::Skills { file } => {
            let mut input_manager = InputManager::new();
            let raw = input_manager.extract_text(&file).await?;
            let normalized = TextNormalizer::new().normalize(&raw);

            let dictionary = SkillDictionary::technical().extended(&config.skills.extra)?;
            let skills = SkillExtractor::new(dictionary)?.extract(&normalized);

            if skills.is_empty() {
                println!("No known skills found in {}", file.display());
            } else {
                for skill in skills {
                    println!("{}", skill);
                }
            }
            Ok(())
        }
        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigAction::Path => println!("{}", path.display()),
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }
            }
            Ok(())
        }
    }
}

async fn run_match(args: MatchArgs, mut config: Config) -> Result<()> {
    cli::validate_file_extension(&args.resume, &["pdf", "txt", "md"])
        .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;

    if let Some(strategy) = args.strategy {
        config.matching.strategy = strategy;
    }
    if let Some(format) = args.output {
        config.output.format = format;
    }
    if let Some(dir) = args.output_dir {
        config.output.output_dir = dir;
    }
    if args.no_save {
        config.output.save_artifacts = false;
    }

    let mut input_manager = InputManager::new();
    // An unreadable resume is matched as empty text rather than aborting
    let resume_text = match input_manager.extract_text(&args.resume).await {
        Ok(text) => text,
        Err(e @ MatcherError::PdfExtraction(_)) => {
            warn!("{}; continuing with empty resume text", e);
            String::new()
        }
        Err(e) => return Err(e),
    };

    let job_text = match (&args.job, &args.job_text) {
        (Some(path), _) if cli::is_stdin(path) => input_manager.read_stdin().await?,
        (Some(path), _) => {
            cli::validate_file_extension(path, &["txt", "md"])
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            input_manager.extract_text(path).await?
        }
        (None, Some(text)) => text.clone(),
        (None, None) => {
            return Err(MatcherError::InvalidInput(
                "either --job or --job-text is required".to_string(),
            ))
        }
    };

    let backend = if config.matching.strategy == SimilarityStrategy::Semantic {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .map_err(|e| MatcherError::OutputFormatting(e.to_string()))?,
        );
        spinner.set_message(format!("Loading {}", config.matching.embedding_model));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let backend = build_backend(&config);
        spinner.finish_and_clear();
        backend?
    } else {
        build_backend(&config)?
    };

    let pipeline = MatchPipeline::with_backend(&config, backend)?;
    info!("Matching {} using {} similarity", args.resume.display(), pipeline.backend_name());

    let outcome = pipeline.run_raw(&resume_text, &job_text);
    let letter = cover_letter::generate(&outcome);

    let saved = if config.output.save_artifacts {
        let writer = ArtifactWriter::new(&config.output.output_dir);
        match writer.save(&outcome, &letter, Some(args.resume.as_path())) {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!("Failed to save artifacts: {}", e);
                None
            }
        }
    } else {
        None
    };

    let mut report = MatchReport::new(pipeline.backend_name(), &outcome);
    if args.cover_letter {
        report.cover_letter = Some(&letter);
    }
    report.saved_paths = saved.as_ref();

    let formatter = formatter_for(config.output.format, config.output.color_output);
    println!("{}", formatter.format_report(&report)?);

    Ok(())
}
