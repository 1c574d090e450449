use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde_json::{json, Value};

use readcheck_core::analysis::domain::error_taxonomy::{AbsentCategories, TallyOptions};
use readcheck_core::analysis::domain::response_dialect::ResponseDialect;
use readcheck_core::analysis::infrastructure::chat_completions_analyzer::ChatCompletionsAnalyzer;
use readcheck_core::pipeline::analyze_reading_use_case::{
    AnalysisOptions, AnalyzeReadingUseCase, Outcome,
};
use readcheck_core::pipeline::pipeline_logger::LogPipelineLogger;
use readcheck_core::shared::constants::{AUDIO_EXTENSIONS, TEXT_EXTENSIONS};
use readcheck_core::shared::provider_config::ProviderConfig;
use readcheck_core::transcription::infrastructure::deepgram_recognizer::DeepgramRecognizer;

/// Check how accurately a recording reads a reference text.
#[derive(Parser)]
#[command(name = "readcheck")]
struct Cli {
    /// Recording of the text being read (mp3, mp4, 3gp or wav).
    audio: PathBuf,

    /// Reference text that was read aloud (.txt, UTF-8).
    text: PathBuf,

    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recognition language, e.g. "tr".
    #[arg(long)]
    language: Option<String>,

    /// Recognition model, e.g. "nova-2".
    #[arg(long)]
    asr_model: Option<String>,

    /// Chat model used for the comparison.
    #[arg(long)]
    analysis_model: Option<String>,

    /// Prompt dialect: legacy or extended.
    #[arg(long)]
    dialect: Option<String>,

    /// Report every known error category, with zero for the ones not found.
    #[arg(long)]
    zero_fill: bool,

    /// Drop error categories outside the dialect's known set.
    #[arg(long)]
    known_only: bool,

    /// Include the reference text in the report.
    #[arg(long)]
    echo_original: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns whether the analysis succeeded.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    config.validate()?;

    let audio = fs::read(&cli.audio)?;
    let reference_text = String::from_utf8(fs::read(&cli.text)?)
        .map_err(|_| format!("Reference text is not valid UTF-8: {}", cli.text.display()))?;

    let prompt_dialect = config.analysis.prompt_dialect;
    let asr_key = config.asr.api_key.clone().unwrap_or_default();
    let analysis_key = config.analysis.api_key.clone().unwrap_or_default();
    let recognizer = DeepgramRecognizer::new(config.asr, asr_key)?;
    let analyzer = ChatCompletionsAnalyzer::new(config.analysis, analysis_key)?;

    let options = AnalysisOptions {
        tally: TallyOptions {
            absent: if cli.zero_fill {
                AbsentCategories::ZeroFill
            } else {
                AbsentCategories::Omit
            },
            known_only: cli.known_only,
        },
        prompt_dialect,
        echo_original_text: cli.echo_original,
        staging_root: None,
    };
    let use_case = AnalyzeReadingUseCase::new(Box::new(recognizer), Box::new(analyzer), options);

    log::info!("Analysing {}", cli.audio.display());
    let mut logger = LogPipelineLogger::new();
    let outcome = use_case.run(&audio, &reference_text, &mut logger);

    let body = envelope(&outcome)?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{rendered}");
    Ok(outcome.is_success())
}

fn build_config(cli: &Cli) -> Result<ProviderConfig, Box<dyn std::error::Error>> {
    let mut config = ProviderConfig::load(cli.config.as_deref())?.with_env_overrides();
    if let Some(language) = &cli.language {
        config.asr.language = language.clone();
    }
    if let Some(model) = &cli.asr_model {
        config.asr.model = model.clone();
    }
    if let Some(model) = &cli.analysis_model {
        config.analysis.model = model.clone();
    }
    if let Some(dialect) = &cli.dialect {
        config.analysis.prompt_dialect = dialect.parse::<ResponseDialect>()?;
    }
    Ok(config)
}

/// `{status, message}` body, the shape callers of the upload endpoint expect.
fn envelope(outcome: &Outcome) -> Result<Value, serde_json::Error> {
    Ok(match outcome {
        Outcome::Success(report) => json!({
            "status": "success",
            "message": serde_json::to_value(report)?,
        }),
        Outcome::UnsupportedInput(message) | Outcome::Failure(message) => json!({
            "status": "failure",
            "message": message,
        }),
    })
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.audio.exists() {
        return Err(format!("Audio file not found: {}", cli.audio.display()).into());
    }
    if !cli.text.exists() {
        return Err(format!("Text file not found: {}", cli.text.display()).into());
    }
    if !has_extension(&cli.audio, AUDIO_EXTENSIONS) {
        return Err(format!(
            "Audio must be one of: {}, got {}",
            AUDIO_EXTENSIONS.join(", "),
            cli.audio.display()
        )
        .into());
    }
    if !has_extension(&cli.text, TEXT_EXTENSIONS) {
        return Err(format!("Text must be a .txt file, got {}", cli.text.display()).into());
    }
    Ok(())
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
