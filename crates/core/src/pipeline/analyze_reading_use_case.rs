use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;

use super::analysis_report::AnalysisReport;
use super::pipeline_logger::PipelineLogger;
use super::upload_workspace::UploadWorkspace;
use crate::analysis::domain::comparative_analyzer::ComparativeAnalyzer;
use crate::analysis::domain::error_taxonomy::{parse_errors_with, TallyOptions};
use crate::analysis::domain::response_dialect::ResponseDialect;
use crate::analysis::domain::section_extractor::{extract_sections, ExtractError};
use crate::shared::constants::UNSUPPORTED_AUDIO_MESSAGE;
use crate::transcription::domain::asr_normalizer::{normalize, NormalizeError};
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcript::TranscriptionResult;

const RECOGNIZER: &str = "speech recognition";
const ANALYZER: &str = "comparative analysis";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to stage uploads: {0}")]
    Staging(#[source] std::io::Error),
    #[error("{collaborator} call failed: {message}")]
    ExternalCallFailure {
        collaborator: &'static str,
        message: String,
    },
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Terminal state of one run. Every run ends in exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(AnalysisReport),
    /// The recognizer heard nothing it could transcribe.
    UnsupportedInput(String),
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub tally: TallyOptions,
    /// Dialect of the prompt sent to the analyzer. Its category set is
    /// applied even when the answer omits the markers that identify it.
    pub prompt_dialect: ResponseDialect,
    /// Copy the reference text into the report.
    pub echo_original_text: bool,
    /// Parent directory for staged uploads; the system temp dir when `None`.
    pub staging_root: Option<PathBuf>,
}

/// Runs one recording through recognition, comparison and parsing.
///
/// Holds no per-run state, so one instance can serve any number of runs.
pub struct AnalyzeReadingUseCase {
    recognizer: Box<dyn SpeechRecognizer>,
    analyzer: Box<dyn ComparativeAnalyzer>,
    options: AnalysisOptions,
}

impl AnalyzeReadingUseCase {
    pub fn new(
        recognizer: Box<dyn SpeechRecognizer>,
        analyzer: Box<dyn ComparativeAnalyzer>,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            recognizer,
            analyzer,
            options,
        }
    }

    pub fn run(
        &self,
        audio: &[u8],
        reference_text: &str,
        logger: &mut dyn PipelineLogger,
    ) -> Outcome {
        let outcome = match self.analyze(audio, reference_text, logger) {
            Ok(Some(report)) => Outcome::Success(report),
            Ok(None) => {
                logger.info("No transcript produced; skipping comparison");
                Outcome::UnsupportedInput(UNSUPPORTED_AUDIO_MESSAGE.to_string())
            }
            Err(e) => {
                log::error!("Analysis failed: {e}");
                Outcome::Failure(e.to_string())
            }
        };
        logger.summary();
        outcome
    }

    /// `Ok(None)` means the transcript was empty.
    fn analyze(
        &self,
        audio: &[u8],
        reference_text: &str,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Option<AnalysisReport>, PipelineError> {
        // 1. Stage uploads; dropped (and deleted) on every return below
        let workspace = timed(logger, "stage", || {
            UploadWorkspace::stage(audio, reference_text, self.options.staging_root.as_deref())
        })
        .map_err(PipelineError::Staging)?;
        let reference_text = workspace
            .read_reference_text()
            .map_err(PipelineError::Staging)?;

        // 2. Transcribe and normalize
        let payload = timed(logger, "transcribe", || {
            self.recognizer.transcribe(workspace.audio_path())
        })
        .map_err(|e| PipelineError::ExternalCallFailure {
            collaborator: RECOGNIZER,
            message: e.to_string(),
        })?;
        let transcription = match payload {
            Some(payload) => timed(logger, "normalize", || normalize(&payload))?,
            None => TranscriptionResult::empty(),
        };
        if transcription.is_empty() {
            return Ok(None);
        }
        logger.metric("word_count", transcription.word_count() as f64);

        // 3. Ask the oracle to compare
        let response = timed(logger, "analyze", || {
            self.analyzer
                .analyze(&reference_text, &transcription.transcript)
        })
        .map_err(|e| PipelineError::ExternalCallFailure {
            collaborator: ANALYZER,
            message: e.to_string(),
        })?;

        // 4. Parse the free-text answer
        let raw_text = response.content.as_deref().ok_or_else(|| {
            ExtractError::UnparseableResponse("analysis response carries no text".to_string())
        })?;
        let (sections, errors) = timed(logger, "parse", || {
            extract_sections(raw_text).map(|sections| {
                let errors = parse_errors_with(
                    &sections.error_tally_text,
                    self.options.tally,
                    self.options.prompt_dialect.wider(sections.dialect).categories(),
                );
                (sections, errors)
            })
        })?;
        logger.metric("error_total", errors.total() as f64);
        logger.info(&format!(
            "Parsed {} answer with {} error categories",
            sections.dialect,
            errors.len()
        ));

        let token_reading_estimate = match sections.dialect {
            ResponseDialect::Extended => response.usage.map(|u| u.reading_estimate()),
            ResponseDialect::Legacy => None,
        };

        Ok(Some(AnalysisReport {
            reported_reading_speed: sections.reported_reading_speed(),
            reading_speed: transcription.reading_speed_wpm().unwrap_or_default(),
            annotated_text: sections.annotated_text,
            explanation: sections.explanation,
            errors,
            token_reading_estimate,
            dialect: sections.dialect,
            original_text: self.options.echo_original_text.then_some(reference_text),
            transcription,
        }))
    }
}

fn timed<T>(logger: &mut dyn PipelineLogger, stage: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    logger.timing(stage, start.elapsed().as_secs_f64() * 1000.0);
    out
}
