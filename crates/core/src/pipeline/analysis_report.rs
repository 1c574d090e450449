use serde::Serialize;

use crate::analysis::domain::error_taxonomy::ErrorTaxonomy;
use crate::analysis::domain::response_dialect::ResponseDialect;
use crate::transcription::domain::transcript::TranscriptionResult;

/// Result of one successful analysis run.
///
/// Three reading figures live side by side because they answer different
/// questions:
/// - `reading_speed`: words per minute from the recognizer's timings, i.e.
///   how fast the speaker actually read.
/// - `reported_reading_speed`: the figure the oracle wrote under
///   `Okuma Hızı:`, when it wrote one.
/// - `token_reading_estimate`: `total_tokens * 0.75 / 200` from the oracle's
///   usage metadata, only for extended-dialect answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub annotated_text: String,
    pub explanation: String,
    pub errors: ErrorTaxonomy,
    pub reading_speed: f64,
    pub reported_reading_speed: Option<f64>,
    pub token_reading_estimate: Option<f64>,
    pub dialect: ResponseDialect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    pub transcription: TranscriptionResult,
}
