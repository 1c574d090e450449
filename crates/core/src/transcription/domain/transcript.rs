use serde::Serialize;

/// One recognized word with display-ready timing and confidence.
///
/// `start`/`end` are seconds and `confidence` is a 0-100 percentage, all
/// rendered with two decimals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordTiming {
    pub text: String,
    pub start: String,
    pub end: String,
    pub confidence: String,
}

/// Canonical speech-to-text result for one recording.
///
/// When `transcript` is empty the recognizer did not understand the audio
/// and the remaining fields carry nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TranscriptionResult {
    pub transcript: String,
    pub confidence: Option<String>,
    pub duration: Option<String>,
    pub reading_speed: Option<String>,
    pub words: Vec<WordTiming>,
}

impl TranscriptionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Reading speed in words per minute, as rendered.
    pub fn reading_speed_wpm(&self) -> Option<f64> {
        self.reading_speed.as_deref().and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_result_is_empty() {
        let result = TranscriptionResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.word_count(), 0);
        assert!(result.reading_speed_wpm().is_none());
    }

    #[test]
    fn test_whitespace_transcript_counts_as_empty() {
        let result = TranscriptionResult {
            transcript: "  \n".to_string(),
            ..Default::default()
        };
        assert!(result.is_empty());
    }

    #[test]
    fn test_reading_speed_wpm_parses_rendered_value() {
        let result = TranscriptionResult {
            transcript: "merhaba".to_string(),
            reading_speed: Some("67.57".to_string()),
            ..Default::default()
        };
        assert_relative_eq!(result.reading_speed_wpm().unwrap(), 67.57);
    }

    #[test]
    fn test_serializes_with_snake_case_fields() {
        let result = TranscriptionResult {
            transcript: "merhaba".to_string(),
            confidence: Some("90.00".to_string()),
            duration: Some("1.00".to_string()),
            reading_speed: Some("60.00".to_string()),
            words: vec![WordTiming {
                text: "merhaba".to_string(),
                start: "0.00".to_string(),
                end: "1.00".to_string(),
                confidence: "95.00".to_string(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["reading_speed"], "60.00");
        assert_eq!(json["words"][0]["text"], "merhaba");
        assert_eq!(json["words"][0]["confidence"], "95.00");
    }
}
