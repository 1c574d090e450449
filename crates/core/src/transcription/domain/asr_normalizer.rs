use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::transcript::{TranscriptionResult, WordTiming};
use crate::shared::metric_format::{to_fixed2, to_percentage, words_per_minute, MetricError};

/// Location of the best alternative of the first channel in the provider payload.
const BEST_ALTERNATIVE: &str = "/results/channels/0/alternatives/0";
const DURATION: &str = "/metadata/duration";

#[derive(Error, Debug, PartialEq)]
pub enum NormalizeError {
    #[error("malformed provider response: {0}")]
    MalformedProviderResponse(String),
    #[error("reading speed is undefined: {0}")]
    DivisionByZero(#[from] MetricError),
}

#[derive(Debug, Deserialize)]
struct ProviderWord {
    #[serde(alias = "text")]
    word: String,
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
    #[serde(default)]
    confidence: f64,
}

/// Convert a raw recognizer payload into a [`TranscriptionResult`].
///
/// Accepts the provider's nested layout (`results.channels[0].alternatives[0]`
/// plus `metadata.duration`) or a flattened alternative carrying `duration`
/// beside `transcript`. Missing optional fields become `None`. An empty or absent transcript is a
/// valid result (the audio was not understood) and short-circuits everything
/// else. A transcript without words, or without a non-zero duration, is an
/// error because the reading speed cannot be derived from it.
pub fn normalize(payload: &Value) -> Result<TranscriptionResult, NormalizeError> {
    let alternative = payload
        .pointer(BEST_ALTERNATIVE)
        .or_else(|| payload.get("transcript").map(|_| payload));

    let transcript = alternative
        .and_then(|a| a.get("transcript"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if transcript.trim().is_empty() {
        log::debug!("Recognizer returned an empty transcript");
        return Ok(TranscriptionResult::empty());
    }

    let words = parse_words(alternative.and_then(|a| a.get("words")))?;
    if words.is_empty() {
        return Err(NormalizeError::MalformedProviderResponse(
            "transcript is present but the word list is empty".to_string(),
        ));
    }

    let confidence = alternative
        .and_then(|a| a.get("confidence"))
        .and_then(Value::as_f64)
        .map(percentage);

    // A missing duration leaves nothing to divide by, same as an explicit zero.
    let duration = payload
        .pointer(DURATION)
        .or_else(|| payload.get("duration"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let reading_speed = words_per_minute(words.len(), duration)?;

    Ok(TranscriptionResult {
        transcript: transcript.to_string(),
        confidence,
        duration: Some(to_fixed2(duration)),
        reading_speed: Some(to_fixed2(reading_speed)),
        words,
    })
}

fn parse_words(raw: Option<&Value>) -> Result<Vec<WordTiming>, NormalizeError> {
    let entries = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(NormalizeError::MalformedProviderResponse(
                "word list is not an array".to_string(),
            ))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let word = ProviderWord::deserialize(entry).map_err(|e| {
                NormalizeError::MalformedProviderResponse(format!("word #{idx}: {e}"))
            })?;
            if word.start > word.end {
                return Err(NormalizeError::MalformedProviderResponse(format!(
                    "word #{idx} ends ({}) before it starts ({})",
                    word.end, word.start
                )));
            }
            Ok(WordTiming {
                text: word.word,
                start: to_fixed2(word.start),
                end: to_fixed2(word.end),
                confidence: percentage(word.confidence),
            })
        })
        .collect()
}

fn percentage(fraction: f64) -> String {
    to_fixed2(to_percentage(fraction.clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn payload(transcript: &str, confidence: f64, duration: f64, words: Value) -> Value {
        json!({
            "metadata": { "duration": duration },
            "results": { "channels": [ { "alternatives": [ {
                "transcript": transcript,
                "confidence": confidence,
                "words": words,
            } ] } ] }
        })
    }

    fn two_words() -> Value {
        json!([
            { "word": "merhaba", "start": 0.0, "end": 1.0, "confidence": 0.95 },
            { "word": "dünya", "start": 1.0, "end": 2.0, "confidence": 0.85 },
        ])
    }

    #[test]
    fn test_normalize_typical_payload() {
        let result = normalize(&payload("merhaba dünya", 0.9, 2.0, two_words())).unwrap();

        assert_eq!(result.transcript, "merhaba dünya");
        assert_eq!(result.confidence.as_deref(), Some("90.00"));
        assert_eq!(result.duration.as_deref(), Some("2.00"));
        assert_eq!(result.reading_speed.as_deref(), Some("60.00"));
        assert_eq!(
            result.words,
            vec![
                WordTiming {
                    text: "merhaba".to_string(),
                    start: "0.00".to_string(),
                    end: "1.00".to_string(),
                    confidence: "95.00".to_string(),
                },
                WordTiming {
                    text: "dünya".to_string(),
                    start: "1.00".to_string(),
                    end: "2.00".to_string(),
                    confidence: "85.00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_flat_payload_with_text_words() {
        let raw = json!({
            "transcript": "merhaba dünya",
            "confidence": 0.9,
            "duration": 2.0,
            "words": [
                { "text": "merhaba", "start": 0.0, "end": 1.0, "confidence": 0.95 },
                { "text": "dünya", "start": 1.0, "end": 2.0, "confidence": 0.85 },
            ],
        });
        let result = normalize(&raw).unwrap();

        assert_eq!(result, normalize(&payload("merhaba dünya", 0.9, 2.0, two_words())).unwrap());
        assert_eq!(result.confidence.as_deref(), Some("90.00"));
        assert_eq!(result.duration.as_deref(), Some("2.00"));
        assert_eq!(result.reading_speed.as_deref(), Some("60.00"));
        assert_eq!(result.words[0].text, "merhaba");
        assert_eq!(result.words[1].confidence, "85.00");
    }

    #[test]
    fn test_nested_payload_accepts_text_key() {
        let words = json!([{ "text": "merhaba", "start": 0.0, "end": 0.5, "confidence": 0.9 }]);
        let result = normalize(&payload("merhaba", 0.9, 1.0, words)).unwrap();
        assert_eq!(result.words[0].text, "merhaba");
    }

    #[test]
    fn test_reading_speed_uses_whole_transcript() {
        let words = json!([
            { "word": "bir", "start": 0.0, "end": 0.4, "confidence": 0.9 },
            { "word": "iki", "start": 0.4, "end": 0.9, "confidence": 0.9 },
            { "word": "üç", "start": 0.9, "end": 1.3, "confidence": 0.9 },
        ]);
        let result = normalize(&payload("bir iki üç", 0.9, 4.4400005, words)).unwrap();
        // 3 / 4.4400005 * 60 = 40.54...
        assert_eq!(result.reading_speed.as_deref(), Some("40.54"));
        assert_eq!(result.duration.as_deref(), Some("4.44"));
        assert_relative_eq!(result.reading_speed_wpm().unwrap(), 40.54);
    }

    #[test]
    fn test_confidence_long_fraction_is_rounded() {
        let result = normalize(&payload("merhaba dünya", 0.99902344, 2.0, two_words())).unwrap();
        assert_eq!(result.confidence.as_deref(), Some("99.90"));
    }

    #[test]
    fn test_empty_transcript_is_valid_empty_result() {
        let result = normalize(&payload("", 0.0, 0.0, json!([]))).unwrap();
        assert!(result.is_empty());
        assert!(result.reading_speed.is_none());
    }

    #[test]
    fn test_absent_results_is_valid_empty_result() {
        let result = normalize(&json!({ "metadata": { "duration": 3.0 } })).unwrap();
        assert!(result.is_empty());
        assert!(normalize(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_zero_duration_is_division_by_zero() {
        let err = normalize(&payload("merhaba dünya", 0.9, 0.0, two_words())).unwrap_err();
        assert_eq!(err, NormalizeError::DivisionByZero(MetricError::DivisionByZero));
    }

    #[test]
    fn test_missing_duration_is_division_by_zero() {
        let raw = json!({
            "results": { "channels": [ { "alternatives": [ {
                "transcript": "merhaba dünya",
                "words": two_words(),
            } ] } ] }
        });
        assert!(matches!(
            normalize(&raw),
            Err(NormalizeError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_missing_words_with_transcript_is_malformed() {
        let raw = json!({
            "metadata": { "duration": 2.0 },
            "results": { "channels": [ { "alternatives": [ { "transcript": "merhaba" } ] } ] }
        });
        assert!(matches!(
            normalize(&raw),
            Err(NormalizeError::MalformedProviderResponse(_))
        ));
    }

    #[test]
    fn test_empty_words_with_transcript_is_malformed() {
        let err = normalize(&payload("merhaba", 0.9, 2.0, json!([]))).unwrap_err();
        assert!(err.to_string().contains("word list is empty"));
    }

    #[test]
    fn test_word_that_is_not_an_object_is_malformed() {
        let err = normalize(&payload("merhaba", 0.9, 2.0, json!(["merhaba"]))).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedProviderResponse(_)));
    }

    #[test]
    fn test_word_ending_before_start_is_malformed() {
        let words = json!([{ "word": "merhaba", "start": 1.5, "end": 1.0, "confidence": 0.9 }]);
        let err = normalize(&payload("merhaba", 0.9, 2.0, words)).unwrap_err();
        assert!(err.to_string().contains("word #0"));
    }

    #[test]
    fn test_missing_confidence_is_absent() {
        let raw = json!({
            "metadata": { "duration": 1.0 },
            "results": { "channels": [ { "alternatives": [ {
                "transcript": "merhaba",
                "words": [ { "word": "merhaba", "start": 0.1, "end": 0.6 } ],
            } ] } ] }
        });
        let result = normalize(&raw).unwrap();
        assert!(result.confidence.is_none());
        assert_eq!(result.words[0].confidence, "0.00");
        assert_eq!(result.words[0].start, "0.10");
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let words = json!([{ "word": "merhaba", "start": 0.0, "end": 1.0, "confidence": 1.2 }]);
        let result = normalize(&payload("merhaba", 1.5, 1.0, words)).unwrap();
        assert_eq!(result.confidence.as_deref(), Some("100.00"));
        assert_eq!(result.words[0].confidence, "100.00");
    }
}
