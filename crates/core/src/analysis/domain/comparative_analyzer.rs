use serde::{Deserialize, Serialize};

use crate::shared::constants::{ESTIMATE_WORDS_PER_MINUTE, WORDS_PER_TOKEN};

/// Token accounting reported alongside an oracle answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Rough reading figure implied by the token volume: words are
    /// approximated as `total_tokens * 0.75`, divided by a 200 wpm pace.
    ///
    /// This says nothing about how fast the speaker read; that comes from
    /// the recognizer's timings.
    pub fn reading_estimate(&self) -> f64 {
        let words = self.total_tokens as f64 * WORDS_PER_TOKEN;
        words / ESTIMATE_WORDS_PER_MINUTE
    }
}

/// Raw answer of the comparative-analysis oracle.
///
/// `content` is `None` when the provider answered without any text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleResponse {
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Domain interface for the service that compares the reference text with
/// what was actually read and describes the differences in free text.
pub trait ComparativeAnalyzer: Send {
    fn analyze(
        &self,
        reference_text: &str,
        transcript: &str,
    ) -> Result<OracleResponse, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reading_estimate_from_total_tokens() {
        let usage = TokenUsage {
            prompt_tokens: 300,
            completion_tokens: 100,
            total_tokens: 400,
        };
        // 400 * 0.75 = 300 words, 300 / 200 = 1.5
        assert_relative_eq!(usage.reading_estimate(), 1.5);
    }

    #[test]
    fn test_reading_estimate_without_tokens_is_zero() {
        assert_relative_eq!(TokenUsage::default().reading_estimate(), 0.0);
    }

    #[test]
    fn test_usage_deserializes_with_missing_fields() {
        let usage: TokenUsage = serde_json::from_str(r#"{"total_tokens": 12}"#).unwrap();
        assert_eq!(usage.total_tokens, 12);
        assert_eq!(usage.prompt_tokens, 0);
    }
}
