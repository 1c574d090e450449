use std::path::Path;

/// Domain interface for speech-to-text transcription.
///
/// Implementations return the provider's raw structured payload; turning it
/// into a [`TranscriptionResult`](super::transcript::TranscriptionResult) is
/// the normalizer's job. `Ok(None)` means the provider answered without a
/// usable result (e.g. a non-success status), which callers treat like an
/// empty transcript.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> Result<Option<serde_json::Value>, Box<dyn std::error::Error>>;
}
