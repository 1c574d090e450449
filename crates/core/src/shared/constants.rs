pub const DEEPGRAM_LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";
pub const DEFAULT_ASR_LANGUAGE: &str = "tr";
pub const DEFAULT_ASR_MODEL: &str = "nova-2";
pub const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/wave";

pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

pub const DEEPGRAM_API_KEY_ENV: &str = "DEEPGRAM_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Message returned when the recognizer produced no transcript, which in
/// practice means the audio is not Turkish speech.
pub const UNSUPPORTED_AUDIO_MESSAGE: &str =
    "Yüklemiş olduğunuz ses dosyasını kontrol edin. Desteklenen dil; TR";

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "mp4", "3gp", "wav"];
pub const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// Average words produced per generated token.
pub const WORDS_PER_TOKEN: f64 = 0.75;
/// Assumed silent-reading pace used for the token-based estimate.
pub const ESTIMATE_WORDS_PER_MINUTE: f64 = 200.0;
