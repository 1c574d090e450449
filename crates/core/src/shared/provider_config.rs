use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::domain::response_dialect::ResponseDialect;
use crate::shared::constants::{
    CHAT_COMPLETIONS_URL, DEEPGRAM_API_KEY_ENV, DEEPGRAM_LISTEN_URL, DEFAULT_ANALYSIS_MODEL,
    DEFAULT_ASR_LANGUAGE, DEFAULT_ASR_MODEL, DEFAULT_AUDIO_CONTENT_TYPE,
    DEFAULT_HTTP_TIMEOUT_SECS, OPENAI_API_KEY_ENV,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no API key configured for {provider} (set {env_var})")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },
}

/// Connection settings for the speech recognition provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsrConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub language: String,
    pub model: String,
    pub content_type: String,
    pub timeout_secs: u64,
}

impl Default for AsrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEEPGRAM_LISTEN_URL.to_string(),
            api_key: None,
            language: DEFAULT_ASR_LANGUAGE.to_string(),
            model: DEFAULT_ASR_MODEL.to_string(),
            content_type: DEFAULT_AUDIO_CONTENT_TYPE.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Connection settings for the comparative-analysis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Which prompt to send; the response dialect is still detected on receipt.
    pub prompt_dialect: ResponseDialect,
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
            api_key: None,
            model: DEFAULT_ANALYSIS_MODEL.to_string(),
            prompt_dialect: ResponseDialect::Legacy,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub asr: AsrConfig,
    pub analysis: AnalysisConfig,
}

impl ProviderConfig {
    /// Platform settings location, e.g. `~/.config/ReadCheck/settings.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ReadCheck").join("settings.json"))
    }

    /// Load settings from `path`, or from [`Self::default_path`] when `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::read_file(p),
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::read_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Fill credentials from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Fill credentials from `lookup`; non-empty values replace file settings.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(DEEPGRAM_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.asr.api_key = Some(key);
        }
        if let Some(key) = lookup(OPENAI_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.analysis.api_key = Some(key);
        }
        self
    }

    /// Both providers need a credential before a run can start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asr.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingApiKey {
                provider: "speech recognition",
                env_var: DEEPGRAM_API_KEY_ENV,
            });
        }
        if self.analysis.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingApiKey {
                provider: "comparative analysis",
                env_var: OPENAI_API_KEY_ENV,
            });
        }
        Ok(())
    }
}
