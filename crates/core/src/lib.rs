//! Reading-accuracy analysis for a spoken rendition of a known text.
//!
//! A recording is transcribed by a speech recognizer, the transcript is
//! compared against the reference text by a text-generation oracle, and the
//! oracle's free-text answer is parsed into a typed error taxonomy.

pub mod shared {
    pub mod constants;
    pub mod metric_format;
    pub mod provider_config;
    pub mod provider_error;
}

pub mod transcription {
    pub mod domain {
        pub mod asr_normalizer;
        pub mod speech_recognizer;
        pub mod transcript;
    }
    pub mod infrastructure {
        pub mod deepgram_recognizer;
    }
}

pub mod analysis {
    pub mod domain {
        pub mod comparative_analyzer;
        pub mod error_taxonomy;
        pub mod response_dialect;
        pub mod section_extractor;
    }
    pub mod infrastructure {
        pub mod chat_completions_analyzer;
        pub mod prompts;
    }
}

pub mod pipeline {
    pub mod analysis_report;
    pub mod analyze_reading_use_case;
    pub mod pipeline_logger;
    pub mod upload_workspace;
}
