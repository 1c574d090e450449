use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error_taxonomy::ErrorCategory;

pub const TEXT_MARKER: &str = "Metin:";
pub const EXPLANATION_MARKER: &str = "Açıklama:";
pub const ERRORS_MARKER: &str = "Hatalar:";
pub const READING_SPEED_MARKER: &str = "Okuma Hızı:";

/// A capture region of an oracle response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    AnnotatedText,
    Explanation,
    ErrorTally,
    ReadingSpeed,
}

/// Declarative layout of one dialect: an optional section for text that
/// precedes the first marker, then each marker and the section it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionGrammar {
    pub lead: Option<Section>,
    pub markers: &'static [(&'static str, Section)],
}

const LEGACY_GRAMMAR: SectionGrammar = SectionGrammar {
    lead: Some(Section::AnnotatedText),
    markers: &[
        (EXPLANATION_MARKER, Section::Explanation),
        (ERRORS_MARKER, Section::ErrorTally),
        (READING_SPEED_MARKER, Section::ReadingSpeed),
    ],
};

const EXTENDED_GRAMMAR: SectionGrammar = SectionGrammar {
    lead: None,
    markers: &[
        (TEXT_MARKER, Section::AnnotatedText),
        (EXPLANATION_MARKER, Section::Explanation),
        (ERRORS_MARKER, Section::ErrorTally),
        (READING_SPEED_MARKER, Section::ReadingSpeed),
    ],
};

/// Marker convention of one prompt version.
///
/// `Legacy` opens with the annotated text and tallies four error categories.
/// `Extended` labels the annotated text with `Metin:` and adds `other_errors`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseDialect {
    #[default]
    Legacy,
    Extended,
}

impl ResponseDialect {
    pub const ALL: &[ResponseDialect] = &[ResponseDialect::Legacy, ResponseDialect::Extended];

    /// Pick the dialect a response was written in by probing for `Metin:`.
    pub fn detect(raw_text: &str) -> Self {
        if raw_text.contains(TEXT_MARKER) {
            ResponseDialect::Extended
        } else {
            ResponseDialect::Legacy
        }
    }

    pub fn grammar(self) -> SectionGrammar {
        match self {
            ResponseDialect::Legacy => LEGACY_GRAMMAR,
            ResponseDialect::Extended => EXTENDED_GRAMMAR,
        }
    }

    /// The dialect whose category set covers both `self` and `other`.
    pub fn wider(self, other: Self) -> Self {
        if self == ResponseDialect::Extended || other == ResponseDialect::Extended {
            ResponseDialect::Extended
        } else {
            ResponseDialect::Legacy
        }
    }

    /// Closed set of error categories the dialect's prompt asks for.
    pub fn categories(self) -> &'static [ErrorCategory] {
        match self {
            ResponseDialect::Legacy => ErrorCategory::LEGACY,
            ResponseDialect::Extended => ErrorCategory::ALL,
        }
    }
}

impl fmt::Display for ResponseDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseDialect::Legacy => write!(f, "legacy"),
            ResponseDialect::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for ResponseDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(ResponseDialect::Legacy),
            "extended" => Ok(ResponseDialect::Extended),
            other => Err(format!(
                "Dialect must be 'legacy' or 'extended', got '{other}'"
            )),
        }
    }
}
