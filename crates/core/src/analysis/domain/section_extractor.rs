use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::response_dialect::{ResponseDialect, Section, SectionGrammar};

static REPORTED_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"reading_speed:\s*(\d+(?:\.\d+)?)").unwrap());

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("unparseable analysis response: {0}")]
    UnparseableResponse(String),
}

/// Labelled regions of an oracle response, each trimmed at its edges.
///
/// Any section whose marker was absent is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedSections {
    pub dialect: ResponseDialect,
    pub annotated_text: String,
    pub explanation: String,
    pub error_tally_text: String,
    pub reading_speed_text: String,
}

impl ExtractedSections {
    fn set(&mut self, section: Section, body: &str) {
        let body = body.trim().to_string();
        match section {
            Section::AnnotatedText => self.annotated_text = body,
            Section::Explanation => self.explanation = body,
            Section::ErrorTally => self.error_tally_text = body,
            Section::ReadingSpeed => self.reading_speed_text = body,
        }
    }

    /// Words-per-minute figure the oracle stated under `Okuma Hızı:`, if any.
    pub fn reported_reading_speed(&self) -> Option<f64> {
        REPORTED_SPEED
            .captures(&self.reading_speed_text)
            .and_then(|caps| caps[1].parse().ok())
    }
}

/// Split an oracle response into sections, detecting its dialect first.
pub fn extract_sections(raw_text: &str) -> Result<ExtractedSections, ExtractError> {
    extract_with_dialect(raw_text, ResponseDialect::detect(raw_text))
}

/// Split an oracle response using a known dialect.
pub fn extract_with_dialect(
    raw_text: &str,
    dialect: ResponseDialect,
) -> Result<ExtractedSections, ExtractError> {
    if raw_text.trim().is_empty() {
        return Err(ExtractError::UnparseableResponse(
            "response text is empty".to_string(),
        ));
    }

    let mut sections = ExtractedSections {
        dialect,
        ..Default::default()
    };
    apply_grammar(raw_text, &dialect.grammar(), &mut sections);
    Ok(sections)
}

/// Each found marker owns the text up to the next found marker (or the end).
/// Text before the first marker goes to the grammar's lead section, but only
/// when at least one marker exists; a response without any marker has no
/// recognisable structure and yields nothing.
fn apply_grammar(raw_text: &str, grammar: &SectionGrammar, sections: &mut ExtractedSections) {
    let mut found: Vec<(usize, usize, Section)> = grammar
        .markers
        .iter()
        .filter_map(|(marker, section)| {
            raw_text
                .find(marker)
                .map(|pos| (pos, pos + marker.len(), *section))
        })
        .collect();
    found.sort_by_key(|(pos, _, _)| *pos);

    let Some(&(first_pos, _, _)) = found.first() else {
        log::warn!("Analysis response contains no section markers");
        return;
    };

    if let Some(lead) = grammar.lead {
        sections.set(lead, &raw_text[..first_pos]);
    }

    for (idx, &(_, body_start, section)) in found.iter().enumerate() {
        let body_end = found
            .get(idx + 1)
            .map_or(raw_text.len(), |&(next_pos, _, _)| next_pos)
            .max(body_start);
        sections.set(section, &raw_text[body_start..body_end]);
    }
}
