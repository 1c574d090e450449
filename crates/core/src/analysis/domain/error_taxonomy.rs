use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TALLY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z_]+_errors):[ \t]*(\d+)").unwrap());

/// Reading-error categories the oracle is asked to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    Addition,
    Omission,
    Reversal,
    Repetition,
    Other,
}

impl ErrorCategory {
    pub const LEGACY: &[ErrorCategory] = &[
        ErrorCategory::Addition,
        ErrorCategory::Omission,
        ErrorCategory::Reversal,
        ErrorCategory::Repetition,
    ];

    pub const ALL: &[ErrorCategory] = &[
        ErrorCategory::Addition,
        ErrorCategory::Omission,
        ErrorCategory::Reversal,
        ErrorCategory::Repetition,
        ErrorCategory::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ErrorCategory::Addition => "addition_errors",
            ErrorCategory::Omission => "omission_errors",
            ErrorCategory::Reversal => "reversal_errors",
            ErrorCategory::Repetition => "repetition_errors",
            ErrorCategory::Other => "other_errors",
        }
    }
}

/// What to do with categories the oracle left out of its tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AbsentCategories {
    /// Leave them out of the map.
    #[default]
    Omit,
    /// Insert them with a zero count.
    ZeroFill,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyOptions {
    pub absent: AbsentCategories,
    /// Drop keys outside the closed category set instead of keeping them.
    pub known_only: bool,
}

/// Error counts keyed by the oracle's category token (e.g. `addition_errors`).
///
/// Keys are kept as strings because the vocabulary depends on the prompt
/// version; use [`ErrorTaxonomy::count`] for typed access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorTaxonomy {
    counts: BTreeMap<String, u64>,
}

impl ErrorTaxonomy {
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn count(&self, category: ErrorCategory) -> Option<u64> {
        self.get(category.key())
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts. Counts come from free text, so the sum saturates.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    fn zero_fill(&mut self, categories: &[ErrorCategory]) {
        for category in categories {
            self.counts.entry(category.key().to_string()).or_insert(0);
        }
    }

    fn retain_known(&mut self, categories: &[ErrorCategory]) {
        self.counts
            .retain(|key, _| categories.iter().any(|c| c.key() == key.as_str()));
    }
}

impl FromIterator<(ErrorCategory, u64)> for ErrorTaxonomy {
    fn from_iter<I: IntoIterator<Item = (ErrorCategory, u64)>>(iter: I) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(c, n)| (c.key().to_string(), n))
                .collect(),
        }
    }
}

/// Collect every `<token>_errors: <digits>` pair from a tally.
///
/// Unknown tokens are kept. A key seen twice keeps its last count.
pub fn parse_errors(tally_text: &str) -> ErrorTaxonomy {
    let mut taxonomy = ErrorTaxonomy::default();
    for caps in TALLY_LINE.captures_iter(tally_text) {
        let key = &caps[1];
        match caps[2].parse::<u64>() {
            Ok(count) => {
                taxonomy.counts.insert(key.to_string(), count);
            }
            Err(e) => log::warn!("Ignoring unreadable count for {key}: {e}"),
        }
    }
    taxonomy
}

/// [`parse_errors`] followed by the closed-set policies in `options`.
pub fn parse_errors_with(
    tally_text: &str,
    options: TallyOptions,
    categories: &[ErrorCategory],
) -> ErrorTaxonomy {
    let mut taxonomy = parse_errors(tally_text);
    if options.known_only {
        taxonomy.retain_known(categories);
    }
    if options.absent == AbsentCategories::ZeroFill {
        taxonomy.zero_fill(categories);
    }
    taxonomy
}
