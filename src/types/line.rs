use once_cell::sync::Lazy;
use regex::Regex;

// Anchored at the start, greedy to the end of the (already trimmed) line.
static HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z].*").expect("header pattern is valid"));

// An optional space, a run of dots, then a space. Decimal points like "12.5" never match.
static DOT_LEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\.+ ").expect("dot leader pattern is valid"));

/// A single line of the input report, as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based position in the input.
    pub number: usize,
    pub content: String,
}

impl RawLine {
    pub fn new(number: usize, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }

    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Header(&'a str),
    Data,
}

/// Any line starting with a letter (either case) is a header naming a new state.
///
/// This is deliberately loose: a data row whose first token is a word (e.g. "Beer .. 10.5")
/// is classified as a header too. Reports in the wild lead data rows with numbers, so the
/// rule is kept as-is rather than guessing at a stricter one.
pub fn classify(line: &str) -> Classification<'_> {
    match HEADER_PATTERN.find(line) {
        Some(header) => Classification::Header(header.as_str()),
        None => Classification::Data,
    }
}

/// Strips dot leaders and turns every remaining space into a comma.
pub fn normalize_data_line(line: &str) -> String {
    DOT_LEADER_PATTERN.replace_all(line, " ").replace(' ', ",")
}
