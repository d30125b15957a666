use serde::ser::{Serialize, SerializeSeq, Serializer};

/// One output row: the current state followed by a data line's comma-delimited tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub state: String,
    pub tokens: String,
}

impl OutputRecord {
    pub fn new(state: impl Into<String>, tokens: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            tokens: tokens.into(),
        }
    }
}

impl std::fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.state, self.tokens)
    }
}

// Serialised as a flat sequence so the csv writer lays out one field per token. Splitting on
// ',' and re-joining is lossless, so the written row always matches `Display`.
impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        seq.serialize_element(&self.state)?;
        for token in self.tokens.split(',') {
            seq.serialize_element(token)?;
        }
        seq.end()
    }
}
