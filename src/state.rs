use super::types::{classify, normalize_data_line, Classification, OutputRecord, RawLine};
use std::error::Error;
use tracing::{debug, trace};

/// Carries the most recent state header across a single pass over the report.
#[derive(Default)]
pub struct State {
    current: Option<String>,
    summary: Summary,
}

impl State {
    /// Headers update the current state and produce nothing; every other line produces exactly
    /// one record.
    pub fn process(&mut self, line: &RawLine) -> Result<Option<OutputRecord>, ProcessError> {
        self.summary.lines += 1;
        let trimmed = line.trimmed();

        match classify(trimmed) {
            Classification::Header(header) => {
                debug!(line = line.number, state = header, "state header");
                self.current = Some(header.to_owned());
                self.summary.headers += 1;

                Ok(None)
            }
            Classification::Data => {
                let state =
                    self.current
                        .as_deref()
                        .ok_or_else(|| ProcessError::MissingStateHeader {
                            line_number: line.number,
                            content: trimmed.to_owned(),
                        })?;

                if trimmed.is_empty() {
                    // Not special-cased: this becomes "<state>,"
                    debug!(line = line.number, state, "blank line emitted as empty record");
                }

                let record = OutputRecord::new(state, normalize_data_line(trimmed));
                trace!(line = line.number, %record, "record");
                self.summary.records += 1;

                Ok(Some(record))
            }
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    pub headers: usize,
    pub records: usize,
}

/// Lazily turns a stream of lines into records, owning a fresh `State` for the pass.
pub struct Records<I> {
    lines: I,
    state: State,
}

impl<I> Records<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: State::default(),
        }
    }

    pub fn summary(&self) -> Summary {
        self.state.summary()
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = std::io::Result<RawLine>>,
{
    type Item = Result<OutputRecord, Box<dyn Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            match self.state.process(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[derive(Debug)]
pub enum ProcessError {
    MissingStateHeader { line_number: usize, content: String },
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStateHeader {
                line_number,
                content,
            } => write!(
                f,
                "Data line {} (\"{}\") appears before any state header",
                line_number, content
            ),
        }
    }
}

impl Error for ProcessError {}
