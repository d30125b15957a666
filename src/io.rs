use super::types::{OutputRecord, RawLine};
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

pub struct LineReader<R> {
    lines: Lines<R>,
    number: usize,
}

pub type LineFileReader = LineReader<BufReader<File>>;

impl LineFileReader {
    pub fn open(input_path: &Path) -> Result<Self, OpenError> {
        let file = File::open(input_path).map_err(|source| OpenError {
            path: input_path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = std::io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|result| {
            self.number += 1;
            result.map(|content| RawLine::new(self.number, content))
        })
    }
}

/// Writes records as bare comma-joined rows: no header row, no quoting, any number of fields.
pub struct CsvRecordWriter<W: std::io::Write> {
    writer: csv::Writer<W>,
}

impl<W: std::io::Write> CsvRecordWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .quote_style(csv::QuoteStyle::Never)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(sink),
        }
    }

    pub fn write(&mut self, record: &OutputRecord) -> Result<(), csv::Error> {
        self.writer.serialize(record)
    }

    pub fn flush(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(sink) => sink,
            Err(e) => panic!("flushing csv writer: {}", e.error()),
        }
    }
}

/// Returned when the input report can't be opened (missing, unreadable, a directory...).
#[derive(Debug)]
pub struct OpenError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unable to open input \"{}\": {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for OpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvRecordWriter, LineFileReader, LineReader};
    use crate::{
        state::Records,
        types::{OutputRecord, RawLine},
    };
    use std::io::{Cursor, Write};

    fn convert(input_file: &std::path::Path) -> Result<String, Box<dyn std::error::Error>> {
        let mut writer = CsvRecordWriter::new(Vec::new());

        for result in Records::new(LineFileReader::open(input_file)?) {
            writer.write(&result?)?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }

    #[test]
    fn test_line_numbers() {
        let lines: Vec<RawLine> = LineReader::new(Cursor::new("Alabama\r\n1 2\n\n3"))
            .map(|result| result.unwrap())
            .collect();

        assert_eq!(
            lines,
            vec![
                RawLine::new(1, "Alabama"),
                RawLine::new(2, "1 2"),
                RawLine::new(3, ""),
                RawLine::new(4, "3"),
            ]
        );
    }

    #[test]
    fn test_writer_matches_display() {
        let records = [
            OutputRecord::new("Alabama", "1977,10.5,3.2"),
            OutputRecord::new("Alabama", ""),
            OutputRecord::new("New York", "1,,2"),
            OutputRecord::new("Ohio", "\"quoted\""),
        ];

        let mut writer = CsvRecordWriter::new(Vec::new());
        for record in &records {
            writer.write(record).unwrap();
        }
        let written = String::from_utf8(writer.into_inner()).unwrap();

        let expected: String = records.iter().map(|r| format!("{}\n", r)).collect();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_convert_file() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(
            input,
            "Alabama\n  1977 .... 10.5 .. 3.2\n1978 ... 11.0 3.0\n\nAlaska\n1977 .. 8.0\n"
        )
        .unwrap();

        assert_eq!(
            convert(input.path()).unwrap(),
            "Alabama,1977,10.5,3.2\nAlabama,1978,11.0,3.0\nAlabama,\nAlaska,1977,8.0\n"
        );
    }

    #[test]
    fn test_convert_file_without_header() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "1977 .. 8.0\nAlaska\n").unwrap();

        let err = convert(input.path()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("alcohol_by_state.txt");

        let err = LineFileReader::open(&missing).err().unwrap();
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(err.path, missing);
        assert!(err.to_string().contains("alcohol_by_state.txt"));
    }
}
