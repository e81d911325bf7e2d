//! Line-oriented tokenization shared by the grid and field readers.
//!
//! ADCIRC ASCII files are fixed positional records: one record per line,
//! whitespace-delimited fields, meaning given by position. [`LineReader`]
//! hands out one [`Record`] per line while tracking the 1-based line number
//! so that every parse failure can point at the offending line.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AdcircError, AdcircResult};

/// Pseudo-path reported for I/O errors on in-memory readers.
pub(crate) const READER_PATH: &str = "<reader>";

/// Upper bound on buffer capacity reserved from a header count.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Capacity to reserve for `count` records announced by a header.
///
/// Header counts are unconfirmed until the records are read; buffers grow
/// past this as lines arrive.
pub(crate) fn initial_capacity(count: usize) -> usize {
    count.min(PREALLOC_LIMIT)
}

/// A single tokenized line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    line: usize,
    tokens: Vec<String>,
}

impl Record {
    /// Tokenize `text` on whitespace.
    pub fn new(line: usize, text: &str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// 1-based line number this record was read from.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Fail unless the record has at least `count` tokens.
    pub fn require(&self, count: usize, what: &str) -> AdcircResult<()> {
        if self.tokens.len() < count {
            return Err(AdcircError::format(
                self.line,
                format!(
                    "expected at least {} tokens for {}, found {}",
                    count,
                    what,
                    self.tokens.len()
                ),
            ));
        }
        Ok(())
    }

    /// Token at 0-based position `index`.
    pub fn token(&self, index: usize, what: &str) -> AdcircResult<&str> {
        self.tokens.get(index).map(String::as_str).ok_or_else(|| {
            AdcircError::format(
                self.line,
                format!(
                    "expected {} at token {}, found only {} tokens",
                    what,
                    index + 1,
                    self.tokens.len()
                ),
            )
        })
    }

    /// Parse the token at 0-based position `index`.
    pub fn parse<T>(&self, index: usize, what: &str) -> AdcircResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let token = self.token(index, what)?;
        token.parse().map_err(|e| {
            AdcircError::format(
                self.line,
                format!("expected {} at token {}, found '{}': {}", what, index + 1, token, e),
            )
        })
    }

    /// Skip `skip` tokens and append the next `count` tokens to `out` as f64.
    ///
    /// The token count is checked before anything is appended, so `count`
    /// taken from an untrusted header never drives an allocation.
    pub fn extend_f64(
        &self,
        skip: usize,
        count: usize,
        out: &mut Vec<f64>,
        what: &str,
    ) -> AdcircResult<()> {
        let needed = skip.checked_add(count).ok_or_else(|| {
            AdcircError::format(self.line, format!("{} count {} is too large", what, count))
        })?;
        self.require(needed, what)?;
        for index in skip..needed {
            out.push(self.parse(index, what)?);
        }
        Ok(())
    }
}

/// Sequential reader over the lines of an ADCIRC file.
pub struct LineReader<R> {
    inner: R,
    path: PathBuf,
    line: usize,
    buf: String,
}

impl LineReader<BufReader<File>> {
    /// Open a file for line-by-line reading.
    ///
    /// The file handle is owned by the reader and released when it is
    /// dropped, including on early return from a failed parse.
    pub fn open(path: impl AsRef<Path>) -> AdcircResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AdcircError::io(path, e))?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next raw line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> AdcircResult<Option<&str>> {
        self.buf.clear();
        let read = self
            .inner
            .read_line(&mut self.buf)
            .map_err(|e| AdcircError::io(&self.path, e))?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(self.buf.trim_end_matches(['\n', '\r'])))
    }

    /// Read the free-form title line.
    pub fn title(&mut self) -> AdcircResult<String> {
        let next = self.line + 1;
        match self.next_line()? {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(AdcircError::truncated(next, "title line")),
        }
    }

    /// Read and tokenize the next line, failing if the input has ended.
    pub fn record(&mut self, what: &str) -> AdcircResult<Record> {
        let next = self.line + 1;
        match self.next_line()? {
            Some(text) => Ok(Record::new(next, text)),
            None => Err(AdcircError::truncated(next, what)),
        }
    }

    /// Consume the rest of the input, returning how many non-blank lines it held.
    pub fn skip_remaining(&mut self) -> AdcircResult<usize> {
        let mut count = 0;
        while let Some(text) = self.next_line()? {
            if !text.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Count the lines in a file.
pub fn count_lines(path: impl AsRef<Path>) -> AdcircResult<usize> {
    let mut reader = LineReader::open(path)?;
    while reader.next_line()?.is_some() {}
    Ok(reader.line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(text.as_bytes().to_vec()), READER_PATH)
    }

    #[test]
    fn test_record_tokenizes_on_any_whitespace() {
        let record = Record::new(3, "  1\t-75.5   35.25 12.0  ");
        assert_eq!(record.line(), 3);
        assert_eq!(record.len(), 4);
        assert_eq!(record.tokens()[1], "-75.5");
    }

    #[test]
    fn test_parse_reports_line_and_token() {
        let record = Record::new(5, "1 abc 2.0");
        let err = record.parse::<f64>(1, "x coordinate").unwrap_err();
        assert_eq!(err.line(), Some(5));
        let msg = err.to_string();
        assert!(msg.contains("x coordinate"), "{}", msg);
        assert!(msg.contains("token 2"), "{}", msg);
        assert!(msg.contains("'abc'"), "{}", msg);
    }

    #[test]
    fn test_missing_token_is_format_error() {
        let record = Record::new(9, "1 2.0");
        let err = record.token(3, "depth").unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("found only 2 tokens"));
    }

    #[test]
    fn test_extend_f64_skips_leading_tokens() {
        let record = Record::new(1, "17 0.5 -1.5 2.25 99");
        let mut out = vec![9.0];
        record.extend_f64(1, 3, &mut out, "values").unwrap();
        assert_eq!(out, vec![9.0, 0.5, -1.5, 2.25]);
    }

    #[test]
    fn test_extend_f64_too_few_tokens() {
        let record = Record::new(4, "17 0.5");
        let mut out = Vec::new();
        let err = record.extend_f64(1, 2, &mut out, "values").unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(err.to_string().contains("expected at least 3 tokens"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_extend_f64_huge_count_is_format_error() {
        let record = Record::new(2, "1 0.5");
        let mut out = Vec::new();
        let err = record.extend_f64(1, usize::MAX, &mut out, "values").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(out.is_empty());
    }

    #[test]
    fn test_reader_tracks_line_numbers_and_crlf() {
        let mut r = reader("title\r\n1 2\r\n");
        assert_eq!(r.title().unwrap(), "title");
        let rec = r.record("header").unwrap();
        assert_eq!(rec.line(), 2);
        assert_eq!(rec.tokens(), &["1".to_string(), "2".to_string()]);
        let err = r.record("node record").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_empty_input_has_no_title() {
        let err = reader("").title().unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_skip_remaining_counts_non_blank() {
        let mut r = reader("a\n\n  \nb\nc");
        assert_eq!(r.skip_remaining().unwrap(), 3);
        assert_eq!(r.line(), 5);
    }

    #[test]
    fn test_count_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("three.txt");
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();
        assert_eq!(count_lines(&path).unwrap(), 3);

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "").unwrap();
        assert_eq!(count_lines(&empty).unwrap(), 0);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let err = count_lines("/definitely/not/here/fort.14").unwrap_err();
        assert!(matches!(err, AdcircError::Io { .. }));
    }
}
