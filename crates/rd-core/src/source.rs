//! JSON-lines envelope source.

use std::io::{self, BufRead};

use once_cell::sync::Lazy;
use rd_common::{Envelope, Error, Result};
use regex::Regex;
use tracing::debug;

// ASCII control characters other than tab, newline and carriage return.
static RE_CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());

/// Iterates envelopes from a JSON-lines reader.
///
/// Blank lines are skipped. A line that fails to parse is retried once with
/// control characters stripped; if it still fails the iterator yields
/// [`Error::MalformedEnvelope`] and carries on with the next line.
pub struct EnvelopeReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> EnvelopeReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// 1-based number of the last line read.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for EnvelopeReader<R> {
    type Item = Result<Envelope>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Some(Err(Error::MalformedEnvelope {
                        line: self.line_no,
                        message: e.to_string(),
                    }));
                }
                Err(e) => return Some(Err(Error::Io(e))),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_line(&line, self.line_no));
        }
    }
}

/// Parse one JSON line into an envelope.
pub fn parse_line(line: &str, line_no: usize) -> Result<Envelope> {
    let first = match serde_json::from_str::<Envelope>(line) {
        Ok(envelope) => return Ok(envelope),
        Err(e) => e,
    };

    let cleaned = RE_CONTROL_CHARS.replace_all(line, "");
    if cleaned.len() != line.len() {
        if let Ok(envelope) = serde_json::from_str::<Envelope>(&cleaned) {
            debug!(line = line_no, "parsed envelope after stripping control characters");
            return Ok(envelope);
        }
    }

    Err(Error::MalformedEnvelope {
        line: line_no,
        message: first.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_common::OpaqueValue;
    use std::io::Cursor;

    fn read(input: &str) -> Vec<Result<Envelope>> {
        EnvelopeReader::new(Cursor::new(input.as_bytes().to_vec())).collect()
    }

    #[test]
    fn test_reads_lines_and_skips_blanks() {
        let items = read("{\"event\":\"metadata\",\"data\":{\"run_id\":\"r\"}}\n\n   \n{\"kind\":\"events\",\"data\":{}}\n");
        assert_eq!(items.len(), 2);
        let first = items[0].as_ref().unwrap();
        assert_eq!(first.kind, "metadata");
        assert_eq!(items[1].as_ref().unwrap().kind, "events");
    }

    #[test]
    fn test_control_chars_are_stripped_on_retry() {
        let line = "{\"event\":\"events\",\"data\":{\"chunk\":\"a\u{0001}b\"}}";
        let envelope = parse_line(line, 1).unwrap();
        assert_eq!(envelope.data.get("chunk"), Some(&OpaqueValue::from("ab")));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let items = read("{\"event\":\"metadata\",\"data\":{}}\n\nnot json\n{\"event\":\"events\"}\n");
        assert_eq!(items.len(), 3);
        match &items[1] {
            Err(Error::MalformedEnvelope { line, .. }) => assert_eq!(*line, 3),
            other => panic!("expected malformed envelope, got {:?}", other),
        }
        let last = items[2].as_ref().unwrap();
        assert_eq!(last.data, OpaqueValue::Missing);
    }

    #[test]
    fn test_missing_kind_is_malformed() {
        let err = parse_line("{\"data\":{}}", 4).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut bytes = b"{\"event\":\"events\"}\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let items: Vec<_> = EnvelopeReader::new(Cursor::new(bytes)).collect();
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(Error::MalformedEnvelope { line: 2, .. })));
    }
}
