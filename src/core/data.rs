//! Memory-efficient event-file loader with zero-allocation float parsing.
//!
//! An event file is CSV with one timestamp (seconds elapsed) per row.  With a
//! header the `timestamp` column is picked by name, without one the first
//! column is used.  Range checks are left to the binner.

use std::{
    fmt::{self, Display},
    io::{BufRead, BufReader, Read},
    path::{Path, PathBuf},
    str::FromStr,
};

use thiserror::Error;

// --- Error Handling ---
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected at least {expected} columns, got {got}")]
    BadColumnCount { expected: usize, got: usize },
    #[error("invalid {field} value '{text}'")]
    BadFloat { field: &'static str, text: String },
    #[error("header has no `timestamp` column")]
    MissingColumn,
}

/// Header name of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while !b.is_empty() && b[0].is_ascii_whitespace() {
        b = &b[1..];
    }
    while !b.is_empty() && b[b.len() - 1].is_ascii_whitespace() {
        b = &b[..b.len() - 1];
    }
    b
}

#[inline]
fn unquote(b: &[u8]) -> &[u8] {
    match b {
        [b'"', inner @ .., b'"'] => inner,
        _ => b,
    }
}

#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

#[inline]
fn fields(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|&b| b == b',').map(trim)
}

#[inline]
fn parse_f64(bytes: &[u8], line: usize) -> Result<f64, ParseCsvError> {
    lexical_core::parse::<f64>(unquote(bytes)).map_err(|_| ParseCsvError {
        line,
        kind: ParseErrorKind::BadFloat {
            field: TIMESTAMP_COLUMN,
            text: String::from_utf8_lossy(bytes).into_owned(),
        },
    })
}

/// Header when any field fails to parse as a number.
fn is_header(line: &[u8]) -> bool {
    fields(line).any(|f| lexical_core::parse::<f64>(unquote(f)).is_err())
}

// --- Fast CSV ingest ---
const BUF_CAP: usize = 1 << 20; // 1 MiB

/// Read every timestamp from `src`.  An empty source yields an empty vector.
pub fn read_events<R: Read>(src: R) -> Result<Vec<f64>, ParseCsvError> {
    let mut rdr = BufReader::with_capacity(BUF_CAP, src);
    let mut buf = Vec::<u8>::with_capacity(256);
    let mut events = Vec::<f64>::new();
    let mut column = 0usize;
    let mut saw_first = false;
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = rdr.read_until(b'\n', &mut buf).map_err(|e| ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::Io(e),
        })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        if buf.ends_with(b"\n") {
            buf.pop();
        }
        if buf.ends_with(b"\r") {
            buf.pop();
        }

        normalize_unicode_minus(&mut buf);
        if trim(&buf).is_empty() || buf[0] == b'#' {
            continue;
        }

        if !saw_first {
            saw_first = true;
            if is_header(&buf) {
                column = fields(&buf)
                    .position(|f| unquote(f).eq_ignore_ascii_case(TIMESTAMP_COLUMN.as_bytes()))
                    .ok_or(ParseCsvError {
                        line: line_no,
                        kind: ParseErrorKind::MissingColumn,
                    })?;
                continue;
            }
        }

        let field = fields(&buf).nth(column).ok_or_else(|| ParseCsvError {
            line: line_no,
            kind: ParseErrorKind::BadColumnCount {
                expected: column + 1,
                got: fields(&buf).count(),
            },
        })?;
        events.push(parse_f64(field, line_no)?);
    }
    Ok(events)
}

pub fn read_events_from_path(path: &Path) -> Result<Vec<f64>, ParseCsvError> {
    if path.as_os_str() == "-" {
        read_events(std::io::stdin())
    } else {
        use std::fs::File;
        read_events(File::open(path).map_err(|e| ParseCsvError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?)
    }
}

// --- Sources ---

/// One labelled event file, written `LABEL=PATH` or just `PATH` on the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSource {
    pub label: String,
    pub path: PathBuf,
}

impl SeriesSource {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// The four algorithm files written by the prime finder.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Trial Division", "trial_division.csv"),
            Self::new("Sieve of Eratosthenes", "sieve_of_eratosthenes.csv"),
            Self::new("Sieve of Atkin", "sieve_of_atkin.csv"),
            Self::new("Miller-Rabin", "miller_rabin.csv"),
        ]
    }
}

/// `sieve_of_atkin.csv` -> `Sieve Of Atkin`.
#[must_use]
pub fn label_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |c| {
                c.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for SeriesSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty series source".into());
        }
        match s.split_once('=') {
            Some((label, path)) if !label.trim().is_empty() && !path.trim().is_empty() => {
                Ok(Self::new(label.trim(), path.trim()))
            }
            Some(_) => Err(format!("`{s}` must look like LABEL=PATH")),
            None => {
                let path = PathBuf::from(s);
                Ok(Self {
                    label: label_from_path(&path),
                    path,
                })
            }
        }
    }
}

impl Display for SeriesSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn read(text: &str) -> Result<Vec<f64>, ParseCsvError> {
        read_events(text.as_bytes())
    }

    #[test]
    fn headerless_first_column() {
        let v = read("0.5\n1.25,ignored\r\n\n# comment\n3\n").unwrap();
        assert_eq!(v, vec![0.5, 1.25, 3.0]);
    }

    #[test]
    fn header_selects_timestamp_column() {
        let v = read("prime,\"Timestamp\"\n2,0.01\n3,0.02\n5,0.5\n").unwrap();
        assert_eq!(v, vec![0.01, 0.02, 0.5]);
    }

    #[test]
    fn header_without_timestamp_column() {
        let err = read("Algorithm,Time Taken (s)\nTrial,0.1\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.kind, ParseErrorKind::MissingColumn));
    }

    #[test]
    fn short_row_reports_line() {
        let err = read("prime,timestamp\n2,0.1\n3\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(matches!(
            err.kind,
            ParseErrorKind::BadColumnCount {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn bad_float_reports_text() {
        let err = read("timestamp\n0.1\nabc\n").unwrap_err();
        assert_eq!(err.line, 3);
        match err.kind {
            ParseErrorKind::BadFloat { text, .. } => assert_eq!(text, "abc"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unicode_minus_is_kept_for_the_binner() {
        let v = read("\u{2212}1.5\n").unwrap();
        assert_eq!(v, vec![-1.5]);
    }

    #[test]
    fn empty_input_is_empty_series() {
        assert!(read("").unwrap().is_empty());
        assert!(read("timestamp\n").unwrap().is_empty());
    }

    #[rstest]
    #[case("Atkin=atkin.csv", "Atkin", "atkin.csv")]
    #[case(" Miller-Rabin = runs/mr.csv ", "Miller-Rabin", "runs/mr.csv")]
    #[case("sieve_of_atkin.csv", "Sieve Of Atkin", "sieve_of_atkin.csv")]
    #[case("data/miller-rabin.csv", "Miller Rabin", "data/miller-rabin.csv")]
    fn parses_sources(#[case] input: &str, #[case] label: &str, #[case] path: &str) {
        let src: SeriesSource = input.parse().unwrap();
        assert_eq!(src.label, label);
        assert_eq!(src.path, PathBuf::from(path));
    }

    #[rstest]
    #[case("")]
    #[case("=x.csv")]
    #[case("Label=")]
    fn rejects_bad_sources(#[case] input: &str) {
        assert!(input.parse::<SeriesSource>().is_err());
    }
}
