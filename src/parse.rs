use crate::error::{AppendError, Result};
use crate::model::{LogEntry, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

pub trait LineParser {
    /// Parse a single line; `None` means the line is malformed.
    fn parse_line(&self, line: &str) -> Option<LogEntry>;
}

/// Parser for lines written by [`crate::LogAppender`].
pub struct EntryParser {
    re: Regex,
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryParser {
    pub fn new() -> Self {
        // `2024-01-15 08:30:00 - Server started.`
        let re = Regex::new(r"^(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) - (?P<msg>.*)$")
            .expect("entry pattern is valid");
        Self { re }
    }
}

impl LineParser for EntryParser {
    fn parse_line(&self, line: &str) -> Option<LogEntry> {
        let caps = self.re.captures(line)?;
        // digits-only match can still be out of range, e.g. month 13
        let ts = NaiveDateTime::parse_from_str(&caps["ts"], TIMESTAMP_FORMAT).ok()?;
        Some(LogEntry::new(ts, &caps["msg"]))
    }
}

#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub entries: Vec<LogEntry>,
    pub malformed_lines: u64,
}

/// Reads every line of `path`, in file order.
pub fn read_entries<P: LineParser>(parser: &P, path: &Path) -> Result<ReadOutcome> {
    let io_err = |source| AppendError::Read { path: path.to_path_buf(), source };
    let r = BufReader::new(File::open(path).map_err(io_err)?);
    let mut out = ReadOutcome::default();
    for (idx, line) in r.lines().enumerate() {
        let line = line.map_err(io_err)?;
        match parser.parse_line(&line) {
            Some(entry) => out.entries.push(entry),
            None => {
                warn!(path = %path.display(), line = idx + 1, "malformed log line");
                out.malformed_lines += 1;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_rendered_line() {
        let p = EntryParser::new();
        let e = p.parse_line("2024-01-15 08:30:00 - User login: x@example.com.").unwrap();
        assert_eq!(e.timestamp(), "2024-01-15 08:30:00");
        assert_eq!(e.message, "User login: x@example.com.");
    }

    #[test]
    fn keeps_separator_inside_message() {
        let e = EntryParser::new().parse_line("2024-01-15 08:30:00 - a - b").unwrap();
        assert_eq!(e.message, "a - b");
    }

    #[test]
    fn empty_message_parses() {
        let e = EntryParser::new().parse_line("2024-01-15 08:30:00 - ").unwrap();
        assert_eq!(e.message, "");
    }

    #[test]
    fn rejects_malformed_lines() {
        let p = EntryParser::new();
        assert!(p.parse_line("").is_none());
        assert!(p.parse_line("continuation of a verbatim message").is_none());
        assert!(p.parse_line("2024-01-15T08:30:00 - iso form").is_none());
        assert!(p.parse_line("2024-13-40 08:30:00 - bad date").is_none());
        assert!(p.parse_line("2024-01-15 08:30:00 -missing space").is_none());
    }

    #[test]
    fn read_counts_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        std::fs::write(&path, "2024-01-15 08:30:00 - one\ngarbage\n2024-01-15 08:31:00 - two\n").unwrap();
        let out = read_entries(&EntryParser::new(), &path).unwrap();
        assert_eq!(out.malformed_lines, 1);
        let msgs: Vec<_> = out.entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, ["one", "two"]);
    }

    #[test]
    fn read_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = read_entries(&EntryParser::new(), &dir.path().join("none.txt")).unwrap_err();
        assert!(matches!(err, AppendError::Read { .. }));
    }
}
