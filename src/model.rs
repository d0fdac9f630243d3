use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout of every line in the log file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between the timestamp and the message.
pub const SEPARATOR: &str = " - ";

/// What to do with `\r` / `\n` inside a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlinePolicy {
    /// Replace line breaks with the two-character sequences `\r` and `\n`.
    /// Backslashes are left alone, so a literal `\n` typed in a message reads
    /// back the same as an escaped line break.
    #[default]
    Escape,
    /// Refuse the message.
    Reject,
    /// Write the message untouched. Breaks line-based reading of the file.
    Verbatim,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub ts: NaiveDateTime,
    pub message: String,
}

impl LogEntry {
    pub fn new(ts: NaiveDateTime, message: impl Into<String>) -> Self {
        Self { ts, message: message.into() }
    }

    pub fn timestamp(&self) -> String {
        self.ts.format(TIMESTAMP_FORMAT).to_string()
    }

    /// The exact bytes written to the file, trailing newline included.
    pub fn render(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.ts.format(TIMESTAMP_FORMAT), self.message)
    }
}

pub(crate) fn has_line_break(message: &str) -> bool {
    message.contains(['\r', '\n'])
}

pub(crate) fn escape_line_breaks(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_milli_opt(9, 5, 2, 750).unwrap()
    }

    #[test]
    fn render_drops_subseconds_and_ends_with_newline() {
        let e = LogEntry::new(ts(), "Server started.");
        assert_eq!(e.render(), "2024-03-07 09:05:02 - Server started.\n");
        assert_eq!(e.to_string(), "2024-03-07 09:05:02 - Server started.");
    }

    #[test]
    fn empty_message_keeps_trailing_space() {
        assert_eq!(LogEntry::new(ts(), "").render(), "2024-03-07 09:05:02 - \n");
    }

    #[test]
    fn escape_only_touches_line_breaks() {
        assert_eq!(escape_line_breaks("a\nb\r\nc"), "a\\nb\\r\\nc");
        assert_eq!(escape_line_breaks(r"C:\logs - ok"), r"C:\logs - ok");
        assert!(has_line_break("x\ny"));
        assert!(!has_line_break("x y"));
    }
}
