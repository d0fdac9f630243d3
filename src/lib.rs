//! Append-only writer for timestamped text logs, plus a reader and summary
//! for the files it produces.
//!
//! Each line has the form `YYYY-MM-DD HH:MM:SS - <message>`.

pub mod analyze;
pub mod appender;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod report;

pub use appender::LogAppender;
pub use clock::{Clock, FixedClock, LocalClock};
pub use config::AppenderConfig;
pub use error::{AppendError, ConfigError};
pub use model::{LogEntry, NewlinePolicy};
