use crate::clock::{Clock, LocalClock};
use crate::config::AppenderConfig;
use crate::error::{AppendError, Result};
use crate::model::{escape_line_breaks, has_line_break, LogEntry, NewlinePolicy};
use chrono::SubsecRound;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Appends timestamped lines to a single log file.
///
/// No file handle is kept between calls: every `append` creates the
/// directory if needed, opens the file in append mode, writes one line,
/// syncs and closes it. Nothing here serializes concurrent writers; two
/// appenders on the same file may interleave lines.
#[derive(Debug, Clone)]
pub struct LogAppender<C = LocalClock> {
    config: AppenderConfig,
    path: PathBuf,
    clock: C,
}

impl LogAppender<LocalClock> {
    pub fn new(config: AppenderConfig) -> Self {
        Self::with_clock(config, LocalClock)
    }
}

impl<C: Clock> LogAppender<C> {
    pub fn with_clock(config: AppenderConfig, clock: C) -> Self {
        let path = config.log_path();
        Self { config, path, clock }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &AppenderConfig {
        &self.config
    }

    /// Appends `"{timestamp} - {message}\n"` and returns the written entry.
    pub fn append(&self, message: &str) -> Result<LogEntry> {
        let message = match self.config.newline_policy {
            NewlinePolicy::Escape => escape_line_breaks(message),
            NewlinePolicy::Reject if has_line_break(message) => return Err(AppendError::EmbeddedNewline),
            NewlinePolicy::Reject | NewlinePolicy::Verbatim => message.to_owned(),
        };

        // file_name may carry subfolders, so create whatever holds the file
        let dir = self.path.parent().unwrap_or(&self.config.dir);
        fs::create_dir_all(dir).map_err(|source| AppendError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })?;

        // the line only keeps whole seconds; the returned entry must match it
        let entry = LogEntry::new(self.clock.now().trunc_subsecs(0), message);
        self.write_line(&entry.render())?;
        debug!(path = %self.path.display(), line = %entry, "log entry appended");
        Ok(entry)
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let io_err = |source| AppendError::FileWrite { path: self.path.clone(), source };
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path).map_err(io_err)?;
        // one write_all per line so an O_APPEND descriptor lands it in a single write
        file.write_all(line.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        file.sync_data().map_err(io_err)?;
        Ok(())
    }
}
