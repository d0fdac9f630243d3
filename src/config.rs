use crate::error::{AppendError, ConfigError, Result};
use crate::model::NewlinePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DIR: &str = "data";
pub const DEFAULT_FILE_NAME: &str = "logs.txt";

/// Where the appender writes and how it treats line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppenderConfig {
    /// Base directory, relative paths resolve against the working directory.
    pub dir: PathBuf,
    pub file_name: String,
    pub newline_policy: NewlinePolicy,
}

impl Default for AppenderConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            file_name: DEFAULT_FILE_NAME.into(),
            newline_policy: NewlinePolicy::default(),
        }
    }
}

impl AppenderConfig {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self { dir: dir.into(), file_name: file_name.into(), ..Default::default() }
    }

    pub fn with_newline_policy(mut self, policy: NewlinePolicy) -> Self {
        self.newline_policy = policy;
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Reads a JSON config; absent fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let wrap = |source: ConfigError| AppendError::Config { path: path.to_path_buf(), source };
        let s = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        serde_json::from_str(&s).map_err(|e| wrap(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_to_data_logs_txt() {
        let cfg = AppenderConfig::default();
        assert_eq!(cfg.log_path(), Path::new("data").join("logs.txt"));
        assert_eq!(cfg.newline_policy, NewlinePolicy::Escape);
    }

    #[test]
    fn load_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("appender.json");
        fs::write(&p, r#"{ "dir": "var/log", "newline_policy": "reject" }"#).unwrap();
        let cfg = AppenderConfig::load(&p).unwrap();
        assert_eq!(cfg.dir, PathBuf::from("var/log"));
        assert_eq!(cfg.file_name, DEFAULT_FILE_NAME);
        assert_eq!(cfg.newline_policy, NewlinePolicy::Reject);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("appender.json");
        fs::write(&p, "{ not json").unwrap();
        let err = AppenderConfig::load(&p).unwrap_err();
        assert!(matches!(err, AppendError::Config { source: ConfigError::Json(_), .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = AppenderConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AppendError::Config { source: ConfigError::Io(_), .. }));
    }
}
