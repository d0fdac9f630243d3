use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppendError {
    #[error("cannot create log directory {}", path.display())]
    DirectoryCreation { path: PathBuf, #[source] source: io::Error },

    #[error("cannot write log file {}", path.display())]
    FileWrite { path: PathBuf, #[source] source: io::Error },

    #[error("message contains a line break")]
    EmbeddedNewline,

    #[error("cannot read log file {}", path.display())]
    Read { path: PathBuf, #[source] source: io::Error },

    #[error("invalid config {}", path.display())]
    Config { path: PathBuf, #[source] source: ConfigError },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = AppendError> = std::result::Result<T, E>;
