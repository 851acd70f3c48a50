use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("assets root missing or not a directory: {}", .0.display())]
    AssetsRootMissing(PathBuf),

    #[error("failed to write archive {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read entry {}: {source}", path.display())]
    EntryReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn output<P: Into<PathBuf>, E: Into<io::Error>>(path: P, err: E) -> Self {
        Error::OutputWriteFailure {
            path: path.into(),
            source: err.into(),
        }
    }

    pub fn entry<P: Into<PathBuf>, E: Into<io::Error>>(path: P, err: E) -> Self {
        Error::EntryReadFailure {
            path: path.into(),
            source: err.into(),
        }
    }
}
