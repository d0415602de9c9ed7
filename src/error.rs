use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShellError>;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("cannot read desktop directory {}: {source}", path.display())]
    DesktopDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("launch command is empty")]
    EmptyCommand,

    #[error("malformed launch command {command:?}: {source}")]
    ParseCommand {
        command: String,
        #[source]
        source: shell_words::ParseError,
    },

    #[error("failed to launch {command:?}: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {} in a browser: {source}", path.display())]
    Browser {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ShellError> for io::Error {
    fn from(err: ShellError) -> Self {
        match err {
            ShellError::Io(err) => err,
            other => io::Error::other(other),
        }
    }
}
