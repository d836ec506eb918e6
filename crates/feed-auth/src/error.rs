//! Authentication errors.

use thiserror::Error;

/// Errors raised while reading or writing the session flag.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Session store could not be read or written.
    #[error("session store error: {0}")]
    Store(String),

    /// Session file exists but is not a JSON object of strings.
    #[error("session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// No location is available for the session file.
    #[error("no data directory available for the session file")]
    NoDataDir,
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Store(err.to_string())
    }
}
