//! Error types for credential store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the core to the CLI layer.
#[derive(Debug, Error)]
pub enum PswdError {
    #[error("key file {path} is not a valid unencrypted PEM private key: {reason}")]
    KeyFormat { path: PathBuf, reason: String },

    #[error("data file {path} is corrupt: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("password is {len} bytes, the maximum for this key is {max} bytes")]
    PlaintextTooLarge { len: usize, max: usize },

    #[error("password already exists for '{0}'; consider using \"edit\"")]
    DuplicateEntry(String),

    #[error("no password found for '{0}'")]
    NotFound(String),

    #[error("refusing to relocate storage: {0} already exists")]
    RelocationTarget(PathBuf),

    #[error("location config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PswdError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Convenience result alias for core operations.
pub type Result<T> = std::result::Result<T, PswdError>;
