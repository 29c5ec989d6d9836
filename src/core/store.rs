//! Durable service-to-ciphertext mapping backed by a single JSON file.

use crate::constants;
use crate::error::{PswdError, Result};
use crate::models::credential::Collection;
use crate::util::fs as pswd_fs;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load the whole collection. A missing file is an empty collection.
pub fn load(path: &Path) -> Result<Collection> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file absent, starting empty");
            return Ok(Collection::new());
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(corrupt(path, "file is not UTF-8 text"));
        }
        Err(e) => return Err(PswdError::io("read data file", path, e)),
    };
    let collection: Collection =
        serde_json::from_str(&content).map_err(|e| corrupt(path, e.to_string()))?;
    debug!(path = %path.display(), entries = collection.len(), "loaded data file");
    Ok(collection)
}

/// Replace the data file with `collection`.
pub fn save(path: &Path, collection: &Collection) -> Result<()> {
    let content = serde_json::to_string(collection).map_err(|e| corrupt(path, e.to_string()))?;
    pswd_fs::write_atomic(path, content.as_bytes(), constants::DATA_FILE_MODE)?;
    debug!(path = %path.display(), entries = collection.len(), "saved data file");
    Ok(())
}

pub fn encode_entry(ciphertext: &[u8]) -> String {
    hex::encode(ciphertext)
}

/// Decode the on-disk form of the entry stored for `service`.
pub fn decode_entry(path: &Path, service: &str, encoded: &str) -> Result<Vec<u8>> {
    hex::decode(encoded)
        .map_err(|e| corrupt(path, format!("entry '{}' is not valid hex: {}", service, e)))
}

fn corrupt(path: &Path, reason: impl Into<String>) -> PswdError {
    PswdError::CorruptStore {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
