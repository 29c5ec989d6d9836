//! RSA keypair lifecycle: load the installation key, or generate it on first use.

use crate::constants;
use crate::error::{PswdError, Result};
use crate::util::fs as pswd_fs;
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, LineEnding};
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Load the private key at `path`, generating and persisting a new one if absent.
///
/// An existing key file is never rewritten.
pub fn load_or_create_key(path: &Path) -> Result<RsaPrivateKey> {
    match fs::read_to_string(path) {
        Ok(pem) => {
            debug!(path = %path.display(), "loading private key");
            parse_pem(path, &pem)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => create_key(path),
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(PswdError::KeyFormat {
            path: path.to_path_buf(),
            reason: "file is not UTF-8 text".to_string(),
        }),
        Err(e) => Err(PswdError::io("read key file", path, e)),
    }
}

fn parse_pem(path: &Path, pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|pkcs1_err| {
            RsaPrivateKey::from_pkcs8_pem(pem).map_err(|_| pkcs1_err.to_string())
        })
        .map_err(|reason| PswdError::KeyFormat {
            path: path.to_path_buf(),
            reason,
        })
}

fn create_key(path: &Path) -> Result<RsaPrivateKey> {
    info!(path = %path.display(), bits = constants::RSA_KEY_BITS, "RSA key not found, generating a new one");
    let key = RsaPrivateKey::new(&mut OsRng, constants::RSA_KEY_BITS)
        .map_err(|e| PswdError::Encryption(format!("generate RSA key: {}", e)))?;
    let pem = key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| PswdError::Encryption(format!("encode RSA key: {}", e)))?;
    if pswd_fs::write_new(path, pem.as_bytes(), constants::KEY_FILE_MODE)? {
        return Ok(key);
    }
    // Another process created the key first; its key is the installation key.
    debug!(path = %path.display(), "key file appeared while generating, using it");
    let existing = fs::read_to_string(path).map_err(|e| PswdError::io("read key file", path, e))?;
    parse_pem(path, &existing)
}
