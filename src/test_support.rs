//! Shared fixtures for unit tests.

use crate::models::location::LocationRecord;
use rand::rngs::OsRng;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::RsaPrivateKey;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One 2048-bit key per test binary; generating a key per test is too slow.
pub fn key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 2048).unwrap())
}

pub fn write_key(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let pem = key().to_pkcs1_pem(LineEnding::LF).unwrap();
    fs::write(path, pem.as_bytes()).unwrap();
}

pub fn write_config(config: &Path, data: &Path, key: &Path) {
    let record = LocationRecord {
        data: data.to_path_buf(),
        key: key.to_path_buf(),
    };
    fs::write(config, toml::to_string(&record).unwrap()).unwrap();
}

/// Lay out a config, key, and (absent) data file under `root`. Returns the config path.
pub fn installation(root: &Path) -> PathBuf {
    let config = root.join("config.toml");
    let key_path = root.join("assets/private_key.pem");
    write_config(&config, &root.join("assets/storage.json"), &key_path);
    write_key(&key_path);
    config
}
