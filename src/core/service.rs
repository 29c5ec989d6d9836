//! Credential operations composed from the registry, key manager, store, and cipher.
//!
//! Every operation reads the collection fresh from disk under the registry lock,
//! and mutating operations write it back before releasing the lock. Validation
//! happens before any mutation, so a failed call leaves the data file untouched.

use crate::core::file_lock::FileLock;
use crate::core::registry::LocationRegistry;
use crate::core::{cipher, keys, store};
use crate::error::{PswdError, Result};
use crate::models::credential::{service_id, Collection};
use crate::models::location::ResourceKind;
use crate::util::{fs as pswd_fs, path};
use rsa::RsaPrivateKey;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// A decrypted password. Wiped from memory on drop.
pub type Plaintext = Zeroizing<String>;

pub struct CredentialService {
    registry: LocationRegistry,
}

impl CredentialService {
    pub fn new(registry: LocationRegistry) -> Self {
        Self { registry }
    }

    /// Open the registry at `config_path` (creating it with defaults) and wrap it.
    pub fn open(config_path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(LocationRegistry::open(config_path)?))
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// Current path of the data file.
    pub fn storage_path(&self) -> &Path {
        self.registry.get_path(ResourceKind::Data)
    }

    pub fn add(&self, service: &str, password: &str) -> Result<()> {
        let id = service_id(service);
        let _lock = self.lock()?;
        let mut collection = self.load()?;
        if collection.contains_key(&id) {
            return Err(PswdError::DuplicateEntry(id));
        }
        let key = self.key()?;
        let ciphertext = cipher::encrypt(&key.to_public_key(), password.as_bytes())?;
        collection.insert(id.clone(), store::encode_entry(&ciphertext));
        self.save(&collection)?;
        info!(service = %id, "added password");
        Ok(())
    }

    pub fn get(&self, service: &str) -> Result<Plaintext> {
        let id = service_id(service);
        let (collection, key) = {
            let _lock = self.lock()?;
            let collection = self.load()?;
            if !collection.contains_key(&id) {
                return Err(PswdError::NotFound(id));
            }
            (collection, self.key()?)
        };
        let encoded = collection
            .get(&id)
            .ok_or_else(|| PswdError::NotFound(id.clone()))?;
        self.decrypt_entry(&key, &id, encoded)
    }

    pub fn update(&self, service: &str, new_password: &str) -> Result<()> {
        let id = service_id(service);
        let _lock = self.lock()?;
        let mut collection = self.load()?;
        let Some(slot) = collection.get_mut(&id) else {
            return Err(PswdError::NotFound(id));
        };
        let key = self.key()?;
        let ciphertext = cipher::encrypt(&key.to_public_key(), new_password.as_bytes())?;
        *slot = store::encode_entry(&ciphertext);
        self.save(&collection)?;
        info!(service = %id, "updated password");
        Ok(())
    }

    pub fn delete(&self, service: &str) -> Result<()> {
        let id = service_id(service);
        let _lock = self.lock()?;
        let mut collection = self.load()?;
        if collection.shift_remove(&id).is_none() {
            return Err(PswdError::NotFound(id));
        }
        self.save(&collection)?;
        info!(service = %id, "deleted password");
        Ok(())
    }

    /// All service identifiers in store order.
    pub fn list_services(&self) -> Result<Vec<String>> {
        let _lock = self.lock()?;
        let collection = self.load()?;
        Ok(collection.keys().map(|s| service_id(s)).collect())
    }

    /// Every service with its decrypted password, in store order.
    ///
    /// The first entry that fails to decrypt fails the whole listing.
    pub fn list_with_plaintext(&self) -> Result<Vec<(String, Plaintext)>> {
        let (collection, key) = {
            let _lock = self.lock()?;
            let collection = self.load()?;
            if collection.is_empty() {
                return Ok(Vec::new());
            }
            (collection, self.key()?)
        };
        collection
            .iter()
            .map(|(service, encoded)| -> Result<(String, Plaintext)> {
                let plaintext = self.decrypt_entry(&key, service, encoded)?;
                Ok((service_id(service), plaintext))
            })
            .collect()
    }

    /// Move the data file to `new_path` and point the registry at it.
    ///
    /// The registry is only updated after the file has moved. If that update
    /// fails, the file is moved back on a best-effort basis; a crash between the
    /// two steps leaves the data at the new path with the registry still pointing
    /// at the old one. Returns the absolute new path.
    pub fn relocate_store(&mut self, new_path: &Path) -> Result<PathBuf> {
        let target = path::absolutize(new_path)?;
        let _lock = self.lock()?;
        let current = path::absolutize(self.storage_path())?;

        if target == current {
            debug!(path = %target.display(), "storage already at requested path");
            self.registry.set_data_path(&target)?;
            return Ok(target);
        }
        if target.exists() {
            return Err(PswdError::RelocationTarget(target));
        }

        let moved = move_file(&current, &target)?;
        if let Err(e) = self.registry.set_data_path(&target) {
            if moved {
                warn!(
                    from = %target.display(),
                    to = %current.display(),
                    "registry update failed, moving data file back"
                );
                if let Err(back) = move_file(&target, &current) {
                    warn!(error = %back, path = %target.display(), "data file left at new path");
                }
            }
            return Err(e);
        }
        info!(from = %current.display(), to = %target.display(), moved, "relocated storage");
        Ok(target)
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::exclusive(&self.registry.lock_path())
    }

    fn load(&self) -> Result<Collection> {
        store::load(self.storage_path())
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        store::save(self.storage_path(), collection)
    }

    fn key(&self) -> Result<RsaPrivateKey> {
        keys::load_or_create_key(self.registry.get_path(ResourceKind::Key))
    }

    fn decrypt_entry(&self, key: &RsaPrivateKey, service: &str, encoded: &str) -> Result<Plaintext> {
        let ciphertext = store::decode_entry(self.storage_path(), service, encoded)?;
        let bytes = cipher::decrypt(key, &ciphertext).map_err(|e| match e {
            PswdError::Decryption(reason) => {
                PswdError::Decryption(format!("entry '{}': {}", service, reason))
            }
            other => other,
        })?;
        String::from_utf8(bytes).map(Zeroizing::new).map_err(|_| {
            PswdError::Decryption(format!("entry '{}' is not valid UTF-8", service))
        })
    }
}

/// Move `from` to `to`. Returns `false` when there was nothing to move.
fn move_file(from: &Path, to: &Path) -> Result<bool> {
    if !from.exists() {
        debug!(path = %from.display(), "no data file to move");
        return Ok(false);
    }
    pswd_fs::ensure_parent(to)?;
    if let Err(rename_err) = fs::rename(from, to) {
        debug!(error = %rename_err, "rename failed, copying data file instead");
        if let Err(e) = fs::copy(from, to) {
            let _ = fs::remove_file(to);
            return Err(PswdError::io("copy data file to", to, e));
        }
        if let Err(e) = fs::remove_file(from) {
            let _ = fs::remove_file(to);
            return Err(PswdError::io("remove old data file", from, e));
        }
    }
    Ok(true)
}
