//! Location registry: the config-backed record of where the key and data files live.

use crate::constants;
use crate::error::{PswdError, Result};
use crate::models::location::{LocationRecord, ResourceKind};
use crate::util::fs as pswd_fs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LocationRegistry {
    config_path: PathBuf,
    record: LocationRecord,
}

impl LocationRegistry {
    /// Open the registry at `config_path`, writing a default record if none exists.
    pub fn open(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();
        let record = match fs::read_to_string(&config_path) {
            Ok(content) => toml::from_str(&content).map_err(|e| PswdError::Config {
                path: config_path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let record = LocationRecord::default();
                write_record(&config_path, &record)?;
                info!(path = %config_path.display(), "created default location config");
                record
            }
            Err(e) => return Err(PswdError::io("read location config", &config_path, e)),
        };
        debug!(
            config = %config_path.display(),
            data = %record.data.display(),
            key = %record.key.display(),
            "opened location registry"
        );
        Ok(Self {
            config_path,
            record,
        })
    }

    pub fn get_path(&self, kind: ResourceKind) -> &Path {
        self.record.path(kind)
    }

    /// Point the data entry at `new_path` and persist the record.
    ///
    /// Does not touch the data file; callers move it first.
    pub fn set_data_path(&mut self, new_path: impl Into<PathBuf>) -> Result<()> {
        let mut record = self.record.clone();
        record.data = new_path.into();
        write_record(&self.config_path, &record)?;
        self.record = record;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Lock file guarding read-modify-write of the data file.
    ///
    /// Lives beside the config so it does not move when the data file does.
    pub fn lock_path(&self) -> PathBuf {
        self.config_path.with_extension(constants::LOCK_EXTENSION)
    }
}

fn write_record(path: &Path, record: &LocationRecord) -> Result<()> {
    let content = toml::to_string_pretty(record).map_err(|e| PswdError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    pswd_fs::write_atomic(path, content.as_bytes(), constants::DATA_FILE_MODE)
}
