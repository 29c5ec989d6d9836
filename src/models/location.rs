//! Location record: where the key file and the data file live.

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The two resources whose paths the location record tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Data,
    Key,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Path of the JSON data file.
    #[serde(default = "default_data")]
    pub data: PathBuf,
    /// Path of the PEM private key.
    #[serde(default = "default_key")]
    pub key: PathBuf,
}

impl Default for LocationRecord {
    fn default() -> Self {
        Self {
            data: default_data(),
            key: default_key(),
        }
    }
}

impl LocationRecord {
    pub fn path(&self, kind: ResourceKind) -> &PathBuf {
        match kind {
            ResourceKind::Data => &self.data,
            ResourceKind::Key => &self.key,
        }
    }
}

fn default_data() -> PathBuf {
    PathBuf::from(constants::DEFAULT_DATA_PATH)
}

fn default_key() -> PathBuf {
    PathBuf::from(constants::DEFAULT_KEY_PATH)
}
