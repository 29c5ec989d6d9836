//! Local password manager with RSA encryption.
//!
//! Stores per-service passwords as RSA-OAEP ciphertexts in a JSON file, under a
//! keypair kept on disk. A small TOML config records where both files live so
//! the data file can be relocated.
//!
//! ## Modules
//! - `cli` - Command-line handlers
//! - `core` - Key manager, cipher, credential store, location registry, service
//! - `models` - Data structures
//! - `util` - Filesystem, path, and clipboard helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;

pub use crate::core::service::CredentialService;
pub use crate::error::{PswdError, Result};

#[cfg(test)]
mod test_support;
