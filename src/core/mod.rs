//! Core credential store: key management, encryption, persistence, and path registry.

pub mod cipher;
pub mod file_lock;
pub mod keys;
pub mod registry;
pub mod service;
pub mod store;
