//! Centralized constants for default paths, permissions, and key parameters.

/// Default location of the location record (relative to the working directory).
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.toml";

/// Default data file path written into a fresh location record.
pub const DEFAULT_DATA_PATH: &str = "assets/storage.json";

/// Default key file path written into a fresh location record.
pub const DEFAULT_KEY_PATH: &str = "assets/private_key.pem";

/// Extension of the lock file placed next to the location record.
pub const LOCK_EXTENSION: &str = "lock";

/// RSA modulus size in bits.
pub const RSA_KEY_BITS: usize = 2048;

/// Permission mode for the private key file.
pub const KEY_FILE_MODE: u32 = 0o600;

/// Permission mode for the data file and the location record.
pub const DATA_FILE_MODE: u32 = 0o600;

/// Permission mode for directories created to hold the key or data file.
pub const ASSETS_DIR_MODE: u32 = 0o700;

/// Default length of a generated password.
pub const DEFAULT_GENERATED_LENGTH: usize = 24;
