use indexmap::IndexMap;

/// In-memory credential collection: service identifier to hex-encoded ciphertext.
///
/// Iteration follows insertion order, which is also the order on disk.
pub type Collection = IndexMap<String, String>;

/// Normalize a user-supplied service name into its identifier.
pub fn service_id(service: &str) -> String {
    service.to_lowercase()
}
