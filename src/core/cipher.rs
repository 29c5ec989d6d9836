//! RSA-OAEP encryption with SHA-256 for both the digest and MGF1, no label.

use crate::error::{PswdError, Result};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Largest plaintext OAEP/SHA-256 can carry under `key` (190 bytes for 2048-bit RSA).
pub fn max_plaintext_len(key: &RsaPublicKey) -> usize {
    key.size()
        .saturating_sub(2 * <Sha256 as Digest>::output_size() + 2)
}

/// Encrypt `plaintext` under `key`. Every call yields a fresh ciphertext.
pub fn encrypt(key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let max = max_plaintext_len(key);
    if plaintext.len() > max {
        return Err(PswdError::PlaintextTooLarge {
            len: plaintext.len(),
            max,
        });
    }
    key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
        .map_err(|e| PswdError::Encryption(e.to_string()))
}

pub fn decrypt(key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    key.decrypt(Oaep::new::<Sha256>(), ciphertext)
        .map_err(|e| PswdError::Decryption(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn public() -> RsaPublicKey {
        test_support::key().to_public_key()
    }

    #[test]
    fn test_max_plaintext_len_2048() {
        assert_eq!(max_plaintext_len(&public()), 190);
    }

    #[test]
    fn test_encrypt_decrypt() {
        let ct = encrypt(&public(), b"hunter2").unwrap();
        assert_eq!(ct.len(), 256);
        assert_eq!(decrypt(test_support::key(), &ct).unwrap(), b"hunter2");
    }

    #[test]
    fn test_encrypt_is_randomized() {
        let a = encrypt(&public(), b"same").unwrap();
        let b = encrypt(&public(), b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let exact = vec![b'a'; 190];
        let ct = encrypt(&public(), &exact).unwrap();
        assert_eq!(decrypt(test_support::key(), &ct).unwrap(), exact);
    }

    #[test]
    fn test_oversized_plaintext_rejected() {
        let err = encrypt(&public(), &[b'a'; 191]).unwrap_err();
        assert!(matches!(
            err,
            PswdError::PlaintextTooLarge { len: 191, max: 190 }
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let mut ct = encrypt(&public(), b"secret").unwrap();
        ct[10] ^= 0xff;
        assert!(matches!(
            decrypt(test_support::key(), &ct),
            Err(PswdError::Decryption(_))
        ));
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let ct = encrypt(&public(), b"secret").unwrap();
        assert!(matches!(
            decrypt(test_support::key(), &ct[..100]),
            Err(PswdError::Decryption(_))
        ));
    }
}
