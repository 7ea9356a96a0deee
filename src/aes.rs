use aes_gcm::aead::{Aead, NewAead};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::{CryptoRng, Rng};
use sha3::{Digest, Sha3_256};
use zeroize::Zeroizing;

use crate::errors::SymmetricEncryptionError;

pub const NONCE_LEN: usize = 12;

/// AES-256-GCM under a key derived from `key_material`, output is `[nonce | ciphertext]`.
pub fn encrypt_symmetric<G: Into<Vec<u8>>, R: Rng + CryptoRng + ?Sized>(
    key_material: G,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>, SymmetricEncryptionError> {
    let key = kdf(key_material);
    let cipher = Aes256Gcm::new(Key::from_slice(key.as_slice()));

    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let mut ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| SymmetricEncryptionError::seal(&e.to_string()))?;

    ciphertext.splice(0..0, nonce.iter().cloned());
    Ok(ciphertext)
}

/// Inverse of [`encrypt_symmetric`]. Fails on a wrong key or any modification.
pub fn decrypt_symmetric<G: Into<Vec<u8>>>(
    key_material: G,
    nonce_ciphertext: &[u8],
) -> Result<Vec<u8>, SymmetricEncryptionError> {
    if nonce_ciphertext.len() < NONCE_LEN {
        return Err(SymmetricEncryptionError::open(
            format!(
                "expected at least {} bytes for the nonce, got {}",
                NONCE_LEN,
                nonce_ciphertext.len()
            )
            .as_str(),
        ));
    }
    let (nonce, ciphertext) = nonce_ciphertext.split_at(NONCE_LEN);

    let key = kdf(key_material);
    let cipher = Aes256Gcm::new(Key::from_slice(key.as_slice()));

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|e| SymmetricEncryptionError::open(&e.to_string()))
}

/// Key derivation, SHA3-256 over the key material.
fn kdf<T: Into<Vec<u8>>>(data: T) -> Zeroizing<Vec<u8>> {
    let material = Zeroizing::new(data.into());
    let mut hasher = Sha3_256::new();
    hasher.update(material.as_slice());
    Zeroizing::new(hasher.finalize().to_vec())
}
