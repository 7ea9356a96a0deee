//! Key encapsulation on top of the pairing schemes.
//!
//! A fresh session secret is encrypted with IBE or ABE (the capsule) and the payload is
//! AES-256-GCM under a key derived from that secret. This removes the IBE message length
//! limit and lets ABE carry bytes instead of a single `Gt` element.

use rand::{CryptoRng, Rng};
use tracing::instrument;
use zeroize::Zeroizing;

use crate::aes::{decrypt_symmetric, encrypt_symmetric};
use crate::errors::{DecryptionError, SchemeError};
use crate::group::sample_gt;
use crate::models::{
    AbePrivateKey, AbePublicParams, AbeSealedMessage, IbePrivateKey, IbePublicParams,
    IbeSealedMessage,
};

/// Seals `plaintext` to `identity`. The session key is `max_message_len` random bytes.
#[instrument(skip(params, plaintext, rng), fields(payload_len = plaintext.len()))]
pub fn ibe_seal<R: Rng + CryptoRng + ?Sized>(
    params: &IbePublicParams,
    identity: &str,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<IbeSealedMessage, SchemeError> {
    let mut session_key = Zeroizing::new(vec![0u8; params.max_message_len()]);
    rng.fill_bytes(&mut session_key[..]);

    let capsule = params.encrypt(&session_key[..], identity, rng)?;
    let payload = encrypt_symmetric(session_key.to_vec(), plaintext, rng)?;

    Ok(IbeSealedMessage { capsule, payload })
}

pub fn ibe_open(
    params: &IbePublicParams,
    sealed: &IbeSealedMessage,
    private_key: &IbePrivateKey,
) -> Result<Vec<u8>, DecryptionError> {
    let session_key = Zeroizing::new(params.decrypt(&sealed.capsule, private_key)?);

    Ok(decrypt_symmetric(session_key.to_vec(), &sealed.payload)?)
}

/// Seals `plaintext` under `attributes`, keyed by a random `Gt` element.
#[instrument(skip_all, fields(attributes = attributes.len(), payload_len = plaintext.len()))]
pub fn abe_seal<S: AsRef<str>, R: Rng + CryptoRng + ?Sized>(
    params: &AbePublicParams,
    attributes: &[S],
    plaintext: &[u8],
    rng: &mut R,
) -> Result<AbeSealedMessage, SchemeError> {
    let session_key = sample_gt(rng);

    let capsule = params.encrypt(&session_key, attributes, rng)?;
    let payload = encrypt_symmetric(session_key, plaintext, rng)?;

    Ok(AbeSealedMessage { capsule, payload })
}

/// Opens an [`AbeSealedMessage`]. A key that does not reach the threshold fails in the
/// capsule; a key that recovers a wrong element fails in the AEAD layer.
pub fn abe_open<S: AsRef<str>>(
    params: &AbePublicParams,
    sealed: &AbeSealedMessage,
    private_key: &AbePrivateKey,
    holder_attributes: &[S],
) -> Result<Vec<u8>, DecryptionError> {
    let session_key = params.decrypt(&sealed.capsule, private_key, holder_attributes)?;

    Ok(decrypt_symmetric(session_key, &sealed.payload)?)
}
