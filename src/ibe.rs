//! Boneh-Franklin identity based encryption (FullIdent).
//!
//! * Setup: `p` random in G2, master scalar `s`, `p_pub = s * p`.
//! * Extract: `d_id = s * H1(id)` with `H1` a hash onto G1.
//! * Encrypt: `r = H3(sigma, m)` and `C = (r * p, sigma xor H2(e(H1(id), p_pub)^r), m xor H4(sigma))`.
//! * Decrypt: recover sigma through `e(d_id, U)`, then m, then re-derive `r` and
//!   reject unless `U == r * p`.
//!
//! The final check is the Fujisaki-Okamoto transform that makes the scheme
//! secure against chosen ciphertext attacks, so it always runs.

use rand::{CryptoRng, Rng};
use tracing::{debug, instrument};
use zeroize::{Zeroize, Zeroizing};

use crate::bn254::{
    gt_pow, gt_to_bytes, mul_g1, mul_g2, pairing, sample_g2, sample_nonzero_scalar, Fr, G1Affine,
};
use crate::config::IbeSettings;
use crate::errors::{ConfigurationError, DecryptionError, SchemeError};
use crate::hash::{hash_to_bits, hash_to_g1, hash_to_scalar, xor_bytes};
use crate::models::{IbeCiphertext, IbeMasterSecret, IbePrivateKey, IbePublicParams};

const H1_DOMAIN: &[u8] = b"pkg-crypto/ibe/H1/identity";
const H2_DOMAIN: &[u8] = b"pkg-crypto/ibe/H2/pairing-mask";
const H3_DOMAIN: &[u8] = b"pkg-crypto/ibe/H3/randomness";
const H4_DOMAIN: &[u8] = b"pkg-crypto/ibe/H4/message-mask";

/// Private key generator for one Boneh-Franklin instance.
#[derive(Debug)]
pub struct IbePkg {
    params: IbePublicParams,
    master: IbeMasterSecret,
}

impl IbePkg {
    /// Runs setup with a sigma length of `security_bits`.
    #[instrument(skip(rng))]
    pub fn setup<R: Rng + CryptoRng + ?Sized>(
        security_bits: usize,
        rng: &mut R,
    ) -> Result<IbePkg, ConfigurationError> {
        IbePkg::from_settings(&IbeSettings::new(security_bits)?, rng)
    }

    pub fn from_settings<R: Rng + CryptoRng + ?Sized>(
        settings: &IbeSettings,
        rng: &mut R,
    ) -> Result<IbePkg, ConfigurationError> {
        settings.validate()?;

        let p = sample_g2(rng);
        let s = sample_nonzero_scalar(rng);
        let p_pub = mul_g2(&p, s);

        debug!(sigma_len = settings.sigma_len(), "ibe setup complete");

        Ok(IbePkg {
            params: IbePublicParams {
                p,
                p_pub,
                sigma_len: settings.sigma_len(),
            },
            master: IbeMasterSecret { s },
        })
    }

    pub fn params(&self) -> &IbePublicParams {
        &self.params
    }

    /// Derives the private key of `identity`. The same identity always yields the same key.
    #[instrument(skip(self))]
    pub fn extract(&self, identity: &str) -> Result<IbePrivateKey, SchemeError> {
        let q_id = hash_identity(identity)?;

        Ok(IbePrivateKey {
            identity: identity.to_string(),
            d_id: mul_g1(&q_id, self.master.s),
        })
    }

    pub fn encrypt<R: Rng + CryptoRng + ?Sized>(
        &self,
        message: &[u8],
        identity: &str,
        rng: &mut R,
    ) -> Result<IbeCiphertext, SchemeError> {
        self.params.encrypt(message, identity, rng)
    }

    pub fn decrypt(
        &self,
        ciphertext: &IbeCiphertext,
        private_key: &IbePrivateKey,
    ) -> Result<Vec<u8>, DecryptionError> {
        self.params.decrypt(ciphertext, private_key)
    }
}

impl IbePublicParams {
    /// Longest message `encrypt` accepts, in bytes.
    pub fn max_message_len(&self) -> usize {
        self.sigma_len
    }

    /// Encrypts `message` to `identity`. Messages longer than `max_message_len` are rejected,
    /// use [`crate::hybrid::ibe_seal`] for arbitrary payloads.
    #[instrument(skip(self, message, rng), fields(message_len = message.len()))]
    pub fn encrypt<R: Rng + CryptoRng + ?Sized>(
        &self,
        message: &[u8],
        identity: &str,
        rng: &mut R,
    ) -> Result<IbeCiphertext, SchemeError> {
        if message.len() > self.sigma_len {
            return Err(SchemeError::new(
                format!(
                    "Message of {} bytes exceeds the maximum of {} bytes",
                    message.len(),
                    self.sigma_len
                )
                .as_str(),
            ));
        }

        let q_id = hash_identity(identity)?;
        let g_id = pairing(&q_id, &self.p_pub);

        let mut sigma = Zeroizing::new(vec![0u8; self.sigma_len]);
        rng.fill_bytes(&mut sigma[..]);

        let r = derive_randomness(&sigma[..], message);
        let u = mul_g2(&self.p, r);
        let v = xor_bytes(
            &sigma[..],
            &hash_to_bits(H2_DOMAIN, &gt_to_bytes(&gt_pow(g_id, r))?, self.sigma_len),
        )?;
        let w = xor_bytes(
            message,
            &hash_to_bits(H4_DOMAIN, &sigma[..], message.len()),
        )?;

        Ok(IbeCiphertext { u, v, w })
    }

    #[instrument(skip_all, fields(identity = %private_key.identity))]
    pub fn decrypt(
        &self,
        ciphertext: &IbeCiphertext,
        private_key: &IbePrivateKey,
    ) -> Result<Vec<u8>, DecryptionError> {
        if ciphertext.v.len() != self.sigma_len {
            return Err(DecryptionError::InvalidCiphertext(format!(
                "V must be {} bytes, got {}",
                self.sigma_len,
                ciphertext.v.len()
            )));
        }
        if ciphertext.w.len() > self.sigma_len {
            return Err(DecryptionError::InvalidCiphertext(format!(
                "W must be at most {} bytes, got {}",
                self.sigma_len,
                ciphertext.w.len()
            )));
        }

        let u = &ciphertext.u;
        if !u.is_on_curve() || !u.is_in_correct_subgroup_assuming_on_curve() {
            return Err(DecryptionError::InvalidCiphertext(
                "U is not a point of G2".to_string(),
            ));
        }

        let mask = hash_to_bits(
            H2_DOMAIN,
            &gt_to_bytes(&pairing(&private_key.d_id, u))?,
            self.sigma_len,
        );
        let sigma = Zeroizing::new(xor_bytes(&ciphertext.v, &mask)?);
        let mut message = xor_bytes(
            &ciphertext.w,
            &hash_to_bits(H4_DOMAIN, &sigma[..], ciphertext.w.len()),
        )?;

        let r = derive_randomness(&sigma[..], &message);
        if *u != mul_g2(&self.p, r) {
            message.zeroize();
            debug!("re-encryption check failed, rejecting ciphertext");
            return Err(DecryptionError::IntegrityCheckFailed);
        }

        Ok(message)
    }
}

/// `H1`: the public key of an identity.
pub fn hash_identity(identity: &str) -> Result<G1Affine, SchemeError> {
    hash_to_g1(H1_DOMAIN, identity.as_bytes())
}

/// `H3`: binds the encryption randomness to both sigma and the plaintext.
fn derive_randomness(sigma: &[u8], message: &[u8]) -> Fr {
    hash_to_scalar(H3_DOMAIN, &[sigma, message])
}

#[cfg(test)]
mod tests {
    use ark_ec::AffineRepr;

    use super::*;
    use crate::bn254::{inverse, G2Affine};

    #[test]
    fn test_setup_rejects_bad_security_parameter() {
        let rng = &mut rand::thread_rng();

        assert!(IbePkg::setup(0, rng).is_err());
        assert!(IbePkg::setup(100, rng).is_err());
        assert!(IbePkg::setup(120, rng).is_err());
        assert!(IbePkg::setup(1 << 20, rng).is_err());
        assert_eq!(IbePkg::setup(256, rng).unwrap().params().max_message_len(), 32);
    }

    #[test]
    fn test_public_key_is_master_multiple() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();

        assert_eq!(pkg.params().p_pub, mul_g2(&pkg.params().p, pkg.master.s));
        assert!(!pkg.params().p.is_zero());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();

        let a = pkg.extract("alice@example.com").unwrap();
        let b = pkg.extract("alice@example.com").unwrap();
        let c = pkg.extract("bob@example.com").unwrap();

        assert_eq!(a, b);
        assert_ne!(a.d_id, c.d_id);
    }

    #[test]
    fn test_encrypt_decrypt() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();
        let message = b"pls see my message".to_vec();

        let ciphertext = pkg.encrypt(&message, "anders@example.com", rng).unwrap();
        let key = pkg.extract("anders@example.com").unwrap();

        assert_eq!(ciphertext.v.len(), 32);
        assert_eq!(ciphertext.w.len(), message.len());
        assert_eq!(pkg.decrypt(&ciphertext, &key).unwrap(), message);
    }

    #[test]
    fn test_leading_zero_bytes_survive() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(128, rng).unwrap();
        let message = vec![0u8, 0, 0, 7];

        let ciphertext = pkg.encrypt(&message, "id", rng).unwrap();
        let key = pkg.extract("id").unwrap();

        assert_eq!(pkg.decrypt(&ciphertext, &key).unwrap(), message);
    }

    #[test]
    fn test_empty_and_maximal_messages() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(128, rng).unwrap();
        let key = pkg.extract("id").unwrap();

        for message in [vec![], vec![0xab; 16]] {
            let ciphertext = pkg.encrypt(&message, "id", rng).unwrap();
            assert_eq!(pkg.decrypt(&ciphertext, &key).unwrap(), message);
        }
    }

    #[test]
    fn test_message_too_long_is_rejected() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(128, rng).unwrap();

        assert_eq!(
            pkg.encrypt(&[1u8; 17], "id", rng).unwrap_err(),
            SchemeError::new("Message of 17 bytes exceeds the maximum of 16 bytes")
        );
    }

    #[test]
    fn test_wrong_identity_is_rejected() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();

        let ciphertext = pkg.encrypt(b"for alice", "alice", rng).unwrap();
        let key = pkg.extract("mallory").unwrap();

        assert_eq!(
            pkg.decrypt(&ciphertext, &key).unwrap_err(),
            DecryptionError::IntegrityCheckFailed
        );
    }

    #[test]
    fn test_key_from_other_pkg_is_rejected() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();
        let other = IbePkg::setup(256, rng).unwrap();

        let ciphertext = pkg.encrypt(b"hello", "alice", rng).unwrap();
        let key = other.extract("alice").unwrap();

        assert_eq!(
            pkg.decrypt(&ciphertext, &key).unwrap_err(),
            DecryptionError::IntegrityCheckFailed
        );
    }

    #[test]
    fn test_malformed_lengths_are_rejected() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();
        let key = pkg.extract("alice").unwrap();
        let ciphertext = pkg.encrypt(b"hello", "alice", rng).unwrap();

        let mut short_v = ciphertext.clone();
        short_v.v.pop();
        assert!(matches!(
            pkg.decrypt(&short_v, &key),
            Err(DecryptionError::InvalidCiphertext(_))
        ));

        let mut long_w = ciphertext;
        long_w.w = vec![0u8; 33];
        assert!(matches!(
            pkg.decrypt(&long_w, &key),
            Err(DecryptionError::InvalidCiphertext(_))
        ));
    }

    #[test]
    fn test_encryption_is_randomized() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();

        let a = pkg.encrypt(b"same", "alice", rng).unwrap();
        let b = pkg.encrypt(b"same", "alice", rng).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_keys_of_other_identities_do_not_combine() {
        // With a hash of the form H1(id) = h(id) * g, mallory's key rescaled by
        // h(alice) / h(mallory) would be alice's key.
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();

        let ciphertext = pkg.encrypt(b"for alice", "alice", rng).unwrap();
        let mallory = pkg.extract("mallory").unwrap();

        let h_alice = hash_to_scalar(H1_DOMAIN, &[b"alice"]);
        let h_mallory = hash_to_scalar(H1_DOMAIN, &[b"mallory"]);
        let forged = IbePrivateKey {
            identity: "alice".to_string(),
            d_id: mul_g1(&mallory.d_id, inverse(h_mallory).unwrap() * h_alice),
        };

        assert_ne!(forged.d_id, pkg.extract("alice").unwrap().d_id);
        assert_eq!(
            pkg.decrypt(&ciphertext, &forged).unwrap_err(),
            DecryptionError::IntegrityCheckFailed
        );
        assert_ne!(
            hash_identity("alice").unwrap(),
            mul_g1(&G1Affine::generator(), h_alice)
        );
    }

    #[test]
    fn test_identity_u_is_rejected() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();
        let key = pkg.extract("alice").unwrap();

        let mut ciphertext = pkg.encrypt(b"hello", "alice", rng).unwrap();
        ciphertext.u = G2Affine::zero();

        assert_eq!(
            pkg.decrypt(&ciphertext, &key).unwrap_err(),
            DecryptionError::IntegrityCheckFailed
        );
    }
}
