//! Threshold attribute based encryption (Sahai-Waters fuzzy IBE, large universe fixed at setup).
//!
//! * Setup: random `g1`, `g2`, master `y` and `t_i` for every index of the universe,
//!   `T_i = g2^{t_i}`, `Y = e(g1, g2)^y`.
//! * Extract: a fresh polynomial `q` of degree `d - 1` with `q(0) = y`,
//!   `D_i = g1^{q(i) / t_i}` for every attribute of the key.
//! * Encrypt: random `s`, `E' = M * Y^s`, `E_i = T_i^s` for every attribute of W'.
//! * Decrypt: for any `d` indices S shared by key and ciphertext,
//!   `e(D_i, E_i) = e(g1, g2)^{q(i) s}` and interpolating at zero gives
//!   `M = E' / prod_{i in S} e(D_i, E_i)^{Δ_i(0)}`.
//!
//! There is no integrity check: a wrong key yields a wrong group element.

use std::collections::BTreeMap;

use rabe_bn::Gt;
use rand::{CryptoRng, Rng};
use tracing::{debug, instrument};

use crate::abe_attribute::AttributeUniverse;
use crate::config::AbeSettings;
use crate::errors::{ConfigurationError, DecryptionError, SchemeError};
use crate::group::{
    inverse, pairing, sample_g1, sample_g2, sample_nonzero_scalar, sample_scalar,
};
use crate::models::{AbeCiphertext, AbeMasterSecret, AbePrivateKey, AbePublicParams};
use crate::secret_sharing::{lagrange_coefficients_at_zero, Polynomial};

/// Private key generator for one threshold ABE instance.
#[derive(Debug)]
pub struct AbePkg {
    params: AbePublicParams,
    master: AbeMasterSecret,
}

impl AbePkg {
    /// Runs setup over `attributes`, which are numbered `1..=len` in the given order.
    pub fn setup<S: AsRef<str>, R: Rng + CryptoRng + ?Sized>(
        attributes: &[S],
        threshold: usize,
        rng: &mut R,
    ) -> Result<AbePkg, ConfigurationError> {
        let settings = AbeSettings::new(AttributeUniverse::new(attributes)?, threshold)?;
        AbePkg::from_settings(settings, rng)
    }

    #[instrument(skip_all, fields(universe = settings.universe.len(), threshold = settings.threshold))]
    pub fn from_settings<R: Rng + CryptoRng + ?Sized>(
        settings: AbeSettings,
        rng: &mut R,
    ) -> Result<AbePkg, ConfigurationError> {
        settings.validate()?;

        let g1 = sample_g1(rng);
        let g2 = sample_g2(rng);
        let y = sample_scalar(rng);

        // t_i must be invertible, extraction divides by it
        let small_t = settings
            .universe
            .indices()
            .map(|i| (i, sample_nonzero_scalar(rng)))
            .collect::<BTreeMap<u64, _>>();

        let big_t = small_t
            .iter()
            .map(|(i, t)| (*i, g2 * *t))
            .collect::<BTreeMap<u64, _>>();

        let y_pub = pairing(g1, g2).pow(y);

        debug!(version = settings.universe.version(), "abe setup complete");

        Ok(AbePkg {
            params: AbePublicParams {
                universe: settings.universe,
                threshold: settings.threshold,
                g1,
                g2,
                y: y_pub,
                big_t,
            },
            master: AbeMasterSecret { y, small_t },
        })
    }

    pub fn params(&self) -> &AbePublicParams {
        &self.params
    }

    pub fn threshold(&self) -> usize {
        self.params.threshold
    }

    pub fn universe(&self) -> &AttributeUniverse {
        &self.params.universe
    }

    /// Issues a key for `attributes`. Every call draws a new polynomial, so two keys for the
    /// same attributes differ and cannot be combined with each other.
    #[instrument(skip_all, fields(attributes = attributes.len()))]
    pub fn extract<S: AsRef<str>, R: Rng + CryptoRng + ?Sized>(
        &self,
        attributes: &[S],
        rng: &mut R,
    ) -> Result<AbePrivateKey, SchemeError> {
        let indices = self.params.universe.resolve(attributes)?;
        if indices.is_empty() {
            return Err(SchemeError::new(
                "Cannot extract a key for an empty attribute set",
            ));
        }

        let polynomial = Polynomial::random_with_secret(self.master.y, self.params.threshold, rng)?;

        let mut d = BTreeMap::new();
        for i in indices.iter() {
            let t = self.master.small_t.get(i).ok_or(SchemeError::new(
                format!("Attribute index {} not found in master key", i).as_str(),
            ))?;
            let exponent = polynomial.evaluate_at_index(*i) * inverse(*t)?;
            d.insert(*i, self.params.g1 * exponent);
        }

        Ok(AbePrivateKey {
            attributes: indices,
            d,
        })
    }

    pub fn encrypt<S: AsRef<str>, R: Rng + CryptoRng + ?Sized>(
        &self,
        message: &Gt,
        attributes: &[S],
        rng: &mut R,
    ) -> Result<AbeCiphertext, SchemeError> {
        self.params.encrypt(message, attributes, rng)
    }

    pub fn decrypt<S: AsRef<str>>(
        &self,
        ciphertext: &AbeCiphertext,
        private_key: &AbePrivateKey,
        holder_attributes: &[S],
    ) -> Result<Gt, DecryptionError> {
        self.params
            .decrypt(ciphertext, private_key, holder_attributes)
    }
}

impl AbePublicParams {
    #[instrument(skip_all, fields(attributes = attributes.len()))]
    pub fn encrypt<S: AsRef<str>, R: Rng + CryptoRng + ?Sized>(
        &self,
        message: &Gt,
        attributes: &[S],
        rng: &mut R,
    ) -> Result<AbeCiphertext, SchemeError> {
        let indices = self.universe.resolve(attributes)?;
        if indices.is_empty() {
            return Err(SchemeError::new(
                "Cannot encrypt under an empty attribute set",
            ));
        }

        let s = sample_scalar(rng);
        let e_prime = *message * self.y.pow(s);

        let mut e = BTreeMap::new();
        for i in indices.iter() {
            let t = self.big_t.get(i).ok_or(SchemeError::new(
                format!("Attribute index {} not found in public parameters", i).as_str(),
            ))?;
            e.insert(*i, *t * s);
        }

        Ok(AbeCiphertext {
            attributes: indices,
            e_prime,
            e,
        })
    }

    /// Indices shared by the holder and the ciphertext, ascending.
    pub fn overlap<S: AsRef<str>>(
        &self,
        ciphertext: &AbeCiphertext,
        holder_attributes: &[S],
    ) -> Result<Vec<u64>, SchemeError> {
        let holder = self.universe.resolve(holder_attributes)?;

        Ok(holder
            .intersection(&ciphertext.attributes)
            .cloned()
            .collect())
    }

    /// Decrypts using the `threshold` smallest shared indices the key has a component for.
    ///
    /// Claimed holder attributes the key does not cover are skipped, so a key still
    /// decrypts as long as `threshold` of its own components overlap the ciphertext.
    #[instrument(skip_all, fields(holder = holder_attributes.len()))]
    pub fn decrypt<S: AsRef<str>>(
        &self,
        ciphertext: &AbeCiphertext,
        private_key: &AbePrivateKey,
        holder_attributes: &[S],
    ) -> Result<Gt, DecryptionError> {
        let overlap = self.overlap(ciphertext, holder_attributes)?;

        if overlap.len() < self.threshold {
            debug!(
                required = self.threshold,
                available = overlap.len(),
                "insufficient attribute overlap"
            );
            return Err(DecryptionError::InsufficientOverlap {
                required: self.threshold,
                available: overlap.len(),
            });
        }

        let usable: Vec<u64> = overlap
            .iter()
            .filter(|i| private_key.d.contains_key(*i))
            .cloned()
            .collect();
        if usable.len() < self.threshold {
            let index = overlap
                .iter()
                .find(|i| !private_key.d.contains_key(*i))
                .cloned()
                .unwrap_or_default();
            debug!(index, "holder attribute not covered by the key");
            return Err(DecryptionError::MissingKeyComponent { index });
        }

        self.decrypt_with_subset(ciphertext, private_key, &usable[..self.threshold])
    }

    /// Decrypts by interpolating over exactly the indices in `subset`.
    ///
    /// `subset` must hold `threshold` distinct indices present in both the key and the
    /// ciphertext. Which subset is used does not change the result.
    pub fn decrypt_with_subset(
        &self,
        ciphertext: &AbeCiphertext,
        private_key: &AbePrivateKey,
        subset: &[u64],
    ) -> Result<Gt, DecryptionError> {
        if subset.len() != self.threshold {
            return Err(SchemeError::new(
                format!(
                    "Reconstruction needs exactly {} indices, got {}",
                    self.threshold,
                    subset.len()
                )
                .as_str(),
            )
            .into());
        }

        let coefficients = lagrange_coefficients_at_zero(subset)?;

        let mut denominator = Gt::one();
        for (i, coefficient) in subset.iter().zip(coefficients.iter()) {
            if !ciphertext.attributes.contains(i) {
                return Err(DecryptionError::InsufficientOverlap {
                    required: self.threshold,
                    available: subset
                        .iter()
                        .filter(|j| ciphertext.attributes.contains(*j))
                        .count(),
                });
            }
            let e_i = ciphertext.e.get(i).ok_or(DecryptionError::InvalidCiphertext(
                format!("Missing component E_{} for a listed attribute", i),
            ))?;
            let d_i = private_key
                .d
                .get(i)
                .ok_or(DecryptionError::MissingKeyComponent { index: *i })?;

            denominator = denominator * pairing(*d_i, *e_i).pow(*coefficient);
        }

        Ok(ciphertext.e_prime * denominator.inverse())
    }
}
