//! Thin layer over `rabe_bn` exposing the group operations of threshold ABE and Shamir sharing.
//!
//! BN254 is an asymmetric pairing, `e: G1 x G2 -> Gt`. Per-key material lives in G1
//! and the public bases in G2, so every pairing is `pairing(g1_element, g2_element)`.
//! Identity based encryption runs on [`crate::bn254`].

use rabe_bn::{Fr, Gt, G1, G2};
use rand::{CryptoRng, Rng};

pub use rabe_bn::{pairing, Group};

use crate::errors::SchemeError;

pub fn sample_scalar<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Fr {
    rng.gen()
}

/// Samples a scalar that is guaranteed to be invertible.
pub fn sample_nonzero_scalar<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Fr {
    loop {
        let candidate: Fr = rng.gen();
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

pub fn sample_g1<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> G1 {
    loop {
        let candidate: G1 = rng.gen();
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

pub fn sample_g2<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> G2 {
    loop {
        let candidate: G2 = rng.gen();
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

pub fn sample_gt<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Gt {
    rng.gen()
}

/// Embeds a small integer (an attribute index or a share abscissa) into the scalar field.
pub fn scalar_from_index(index: u64) -> Fr {
    let two = Fr::one() + Fr::one();
    (0..64).rev().fold(Fr::zero(), |acc, bit| {
        let doubled = acc * two;
        if (index >> bit) & 1 == 1 {
            doubled + Fr::one()
        } else {
            doubled
        }
    })
}

pub fn inverse(value: Fr) -> Result<Fr, SchemeError> {
    value
        .inverse()
        .ok_or(SchemeError::new("Could not calculate inverse of zero scalar"))
}
