//! Arkworks BN254 operations backing the identity based scheme.
//!
//! IBE needs to map identities onto G1 with an unknown discrete logarithm, which takes
//! checked construction of a point from its x coordinate. `rabe_bn` only exposes the
//! generator and scalar multiples of it, so IBE runs on arkworks while ABE keeps `rabe_bn`.
//! The pairing is the same asymmetric `e: G1 x G2 -> Gt` in both.

use ark_bn254::Bn254;
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, UniformRand, Zero};
use ark_serialize::CanonicalSerialize;
use rand::{CryptoRng, Rng};

pub use ark_bn254::{Fq, Fr, G1Affine, G1Projective, G2Affine, G2Projective};

use crate::errors::SchemeError;

pub type Gt = PairingOutput<Bn254>;

/// Samples a scalar that is guaranteed to be invertible.
pub fn sample_nonzero_scalar<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Fr {
    loop {
        let candidate = Fr::rand(rng);
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

/// Samples a random generator of G2.
pub fn sample_g2<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> G2Affine {
    loop {
        let candidate = G2Projective::rand(rng).into_affine();
        if !candidate.is_zero() {
            return candidate;
        }
    }
}

pub fn mul_g1(point: &G1Affine, scalar: Fr) -> G1Affine {
    (*point * scalar).into_affine()
}

pub fn mul_g2(point: &G2Affine, scalar: Fr) -> G2Affine {
    (*point * scalar).into_affine()
}

pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    Bn254::pairing(*p, *q)
}

/// `value^exponent`; arkworks writes the target group additively.
pub fn gt_pow(value: Gt, exponent: Fr) -> Gt {
    value * exponent
}

pub fn inverse(value: Fr) -> Result<Fr, SchemeError> {
    value
        .inverse()
        .ok_or(SchemeError::new("Could not calculate inverse of zero scalar"))
}

/// Canonical compressed encoding of a target group element, used as hash input.
pub fn gt_to_bytes(value: &Gt) -> Result<Vec<u8>, SchemeError> {
    let mut bytes = Vec::new();
    value.serialize_compressed(&mut bytes).map_err(|e| {
        SchemeError::new(format!("Could not serialize target group element: {}", e).as_str())
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_is_bilinear() {
        let rng = &mut rand::thread_rng();
        let a = sample_nonzero_scalar(rng);
        let b = sample_nonzero_scalar(rng);
        let g1 = G1Affine::generator();
        let g2 = sample_g2(rng);

        assert_eq!(
            pairing(&mul_g1(&g1, a), &mul_g2(&g2, b)),
            gt_pow(pairing(&g1, &g2), a * b)
        );
    }

    #[test]
    fn test_gt_encoding_is_canonical() {
        let rng = &mut rand::thread_rng();
        let g2 = sample_g2(rng);
        let s = sample_nonzero_scalar(rng);

        // Same element reached two ways
        let a = pairing(&mul_g1(&G1Affine::generator(), s), &g2);
        let b = pairing(&G1Affine::generator(), &mul_g2(&g2, s));

        assert_eq!(gt_to_bytes(&a).unwrap(), gt_to_bytes(&b).unwrap());
        assert_ne!(
            gt_to_bytes(&a).unwrap(),
            gt_to_bytes(&pairing(&G1Affine::generator(), &g2)).unwrap()
        );
    }

    #[test]
    fn test_inverse_of_zero_is_an_error() {
        assert!(inverse(Fr::zero()).is_err());
        let rng = &mut rand::thread_rng();
        let s = sample_nonzero_scalar(rng);
        assert_eq!(inverse(s).unwrap() * s, Fr::from(1u64));
    }
}
