//! Hash functions onto the scheme's groups and bit strings, all built on SHAKE256.
//!
//! Every call is domain separated and length-prefixes its inputs, so
//! `hash(["ab", "c"])` and `hash(["a", "bc"])` never collide.

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

use crate::bn254::{Fq, Fr, G1Affine};
use crate::errors::SchemeError;

/// Roughly half of all x coordinates land on the curve, 256 attempts failing is not a practical concern.
const MAX_CURVE_ATTEMPTS: u32 = 256;

/// 16 bytes above the 254 bit moduli keep the reduction bias negligible.
const WIDE_LEN: usize = 48;

fn xof(domain: &[u8], parts: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake256::default();
    hasher.update((domain.len() as u64).to_be_bytes());
    hasher.update(domain);
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    hasher.finalize_xof()
}

/// Maps arbitrary bytes to a point of G1 with unknown discrete logarithm (try-and-increment).
///
/// The point is found from a hashed x coordinate, never as a multiple of the generator,
/// so nobody knows `log_g(H(a)) / log_g(H(b))` for two inputs.
pub fn hash_to_g1(domain: &[u8], input: &[u8]) -> Result<G1Affine, SchemeError> {
    for counter in 0..MAX_CURVE_ATTEMPTS {
        let mut candidate = [0u8; WIDE_LEN + 1];
        xof(domain, &[input, &counter.to_be_bytes()]).read(&mut candidate);

        let x = Fq::from_be_bytes_mod_order(&candidate[..WIDE_LEN]);
        let greatest = candidate[WIDE_LEN] & 1 == 1;

        // BN254's G1 has cofactor one, the subgroup check only guards the identity.
        if let Some(point) = G1Affine::get_point_from_x_unchecked(x, greatest) {
            if !point.is_zero() && point.is_in_correct_subgroup_assuming_on_curve() {
                return Ok(point);
            }
        }
    }

    Err(SchemeError::new(
        format!("Could not hash input onto G1 after {} attempts", MAX_CURVE_ATTEMPTS).as_str(),
    ))
}

pub fn hash_to_scalar(domain: &[u8], parts: &[&[u8]]) -> Fr {
    let mut wide = [0u8; WIDE_LEN];
    xof(domain, parts).read(&mut wide);
    Fr::from_be_bytes_mod_order(&wide)
}

pub fn hash_to_bits(domain: &[u8], input: &[u8], len: usize) -> Vec<u8> {
    let mut output = vec![0u8; len];
    xof(domain, &[input]).read(&mut output);
    output
}

/// XORs `data` with a mask of the same length.
pub fn xor_bytes(data: &[u8], mask: &[u8]) -> Result<Vec<u8>, SchemeError> {
    if data.len() != mask.len() {
        return Err(SchemeError::new(
            format!(
                "Cannot xor {} bytes with a mask of {} bytes",
                data.len(),
                mask.len()
            )
            .as_str(),
        ));
    }

    Ok(data.iter().zip(mask.iter()).map(|(a, b)| a ^ b).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::mul_g1;

    #[test]
    fn test_hash_to_g1_is_deterministic() {
        let a = hash_to_g1(b"test", b"alice@example.com").unwrap();
        let b = hash_to_g1(b"test", b"alice@example.com").unwrap();
        let c = hash_to_g1(b"test", b"bob@example.com").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_zero());
    }

    #[test]
    fn test_hash_to_g1_lands_in_the_group() {
        for input in [&b""[..], &b"alice"[..], &b"bob@example.com"[..], &[0xffu8; 100][..]] {
            let point = hash_to_g1(b"test", input).unwrap();

            assert!(point.is_on_curve());
            assert!(point.is_in_correct_subgroup_assuming_on_curve());
        }
    }

    #[test]
    fn test_hash_to_g1_is_not_a_generator_multiple() {
        // A hash of the form H(x) * g would make keys of different identities related.
        let scalar = hash_to_scalar(b"test", &[b"alice"]);
        let point = hash_to_g1(b"test", b"alice").unwrap();

        assert_ne!(point, mul_g1(&G1Affine::generator(), scalar));
        assert_ne!(point, G1Affine::generator());
    }

    #[test]
    fn test_hash_to_g1_respects_domain() {
        let a = hash_to_g1(b"domain-a", b"identity").unwrap();
        let b = hash_to_g1(b"domain-b", b"identity").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_to_scalar_separates_parts() {
        let a = hash_to_scalar(b"test", &[b"ab", b"c"]);
        let b = hash_to_scalar(b"test", &[b"a", b"bc"]);

        assert_ne!(a, b);
        assert_eq!(a, hash_to_scalar(b"test", &[b"ab", b"c"]));
    }

    #[test]
    fn test_hash_to_bits_length() {
        assert_eq!(hash_to_bits(b"test", b"seed", 0).len(), 0);
        assert_eq!(hash_to_bits(b"test", b"seed", 17).len(), 17);

        // A longer output extends the shorter one.
        let short = hash_to_bits(b"test", b"seed", 16);
        let long = hash_to_bits(b"test", b"seed", 48);
        assert_eq!(short[..], long[..16]);
    }

    #[test]
    fn test_xor_bytes() {
        assert_eq!(xor_bytes(&[0b1010, 0xff], &[0b0110, 0x0f]).unwrap(), vec![0b1100, 0xf0]);
        assert!(xor_bytes(&[1, 2, 3], &[1]).is_err());
    }
}
