//! Shamir secret sharing over the scalar field of BN254.
//!
//! A secret is hidden as the constant term of a random polynomial `q` of degree
//! `threshold - 1`. Any `threshold` evaluations `(i, q(i))` with distinct non-zero
//! `i` determine `q(0)` through the Lagrange basis evaluated at zero:
//!
//! ```text
//! q(0) = sum_{i in S} q(i) * prod_{j in S, j != i} (0 - j) / (i - j)
//! ```
//!
//! The threshold ABE scheme uses this twice: key extraction shares the master
//! scalar `y` across a key's attributes, and decryption reconstructs `e(g1, g2)^{ys}`
//! in the exponent with the same coefficients.

use itertools::Itertools;
use rabe_bn::Fr;
use rand::{CryptoRng, Rng};

use crate::errors::SchemeError;
use crate::group::{inverse, sample_scalar, scalar_from_index};

/// A polynomial over Fr, `coefficients[k]` is the coefficient of `x^k`.
///
/// Coefficients are secret material and are wiped when the polynomial is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<Fr>,
}

impl Polynomial {
    /// Random polynomial of degree `threshold - 1` with `q(0) = secret`.
    pub fn random_with_secret<R: Rng + CryptoRng + ?Sized>(
        secret: Fr,
        threshold: usize,
        rng: &mut R,
    ) -> Result<Polynomial, SchemeError> {
        if threshold == 0 {
            return Err(SchemeError::new("Threshold must be at least 1"));
        }

        let mut coefficients = Vec::with_capacity(threshold);
        coefficients.push(secret);
        coefficients.extend((1..threshold).map(|_| sample_scalar(rng)));

        Ok(Polynomial { coefficients })
    }

    pub fn from_coefficients(coefficients: Vec<Fr>) -> Polynomial {
        Polynomial { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn evaluate(&self, x: Fr) -> Fr {
        // Horner
        self.coefficients
            .iter()
            .rev()
            .fold(Fr::zero(), |acc, coefficient| acc * x + *coefficient)
    }

    pub fn evaluate_at_index(&self, index: u64) -> Fr {
        self.evaluate(scalar_from_index(index))
    }
}

zeroize_on_drop!(Polynomial, |polynomial| {
    polynomial
        .coefficients
        .iter_mut()
        .for_each(|coefficient| *coefficient = Fr::zero())
});

/// A single share `(index, q(index))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Share {
    pub index: u64,
    pub value: Fr,
}

/// Lagrange coefficients `Δ_i(0)` for every point `i` of `points`, in the same order.
///
/// Points must be distinct and non-zero.
pub fn lagrange_coefficients_at_zero(points: &[u64]) -> Result<Vec<Fr>, SchemeError> {
    if points.is_empty() {
        return Err(SchemeError::new("Cannot interpolate over an empty point set"));
    }
    if points.contains(&0) {
        return Err(SchemeError::new("Interpolation points must be non-zero"));
    }
    if !points.iter().all_unique() {
        return Err(SchemeError::new("Interpolation points must be distinct"));
    }

    let scalars = points
        .iter()
        .map(|point| scalar_from_index(*point))
        .collect::<Vec<Fr>>();

    scalars
        .iter()
        .enumerate()
        .map(|(k, i)| {
            let (numerator, denominator) = scalars
                .iter()
                .enumerate()
                .filter(|(l, _)| *l != k)
                .fold((Fr::one(), Fr::one()), |(num, den), (_, j)| {
                    (num * (Fr::zero() - *j), den * (*i - *j))
                });

            Ok(numerator * inverse(denominator)?)
        })
        .collect()
}

/// Splits `secret` into `count` shares at indices `1..=count`, any `threshold` of which recover it.
pub fn split_secret<R: Rng + CryptoRng + ?Sized>(
    secret: Fr,
    threshold: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Share>, SchemeError> {
    if threshold > count {
        return Err(SchemeError::new(
            format!(
                "Threshold {} exceeds the number of shares {}",
                threshold, count
            )
            .as_str(),
        ));
    }

    let polynomial = Polynomial::random_with_secret(secret, threshold, rng)?;

    Ok((1..=count as u64)
        .map(|index| Share {
            index,
            value: polynomial.evaluate_at_index(index),
        })
        .collect())
}

/// Recovers `q(0)` from shares. Every share is used, so the caller picks the subset.
pub fn reconstruct_secret(shares: &[Share]) -> Result<Fr, SchemeError> {
    let points = shares.iter().map(|share| share.index).collect::<Vec<u64>>();
    let coefficients = lagrange_coefficients_at_zero(&points)?;

    Ok(shares
        .iter()
        .zip(coefficients.iter())
        .fold(Fr::zero(), |acc, (share, coefficient)| {
            acc + share.value * *coefficient
        }))
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::Rng;
    use zeroize::Zeroize;

    use super::*;

    #[test]
    fn test_evaluate_known_polynomial() {
        // q(x) = 3 + 2x + x^2
        let polynomial = Polynomial::from_coefficients(vec![
            scalar_from_index(3),
            scalar_from_index(2),
            scalar_from_index(1),
        ]);

        assert_eq!(polynomial.degree(), 2);
        assert_eq!(polynomial.evaluate_at_index(0), scalar_from_index(3));
        assert_eq!(polynomial.evaluate_at_index(1), scalar_from_index(6));
        assert_eq!(polynomial.evaluate_at_index(4), scalar_from_index(27));
    }

    #[test]
    fn test_random_polynomial_fixes_secret() {
        let rng = &mut rand::thread_rng();
        let secret: Fr = rng.gen();
        let polynomial = Polynomial::random_with_secret(secret, 4, rng).unwrap();

        assert_eq!(polynomial.degree(), 3);
        assert_eq!(polynomial.evaluate(Fr::zero()), secret);
    }

    #[test]
    fn test_random_polynomial_rejects_zero_threshold() {
        let rng = &mut rand::thread_rng();

        assert!(Polynomial::random_with_secret(Fr::one(), 0, rng).is_err());
    }

    #[test]
    fn test_lagrange_coefficients_two_points() {
        // Over {1, 2}: Δ_1(0) = (0-2)/(1-2) = 2, Δ_2(0) = (0-1)/(2-1) = -1
        let coefficients = lagrange_coefficients_at_zero(&[1, 2]).unwrap();

        assert_eq!(coefficients[0], scalar_from_index(2));
        assert_eq!(coefficients[1], Fr::zero() - Fr::one());
    }

    #[test]
    fn test_lagrange_coefficients_sum_to_one() {
        // Interpolating the constant polynomial 1 must give 1.
        let coefficients = lagrange_coefficients_at_zero(&[2, 5, 7, 11]).unwrap();
        let sum = coefficients.iter().fold(Fr::zero(), |acc, c| acc + *c);

        assert_eq!(sum, Fr::one());
    }

    #[test]
    fn test_lagrange_rejects_bad_points() {
        assert!(lagrange_coefficients_at_zero(&[]).is_err());
        assert!(lagrange_coefficients_at_zero(&[0, 1]).is_err());
        assert!(lagrange_coefficients_at_zero(&[1, 2, 1]).is_err());
    }

    #[test]
    fn test_lagrange_reconstruction_unit_law() {
        let rng = &mut rand::thread_rng();

        for threshold in 1..=5 {
            let secret: Fr = rng.gen();
            let polynomial = Polynomial::random_with_secret(secret, threshold, rng).unwrap();

            for points in (1..=7u64).combinations(threshold) {
                let coefficients = lagrange_coefficients_at_zero(&points).unwrap();
                let reconstructed = points
                    .iter()
                    .zip(coefficients.iter())
                    .fold(Fr::zero(), |acc, (i, c)| {
                        acc + polynomial.evaluate_at_index(*i) * *c
                    });

                assert_eq!(reconstructed, secret);
            }
        }
    }

    #[test]
    fn test_split_and_reconstruct() {
        let rng = &mut rand::thread_rng();
        let secret: Fr = rng.gen();
        let shares = split_secret(secret, 3, 5, rng).unwrap();

        assert_eq!(shares.len(), 5);
        for subset in shares.iter().cloned().combinations(3) {
            assert_eq!(reconstruct_secret(&subset).unwrap(), secret);
        }

        // Two shares of a degree two polynomial do not determine the secret.
        assert_ne!(reconstruct_secret(&shares[..2]).unwrap(), secret);
    }

    #[test]
    fn test_split_rejects_threshold_above_count() {
        let rng = &mut rand::thread_rng();

        assert!(split_secret(Fr::one(), 4, 3, rng).is_err());
    }

    #[test]
    fn test_zeroize_clears_coefficients() {
        let rng = &mut rand::thread_rng();
        let mut polynomial = Polynomial::random_with_secret(rng.gen(), 3, rng).unwrap();
        polynomial.zeroize();

        assert_eq!(polynomial.evaluate_at_index(9), Fr::zero());
    }
}
