use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Formatter};

use base64::engine::general_purpose::STANDARD;
use base64_serde::base64_serde_type;
use rabe_bn::{Fr, Group, Gt, G1, G2};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::abe_attribute::AttributeUniverse;
use crate::bn254;

base64_serde_type!(Base64Standard, STANDARD);

/// Arkworks points as the base64 string of their compressed encoding.
/// Decoding validates that the point is on the curve and in the right subgroup.
mod ark_base64 {
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalSerialize,
        S: Serializer,
    {
        let mut bytes = Vec::new();
        value
            .serialize_compressed(&mut bytes)
            .map_err(S::Error::custom)?;
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = STANDARD.decode(encoded).map_err(D::Error::custom)?;
        T::deserialize_compressed(bytes.as_slice()).map_err(D::Error::custom)
    }
}

/// Public parameters of a Boneh-Franklin instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IbePublicParams {
    #[serde(with = "ark_base64")]
    pub p: bn254::G2Affine,
    /// `s * p`
    #[serde(with = "ark_base64")]
    pub p_pub: bn254::G2Affine,
    /// Length of the random seed sigma in bytes, also the maximum message length.
    pub sigma_len: usize,
}

/// The PKG's master scalar `s`. Never leaves the PKG and is wiped on drop.
pub(crate) struct IbeMasterSecret {
    pub(crate) s: bn254::Fr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IbePrivateKey {
    pub identity: String,
    /// `s * H1(identity)`
    #[serde(with = "ark_base64")]
    pub d_id: bn254::G1Affine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IbeCiphertext {
    /// `r * p`
    #[serde(with = "ark_base64")]
    pub u: bn254::G2Affine,
    /// `sigma xor H2(g_id^r)`
    #[serde(with = "Base64Standard")]
    pub v: Vec<u8>,
    /// `message xor H4(sigma)`
    #[serde(with = "Base64Standard")]
    pub w: Vec<u8>,
}

/// Public parameters of a threshold ABE instance, published together with the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbePublicParams {
    pub universe: AttributeUniverse,
    pub threshold: usize,
    pub g1: G1,
    pub g2: G2,
    /// `e(g1, g2)^y`
    pub y: Gt,
    /// `T_i = g2^{t_i}` for every index of the universe
    pub big_t: BTreeMap<u64, G2>,
}

/// The PKG's master scalars `y` and `t_i`. Never leaves the PKG and is wiped on drop.
pub(crate) struct AbeMasterSecret {
    pub(crate) y: Fr,
    pub(crate) small_t: BTreeMap<u64, Fr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbePrivateKey {
    pub attributes: BTreeSet<u64>,
    /// `D_i = g1^{q(i) / t_i}`
    pub d: BTreeMap<u64, G1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbeCiphertext {
    /// The attribute index set W' the message was encrypted under.
    pub attributes: BTreeSet<u64>,
    /// `M * Y^s`
    pub e_prime: Gt,
    /// `E_i = T_i^s`
    pub e: BTreeMap<u64, G2>,
}

/// A byte payload under AES-256-GCM whose session key is IBE encrypted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IbeSealedMessage {
    pub capsule: IbeCiphertext,
    #[serde(with = "Base64Standard")]
    pub payload: Vec<u8>,
}

/// A byte payload under AES-256-GCM keyed by an ABE encrypted `Gt` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbeSealedMessage {
    pub capsule: AbeCiphertext,
    #[serde(with = "Base64Standard")]
    pub payload: Vec<u8>,
}

zeroize_on_drop!(IbeMasterSecret, |secret| secret.s.zeroize());

zeroize_on_drop!(AbeMasterSecret, |secret| {
    secret.y = Fr::zero();
    secret.small_t.values_mut().for_each(|t| *t = Fr::zero());
});

zeroize_on_drop!(IbePrivateKey, |key| key.d_id.zeroize());

zeroize_on_drop!(AbePrivateKey, |key| {
    key.d.values_mut().for_each(|d| *d = G1::zero())
});

impl Debug for IbeMasterSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("IbeMasterSecret { .. }")
    }
}

impl Debug for AbeMasterSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AbeMasterSecret { .. }")
    }
}
