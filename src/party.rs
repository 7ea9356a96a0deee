//! Participants that obtain keys from a PKG and exchange messages through it.

use rabe_bn::Gt;
use rand::{CryptoRng, Rng};
use tracing::debug;

use crate::abe::AbePkg;
use crate::errors::{DecryptionError, SchemeError};
use crate::hybrid::{ibe_open, ibe_seal};
use crate::ibe::IbePkg;
use crate::models::{
    AbeCiphertext, AbePrivateKey, IbeCiphertext, IbePrivateKey, IbeSealedMessage,
};

/// A user known to an IBE PKG by its identity string.
#[derive(Debug)]
pub struct IbeParty<'a> {
    identity: String,
    pkg: &'a IbePkg,
    private_key: Option<IbePrivateKey>,
}

impl<'a> IbeParty<'a> {
    pub fn new(identity: &str, pkg: &'a IbePkg) -> IbeParty<'a> {
        IbeParty {
            identity: identity.to_string(),
            pkg,
            private_key: None,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn is_authenticated(&self) -> bool {
        self.private_key.is_some()
    }

    /// Obtains `d_id` for this party's identity. Calling it again replaces the stored key.
    pub fn authenticate_with_pkg(&mut self) -> Result<(), SchemeError> {
        self.private_key = Some(self.pkg.extract(&self.identity)?);
        debug!(identity = %self.identity, "party authenticated");
        Ok(())
    }

    /// Encrypts to `recipient`, sending needs no key of our own.
    pub fn send_message<R: Rng + CryptoRng + ?Sized>(
        &self,
        message: &[u8],
        recipient: &str,
        rng: &mut R,
    ) -> Result<IbeCiphertext, SchemeError> {
        self.pkg.encrypt(message, recipient, rng)
    }

    pub fn receive_message(&self, ciphertext: &IbeCiphertext) -> Result<Vec<u8>, DecryptionError> {
        let key = self.key()?;
        self.pkg.decrypt(ciphertext, key)
    }

    pub fn send_sealed<R: Rng + CryptoRng + ?Sized>(
        &self,
        payload: &[u8],
        recipient: &str,
        rng: &mut R,
    ) -> Result<IbeSealedMessage, SchemeError> {
        ibe_seal(self.pkg.params(), recipient, payload, rng)
    }

    pub fn receive_sealed(&self, sealed: &IbeSealedMessage) -> Result<Vec<u8>, DecryptionError> {
        let key = self.key()?;
        ibe_open(self.pkg.params(), sealed, key)
    }

    fn key(&self) -> Result<&IbePrivateKey, DecryptionError> {
        self.private_key
            .as_ref()
            .ok_or(DecryptionError::NotAuthenticated)
    }
}

/// A user holding a set of attributes from an ABE PKG's universe.
#[derive(Debug)]
pub struct AbeParty<'a> {
    attributes: Vec<String>,
    pkg: &'a AbePkg,
    private_key: Option<AbePrivateKey>,
}

impl<'a> AbeParty<'a> {
    pub fn new<S: AsRef<str>>(attributes: &[S], pkg: &'a AbePkg) -> AbeParty<'a> {
        AbeParty {
            attributes: attributes.iter().map(|a| a.as_ref().to_string()).collect(),
            pkg,
            private_key: None,
        }
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_authenticated(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn authenticate_with_pkg<R: Rng + CryptoRng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), SchemeError> {
        self.private_key = Some(self.pkg.extract(&self.attributes, rng)?);
        debug!(attributes = self.attributes.len(), "party authenticated");
        Ok(())
    }

    pub fn send_message<S: AsRef<str>, R: Rng + CryptoRng + ?Sized>(
        &self,
        message: &Gt,
        required_attributes: &[S],
        rng: &mut R,
    ) -> Result<AbeCiphertext, SchemeError> {
        self.pkg.encrypt(message, required_attributes, rng)
    }

    pub fn receive_message(&self, ciphertext: &AbeCiphertext) -> Result<Gt, DecryptionError> {
        let key = self
            .private_key
            .as_ref()
            .ok_or(DecryptionError::NotAuthenticated)?;
        self.pkg.decrypt(ciphertext, key, &self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::sample_gt;

    #[test]
    fn test_ibe_party_flow() {
        let rng = &mut rand::thread_rng();
        let pkg = IbePkg::setup(256, rng).unwrap();
        let alice = IbeParty::new("alice", &pkg);
        let mut bob = IbeParty::new("bob", &pkg);

        let ciphertext = alice.send_message(b"hi bob", "bob", rng).unwrap();
        assert_eq!(
            bob.receive_message(&ciphertext).unwrap_err(),
            DecryptionError::NotAuthenticated
        );

        bob.authenticate_with_pkg().unwrap();
        assert!(bob.is_authenticated());
        assert!(!alice.is_authenticated());
        assert_eq!(bob.receive_message(&ciphertext).unwrap(), b"hi bob".to_vec());

        let sealed = alice.send_sealed(&[7u8; 100], "bob", rng).unwrap();
        assert_eq!(bob.receive_sealed(&sealed).unwrap(), vec![7u8; 100]);
    }

    #[test]
    fn test_abe_party_flow() {
        let rng = &mut rand::thread_rng();
        let universe = ["student", "teacher", "crypto_lover", "ready_for_christmas", "ready_for_exam"];
        let pkg = AbePkg::setup(&universe, 3, rng).unwrap();
        let alice = AbeParty::new(&universe[1..], &pkg);
        let mut bob = AbeParty::new(&["student", "crypto_lover", "ready_for_christmas"], &pkg);

        let message = sample_gt(rng);
        let ciphertext = alice.send_message(&message, &universe, rng).unwrap();
        assert_eq!(
            bob.receive_message(&ciphertext).unwrap_err(),
            DecryptionError::NotAuthenticated
        );

        bob.authenticate_with_pkg(rng).unwrap();
        assert_eq!(bob.receive_message(&ciphertext).unwrap(), message);
    }
}
