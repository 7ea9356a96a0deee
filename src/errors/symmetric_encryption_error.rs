use std::fmt::{Display, Formatter};

/// Failure of the AES-256-GCM payload layer.
///
/// On `Open` this is also what a modified payload or a wrong session key looks like.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SymmetricEncryptionError {
    pub stage: SymmetricStage,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SymmetricStage {
    Seal,
    Open,
}

impl SymmetricEncryptionError {
    pub fn seal(message: &str) -> SymmetricEncryptionError {
        SymmetricEncryptionError {
            stage: SymmetricStage::Seal,
            message: message.to_string(),
        }
    }

    pub fn open(message: &str) -> SymmetricEncryptionError {
        SymmetricEncryptionError {
            stage: SymmetricStage::Open,
            message: message.to_string(),
        }
    }
}

impl Display for SymmetricEncryptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            SymmetricStage::Seal => write!(f, "Could not seal payload: {}", self.message),
            SymmetricStage::Open => write!(f, "Could not open payload: {}", self.message),
        }
    }
}

impl std::error::Error for SymmetricEncryptionError {}
