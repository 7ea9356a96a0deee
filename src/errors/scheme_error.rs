use std::fmt::{Display, Formatter};

use crate::errors::symmetric_encryption_error::SymmetricEncryptionError;

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SchemeError {
    pub message: String,
}

impl SchemeError {
    pub fn new(message: &str) -> SchemeError {
        SchemeError {
            message: message.to_string(),
        }
    }
}

impl Display for SchemeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scheme error: {}", self.message)
    }
}

impl std::error::Error for SchemeError {}

impl From<SymmetricEncryptionError> for SchemeError {
    fn from(value: SymmetricEncryptionError) -> Self {
        SchemeError::new(&value.to_string())
    }
}
