pub mod configuration_error;
pub mod decryption_error;
pub mod scheme_error;
pub mod symmetric_encryption_error;

pub use configuration_error::ConfigurationError;
pub use decryption_error::DecryptionError;
pub use scheme_error::SchemeError;
pub use symmetric_encryption_error::{SymmetricEncryptionError, SymmetricStage};
