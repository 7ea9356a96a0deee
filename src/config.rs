//! Scheme configuration, deserializable from JSON so a deployment can pin its
//! parameters (and in particular its published attribute universe) in a file.

use serde::{Deserialize, Serialize};

use crate::abe_attribute::AttributeUniverse;
use crate::errors::ConfigurationError;

pub const DEFAULT_SECURITY_BITS: usize = 256;
pub const MIN_SECURITY_BITS: usize = 128;
/// Bounds sigma, and with it every IBE ciphertext, at 128 bytes.
pub const MAX_SECURITY_BITS: usize = 1024;

fn default_security_bits() -> usize {
    DEFAULT_SECURITY_BITS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbeSettings {
    /// Bit length n of sigma, and the maximum message length.
    #[serde(default = "default_security_bits")]
    pub security_bits: usize,
}

impl Default for IbeSettings {
    fn default() -> Self {
        IbeSettings {
            security_bits: DEFAULT_SECURITY_BITS,
        }
    }
}

impl IbeSettings {
    pub fn new(security_bits: usize) -> Result<IbeSettings, ConfigurationError> {
        let settings = IbeSettings { security_bits };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.security_bits % 8 != 0 {
            return Err(ConfigurationError::new(
                format!(
                    "Security parameter must be a whole number of bytes, got {} bits",
                    self.security_bits
                )
                .as_str(),
            ));
        }
        if self.security_bits < MIN_SECURITY_BITS {
            return Err(ConfigurationError::new(
                format!(
                    "Security parameter must be at least {} bits, got {}",
                    MIN_SECURITY_BITS, self.security_bits
                )
                .as_str(),
            ));
        }
        if self.security_bits > MAX_SECURITY_BITS {
            return Err(ConfigurationError::new(
                format!(
                    "Security parameter must be at most {} bits, got {}",
                    MAX_SECURITY_BITS, self.security_bits
                )
                .as_str(),
            ));
        }
        Ok(())
    }

    pub fn sigma_len(&self) -> usize {
        self.security_bits / 8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbeSettings {
    pub universe: AttributeUniverse,
    /// Required attribute overlap d, in `[1, |universe|]`.
    pub threshold: usize,
}

impl AbeSettings {
    pub fn new(
        universe: AttributeUniverse,
        threshold: usize,
    ) -> Result<AbeSettings, ConfigurationError> {
        let settings = AbeSettings {
            universe,
            threshold,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<AbeSettings, ConfigurationError> {
        let settings: AbeSettings = serde_json::from_str(json).map_err(|e| {
            ConfigurationError::new(format!("Could not parse ABE settings: {}", e).as_str())
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.threshold < 1 || self.threshold > self.universe.len() {
            return Err(ConfigurationError::new(
                format!(
                    "Threshold must be between 1 and {} (the universe size), got {}",
                    self.universe.len(),
                    self.threshold
                )
                .as_str(),
            ));
        }
        Ok(())
    }
}
