use std::fmt::{Display, Formatter};

/// Raised by `setup` when the scheme parameters cannot describe a valid instance.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConfigurationError {
    pub message: String,
}

impl ConfigurationError {
    pub fn new(message: &str) -> ConfigurationError {
        ConfigurationError {
            message: message.to_string(),
        }
    }
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigurationError: {}", self.message)
    }
}

impl std::error::Error for ConfigurationError {}
