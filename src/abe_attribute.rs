use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigurationError, SchemeError};

/// An attribute name together with its 1-based index in the universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbeAttribute {
    pub name: String,
    pub index: u64,
}

impl AbeAttribute {
    pub fn new(name: &str, index: u64) -> AbeAttribute {
        AbeAttribute {
            name: name.to_string(),
            index,
        }
    }
}

/// The fixed, ordered attribute universe of one ABE instance.
///
/// Attribute `k` (0-based position) gets index `k + 1`, so indices are exactly `1..=len`.
/// The universe is published next to the public parameters; `version` lets parties
/// detect that they are working with different assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PublishedUniverse", into = "PublishedUniverse")]
pub struct AttributeUniverse {
    version: u32,
    attributes: Vec<AbeAttribute>,
}

/// Wire form of [`AttributeUniverse`], indices are implied by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedUniverse {
    pub version: u32,
    pub attributes: Vec<String>,
}

impl AttributeUniverse {
    pub const INITIAL_VERSION: u32 = 1;

    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<AttributeUniverse, ConfigurationError> {
        AttributeUniverse::with_version(names, AttributeUniverse::INITIAL_VERSION)
    }

    pub fn with_version<S: AsRef<str>>(
        names: &[S],
        version: u32,
    ) -> Result<AttributeUniverse, ConfigurationError> {
        if names.is_empty() {
            return Err(ConfigurationError::new(
                "Attribute universe must contain at least one attribute",
            ));
        }

        if let Some(name) = names.iter().map(|n| n.as_ref()).duplicates().next() {
            return Err(ConfigurationError::new(
                format!("Attribute {} appears more than once in the universe", name).as_str(),
            ));
        }

        if names.iter().any(|n| n.as_ref().is_empty()) {
            return Err(ConfigurationError::new("Attribute names must not be empty"));
        }

        let attributes = names
            .iter()
            .enumerate()
            .map(|(position, name)| AbeAttribute::new(name.as_ref(), position as u64 + 1))
            .collect();

        Ok(AttributeUniverse {
            version,
            attributes,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[AbeAttribute] {
        &self.attributes
    }

    pub fn indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.attributes.iter().map(|a| a.index)
    }

    pub fn index_of(&self, name: &str) -> Option<u64> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.index)
    }

    pub fn name_of(&self, index: u64) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.index == index)
            .map(|a| a.name.as_str())
    }

    /// Maps attribute names to their index set. Duplicate names collapse.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<BTreeSet<u64>, SchemeError> {
        names
            .iter()
            .map(|name| {
                self.index_of(name.as_ref()).ok_or(SchemeError::new(
                    format!("Attribute {} not found in universe", name.as_ref()).as_str(),
                ))
            })
            .collect()
    }
}

impl TryFrom<PublishedUniverse> for AttributeUniverse {
    type Error = ConfigurationError;

    fn try_from(value: PublishedUniverse) -> Result<Self, Self::Error> {
        AttributeUniverse::with_version(&value.attributes, value.version)
    }
}

impl From<AttributeUniverse> for PublishedUniverse {
    fn from(value: AttributeUniverse) -> Self {
        PublishedUniverse {
            version: value.version,
            attributes: value.attributes.into_iter().map(|a| a.name).collect(),
        }
    }
}
