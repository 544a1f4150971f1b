//! Initial data set handed to the registry constructor.
//!
//! A seed file is TOML:
//!
//! ```toml
//! loop_limit = 10
//! admin = "G..."            # optional for `simulate`, required for `deploy`
//!
//! [[entries]]
//! address = "C..."
//! description = "price oracle"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use contract_registry::{ZERO_ACCOUNT, ZERO_CONTRACT};

const STRKEY_LEN: usize = 56;
const BASE32_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{count} entries exceed the loop limit of {limit}")]
    LoopLimitExceeded { count: usize, limit: u32 },

    #[error("entry {index}: malformed strkey {address}")]
    MalformedAddress { index: usize, address: String },

    #[error("entry {index}: zero address is not allowed")]
    ZeroAddress { index: usize },

    #[error("entry {index}: {address} is an account, not a contract")]
    NonContractAddress { index: usize, address: String },

    #[error("entry {index}: {address} is listed more than once")]
    Duplicate { index: usize, address: String },

    #[error("admin {0} is not a valid strkey")]
    MalformedAdmin(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub address: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub loop_limit: u32,
    #[serde(default)]
    pub admin: Option<String>,
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

impl Seed {
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the constructor's batch-add rules offline so a bad seed is
    /// caught before a transaction is built. Strkey checksums are left to
    /// the host.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.entries.len() > self.loop_limit as usize {
            return Err(SeedError::LoopLimitExceeded {
                count: self.entries.len(),
                limit: self.loop_limit,
            });
        }

        if let Some(admin) = &self.admin {
            if !is_strkey_shaped(admin) {
                return Err(SeedError::MalformedAdmin(admin.clone()));
            }
        }

        let mut seen = HashSet::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let address = entry.address.as_str();
            if !is_strkey_shaped(address) {
                return Err(SeedError::MalformedAddress {
                    index,
                    address: address.to_string(),
                });
            }
            if address == ZERO_ACCOUNT || address == ZERO_CONTRACT {
                return Err(SeedError::ZeroAddress { index });
            }
            if !address.starts_with('C') {
                return Err(SeedError::NonContractAddress {
                    index,
                    address: address.to_string(),
                });
            }
            if !seen.insert(address) {
                return Err(SeedError::Duplicate {
                    index,
                    address: address.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn addresses(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.address.as_str()).collect()
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.description.as_str()).collect()
    }
}

fn is_strkey_shaped(s: &str) -> bool {
    s.len() == STRKEY_LEN
        && (s.starts_with('G') || s.starts_with('C'))
        && s.chars().all(|c| BASE32_ALPHABET.contains(c))
}
