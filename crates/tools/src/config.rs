//! Network configuration for registry deployments
//!
//! Values are resolved in priority order:
//!
//! 1. Environment variables (`SOROBAN_*`, optionally from `.env`)
//! 2. The selected `[profile.<network>]` in `soroban.toml`
//! 3. Built-in defaults for the network
//!
//! # Examples
//!
//! ```rust,no_run
//! use registry_tools::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("deploying to {} via {}", config.network, config.rpc_url);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const TOML_FILE: &str = "soroban.toml";
const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid network: {0}. Must be: testnet, mainnet, or sandbox")]
    InvalidNetwork(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("RPC URL must start with http:// or https://: {0}")]
    InvalidRpcUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Mainnet,
    Sandbox,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Sandbox => "sandbox",
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://soroban-testnet.stellar.org",
            Network::Mainnet => "https://mainnet.sorobanrpc.com",
            Network::Sandbox => "http://localhost:8000",
        }
    }

    /// Passphrase the network signs transactions with.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Mainnet => "Public Global Stellar Network ; September 2015",
            Network::Sandbox => "Standalone Network ; February 2017",
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            "sandbox" => Ok(Network::Sandbox),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `[profile.<name>]` table of `soroban.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkProfile {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub network_passphrase: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SorobanToml {
    #[serde(default)]
    pub default: Option<DefaultProfile>,
    #[serde(default)]
    pub profile: HashMap<String, NetworkProfile>,
}

impl SorobanToml {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn default_network(&self) -> Option<&str> {
        self.default.as_ref().and_then(|d| d.network.as_deref())
    }
}

/// Fully resolved deployment configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub network: Network,
    pub rpc_url: String,
    pub network_passphrase: String,
    /// Signing identity handed to the stellar CLI as `--source`.
    pub account: Option<String>,
    pub rpc_timeout_ms: u64,
    pub debug: bool,
}

impl Config {
    /// Resolve from the process environment and `soroban.toml` in the
    /// working directory, if present.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }

        let path = Path::new(TOML_FILE);
        let toml = if path.exists() {
            Some(SorobanToml::from_path(path)?)
        } else {
            None
        };

        Self::resolve(|key| std::env::var(key).ok(), toml.as_ref())
    }

    /// Resolve with an explicit variable lookup, so callers and tests can
    /// supply their own environment.
    pub fn resolve<F>(lookup: F, toml: Option<&SorobanToml>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_name = lookup("SOROBAN_NETWORK")
            .or_else(|| toml.and_then(|t| t.default_network()).map(str::to_string))
            .unwrap_or_else(|| Network::Testnet.as_str().to_string());
        let network: Network = network_name.parse()?;

        let profile = toml
            .and_then(|t| t.profile.get(network.as_str()))
            .cloned()
            .unwrap_or_default();

        let rpc_url = lookup("SOROBAN_RPC_URL")
            .or(profile.rpc_url)
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        let network_passphrase = lookup("SOROBAN_NETWORK_PASSPHRASE")
            .or(profile.network_passphrase)
            .unwrap_or_else(|| network.passphrase().to_string());

        let account = lookup("SOROBAN_ACCOUNT").or(profile.account);

        let rpc_timeout_ms = match lookup("SOROBAN_RPC_TIMEOUT_MS") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SOROBAN_RPC_TIMEOUT_MS",
                value,
            })?,
            None => DEFAULT_RPC_TIMEOUT_MS,
        };

        let debug = lookup("SOROBAN_DEBUG")
            .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
            .unwrap_or(false);

        let config = Config {
            network,
            rpc_url,
            network_passphrase,
            account,
            rpc_timeout_ms,
            debug,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.is_empty() {
            return Err(ConfigError::MissingField("rpc_url"));
        }
        if self.network_passphrase.is_empty() {
            return Err(ConfigError::MissingField("network_passphrase"));
        }
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(ConfigError::InvalidRpcUrl(self.rpc_url.clone()));
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        info!(
            network = %self.network,
            rpc_url = %self.rpc_url,
            passphrase = %self.network_passphrase,
            account = self.account.as_deref().unwrap_or("(not configured)"),
            rpc_timeout_ms = self.rpc_timeout_ms,
            debug = self.debug,
            "resolved network configuration"
        );
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
