//! Network deployment through the `stellar` CLI.
//!
//! The registry takes its initial data set as constructor arguments, so a
//! deployment is a single `stellar contract deploy` invocation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::Config;
use crate::seed::{Seed, SeedError};

pub const STELLAR_BIN: &str = "stellar";

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("failed to encode constructor argument: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed has no admin; the deployed registry needs one")]
    MissingAdmin,

    #[error("no source account; pass --source or set SOROBAN_ACCOUNT")]
    MissingSource,

    #[error("WASM file not found: {0}")]
    MissingWasm(PathBuf),

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("deployment timed out after {0}ms")]
    Timeout(u64),

    #[error("stellar CLI exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("could not find a contract id in CLI output: {0:?}")]
    UnexpectedOutput(String),
}

/// A fully assembled CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    pub program: String,
    pub args: Vec<String>,
    pub timeout_ms: u64,
}

impl DeployPlan {
    pub fn build(
        config: &Config,
        seed: &Seed,
        wasm: &Path,
        source: Option<&str>,
    ) -> Result<Self, DeployError> {
        seed.validate()?;
        let admin = seed.admin.as_deref().ok_or(DeployError::MissingAdmin)?;
        let source = source
            .or(config.account.as_deref())
            .ok_or(DeployError::MissingSource)?;

        let contracts = serde_json::to_string(&seed.addresses())?;
        let descriptions = serde_json::to_string(&seed.descriptions())?;

        let wasm = wasm.display().to_string();
        let loop_limit = seed.loop_limit.to_string();

        let args = [
            "contract",
            "deploy",
            "--wasm",
            wasm.as_str(),
            "--source-account",
            source,
            "--rpc-url",
            config.rpc_url.as_str(),
            "--network-passphrase",
            config.network_passphrase.as_str(),
            "--",
            "--admin",
            admin,
            "--contracts",
            contracts.as_str(),
            "--descriptions",
            descriptions.as_str(),
            "--loop_limit",
            loop_limit.as_str(),
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Ok(DeployPlan {
            program: STELLAR_BIN.to_string(),
            args,
            timeout_ms: config.rpc_timeout_ms,
        })
    }

    /// Shell-ready rendering for `--dry-run`.
    pub fn render(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the CLI and return the deployed contract id.
    pub async fn execute(&self) -> Result<String, DeployError> {
        if let Some(wasm) = self.wasm_path() {
            if !wasm.exists() {
                return Err(DeployError::MissingWasm(wasm));
            }
        }

        debug!(command = %self.render(), "spawning deploy");
        let output = tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            Command::new(&self.program).args(&self.args).output(),
        )
        .await
        .map_err(|_| DeployError::Timeout(self.timeout_ms))?
        .map_err(|source| DeployError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(DeployError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let contract_id = parse_contract_id(&String::from_utf8_lossy(&output.stdout))?;
        info!(contract_id = %contract_id, "registry deployed");
        Ok(contract_id)
    }

    fn wasm_path(&self) -> Option<PathBuf> {
        self.args
            .iter()
            .position(|a| a == "--wasm")
            .and_then(|i| self.args.get(i + 1))
            .map(PathBuf::from)
    }
}

/// The CLI prints the new contract id as its last line of stdout.
pub fn parse_contract_id(stdout: &str) -> Result<String, DeployError> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .filter(|line| line.len() == 56 && line.starts_with('C'))
        .map(str::to_string)
        .ok_or_else(|| DeployError::UnexpectedOutput(stdout.to_string()))
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
