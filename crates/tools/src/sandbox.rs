//! In-process deployment of the registry against the Soroban test host.
//!
//! Lets a seed be dry-run through the real constructor before any network
//! transaction is signed.

use std::panic::{self, AssertUnwindSafe};

use contract_registry::{ContractRegistry, ContractRegistryClient};
use serde::Serialize;
use soroban_sdk::testutils::{Address as _, EnvTestConfig};
use soroban_sdk::{Address, Env, String as SorobanString, Vec as SorobanVec};
use thiserror::Error;
use tracing::{debug, info};

use crate::seed::{Seed, SeedError};

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("registry rejected the seed: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedEntry {
    pub address: String,
    pub description: String,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub contract_id: String,
    pub admin: String,
    pub loop_limit: u32,
    pub entries: Vec<ReportedEntry>,
}

pub fn simulate(seed: &Seed) -> Result<SimulationReport, SandboxError> {
    seed.validate()?;

    panic::catch_unwind(AssertUnwindSafe(|| run(seed)))
        .map_err(|payload| SandboxError::Rejected(panic_message(payload.as_ref())))
}

fn run(seed: &Seed) -> SimulationReport {
    let env = Env::new_with_config(EnvTestConfig {
        capture_snapshot_at_drop: false,
    });
    env.mock_all_auths();

    let admin = match &seed.admin {
        Some(strkey) => address(&env, strkey),
        None => Address::generate(&env),
    };

    let mut contracts = SorobanVec::new(&env);
    let mut descriptions = SorobanVec::new(&env);
    for entry in &seed.entries {
        contracts.push_back(address(&env, &entry.address));
        descriptions.push_back(SorobanString::from_str(&env, &entry.description));
    }

    let contract_id = env.register(
        ContractRegistry,
        (admin.clone(), contracts.clone(), descriptions, seed.loop_limit),
    );
    let client = ContractRegistryClient::new(&env, &contract_id);
    info!(contract = %to_std(&contract_id.to_string()), "registry instantiated in sandbox");

    let entries = contracts
        .iter()
        .map(|contract| {
            let entry = client.get_contract(&contract);
            debug!(address = %to_std(&contract.to_string()), exists = entry.exists, "read back entry");
            ReportedEntry {
                address: to_std(&contract.to_string()),
                description: to_std(&entry.description),
                exists: entry.exists,
            }
        })
        .collect();

    SimulationReport {
        contract_id: to_std(&contract_id.to_string()),
        admin: to_std(&admin.to_string()),
        loop_limit: client.loop_limit(),
        entries,
    }
}

fn address(env: &Env, strkey: &str) -> Address {
    Address::from_string(&SorobanString::from_str(env, strkey))
}

fn to_std(s: &SorobanString) -> String {
    let mut buf = vec![0u8; s.len() as usize];
    s.copy_into_slice(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "contract invocation failed".to_string()
    }
}
