#![no_std]

//! Contract registry.
//!
//! Tracks a set of contract addresses, each labelled with a description.
//! Holders of the `Manager` role add, relabel and remove entries, singly or
//! in batches capped by a loop limit; holders of the `Admin` role tune that
//! limit and hand out the `Manager` role.
//!
//! Every batch is validated in full before the first write, so a failing
//! item leaves storage and the event stream untouched.

use soroban_sdk::{
    contract, contracterror, contractimpl, log, panic_with_error, Address, Env, String, Vec,
};

mod access;
mod events;
mod storage;
mod validation;


pub use events::{
    AddedEvent, DescriptionUpdatedEvent, LoopLimitUpdatedEvent, RemovedEvent, RoleGrantedEvent,
};
pub use storage::{Entry, Role};
pub use validation::{ZERO_ACCOUNT, ZERO_CONTRACT};

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    Unauthorized = 1,
    ZeroAddressNotAllowed = 2,
    NonContractAddress = 3,
    ContractAlreadyExists = 4,
    NotFound = 5,
    ArrayLengthMismatch = 6,
    LoopLimitExceeded = 7,
}

#[contract]
pub struct ContractRegistry;

impl ContractRegistry {
    fn add_all(
        env: &Env,
        contracts: &Vec<Address>,
        descriptions: &Vec<String>,
    ) -> Result<(), RegistryError> {
        validation::check_paired_lengths(contracts.len(), descriptions.len())?;
        validation::check_batch_size(env, contracts.len())?;

        let mut pending = Vec::new(env);
        for contract in contracts.iter() {
            validation::check_addable(env, &contract, &pending)?;
            pending.push_back(contract);
        }

        for (contract, description) in contracts.iter().zip(descriptions.iter()) {
            Self::write_added(env, &contract, description);
        }
        Ok(())
    }

    fn write_added(env: &Env, contract: &Address, description: String) {
        storage::write_entry(env, contract, &Entry::active(description.clone()));
        events::emit_added(env, contract, &description);
        log!(env, "contract added", contract.clone());
    }

    fn write_description(env: &Env, contract: &Address, description: String) {
        let old = storage::read_entry(env, contract).description;
        storage::write_entry(env, contract, &Entry::active(description.clone()));
        events::emit_description_updated(env, contract, old, &description);
        log!(env, "description updated", contract.clone());
    }

    fn write_removed(env: &Env, contract: &Address) {
        storage::delete_entry(env, contract);
        events::emit_removed(env, contract);
        log!(env, "contract removed", contract.clone());
    }
}

#[contractimpl]
impl ContractRegistry {
    /// Deploy the registry. `admin` receives both roles and the initial
    /// entries go through the batch-add checks, including the loop limit.
    pub fn __constructor(
        env: Env,
        admin: Address,
        contracts: Vec<Address>,
        descriptions: Vec<String>,
        loop_limit: u32,
    ) {
        storage::write_loop_limit(&env, loop_limit);
        access::grant_role(&env, Role::Admin, &admin, &admin);
        access::grant_role(&env, Role::Manager, &admin, &admin);

        if let Err(err) = Self::add_all(&env, &contracts, &descriptions) {
            panic_with_error!(&env, err);
        }
    }

    /// Register a single contract address (manager only).
    pub fn add_contract(
        env: Env,
        caller: Address,
        contract: Address,
        description: String,
    ) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Manager, &caller)?;
        validation::check_addable(&env, &contract, &Vec::new(&env))?;

        Self::write_added(&env, &contract, description);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Register several contract addresses at once (manager only).
    pub fn add_contracts_in_batch(
        env: Env,
        caller: Address,
        contracts: Vec<Address>,
        descriptions: Vec<String>,
    ) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Manager, &caller)?;
        Self::add_all(&env, &contracts, &descriptions)?;
        storage::bump_instance(&env);
        Ok(())
    }

    /// Replace the description of a registered contract (manager only).
    pub fn update_contract_description(
        env: Env,
        caller: Address,
        contract: Address,
        description: String,
    ) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Manager, &caller)?;
        validation::check_present(&env, &contract)?;

        Self::write_description(&env, &contract, description);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Replace several descriptions at once (manager only). Repeated
    /// addresses are applied in order.
    pub fn update_descriptions_in_batch(
        env: Env,
        caller: Address,
        contracts: Vec<Address>,
        descriptions: Vec<String>,
    ) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Manager, &caller)?;
        validation::check_paired_lengths(contracts.len(), descriptions.len())?;
        validation::check_batch_size(&env, contracts.len())?;

        for contract in contracts.iter() {
            validation::check_present(&env, &contract)?;
        }

        for (contract, description) in contracts.iter().zip(descriptions.iter()) {
            Self::write_description(&env, &contract, description);
        }
        storage::bump_instance(&env);
        Ok(())
    }

    /// Drop a registered contract (manager only). The address may be added
    /// again later.
    pub fn remove_contract(env: Env, caller: Address, contract: Address) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Manager, &caller)?;
        validation::check_present(&env, &contract)?;

        Self::write_removed(&env, &contract);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Drop several registered contracts at once (manager only).
    pub fn remove_contracts_in_batch(
        env: Env,
        caller: Address,
        contracts: Vec<Address>,
    ) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Manager, &caller)?;
        validation::check_batch_size(&env, contracts.len())?;

        let mut removed = Vec::new(&env);
        for contract in contracts.iter() {
            validation::check_removable(&env, &contract, &removed)?;
            removed.push_back(contract);
        }

        for contract in contracts.iter() {
            Self::write_removed(&env, &contract);
        }
        storage::bump_instance(&env);
        Ok(())
    }

    /// Change the maximum batch size (admin only). Zero is accepted and
    /// rejects every non-empty batch.
    pub fn set_loop_limit(env: Env, caller: Address, limit: u32) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Admin, &caller)?;

        let old = storage::read_loop_limit(&env);
        storage::write_loop_limit(&env, limit);
        events::emit_loop_limit_updated(&env, old, limit);
        Ok(())
    }

    /// Grant the manager role (admin only). Re-granting is a no-op.
    pub fn grant_manager_role(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), RegistryError> {
        access::require_role(&env, Role::Admin, &caller)?;
        access::grant_role(&env, Role::Manager, &account, &caller);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Stored entry for `contract`; the absent entry when not registered.
    pub fn get_contract(env: Env, contract: Address) -> Entry {
        storage::read_entry(&env, &contract)
    }

    pub fn loop_limit(env: Env) -> u32 {
        storage::read_loop_limit(&env)
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        storage::has_role(&env, role, &account)
    }
}
