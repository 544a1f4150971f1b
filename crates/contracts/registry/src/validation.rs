use soroban_sdk::{Address, Env, String, Vec};

use crate::storage;
use crate::RegistryError;

/// Strkeys of the all-zero account and contract ids.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
pub const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

const STRKEY_LEN: usize = 56;
const CONTRACT_PREFIX: u8 = b'C';

pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
        || *address == Address::from_string(&String::from_str(env, ZERO_CONTRACT))
}

/// Contract ids encode as `C...` strkeys, plain accounts as `G...`.
pub fn is_contract_address(address: &Address) -> bool {
    let strkey = address.to_string();
    if strkey.len() as usize != STRKEY_LEN {
        return false;
    }
    let mut buf = [0u8; STRKEY_LEN];
    strkey.copy_into_slice(&mut buf);
    buf[0] == CONTRACT_PREFIX
}

/// Enforce the add preconditions in order: non-zero, contract kind, absent.
///
/// `pending` holds addresses accepted earlier in the same batch; they count
/// as registered so a batch cannot add the same address twice.
pub fn check_addable(
    env: &Env,
    contract: &Address,
    pending: &Vec<Address>,
) -> Result<(), RegistryError> {
    if is_zero_address(env, contract) {
        return Err(RegistryError::ZeroAddressNotAllowed);
    }
    if !is_contract_address(contract) {
        return Err(RegistryError::NonContractAddress);
    }
    if storage::has_entry(env, contract) || pending.contains(contract) {
        return Err(RegistryError::ContractAlreadyExists);
    }
    Ok(())
}

pub fn check_present(env: &Env, contract: &Address) -> Result<(), RegistryError> {
    if storage::has_entry(env, contract) {
        Ok(())
    } else {
        Err(RegistryError::NotFound)
    }
}

/// Like `check_present`, but an address already removed earlier in the batch
/// is treated as gone.
pub fn check_removable(
    env: &Env,
    contract: &Address,
    removed: &Vec<Address>,
) -> Result<(), RegistryError> {
    if removed.contains(contract) {
        return Err(RegistryError::NotFound);
    }
    check_present(env, contract)
}

pub fn check_batch_size(env: &Env, len: u32) -> Result<(), RegistryError> {
    if len > storage::read_loop_limit(env) {
        return Err(RegistryError::LoopLimitExceeded);
    }
    Ok(())
}

pub fn check_paired_lengths(left: u32, right: u32) -> Result<(), RegistryError> {
    if left != right {
        return Err(RegistryError::ArrayLengthMismatch);
    }
    Ok(())
}
