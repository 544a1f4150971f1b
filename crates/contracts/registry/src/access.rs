use soroban_sdk::{log, Address, Env};

use crate::events;
use crate::storage::{self, Role};
use crate::RegistryError;

/// Check the role table for `caller`, then require its signature.
pub fn require_role(env: &Env, role: Role, caller: &Address) -> Result<(), RegistryError> {
    if !storage::has_role(env, role, caller) {
        log!(env, "caller lacks role", role, caller.clone());
        return Err(RegistryError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

/// Grant `role` to `account`. Returns false when the grant already existed.
pub fn grant_role(env: &Env, role: Role, account: &Address, sender: &Address) -> bool {
    if storage::has_role(env, role, account) {
        return false;
    }
    storage::write_role(env, role, account);
    events::emit_role_granted(env, role, account, sender);
    log!(env, "role granted", role, account.clone());
    true
}
