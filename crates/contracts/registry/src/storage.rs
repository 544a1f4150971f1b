use soroban_sdk::{contracttype, Address, Env, String};

// Roughly one day / thirty days of ledgers at ~5s per ledger.
pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 0,
    Manager = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    LoopLimit,
    Entry(Address),
    Role(Role, Address),
}

/// Registration record for one contract address.
///
/// A removed entry is deleted from storage, so reading it back yields the
/// same value as an address that was never registered.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub description: String,
    pub exists: bool,
}

impl Entry {
    pub fn absent(env: &Env) -> Self {
        Entry {
            description: String::from_str(env, ""),
            exists: false,
        }
    }

    pub fn active(description: String) -> Self {
        Entry {
            description,
            exists: true,
        }
    }
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

pub fn read_loop_limit(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::LoopLimit)
        .unwrap_or(0)
}

pub fn write_loop_limit(env: &Env, limit: u32) {
    env.storage().instance().set(&DataKey::LoopLimit, &limit);
    bump_instance(env);
}

pub fn read_entry(env: &Env, contract: &Address) -> Entry {
    env.storage()
        .persistent()
        .get(&DataKey::Entry(contract.clone()))
        .unwrap_or_else(|| Entry::absent(env))
}

pub fn has_entry(env: &Env, contract: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Entry(contract.clone()))
}

pub fn write_entry(env: &Env, contract: &Address, entry: &Entry) {
    let key = DataKey::Entry(contract.clone());
    env.storage().persistent().set(&key, entry);
    env.storage()
        .persistent()
        .extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

pub fn delete_entry(env: &Env, contract: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Entry(contract.clone()));
}

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Role(role, account.clone()))
        .unwrap_or(false)
}

pub fn write_role(env: &Env, role: Role, account: &Address) {
    let key = DataKey::Role(role, account.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}
