use soroban_sdk::{contracttype, Address, Env, String, Symbol};

use crate::storage::Role;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddedEvent {
    pub contract: Address,
    pub description: String,
    pub exists: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DescriptionUpdatedEvent {
    pub contract: Address,
    pub old_description: String,
    pub new_description: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemovedEvent {
    pub contract: Address,
    pub exists: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoopLimitUpdatedEvent {
    pub old_limit: u32,
    pub new_limit: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGrantedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}

pub fn emit_added(env: &Env, contract: &Address, description: &String) {
    env.events().publish(
        (Symbol::new(env, "Added"),),
        AddedEvent {
            contract: contract.clone(),
            description: description.clone(),
            exists: true,
        },
    );
}

pub fn emit_description_updated(
    env: &Env,
    contract: &Address,
    old_description: String,
    new_description: &String,
) {
    env.events().publish(
        (Symbol::new(env, "DescriptionUpdated"),),
        DescriptionUpdatedEvent {
            contract: contract.clone(),
            old_description,
            new_description: new_description.clone(),
        },
    );
}

pub fn emit_removed(env: &Env, contract: &Address) {
    env.events().publish(
        (Symbol::new(env, "Removed"),),
        RemovedEvent {
            contract: contract.clone(),
            exists: false,
        },
    );
}

pub fn emit_loop_limit_updated(env: &Env, old_limit: u32, new_limit: u32) {
    env.events().publish(
        (Symbol::new(env, "LoopLimitUpdated"),),
        LoopLimitUpdatedEvent {
            old_limit,
            new_limit,
        },
    );
}

pub fn emit_role_granted(env: &Env, role: Role, account: &Address, sender: &Address) {
    env.events().publish(
        (Symbol::new(env, "RoleGranted"),),
        RoleGrantedEvent {
            role,
            account: account.clone(),
            sender: sender.clone(),
        },
    );
}
