use soroban_sdk::{log, Address, Env};

use crate::{
    errors::ContractError, events, DataKey, Role, INSTANCE_TTL_EXTEND, INSTANCE_TTL_THRESHOLD,
    PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};

/* ---------------- LIFECYCLE ---------------- */

/// One-time setup: marks the instance initialized and makes `admin` the super-admin.
pub fn init_access(env: &Env, admin: &Address) -> Result<(), ContractError> {
    if env.storage().instance().has(&DataKey::Initialized) {
        return Err(ContractError::AlreadyInitialized);
    }

    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage().instance().set(&DataKey::Paused, &false);
    write_role(env, Role::Admin, admin, true);
    bump_instance(env);

    events::role_granted(env, Role::Admin, admin, admin);
    Ok(())
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !env.storage().instance().has(&DataKey::Initialized) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/* ---------------- ROLES ---------------- */

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Role(role, account.clone()))
        .unwrap_or(false)
}

pub fn require_role(env: &Env, role: Role, account: &Address) -> Result<(), ContractError> {
    if !has_role(env, role, account) {
        log!(env, "missing role", role, account.clone());
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn write_role(env: &Env, role: Role, account: &Address, member: bool) {
    let key = DataKey::Role(role, account.clone());
    if member {
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
    } else {
        env.storage().persistent().remove(&key);
    }
}

/// Grants `role` to `account`. Caller must be an admin. No-op if already held.
pub fn grant_role(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<(), ContractError> {
    caller.require_auth();
    require_not_paused(env)?;
    require_role(env, Role::Admin, caller)?;

    if !has_role(env, role, account) {
        write_role(env, role, account, true);
        events::role_granted(env, role, account, caller);
    }
    Ok(())
}

/// Revokes `role` from `account`. Caller must be an admin. No-op if not held.
pub fn revoke_role(
    env: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<(), ContractError> {
    caller.require_auth();
    require_not_paused(env)?;
    require_role(env, Role::Admin, caller)?;

    if has_role(env, role, account) {
        write_role(env, role, account, false);
        events::role_revoked(env, role, account, caller);
    }
    Ok(())
}

/// Lets an account drop one of its own roles.
pub fn renounce_role(env: &Env, account: &Address, role: Role) -> Result<(), ContractError> {
    account.require_auth();
    require_not_paused(env)?;

    if has_role(env, role, account) {
        write_role(env, role, account, false);
        events::role_revoked(env, role, account, account);
    }
    Ok(())
}

/* ---------------- PAUSE ---------------- */

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn pause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    require_role(env, Role::Admin, caller)?;
    require_not_paused(env)?;

    env.storage().instance().set(&DataKey::Paused, &true);
    bump_instance(env);
    events::paused(env, caller);
    Ok(())
}

pub fn unpause(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    require_role(env, Role::Admin, caller)?;
    if !is_paused(env) {
        return Err(ContractError::NotPaused);
    }

    env.storage().instance().set(&DataKey::Paused, &false);
    bump_instance(env);
    events::unpaused(env, caller);
    Ok(())
}
