//! Contract events consumed by indexers and UIs.
//!
//! Topic layout is `(name,)` or `(name, key)`; payloads are tuples so they
//! decode without the contract interface.

use soroban_sdk::{Address, BytesN, Env, String, Symbol, Vec};

use crate::Role;

pub fn prices_committed(env: &Env, names: &Vec<String>, prices: &Vec<u128>) {
    env.events().publish(
        (Symbol::new(env, "prices_committed"),),
        (names.clone(), prices.clone()),
    );
}

/// Emitted once per destination of a broadcast.
pub fn broadcast_dispatched(env: &Env, count: u32, dest_chain: u32, sequence: u64) {
    env.events().publish(
        (Symbol::new(env, "broadcast_dispatched"), dest_chain),
        (count, dest_chain, sequence),
    );
}

pub fn inbound_applied(env: &Env, count: u32, source_chain: u32, source_identity: &BytesN<32>) {
    env.events().publish(
        (Symbol::new(env, "inbound_applied"), source_chain),
        (count, source_chain, source_identity.clone()),
    );
}

pub fn peer_set(env: &Env, chain_id: u32, identity: &BytesN<32>, caller: &Address) {
    env.events().publish(
        (Symbol::new(env, "peer_set"), chain_id),
        (identity.clone(), caller.clone()),
    );
}

pub fn role_granted(env: &Env, role: Role, account: &Address, caller: &Address) {
    env.events().publish(
        (Symbol::new(env, "role_granted"), role),
        (account.clone(), caller.clone()),
    );
}

pub fn role_revoked(env: &Env, role: Role, account: &Address, caller: &Address) {
    env.events().publish(
        (Symbol::new(env, "role_revoked"), role),
        (account.clone(), caller.clone()),
    );
}

pub fn paused(env: &Env, caller: &Address) {
    env.events()
        .publish((Symbol::new(env, "paused"),), caller.clone());
}

pub fn unpaused(env: &Env, caller: &Address) {
    env.events()
        .publish((Symbol::new(env, "unpaused"),), caller.clone());
}
