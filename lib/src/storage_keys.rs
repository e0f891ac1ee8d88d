use soroban_sdk::{contracttype, Address, BytesN, String};

use crate::types::Role;

/// Keys shared by both contracts.
///
/// Instance tier: `Initialized`, `Messaging`, `Paused`.
/// Persistent tier: everything keyed by caller-supplied data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Messaging,
    Paused,
    /// Membership flag for (role, account)
    Role(Role, Address),
    /// Registered remote identity for a chain id
    Peer(u32),
    /// Last written price for a token name
    Price(String),
    /// Accepted inbound message (emitter chain, emitter, sequence)
    Delivered(u32, BytesN<32>, u64),
}
