//! Interface of the generic messaging primitive (bridge core + executor).
//!
//! The sender publishes through it; the receiver asks it to authenticate
//! inbound envelopes. Any contract exposing these functions can back a
//! deployment.

use soroban_sdk::{contractclient, Address, Bytes, Env};

use crate::{errors::ContractError, DataKey, InboundEnvelope, RelayRequest};

#[contractclient(name = "MessagingClient")]
pub trait Messaging {
    /// Publishes `request.payload` under `emitter` and pays the relay
    /// `request.cost` from `payer`. Returns the emitter's sequence number
    /// for the message.
    fn publish_and_relay(env: Env, emitter: Address, payer: Address, request: RelayRequest) -> u64;

    /// Verifies the bridge signatures on `encoded` and returns its fields.
    /// Fails the invocation when verification fails.
    fn parse_and_verify(env: Env, encoded: Bytes) -> InboundEnvelope;

    /// Chain id of the chain this messaging instance lives on.
    fn chain_id(env: Env) -> u32;
}

/// Records the messaging contract this instance trusts. Set once at
/// initialization.
pub fn store_address(env: &Env, messaging: &Address) {
    env.storage().instance().set(&DataKey::Messaging, messaging);
}

pub fn address(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Messaging)
        .ok_or(ContractError::NotInitialized)
}

pub fn client(env: &Env) -> Result<MessagingClient<'_>, ContractError> {
    Ok(MessagingClient::new(env, &address(env)?))
}
