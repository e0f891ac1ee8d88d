#![no_std]

#[cfg(test)]
mod test;

use pricecast_lib::{
    access, events, messaging, payload, peers, prices, ContractError, DataKey, Role,
    PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};
use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, String, Vec};

#[contract]
pub struct PriceReceiver;

#[contractimpl]
impl PriceReceiver {
    pub fn initialize(env: Env, admin: Address, messaging: Address) -> Result<(), ContractError> {
        admin.require_auth();
        access::init_access(&env, &admin)?;
        messaging::store_address(&env, &messaging);
        Ok(())
    }

    /* ---------------- INBOUND ---------------- */

    /// Applies a relayed price batch.
    ///
    /// Anyone may relay. The envelope must verify under the messaging
    /// contract, come from the registered peer of its source chain, and not
    /// have been applied before. Price messages carry no value: both the
    /// value the relayer attaches and the value requested in the signed
    /// envelope must be zero.
    pub fn handle_inbound(
        env: Env,
        encoded_message: Bytes,
        forwarded_value: i128,
    ) -> Result<(), ContractError> {
        access::require_initialized(&env)?;
        access::require_not_paused(&env)?;

        let envelope = messaging::client(&env)?.parse_and_verify(&encoded_message);
        peers::require_peer(&env, envelope.emitter_chain, &envelope.emitter_address)?;

        let delivery = DataKey::Delivered(
            envelope.emitter_chain,
            envelope.emitter_address.clone(),
            envelope.sequence,
        );
        if env.storage().persistent().has(&delivery) {
            log!(&env, "replayed message", envelope.emitter_chain, envelope.sequence);
            return Err(ContractError::AlreadyDelivered);
        }
        if forwarded_value != 0 || envelope.forwarded_value != 0 {
            log!(&env, "value not allowed", forwarded_value, envelope.forwarded_value);
            return Err(ContractError::ValueNotAllowed);
        }

        let batch = payload::decode(&env, &envelope.payload)?;

        env.storage().persistent().set(&delivery, &true);
        env.storage()
            .persistent()
            .extend_ttl(&delivery, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
        prices::store_batch(&env, &batch.names, &batch.prices);
        access::bump_instance(&env);

        events::inbound_applied(
            &env,
            batch.names.len(),
            envelope.emitter_chain,
            &envelope.emitter_address,
        );
        Ok(())
    }

    pub fn is_delivered(env: Env, chain_id: u32, emitter: BytesN<32>, sequence: u64) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Delivered(chain_id, emitter, sequence))
    }

    /* ---------------- PEERS ---------------- */

    pub fn set_peer(
        env: Env,
        caller: Address,
        chain_id: u32,
        peer: BytesN<32>,
    ) -> Result<(), ContractError> {
        peers::set_peer(&env, &caller, chain_id, &peer)
    }

    pub fn set_peer_address(
        env: Env,
        caller: Address,
        chain_id: u32,
        address: Bytes,
    ) -> Result<BytesN<32>, ContractError> {
        peers::set_peer_address(&env, &caller, chain_id, &address)
    }

    pub fn get_peer(env: Env, chain_id: u32) -> BytesN<32> {
        peers::get_peer(&env, chain_id)
    }

    /* ---------------- ROLES ---------------- */

    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        access::grant_role(&env, &caller, role, &account)
    }

    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        access::revoke_role(&env, &caller, role, &account)
    }

    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        access::renounce_role(&env, &account, role)
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access::has_role(&env, role, &account)
    }

    /* ---------------- PAUSE ---------------- */

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        access::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        access::unpause(&env, &caller)
    }

    pub fn is_paused(env: Env) -> bool {
        access::is_paused(&env)
    }

    /* ---------------- QUERIES ---------------- */

    pub fn get_price(env: Env, name: String) -> u128 {
        prices::get_price(&env, &name)
    }

    pub fn get_prices(env: Env, names: Vec<String>) -> Vec<u128> {
        prices::get_prices(&env, &names)
    }

    pub fn messaging(env: Env) -> Result<Address, ContractError> {
        messaging::address(&env)
    }
}
