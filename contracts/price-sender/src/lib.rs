#![no_std]


use pricecast_lib::{
    access, broadcast::BroadcastPlan, events, messaging, peers, prices, ContractError, Role,
    TargetDescriptor,
};
use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, String, Vec};

#[contract]
pub struct PriceSender;

#[contractimpl]
impl PriceSender {
    /// One-time setup. `admin` becomes the super-admin; feeder and peer
    /// roles are granted afterwards.
    pub fn initialize(env: Env, admin: Address, messaging: Address) -> Result<(), ContractError> {
        admin.require_auth();
        access::init_access(&env, &admin)?;
        messaging::store_address(&env, &messaging);
        Ok(())
    }

    /* ---------------- BROADCAST ---------------- */

    /// Overwrites the local price of every name, then publishes the same
    /// batch to every target, in target order.
    ///
    /// Targets must be remote chains: a target on the messaging contract's
    /// own chain fails `InvalidChainId`. `value` must equal the sum of the
    /// target costs. Each target's cost is
    /// charged from `feeder` by the messaging contract. Returns one sequence
    /// number per target. Any failure, including a failed dispatch to the
    /// last target, leaves no local or remote effect.
    pub fn submit_and_broadcast(
        env: Env,
        feeder: Address,
        token_names: Vec<String>,
        prices: Vec<u128>,
        targets: Vec<TargetDescriptor>,
        value: i128,
    ) -> Result<Vec<u64>, ContractError> {
        feeder.require_auth();
        access::require_initialized(&env)?;
        access::require_not_paused(&env)?;
        access::require_role(&env, Role::PriceFeeder, &feeder)?;

        let messaging = messaging::client(&env)?;
        let local_chain = messaging.chain_id();
        let plan = BroadcastPlan::build(
            &env,
            token_names,
            prices,
            &targets,
            local_chain,
            value,
            &feeder,
        )?;

        prices::store_batch(&env, &plan.names, &plan.prices);
        events::prices_committed(&env, &plan.names, &plan.prices);

        let emitter = env.current_contract_address();
        let count = plan.entry_count();
        let mut sequences = Vec::new(&env);
        for request in plan.requests.iter() {
            let dest_chain = request.dest_chain;
            let sequence = messaging.publish_and_relay(&emitter, &feeder, &request);
            events::broadcast_dispatched(&env, count, dest_chain, sequence);
            sequences.push_back(sequence);
        }

        access::bump_instance(&env);
        log!(&env, "broadcast", count, sequences.len(), plan.total_cost);
        Ok(sequences)
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

    /// Registers a chain-native address, left-padded to 32 bytes. Returns
    /// the stored identity.
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

    /// Last committed price for `name`, zero when never submitted.
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
