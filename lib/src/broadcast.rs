//! All-or-nothing fan-out of one price batch to many destinations.
//!
//! Every precondition is checked and every outbound request is built before
//! the caller touches storage. The caller then commits locally and
//! dispatches each request inside the same host invocation; a failed
//! dispatch fails the invocation, and the host discards the local commit
//! and the earlier dispatches with it.

use soroban_sdk::{Address, Bytes, Env, String, Vec};

use crate::{
    errors::ContractError, payload, validation, RelayRequest, TargetDescriptor,
    CONSISTENCY_LEVEL_INSTANT,
};

/// Validated, ready-to-dispatch broadcast.
#[derive(Clone, Debug)]
pub struct BroadcastPlan {
    pub names: Vec<String>,
    pub prices: Vec<u128>,
    /// Shared payload, encoded once for all destinations
    pub payload: Bytes,
    /// One request per target, in target order
    pub requests: Vec<RelayRequest>,
    pub total_cost: i128,
}

impl BroadcastPlan {
    /// Checks run in a fixed order so each violation maps to one error:
    /// empty batch, length mismatch, empty targets, bad target, wrong value.
    /// `local_chain` is the messaging chain id of the sending contract.
    pub fn build(
        env: &Env,
        names: Vec<String>,
        prices: Vec<u128>,
        targets: &Vec<TargetDescriptor>,
        local_chain: u32,
        value: i128,
        refund_address: &Address,
    ) -> Result<Self, ContractError> {
        validation::validate_batch(&names, &prices)?;
        let total_cost = validation::total_cost(targets, local_chain)?;
        if value != total_cost {
            return Err(ContractError::WrongValue);
        }

        let payload = payload::encode(env, &names, &prices);
        let mut requests = Vec::new(env);
        for target in targets.iter() {
            requests.push_back(RelayRequest {
                payload: payload.clone(),
                consistency_level: CONSISTENCY_LEVEL_INSTANT,
                cost: target.cost,
                dest_chain: target.chain_id,
                refund_address: refund_address.clone(),
                signed_quote: target.signed_quote,
                gas_limit: target.gas_limit,
                forwarded_value: 0,
                extra_instructions: Bytes::new(env),
            });
        }

        Ok(Self {
            names,
            prices,
            payload,
            requests,
            total_cost,
        })
    }

    pub fn entry_count(&self) -> u32 {
        self.names.len()
    }
}
