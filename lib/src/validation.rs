use soroban_sdk::{String, Vec};

use crate::{errors::ContractError, TargetDescriptor, MAX_CHAIN_ID};

pub fn validate_chain_id(chain_id: u32) -> Result<(), ContractError> {
    if chain_id > MAX_CHAIN_ID {
        return Err(ContractError::InvalidChainId);
    }
    Ok(())
}

/// Names and prices must be non-empty parallel sequences.
pub fn validate_batch(names: &Vec<String>, prices: &Vec<u128>) -> Result<(), ContractError> {
    if names.is_empty() || prices.is_empty() {
        return Err(ContractError::EmptyArray);
    }
    if names.len() != prices.len() {
        return Err(ContractError::LengthMismatch);
    }
    Ok(())
}

/// Checks every target and returns the exact total of their costs. A target
/// on `local_chain` has no remote receiver and fails `InvalidChainId`.
pub fn total_cost(
    targets: &Vec<TargetDescriptor>,
    local_chain: u32,
) -> Result<i128, ContractError> {
    if targets.is_empty() {
        return Err(ContractError::EmptyArray);
    }

    let mut total: i128 = 0;
    for target in targets.iter() {
        validate_chain_id(target.chain_id)?;
        if target.chain_id == local_chain {
            return Err(ContractError::InvalidChainId);
        }
        if target.cost < 0 {
            return Err(ContractError::WrongValue);
        }
        total = total
            .checked_add(target.cost)
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    Ok(total)
}
