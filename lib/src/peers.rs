use soroban_sdk::{log, Address, Bytes, BytesN, Env};

use crate::{
    access, address, errors::ContractError, events, validation, DataKey, Role,
    PERSISTENT_TTL_EXTEND, PERSISTENT_TTL_THRESHOLD,
};

/// Registers (or overwrites) the trusted remote identity for `chain_id`.
///
/// Setting the zero identity is how a peer is revoked: `is_peer` never
/// accepts it.
pub fn set_peer(
    env: &Env,
    caller: &Address,
    chain_id: u32,
    identity: &BytesN<32>,
) -> Result<(), ContractError> {
    caller.require_auth();
    access::require_not_paused(env)?;
    access::require_role(env, Role::PeerAdmin, caller)?;
    validation::validate_chain_id(chain_id)?;

    let key = DataKey::Peer(chain_id);
    env.storage().persistent().set(&key, identity);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);

    events::peer_set(env, chain_id, identity, caller);
    Ok(())
}

/// Same as [`set_peer`] for a chain-native address shorter than 32 bytes.
pub fn set_peer_address(
    env: &Env,
    caller: &Address,
    chain_id: u32,
    native: &Bytes,
) -> Result<BytesN<32>, ContractError> {
    let identity = address::left_pad(env, native)?;
    set_peer(env, caller, chain_id, &identity)?;
    Ok(identity)
}

/// Registered identity for `chain_id`, or the zero value when none is set.
pub fn get_peer(env: &Env, chain_id: u32) -> BytesN<32> {
    env.storage()
        .persistent()
        .get(&DataKey::Peer(chain_id))
        .unwrap_or_else(|| address::zero(env))
}

pub fn is_peer(env: &Env, chain_id: u32, identity: &BytesN<32>) -> bool {
    let peer = get_peer(env, chain_id);
    !address::is_zero(&peer) && &peer == identity
}

pub fn require_peer(env: &Env, chain_id: u32, identity: &BytesN<32>) -> Result<(), ContractError> {
    if !is_peer(env, chain_id, identity) {
        log!(env, "unknown peer", chain_id, identity.clone());
        return Err(ContractError::InvalidPeer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{contract, contractimpl};

    #[contract]
    struct PeerHarness;

    #[contractimpl]
    impl PeerHarness {}

    fn setup() -> (Env, Address, Address) {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let contract_id = env.register(PeerHarness, ());
        env.as_contract(&contract_id, || {
            access::init_access(&env, &admin).unwrap();
        });
        env.as_contract(&contract_id, || {
            access::grant_role(&env, &admin, Role::PeerAdmin, &admin).unwrap();
        });
        (env, contract_id, admin)
    }

    #[test]
    fn unset_and_zero_peers_never_match() {
        let (env, contract_id, admin) = setup();

        env.as_contract(&contract_id, || {
            assert_eq!(get_peer(&env, 2), address::zero(&env));
            assert!(!is_peer(&env, 2, &address::zero(&env)));
            assert_eq!(
                require_peer(&env, 2, &address::zero(&env)),
                Err(ContractError::InvalidPeer)
            );
        });

        env.as_contract(&contract_id, || {
            set_peer(&env, &admin, 2, &address::zero(&env)).unwrap();
            assert!(!is_peer(&env, 2, &address::zero(&env)));
        });
    }

    #[test]
    fn overwrite_replaces_previous_peer() {
        let (env, contract_id, admin) = setup();
        let first = BytesN::from_array(&env, &[1u8; 32]);
        let second = BytesN::from_array(&env, &[2u8; 32]);

        env.as_contract(&contract_id, || {
            set_peer(&env, &admin, 10002, &first).unwrap();
        });
        env.as_contract(&contract_id, || {
            set_peer(&env, &admin, 10002, &second).unwrap();
            assert!(is_peer(&env, 10002, &second));
            assert!(!is_peer(&env, 10002, &first));
        });
    }

    #[test]
    fn native_addresses_are_left_padded() {
        let (env, contract_id, admin) = setup();
        let evm = Bytes::from_array(&env, &[0x11u8; 20]);

        env.as_contract(&contract_id, || {
            let identity = set_peer_address(&env, &admin, 2, &evm).unwrap();
            assert_eq!(identity.to_array()[..12], [0u8; 12]);
            assert!(is_peer(&env, 2, &identity));
        });
    }

    #[test]
    fn requires_peer_admin_and_valid_chain() {
        let (env, contract_id, admin) = setup();
        let outsider = Address::generate(&env);
        let identity = BytesN::from_array(&env, &[3u8; 32]);

        env.as_contract(&contract_id, || {
            assert_eq!(
                set_peer(&env, &outsider, 2, &identity),
                Err(ContractError::Unauthorized)
            );
        });
        env.as_contract(&contract_id, || {
            assert_eq!(
                set_peer(&env, &admin, 70_000, &identity),
                Err(ContractError::InvalidChainId)
            );
        });
    }
}
