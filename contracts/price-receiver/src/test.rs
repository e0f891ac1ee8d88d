#![cfg(test)]

use super::*;
use pricecast_lib::{
    testutils::{guardian_key, guardian_public, sign_envelope, MockMessaging, SigningKey},
    CONSISTENCY_LEVEL_INSTANT,
};
use soroban_sdk::{testutils::Address as _, Address, Bytes, BytesN, Env, String, Vec};

const LOCAL_CHAIN: u32 = 61;
const ETHEREUM: u16 = 2;
const ARBITRUM: u16 = 23;

struct Setup {
    env: Env,
    client: PriceReceiverClient<'static>,
    admin: Address,
    messaging: Address,
    guardian: SigningKey,
    sender: BytesN<32>,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let guardian = guardian_key(3);

    let messaging = env.register(MockMessaging, ());
    pricecast_lib::testutils::MockMessagingClient::new(&env, &messaging).initialize(
        &LOCAL_CHAIN,
        &Address::generate(&env),
        &Address::generate(&env),
        &guardian_public(&env, &guardian),
    );

    let receiver = env.register(PriceReceiver, ());
    let client = PriceReceiverClient::new(&env, &receiver);
    client.initialize(&admin, &messaging);
    client.grant_role(&admin, &Role::PeerAdmin, &admin);

    let sender = BytesN::from_array(&env, &[0x5eu8; 32]);
    client.set_peer(&admin, &(ETHEREUM as u32), &sender);

    Setup {
        env,
        client,
        admin,
        messaging,
        guardian,
        sender,
    }
}

fn names(env: &Env) -> Vec<String> {
    Vec::from_array(
        env,
        [
            String::from_str(env, "bitcoin"),
            String::from_str(env, "ethereum"),
        ],
    )
}

fn batch(env: &Env, btc: u128, eth: u128) -> Bytes {
    payload::encode(env, &names(env), &Vec::from_array(env, [btc, eth]))
}

impl Setup {
    fn envelope(&self, chain: u16, emitter: &BytesN<32>, sequence: u64, payload: &Bytes) -> Bytes {
        self.envelope_with_value(chain, emitter, sequence, 0, payload)
    }

    fn envelope_with_value(
        &self,
        chain: u16,
        emitter: &BytesN<32>,
        sequence: u64,
        forwarded_value: i128,
        payload: &Bytes,
    ) -> Bytes {
        sign_envelope(
            &self.env,
            &self.guardian,
            chain,
            emitter,
            sequence,
            CONSISTENCY_LEVEL_INSTANT as u8,
            forwarded_value,
            payload,
        )
    }

    fn prices(&self) -> Vec<u128> {
        self.client.get_prices(&names(&self.env))
    }
}

#[test]
fn test_initialize_once() {
    let s = setup();
    let messaging = s.client.messaging();
    assert_eq!(
        s.client.try_initialize(&s.admin, &messaging),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_applies_message_from_registered_peer() {
    let s = setup();
    let env = &s.env;
    let message = s.envelope(ETHEREUM, &s.sender, 0, &batch(env, 98_500_000_000, 3_800_000_000));

    assert!(!s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &0));
    s.client.handle_inbound(&message, &0);

    assert!(s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &0));
    assert_eq!(
        s.prices(),
        Vec::from_array(env, [98_500_000_000u128, 3_800_000_000u128])
    );
}

#[test]
fn test_replay_is_rejected_even_with_different_payload() {
    let s = setup();
    let env = &s.env;
    let first = s.envelope(ETHEREUM, &s.sender, 4, &batch(env, 1, 2));
    s.client.handle_inbound(&first, &0);

    assert_eq!(
        s.client.try_handle_inbound(&first, &0),
        Err(Ok(ContractError::AlreadyDelivered))
    );

    let altered = s.envelope(ETHEREUM, &s.sender, 4, &batch(env, 7, 8));
    assert_eq!(
        s.client.try_handle_inbound(&altered, &0),
        Err(Ok(ContractError::AlreadyDelivered))
    );
    assert_eq!(s.prices(), Vec::from_array(env, [1u128, 2u128]));

    // Replay wins over the value check.
    assert_eq!(
        s.client.try_handle_inbound(&first, &5),
        Err(Ok(ContractError::AlreadyDelivered))
    );
}

#[test]
fn test_replay_key_includes_source_chain() {
    let s = setup();
    let env = &s.env;
    s.client
        .set_peer(&s.admin, &(ARBITRUM as u32), &s.sender);

    s.client
        .handle_inbound(&s.envelope(ETHEREUM, &s.sender, 9, &batch(env, 1, 2)), &0);
    s.client
        .handle_inbound(&s.envelope(ARBITRUM, &s.sender, 9, &batch(env, 3, 4)), &0);

    assert!(s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &9));
    assert!(s.client.is_delivered(&(ARBITRUM as u32), &s.sender, &9));
    assert_eq!(s.prices(), Vec::from_array(env, [3u128, 4u128]));
}

#[test]
fn test_unregistered_emitters_are_rejected() {
    let s = setup();
    let env = &s.env;
    let stranger = BytesN::from_array(env, &[0x66u8; 32]);

    let spoofed = s.envelope(ETHEREUM, &stranger, 0, &batch(env, 1, 2));
    assert_eq!(
        s.client.try_handle_inbound(&spoofed, &0),
        Err(Ok(ContractError::InvalidPeer))
    );

    let unknown_chain = s.envelope(ARBITRUM, &s.sender, 0, &batch(env, 1, 2));
    assert_eq!(
        s.client.try_handle_inbound(&unknown_chain, &0),
        Err(Ok(ContractError::InvalidPeer))
    );

    // Peer check runs before the payload is looked at.
    let garbage = s.envelope(ETHEREUM, &stranger, 1, &Bytes::from_array(env, &[1, 2, 3]));
    assert_eq!(
        s.client.try_handle_inbound(&garbage, &0),
        Err(Ok(ContractError::InvalidPeer))
    );

    assert_eq!(s.prices(), Vec::from_array(env, [0u128, 0u128]));
}

#[test]
fn test_zero_peer_authenticates_nothing() {
    let s = setup();
    let env = &s.env;
    let zero = BytesN::from_array(env, &[0u8; 32]);
    s.client.set_peer(&s.admin, &(ETHEREUM as u32), &zero);

    let from_zero = s.envelope(ETHEREUM, &zero, 0, &batch(env, 1, 2));
    assert_eq!(
        s.client.try_handle_inbound(&from_zero, &0),
        Err(Ok(ContractError::InvalidPeer))
    );

    let from_old_peer = s.envelope(ETHEREUM, &s.sender, 0, &batch(env, 1, 2));
    assert_eq!(
        s.client.try_handle_inbound(&from_old_peer, &0),
        Err(Ok(ContractError::InvalidPeer))
    );
}

#[test]
fn test_forwarded_value_is_refused_without_consuming_sequence() {
    let s = setup();
    let env = &s.env;
    let message = s.envelope(ETHEREUM, &s.sender, 2, &batch(env, 1, 2));

    assert_eq!(
        s.client.try_handle_inbound(&message, &1),
        Err(Ok(ContractError::ValueNotAllowed))
    );
    assert!(!s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &2));

    s.client.handle_inbound(&message, &0);
    assert_eq!(s.prices(), Vec::from_array(env, [1u128, 2u128]));
}

#[test]
fn test_signed_value_request_is_refused() {
    let s = setup();
    let env = &s.env;
    let message = s.envelope_with_value(ETHEREUM, &s.sender, 3, 500, &batch(env, 1, 2));

    // The relayer attaching nothing does not make a value-bearing message
    // acceptable.
    assert_eq!(
        s.client.try_handle_inbound(&message, &0),
        Err(Ok(ContractError::ValueNotAllowed))
    );
    assert_eq!(
        s.client.try_handle_inbound(&message, &500),
        Err(Ok(ContractError::ValueNotAllowed))
    );
    assert!(!s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &3));
    assert_eq!(s.prices(), Vec::from_array(env, [0u128, 0u128]));
}

#[test]
fn test_malformed_payloads_leave_no_trace() {
    let s = setup();
    let env = &s.env;

    let truncated = s.envelope(ETHEREUM, &s.sender, 0, &Bytes::from_array(env, &[0, 0, 0, 1]));
    assert_eq!(
        s.client.try_handle_inbound(&truncated, &0),
        Err(Ok(ContractError::MalformedPayload))
    );

    let empty = payload::encode(env, &Vec::new(env), &Vec::new(env));
    assert_eq!(
        s.client
            .try_handle_inbound(&s.envelope(ETHEREUM, &s.sender, 1, &empty), &0),
        Err(Ok(ContractError::EmptyArray))
    );

    let mismatched = payload::encode(env, &names(env), &Vec::from_array(env, [1u128]));
    assert_eq!(
        s.client
            .try_handle_inbound(&s.envelope(ETHEREUM, &s.sender, 2, &mismatched), &0),
        Err(Ok(ContractError::LengthMismatch))
    );

    for sequence in 0..3u64 {
        assert!(!s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &sequence));
    }
}

#[test]
fn test_unverifiable_envelopes_fail() {
    let s = setup();
    let env = &s.env;
    let forged = sign_envelope(
        env,
        &guardian_key(4),
        ETHEREUM,
        &s.sender,
        0,
        CONSISTENCY_LEVEL_INSTANT as u8,
        0,
        &batch(env, 1, 2),
    );

    assert!(s.client.try_handle_inbound(&forged, &0).is_err());
    assert!(!s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &0));
}

#[test]
fn test_pause_gates_every_mutator_but_not_queries() {
    let s = setup();
    let env = &s.env;
    let outsider = Address::generate(env);
    let other = BytesN::from_array(env, &[0x77u8; 32]);

    s.client
        .handle_inbound(&s.envelope(ETHEREUM, &s.sender, 0, &batch(env, 1, 2)), &0);
    let pending = s.envelope(ETHEREUM, &s.sender, 1, &batch(env, 3, 4));

    s.client.pause(&s.admin);
    assert!(s.client.is_paused());

    assert_eq!(s.client.try_pause(&s.admin), Err(Ok(ContractError::Paused)));
    assert_eq!(
        s.client.try_handle_inbound(&pending, &0),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_set_peer(&s.admin, &(ARBITRUM as u32), &other),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_set_peer_address(
            &s.admin,
            &(ARBITRUM as u32),
            &Bytes::from_array(env, &[0x42u8; 20])
        ),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_grant_role(&s.admin, &Role::PeerAdmin, &outsider),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_revoke_role(&s.admin, &Role::PeerAdmin, &s.admin),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_renounce_role(&s.admin, &Role::PeerAdmin),
        Err(Ok(ContractError::Paused))
    );

    // Queries still answer, and nothing above took effect.
    assert_eq!(s.client.get_price(&String::from_str(env, "ethereum")), 2);
    assert_eq!(s.prices(), Vec::from_array(env, [1u128, 2u128]));
    assert_eq!(s.client.get_peer(&(ETHEREUM as u32)), s.sender);
    assert_eq!(
        s.client.get_peer(&(ARBITRUM as u32)),
        BytesN::from_array(env, &[0u8; 32])
    );
    assert!(s.client.has_role(&Role::PeerAdmin, &s.admin));
    assert!(!s.client.has_role(&Role::PeerAdmin, &outsider));
    assert!(s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &0));
    assert!(!s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &1));
    assert_eq!(s.client.messaging(), s.messaging);

    s.client.unpause(&s.admin);
    s.client.handle_inbound(&pending, &0);
    assert!(s.client.is_delivered(&(ETHEREUM as u32), &s.sender, &1));
    assert_eq!(s.prices(), Vec::from_array(env, [3u128, 4u128]));
}
