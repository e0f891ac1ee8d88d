#![cfg(any(test, feature = "testutils"))]

//! In-process stand-in for the messaging primitive, plus helpers that
//! produce the quotes and signed envelopes it accepts.

use alloc::vec::Vec as StdVec;

pub use ed25519_dalek::SigningKey;
use ed25519_dalek::Signer;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, panic_with_error, token, Address,
    Bytes, BytesN, Env,
};

use crate::{address, InboundEnvelope, RelayRequest};

pub const QUOTE_PREFIX: [u8; 4] = *b"EQ01";
pub const QUOTE_LENGTH: u32 = 32;
pub const ENVELOPE_VERSION: u8 = 1;
const SIGNATURE_LENGTH: u32 = 64;
// chain u16 | emitter 32 | sequence u64 | consistency u8 | value i128
const BODY_HEADER_LENGTH: u32 = 2 + 32 + 8 + 1 + 16;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    // Disjoint from ContractError codes
    AlreadyInitialized = 101,
    NotInitialized = 102,
    MalformedQuote = 103,
    QuoteChainMismatch = 104,
    QuoteExpired = 105,
    InsufficientCost = 106,
    MalformedEnvelope = 107,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublishedMessage {
    pub emitter: BytesN<32>,
    pub sequence: u64,
    pub dest_chain: u32,
    pub consistency_level: u32,
    pub payload: Bytes,
    pub cost: i128,
    pub gas_limit: u128,
    pub forwarded_value: i128,
}

#[contracttype]
#[derive(Clone)]
enum MockKey {
    ChainId,
    FeeToken,
    Payee,
    Guardian,
    NextSequence(BytesN<32>),
    Published(BytesN<32>, u64),
}

#[contract]
pub struct MockMessaging;

#[contractimpl]
impl MockMessaging {
    pub fn initialize(
        env: Env,
        chain_id: u32,
        fee_token: Address,
        payee: Address,
        guardian: BytesN<32>,
    ) {
        let storage = env.storage().instance();
        if storage.has(&MockKey::ChainId) {
            panic_with_error!(&env, MockError::AlreadyInitialized);
        }
        storage.set(&MockKey::ChainId, &chain_id);
        storage.set(&MockKey::FeeToken, &fee_token);
        storage.set(&MockKey::Payee, &payee);
        storage.set(&MockKey::Guardian, &guardian);
    }

    pub fn publish_and_relay(
        env: Env,
        emitter: Address,
        payer: Address,
        request: RelayRequest,
    ) -> u64 {
        emitter.require_auth();

        let chain_id = Self::chain_id(env.clone());
        check_quote(&env, &request.signed_quote, chain_id, request.dest_chain, request.cost);

        if request.cost > 0 {
            let fee_token: Address = read(&env, &MockKey::FeeToken);
            let payee: Address = read(&env, &MockKey::Payee);
            token::Client::new(&env, &fee_token).transfer(&payer, &payee, &request.cost);
        }

        let emitter_id = address::to_universal(&env, &emitter);
        let seq_key = MockKey::NextSequence(emitter_id.clone());
        let sequence: u64 = env.storage().persistent().get(&seq_key).unwrap_or(0);
        env.storage().persistent().set(&seq_key, &(sequence + 1));

        let message = PublishedMessage {
            emitter: emitter_id.clone(),
            sequence,
            dest_chain: request.dest_chain,
            consistency_level: request.consistency_level,
            payload: request.payload,
            cost: request.cost,
            gas_limit: request.gas_limit,
            forwarded_value: request.forwarded_value,
        };
        env.storage()
            .persistent()
            .set(&MockKey::Published(emitter_id, sequence), &message);

        log!(&env, "published", request.dest_chain, sequence);
        sequence
    }

    pub fn published(env: Env, emitter: BytesN<32>, sequence: u64) -> Option<PublishedMessage> {
        env.storage()
            .persistent()
            .get(&MockKey::Published(emitter, sequence))
    }

    pub fn next_sequence(env: Env, emitter: BytesN<32>) -> u64 {
        env.storage()
            .persistent()
            .get(&MockKey::NextSequence(emitter))
            .unwrap_or(0)
    }

    pub fn parse_and_verify(env: Env, encoded: Bytes) -> InboundEnvelope {
        let min_length = 1 + SIGNATURE_LENGTH + BODY_HEADER_LENGTH;
        if encoded.len() < min_length || encoded.get(0) != Some(ENVELOPE_VERSION) {
            panic_with_error!(&env, MockError::MalformedEnvelope);
        }

        let mut signature = [0u8; 64];
        encoded
            .slice(1..1 + SIGNATURE_LENGTH)
            .copy_into_slice(&mut signature);
        let body = encoded.slice(1 + SIGNATURE_LENGTH..);

        let guardian: BytesN<32> = read(&env, &MockKey::Guardian);
        env.crypto()
            .ed25519_verify(&guardian, &body, &BytesN::from_array(&env, &signature));

        let mut chain = [0u8; 2];
        body.slice(0..2).copy_into_slice(&mut chain);
        let mut emitter = [0u8; 32];
        body.slice(2..34).copy_into_slice(&mut emitter);
        let mut sequence = [0u8; 8];
        body.slice(34..42).copy_into_slice(&mut sequence);
        let consistency = body.get(42).unwrap_or_default();
        let mut value = [0u8; 16];
        body.slice(43..59).copy_into_slice(&mut value);

        InboundEnvelope {
            emitter_chain: u16::from_be_bytes(chain) as u32,
            emitter_address: BytesN::from_array(&env, &emitter),
            sequence: u64::from_be_bytes(sequence),
            consistency_level: consistency as u32,
            forwarded_value: i128::from_be_bytes(value),
            payload: body.slice(BODY_HEADER_LENGTH..),
        }
    }

    pub fn chain_id(env: Env) -> u32 {
        read(&env, &MockKey::ChainId)
    }
}

fn read<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(env: &Env, key: &MockKey) -> V {
    env.storage()
        .instance()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(env, MockError::NotInitialized))
}

fn check_quote(env: &Env, quote: &Bytes, src_chain: u32, dst_chain: u32, cost: i128) {
    if quote.len() != QUOTE_LENGTH {
        panic_with_error!(env, MockError::MalformedQuote);
    }
    let mut raw = [0u8; 32];
    quote.copy_into_slice(&mut raw);
    if raw[0..4] != QUOTE_PREFIX {
        panic_with_error!(env, MockError::MalformedQuote);
    }

    let src = u16::from_be_bytes([raw[4], raw[5]]) as u32;
    let dst = u16::from_be_bytes([raw[6], raw[7]]) as u32;
    if src != src_chain || dst != dst_chain {
        panic_with_error!(env, MockError::QuoteChainMismatch);
    }

    let mut expiry = [0u8; 8];
    expiry.copy_from_slice(&raw[8..16]);
    if u64::from_be_bytes(expiry) < env.ledger().timestamp() {
        panic_with_error!(env, MockError::QuoteExpired);
    }

    let mut fee = [0u8; 16];
    fee.copy_from_slice(&raw[16..32]);
    let fee = u128::from_be_bytes(fee);
    if cost < 0 || (cost as u128) < fee {
        panic_with_error!(env, MockError::InsufficientCost);
    }
}

/// Quote blob accepted by [`MockMessaging`]: `b"EQ01" | src u16 | dst u16 |
/// expiry u64 | fee u128`, big-endian.
pub fn build_quote(env: &Env, src_chain: u16, dst_chain: u16, expiry: u64, fee: u128) -> Bytes {
    let mut quote = Bytes::from_array(env, &QUOTE_PREFIX);
    quote.extend_from_array(&src_chain.to_be_bytes());
    quote.extend_from_array(&dst_chain.to_be_bytes());
    quote.extend_from_array(&expiry.to_be_bytes());
    quote.extend_from_array(&fee.to_be_bytes());
    quote
}

/// Deterministic guardian key so tests can pair a contract with its signer.
pub fn guardian_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn guardian_public(env: &Env, key: &SigningKey) -> BytesN<32> {
    BytesN::from_array(env, &key.verifying_key().to_bytes())
}

/// Builds a guardian-signed envelope carrying `payload` and the requested
/// `forwarded_value` from `emitter` on `emitter_chain`.
pub fn sign_envelope(
    env: &Env,
    key: &SigningKey,
    emitter_chain: u16,
    emitter: &BytesN<32>,
    sequence: u64,
    consistency_level: u8,
    forwarded_value: i128,
    payload: &Bytes,
) -> Bytes {
    let mut body = Bytes::from_array(env, &emitter_chain.to_be_bytes());
    body.extend_from_array(&emitter.to_array());
    body.extend_from_array(&sequence.to_be_bytes());
    body.push_back(consistency_level);
    body.extend_from_array(&forwarded_value.to_be_bytes());
    body.append(payload);

    let raw: StdVec<u8> = body.iter().collect();
    let signature = key.sign(&raw).to_bytes();

    let mut envelope = Bytes::from_array(env, &[ENVELOPE_VERSION]);
    envelope.extend_from_array(&signature);
    envelope.append(&body);
    envelope
}
