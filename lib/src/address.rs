//! 32-byte universal addresses.
//!
//! Remote identities are compared as fixed-width 32-byte values. Chain
//! addresses shorter than 32 bytes (20-byte EVM accounts, for example) are
//! zero-padded on the most-significant side, so `0xabcd…` becomes
//! `0x000…0abcd…`. Right padding produces a different identity and never
//! matches a registered peer.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::{errors::ContractError, UNIVERSAL_ADDRESS_LENGTH};

/// Universal address of a Soroban account or contract: the raw ed25519 key
/// or contract hash, which already spans the full 32 bytes.
///
/// The XDR encoding of an address always ends with that 32-byte body.
pub fn to_universal(env: &Env, address: &Address) -> BytesN<32> {
    let xdr = address.clone().to_xdr(env);
    let body = xdr.slice(xdr.len() - UNIVERSAL_ADDRESS_LENGTH..);
    let mut raw = [0u8; 32];
    body.copy_into_slice(&mut raw);
    BytesN::from_array(env, &raw)
}

/// Left-pads a chain-native address to 32 bytes.
pub fn left_pad(env: &Env, address: &Bytes) -> Result<BytesN<32>, ContractError> {
    let len = address.len();
    if len == 0 || len > UNIVERSAL_ADDRESS_LENGTH {
        return Err(ContractError::InvalidAddress);
    }

    let mut raw = [0u8; 32];
    let offset = (UNIVERSAL_ADDRESS_LENGTH - len) as usize;
    address.copy_into_slice(&mut raw[offset..]);
    Ok(BytesN::from_array(env, &raw))
}

pub fn zero(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

pub fn is_zero(identity: &BytesN<32>) -> bool {
    identity.to_array() == [0u8; 32]
}
