//! Price batch wire format.
//!
//! ```text
//! u32 name_count  | name_count  * (u32 len | len bytes of UTF-8)
//! u32 price_count | price_count * u128
//! ```
//!
//! Integers are big-endian. The two counts are carried separately so a
//! receiver can tell a truncated batch from one whose sequences disagree.

use alloc::vec;
use soroban_sdk::{Bytes, Env, String, Vec};

use crate::{errors::ContractError, PriceBatch};

pub fn encode(env: &Env, names: &Vec<String>, prices: &Vec<u128>) -> Bytes {
    let mut out = Bytes::new(env);

    out.extend_from_array(&names.len().to_be_bytes());
    for name in names.iter() {
        let mut raw = vec![0u8; name.len() as usize];
        name.copy_into_slice(&mut raw);
        out.extend_from_array(&name.len().to_be_bytes());
        out.extend_from_slice(&raw);
    }

    out.extend_from_array(&prices.len().to_be_bytes());
    for price in prices.iter() {
        out.extend_from_array(&price.to_be_bytes());
    }

    out
}

/// Decodes and validates a batch: well-formed, non-empty, equal lengths.
pub fn decode(env: &Env, payload: &Bytes) -> Result<PriceBatch, ContractError> {
    let mut reader = Reader::new(payload);

    let name_count = reader.read_u32()?;
    let mut names = Vec::new(env);
    for _ in 0..name_count {
        let len = reader.read_u32()?;
        let raw = reader.take(len)?;
        let mut buf = vec![0u8; len as usize];
        raw.copy_into_slice(&mut buf);
        if core::str::from_utf8(&buf).is_err() {
            return Err(ContractError::MalformedPayload);
        }
        names.push_back(String::from_bytes(env, &buf));
    }

    let price_count = reader.read_u32()?;
    let mut prices = Vec::new(env);
    for _ in 0..price_count {
        prices.push_back(reader.read_u128()?);
    }

    if !reader.is_exhausted() {
        return Err(ContractError::MalformedPayload);
    }
    if names.is_empty() || prices.is_empty() {
        return Err(ContractError::EmptyArray);
    }
    if names.len() != prices.len() {
        return Err(ContractError::LengthMismatch);
    }

    Ok(PriceBatch { names, prices })
}

/// Forward-only cursor over a `Bytes` buffer.
struct Reader<'a> {
    bytes: &'a Bytes,
    pos: u32,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a Bytes) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: u32) -> Result<Bytes, ContractError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(ContractError::MalformedPayload)?;
        if end > self.bytes.len() {
            return Err(ContractError::MalformedPayload);
        }
        let out = self.bytes.slice(self.pos..end);
        self.pos = end;
        Ok(out)
    }

    fn read_u32(&mut self) -> Result<u32, ContractError> {
        let mut raw = [0u8; 4];
        self.take(4)?.copy_into_slice(&mut raw);
        Ok(u32::from_be_bytes(raw))
    }

    fn read_u128(&mut self) -> Result<u128, ContractError> {
        let mut raw = [0u8; 16];
        self.take(16)?.copy_into_slice(&mut raw);
        Ok(u128::from_be_bytes(raw))
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }
}
