#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod access;
pub mod address;
pub mod broadcast;
pub mod errors;
pub mod events;
pub mod messaging;
pub mod payload;
pub mod peers;
pub mod prices;
pub mod storage_keys;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use errors::ContractError;
pub use storage_keys::*;
pub use types::*;

// Messaging
/// Finality level asking the bridge to publish without waiting for confirmations.
pub const CONSISTENCY_LEVEL_INSTANT: u32 = 200;
pub const MAX_CHAIN_ID: u32 = u16::MAX as u32;
pub const UNIVERSAL_ADDRESS_LENGTH: u32 = 32;

// Persistent storage TTL (in ledgers, ~5s each)
pub const PERSISTENT_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const PERSISTENT_TTL_EXTEND: u32 = 1_036_800; // ~60 days
pub const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
pub const INSTANCE_TTL_EXTEND: u32 = 1_036_800;
