use crate::error::{RelayClientError, Result};

pub const RELAY_INSTRUCTIONS_VERSION: u8 = 1;
/// version byte + u128 gas limit + u128 forwarded value
pub const RELAY_INSTRUCTIONS_LENGTH: usize = 33;

/// Execution budget requested from the relay service for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayInstructions {
    pub gas_limit: u128,
    pub msg_value: u128,
}

impl RelayInstructions {
    pub fn gas(gas_limit: u128, msg_value: u128) -> Self {
        Self {
            gas_limit,
            msg_value,
        }
    }

    /// `0x01 | gas_limit (16 bytes BE) | msg_value (16 bytes BE)`
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RELAY_INSTRUCTIONS_LENGTH);
        out.push(RELAY_INSTRUCTIONS_VERSION);
        out.extend_from_slice(&self.gas_limit.to_be_bytes());
        out.extend_from_slice(&self.msg_value.to_be_bytes());
        out
    }

    pub fn decode(raw: &[u8]) -> Result<Self> {
        if raw.len() != RELAY_INSTRUCTIONS_LENGTH {
            return Err(RelayClientError::InvalidInstructions(format!(
                "expected {RELAY_INSTRUCTIONS_LENGTH} bytes, got {}",
                raw.len()
            )));
        }
        if raw[0] != RELAY_INSTRUCTIONS_VERSION {
            return Err(RelayClientError::InvalidInstructions(format!(
                "unsupported version {}",
                raw[0]
            )));
        }

        let mut gas = [0u8; 16];
        gas.copy_from_slice(&raw[1..17]);
        let mut value = [0u8; 16];
        value.copy_from_slice(&raw[17..33]);
        Ok(Self::gas(u128::from_be_bytes(gas), u128::from_be_bytes(value)))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode()))
    }
}
