use serde::{Deserialize, Serialize};

use crate::error::{RelayClientError, Result};

/// Signed quote for delivering one message to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Opaque blob the messaging contract checks on publish
    pub signed_quote: Vec<u8>,
    /// Exact fee, in the source chain's fee token
    pub estimated_cost: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub src_chain: u16,
    pub dst_chain: u16,
    /// 0x-prefixed relay instructions
    pub relay_instructions: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub signed_quote: String,
    /// Decimal string; absent when the service cannot price the route
    pub estimated_cost: Option<String>,
}

impl TryFrom<QuoteResponse> for Quote {
    type Error = RelayClientError;

    fn try_from(response: QuoteResponse) -> Result<Self> {
        let cost = response
            .estimated_cost
            .ok_or_else(|| RelayClientError::InvalidCost("missing".to_owned()))?;
        let estimated_cost = cost
            .parse::<u128>()
            .map_err(|_| RelayClientError::InvalidCost(cost.clone()))?;

        Ok(Self {
            signed_quote: decode_hex(&response.signed_quote)?,
            estimated_cost,
        })
    }
}

pub(crate) fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(stripped)?)
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
