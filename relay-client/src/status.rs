use serde::{Deserialize, Deserializer, Serialize};

/// Delivery state reported by the relay service for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayStatus {
    Pending,
    Processing,
    Completed,
    Success,
    /// Any state this client does not know about, kept verbatim
    Other(String),
}

impl RelayStatus {
    /// The service reports delivery as either `completed` or `success`.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed | Self::Success)
    }
}

impl From<&str> for RelayStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "success" => Self::Success,
            _ => Self::Other(value.to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for RelayStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub tx_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub tx_hash: String,
    /// Destination chain of the delivery
    pub chain_id: u16,
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub block_time: Option<String>,
    pub status: RelayStatus,
}
