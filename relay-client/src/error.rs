/// Errors surfaced by the relay client.
///
/// None of these ever reach a contract: a failed quote means the broadcast is
/// never submitted, and a failed status poll only delays the next poll.
#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Request failed after the client's transient-failure retries.
    #[error("http request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
    /// The service answered with a non-2xx status.
    #[error("relay service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid relay instructions: {0}")]
    InvalidInstructions(String),
    #[error("invalid cost {0:?}")]
    InvalidCost(String),
    #[error("total broadcast cost overflows u128")]
    CostOverflow,
    #[error("no destinations to broadcast to")]
    NoDestinations,
    #[error("quote for chain {chain} failed: {source}")]
    Quote {
        chain: u16,
        #[source]
        source: Box<RelayClientError>,
    },
    #[error("delivery not confirmed before timeout on chains {missing:?}")]
    Timeout { missing: Vec<u16> },
}

pub type Result<T, E = RelayClientError> = std::result::Result<T, E>;
