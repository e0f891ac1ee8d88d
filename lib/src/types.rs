use soroban_sdk::{contracttype, Address, Bytes, BytesN, String, Vec};

/// Capabilities gating contract mutators.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    /// Super-admin: grants and revokes roles, pauses and unpauses
    Admin = 0,
    /// May register peers
    PeerAdmin = 1,
    /// May submit and broadcast prices (sender only)
    PriceFeeder = 2,
}

/// One destination of a multi-chain broadcast. Request scoped, never stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetDescriptor {
    pub chain_id: u32,
    pub gas_limit: u128,
    /// Exact fee for this destination, in the messaging fee token
    pub cost: i128,
    /// Opaque quote signed by the off-chain relay service
    pub signed_quote: Bytes,
}

/// Arguments of a single publish-and-relay call on the messaging primitive.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayRequest {
    pub payload: Bytes,
    pub consistency_level: u32,
    pub cost: i128,
    pub dest_chain: u32,
    pub refund_address: Address,
    pub signed_quote: Bytes,
    pub gas_limit: u128,
    pub forwarded_value: i128,
    pub extra_instructions: Bytes,
}

/// Authenticated message handed back by the messaging primitive.
///
/// Field authenticity is guaranteed by the bridge's own signature checks;
/// receivers layer peer and replay checks on top.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InboundEnvelope {
    pub emitter_chain: u32,
    pub emitter_address: BytesN<32>,
    pub sequence: u64,
    pub consistency_level: u32,
    /// Value the source asked to be delivered along with the message
    pub forwarded_value: i128,
    pub payload: Bytes,
}

/// Decoded price batch: two parallel ordered sequences.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceBatch {
    pub names: Vec<String>,
    pub prices: Vec<u128>,
}
