use soroban_sdk::contracterror;

/// Failure reasons shared by the sender and receiver contracts.
///
/// Codes are stable: indexers and relayers key monitoring on them, so
/// authentication (`InvalidPeer`) and replay (`AlreadyDelivered`) failures
/// stay distinguishable from plain input validation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // Lifecycle
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization and pause state
    Unauthorized = 3,
    Paused = 4,
    NotPaused = 5,

    // Input validation
    EmptyArray = 6,
    LengthMismatch = 7,
    WrongValue = 8,
    InvalidChainId = 9,
    InvalidAddress = 10,
    ArithmeticOverflow = 11,

    // Inbound delivery
    InvalidPeer = 12,
    AlreadyDelivered = 13,
    MalformedPayload = 14,
    ValueNotAllowed = 15,
}
