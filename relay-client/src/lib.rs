//! Off-chain companion of the price sender.
//!
//! Before a broadcast, [`Orchestrator::plan_broadcast`] procures one signed
//! quote per destination and the exact value the sender expects. After the
//! broadcast transaction lands, [`Orchestrator::wait_for_delivery`] polls the
//! relay service until every destination reports delivery.

pub mod api;
pub mod config;
pub mod error;
pub mod instructions;
pub mod orchestrator;
pub mod quote;
pub mod status;

pub use api::{ExecutorApi, RelayService};
pub use config::{PollConfig, RelayClientConfig, RetryConfig};
pub use error::{RelayClientError, Result};
pub use instructions::RelayInstructions;
pub use orchestrator::{BroadcastPlan, Destination, Orchestrator, PlannedTarget};
pub use quote::Quote;
pub use status::{RelayStatus, StatusEntry};

/// Orchestrator talking to the executor HTTP API named in `config`.
pub fn executor_orchestrator(config: RelayClientConfig) -> Orchestrator<ExecutorApi> {
    let api = ExecutorApi::with_retry(config.api_url.clone(), &config.retry);
    Orchestrator::new(api, config)
}
