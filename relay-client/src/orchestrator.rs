//! Drives the off-chain half of a broadcast: one quote per destination
//! before submission, then status polling until every destination reports
//! delivery.

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

use crate::{
    api::RelayService,
    config::RelayClientConfig,
    error::{RelayClientError, Result},
    instructions::RelayInstructions,
    quote::{encode_hex, Quote},
    status::StatusEntry,
};

/// A destination the caller wants to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub chain_id: u16,
    pub gas_limit: u128,
}

/// Quoted destination, in the shape the sender contract takes as a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTarget {
    pub chain_id: u16,
    pub gas_limit: u128,
    pub cost: u128,
    pub signed_quote: Vec<u8>,
}

impl PlannedTarget {
    pub fn signed_quote_hex(&self) -> String {
        encode_hex(&self.signed_quote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastPlan {
    pub targets: Vec<PlannedTarget>,
    /// Exact value to attach to the broadcast: the sum of target costs
    pub total_value: u128,
}

pub struct Orchestrator<S> {
    service: S,
    config: RelayClientConfig,
}

impl<S: RelayService> Orchestrator<S> {
    pub fn new(service: S, config: RelayClientConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &RelayClientConfig {
        &self.config
    }

    /// Quotes every destination, in order. Fails if any destination cannot
    /// be quoted, so a broadcast is never submitted with a partial plan.
    #[instrument(skip(self, destinations), fields(count = destinations.len()))]
    pub async fn plan_broadcast(&self, destinations: &[Destination]) -> Result<BroadcastPlan> {
        if destinations.is_empty() {
            return Err(RelayClientError::NoDestinations);
        }

        let mut targets = Vec::with_capacity(destinations.len());
        let mut total_value: u128 = 0;
        for destination in destinations {
            let quote = self.quote(destination).await?;
            total_value = total_value
                .checked_add(quote.estimated_cost)
                .ok_or(RelayClientError::CostOverflow)?;
            targets.push(PlannedTarget {
                chain_id: destination.chain_id,
                gas_limit: destination.gas_limit,
                cost: quote.estimated_cost,
                signed_quote: quote.signed_quote,
            });
        }

        info!(%total_value, "broadcast planned");
        Ok(BroadcastPlan {
            targets,
            total_value,
        })
    }

    async fn quote(&self, destination: &Destination) -> Result<Quote> {
        let chain = destination.chain_id;
        let instructions = RelayInstructions::gas(destination.gas_limit, 0);
        self.service
            .quote(self.config.source_chain, chain, &instructions)
            .await
            .map_err(|err| {
                warn!(chain, error = %err, "quote failed");
                RelayClientError::Quote {
                    chain,
                    source: Box::new(err),
                }
            })
    }

    /// Polls until every chain in `expected` reports a completed delivery
    /// for `tx_hash`, returning those entries. Service errors are logged and
    /// polled through; only the timeout ends the wait early. A timeout too
    /// large to represent waits indefinitely.
    #[instrument(skip(self))]
    pub async fn wait_for_delivery(
        &self,
        tx_hash: &str,
        expected: &[u16],
    ) -> Result<Vec<StatusEntry>> {
        if expected.is_empty() {
            return Ok(Vec::new());
        }

        let poll = &self.config.poll;
        let deadline = Instant::now().checked_add(poll.timeout());
        let mut interval = poll.initial_interval();
        let mut missing: Vec<u16> = expected.to_vec();

        loop {
            match self.service.status(tx_hash, None).await {
                Ok(entries) => {
                    missing = expected
                        .iter()
                        .copied()
                        .filter(|chain| !delivered(&entries, *chain))
                        .collect();
                    if missing.is_empty() {
                        info!("all deliveries confirmed");
                        return Ok(entries
                            .into_iter()
                            .filter(|e| expected.contains(&e.chain_id) && e.status.is_complete())
                            .collect());
                    }
                    debug!(?missing, "deliveries outstanding");
                }
                Err(err) => warn!(error = %err, "status poll failed"),
            }

            let now = Instant::now();
            let delay = match deadline {
                Some(deadline) if now >= deadline => {
                    warn!(?missing, "gave up waiting for delivery");
                    return Err(RelayClientError::Timeout { missing });
                }
                Some(deadline) => interval.min(deadline - now),
                None => interval,
            };
            sleep(delay).await;
            interval = poll.next_interval(interval);
        }
    }
}

fn delivered(entries: &[StatusEntry], chain: u16) -> bool {
    entries
        .iter()
        .any(|e| e.chain_id == chain && e.status.is_complete())
}
