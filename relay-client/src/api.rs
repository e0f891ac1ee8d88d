use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::RetryConfig,
    error::{RelayClientError, Result},
    instructions::RelayInstructions,
    quote::{Quote, QuoteRequest, QuoteResponse},
    status::{StatusEntry, StatusRequest},
};

/// Off-chain relay service: prices deliveries up front and reports on them
/// afterwards.
#[async_trait]
pub trait RelayService: Send + Sync {
    async fn quote(
        &self,
        src_chain: u16,
        dst_chain: u16,
        instructions: &RelayInstructions,
    ) -> Result<Quote>;

    /// Deliveries spawned by the source transaction `tx_hash`.
    async fn status(&self, tx_hash: &str, chain_id: Option<u16>) -> Result<Vec<StatusEntry>>;
}

/// HTTP client for the executor API.
///
/// Connection errors, 5xx and 429 answers are retried inside the client with
/// exponential backoff. Any other answer is final.
#[derive(Debug, Clone)]
pub struct ExecutorApi {
    http: ClientWithMiddleware,
    base_url: String,
}

impl ExecutorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_retry(base_url, &RetryConfig::default())
    }

    pub fn with_retry(base_url: impl Into<String>, retry: &RetryConfig) -> Self {
        let http = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry.policy()))
            .build();
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: ClientWithMiddleware, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/v0/{}", self.base_url, path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        debug!(%url, "posting to relay service");
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RelayService for ExecutorApi {
    #[instrument(skip(self, instructions))]
    async fn quote(
        &self,
        src_chain: u16,
        dst_chain: u16,
        instructions: &RelayInstructions,
    ) -> Result<Quote> {
        let request = QuoteRequest {
            src_chain,
            dst_chain,
            relay_instructions: instructions.to_hex(),
        };
        let response: QuoteResponse = self.post("quote", &request).await?;
        Quote::try_from(response)
    }

    #[instrument(skip(self))]
    async fn status(&self, tx_hash: &str, chain_id: Option<u16>) -> Result<Vec<StatusEntry>> {
        let request = StatusRequest {
            tx_hash: tx_hash.to_owned(),
            chain_id,
        };
        self.post("status/tx", &request).await
    }
}
