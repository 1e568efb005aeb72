//! HTTP gateway client for the athletes pallet.
//!
//! The gateway fronts a node and its keystore:
//! - `GET  {url}/storage/{pallet}/{item}` lists a storage map as
//!   `[{ "key": ..., "value": ... | null }]`
//! - `POST {url}/extrinsics/{pallet}/{call}` signs and submits a call with
//!   `{ "signer": ..., "args": {...} }` and answers once it is included.
//!
//! The configured timeout bounds storage listings and connection setup only.
//! A submission waits as long as block inclusion takes.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{NodeConfig, SignerConfig};
use crate::model::{Athlete, AthleteId, Card, CardKey, StorageEntry};

use super::{ChainCall, ChainError, ChainQuery, ChainSubmit, StorageCollection, SubmissionReceipt};

/// Gateway client implementing both chain capabilities.
pub struct GatewayClient {
    client: Client,
    base_url: String,
    signer: String,
    query_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    signer: &'a str,
    args: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    status: String,
    #[serde(default)]
    block_hash: Option<String>,
}

impl GatewayClient {
    /// Create a new gateway client.
    pub fn new(node: &NodeConfig, signer: &SignerConfig) -> Result<Self, ChainError> {
        if signer.account.is_empty() {
            return Err(ChainError::NotConfigured(
                "signer account is required".to_string(),
            ));
        }

        let query_timeout = Duration::from_secs(node.timeout_secs as u64);
        let client = Client::builder()
            .connect_timeout(query_timeout)
            .build()
            .map_err(|e| ChainError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            base_url: node.url.trim_end_matches('/').to_string(),
            signer: signer.account.clone(),
            query_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(e: reqwest::Error) -> ChainError {
        if e.is_timeout() {
            ChainError::Timeout
        } else if e.is_connect() {
            ChainError::ConnectionFailed(e.to_string())
        } else {
            ChainError::ApiError(e.to_string())
        }
    }

    /// Fetch every entry of a storage collection in one request.
    async fn list<K, V>(
        &self,
        collection: StorageCollection,
    ) -> Result<Vec<StorageEntry<K, V>>, ChainError>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        let url = format!(
            "{}/storage/{}/{}",
            self.base_url,
            collection.pallet(),
            collection.item()
        );

        debug!("Listing storage {} from {}", collection, url);

        let response = self
            .client
            .get(&url)
            .timeout(self.query_timeout)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::ApiError(format!(
                "HTTP {} listing {}: {}",
                status, collection, body
            )));
        }

        let entries: Vec<StorageEntry<K, V>> = response.json().await.map_err(|e| {
            ChainError::ParseError(format!("Failed to parse {} entries: {}", collection, e))
        })?;

        debug!("Fetched {} entries from {}", entries.len(), collection);

        Ok(entries)
    }
}

#[async_trait]
impl ChainQuery for GatewayClient {
    async fn athlete_entries(&self) -> Result<Vec<StorageEntry<AthleteId, Athlete>>, ChainError> {
        self.list(StorageCollection::Athletes).await
    }

    async fn card_entries(&self) -> Result<Vec<StorageEntry<CardKey, Card>>, ChainError> {
        self.list(StorageCollection::Cards).await
    }
}

#[async_trait]
impl ChainSubmit for GatewayClient {
    async fn submit(&self, call: ChainCall) -> Result<SubmissionReceipt, ChainError> {
        let url = format!(
            "{}/extrinsics/{}/{}",
            self.base_url,
            call.pallet(),
            call.name()
        );

        debug!("Submitting {:?} as {}", call, self.signer);

        let request = SubmitRequest {
            signer: &self.signer,
            args: call.args(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChainError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        let ack: SubmitResponse = response.json().await.map_err(|e| {
            ChainError::ParseError(format!("Failed to parse submission response: {}", e))
        })?;

        Ok(SubmissionReceipt {
            call,
            status: ack.status,
            block_hash: ack.block_hash,
            acknowledged_at: Utc::now(),
        })
    }

    fn signer(&self) -> &str {
        &self.signer
    }
}
