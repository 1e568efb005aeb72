use async_trait::async_trait;

use crate::model::{Athlete, AthleteId, Card, CardKey, StorageEntry};

use super::types::{ChainCall, ChainError, SubmissionReceipt};

/// Read-only access to the athletes pallet storage.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// List every entry of the athletes map. Order is unspecified.
    async fn athlete_entries(&self) -> Result<Vec<StorageEntry<AthleteId, Athlete>>, ChainError>;

    /// List every entry of the cards map. Order is unspecified.
    async fn card_entries(&self) -> Result<Vec<StorageEntry<CardKey, Card>>, ChainError>;
}

/// Submission of mutating calls on behalf of the configured signer.
#[async_trait]
pub trait ChainSubmit: Send + Sync {
    /// Submit one call and wait until the node acknowledges it.
    async fn submit(&self, call: ChainCall) -> Result<SubmissionReceipt, ChainError>;

    /// Account the submissions are signed with.
    fn signer(&self) -> &str;
}
