//! Mock chain for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::chain::{ChainCall, ChainError, ChainQuery, ChainSubmit, SubmissionReceipt};
use crate::model::{Athlete, AthleteId, Card, CardKey, StorageEntry};

/// A recorded submission for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    /// The call that was submitted.
    pub call: ChainCall,
    /// When the submission was made.
    pub timestamp: chrono::DateTime<Utc>,
}

/// Mock implementation of [`ChainQuery`] and [`ChainSubmit`].
///
/// Provides controllable behavior for testing:
/// - In-memory athlete and card storage, returned in insertion order
/// - Record submissions for assertions
/// - Simulate failures on queries and submissions separately
/// - Optionally flip `cards_minted` when a mint is acknowledged
///
/// # Example
///
/// ```rust,ignore
/// let chain = Arc::new(MockChain::new());
/// chain.add_athlete(1, fixtures::athlete("Ada", false)).await;
///
/// MintJob::new(chain.clone(), chain.clone()).run(&mut out).await?;
///
/// assert_eq!(chain.submitted_calls().await, vec![ChainCall::MintCards { athlete_id: 1 }]);
/// ```
#[derive(Debug)]
pub struct MockChain {
    athletes: Arc<RwLock<Vec<StorageEntry<AthleteId, Athlete>>>>,
    cards: Arc<RwLock<Vec<StorageEntry<CardKey, Card>>>>,
    /// Acknowledged submissions.
    submissions: Arc<RwLock<Vec<RecordedSubmission>>>,
    /// Every submit call, including failed ones.
    attempts: Arc<RwLock<usize>>,
    next_query_error: Arc<RwLock<Option<ChainError>>>,
    next_submit_error: Arc<RwLock<Option<ChainError>>>,
    mark_minted_on_submit: Arc<RwLock<bool>>,
    signer: String,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// Create a new empty mock chain.
    pub fn new() -> Self {
        Self {
            athletes: Arc::new(RwLock::new(Vec::new())),
            cards: Arc::new(RwLock::new(Vec::new())),
            submissions: Arc::new(RwLock::new(Vec::new())),
            attempts: Arc::new(RwLock::new(0)),
            next_query_error: Arc::new(RwLock::new(None)),
            next_submit_error: Arc::new(RwLock::new(None)),
            mark_minted_on_submit: Arc::new(RwLock::new(false)),
            signer: "alice".to_string(),
        }
    }

    // =========================================================================
    // Storage Configuration
    // =========================================================================

    /// Insert or replace an athlete.
    pub async fn add_athlete(&self, athlete_id: AthleteId, athlete: Athlete) {
        let mut athletes = self.athletes.write().await;
        match athletes.iter_mut().find(|e| e.key == athlete_id) {
            Some(entry) => entry.value = Some(athlete),
            None => athletes.push(StorageEntry::present(athlete_id, athlete)),
        }
    }

    /// Add an athlete key whose value has been pruned.
    pub async fn add_pruned_athlete(&self, athlete_id: AthleteId) {
        self.athletes
            .write()
            .await
            .push(StorageEntry::new(athlete_id, None));
    }

    /// Add a raw card entry.
    pub async fn add_card_entry(&self, entry: StorageEntry<CardKey, Card>) {
        self.cards.write().await.push(entry);
    }

    /// Add several card entries at once.
    pub async fn add_card_entries(&self, entries: Vec<StorageEntry<CardKey, Card>>) {
        self.cards.write().await.extend(entries);
    }

    /// Get the stored athlete, if present.
    pub async fn athlete(&self, athlete_id: AthleteId) -> Option<Athlete> {
        self.athletes
            .read()
            .await
            .iter()
            .find(|e| e.key == athlete_id)
            .and_then(|e| e.value.clone())
    }

    /// When enabled, an acknowledged mint sets the athlete's `cards_minted` flag.
    pub async fn set_mark_minted_on_submit(&self, enabled: bool) {
        *self.mark_minted_on_submit.write().await = enabled;
    }

    // =========================================================================
    // Submission Recording
    // =========================================================================

    /// Get all acknowledged submissions.
    pub async fn recorded_submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.read().await.clone()
    }

    /// Get the calls of all acknowledged submissions, in order.
    pub async fn submitted_calls(&self) -> Vec<ChainCall> {
        self.submissions
            .read()
            .await
            .iter()
            .map(|s| s.call.clone())
            .collect()
    }

    /// Number of acknowledged submissions.
    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }

    /// Number of submit calls, including failed ones.
    pub async fn attempt_count(&self) -> usize {
        *self.attempts.read().await
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next query to fail with the given error.
    pub async fn set_next_query_error(&self, error: ChainError) {
        *self.next_query_error.write().await = Some(error);
    }

    /// Configure the next submission to fail with the given error.
    pub async fn set_next_submit_error(&self, error: ChainError) {
        *self.next_submit_error.write().await = Some(error);
    }
}

#[async_trait]
impl ChainQuery for MockChain {
    async fn athlete_entries(&self) -> Result<Vec<StorageEntry<AthleteId, Athlete>>, ChainError> {
        if let Some(error) = self.next_query_error.write().await.take() {
            return Err(error);
        }
        Ok(self.athletes.read().await.clone())
    }

    async fn card_entries(&self) -> Result<Vec<StorageEntry<CardKey, Card>>, ChainError> {
        if let Some(error) = self.next_query_error.write().await.take() {
            return Err(error);
        }
        Ok(self.cards.read().await.clone())
    }
}

#[async_trait]
impl ChainSubmit for MockChain {
    async fn submit(&self, call: ChainCall) -> Result<SubmissionReceipt, ChainError> {
        *self.attempts.write().await += 1;

        if let Some(error) = self.next_submit_error.write().await.take() {
            return Err(error);
        }

        let ChainCall::MintCards { athlete_id } = &call;
        if *self.mark_minted_on_submit.read().await {
            let mut athletes = self.athletes.write().await;
            if let Some(athlete) = athletes
                .iter_mut()
                .find(|e| e.key == *athlete_id)
                .and_then(|e| e.value.as_mut())
            {
                athlete.cards_minted = true;
            }
        }

        let now = Utc::now();
        self.submissions.write().await.push(RecordedSubmission {
            call: call.clone(),
            timestamp: now,
        });

        Ok(SubmissionReceipt {
            status: format!("mock: {} included", call.name()),
            call,
            block_hash: Some(format!("0x{:064x}", self.submissions.read().await.len())),
            acknowledged_at: now,
        })
    }

    fn signer(&self) -> &str {
        &self.signer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_add_athlete_replaces_existing() {
        let chain = MockChain::new();
        chain.add_athlete(1, fixtures::athlete("Ada", false)).await;
        chain.add_athlete(1, fixtures::athlete("Ada", true)).await;

        let entries = chain.athlete_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(chain.athlete(1).await.unwrap().cards_minted);
    }

    #[tokio::test]
    async fn test_query_error_is_consumed_once() {
        let chain = MockChain::new();
        chain.set_next_query_error(ChainError::Timeout).await;

        assert!(chain.card_entries().await.is_err());
        assert!(chain.card_entries().await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_marks_minted_when_enabled() {
        let chain = MockChain::new();
        chain.add_athlete(4, fixtures::athlete("Ada", false)).await;
        chain.set_mark_minted_on_submit(true).await;

        let receipt = chain
            .submit(ChainCall::MintCards { athlete_id: 4 })
            .await
            .unwrap();

        assert_eq!(receipt.call, ChainCall::MintCards { athlete_id: 4 });
        assert!(receipt.block_hash.is_some());
        assert!(chain.athlete(4).await.unwrap().cards_minted);
        assert_eq!(chain.submission_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_submit_counts_attempt_only() {
        let chain = MockChain::new();
        chain
            .set_next_submit_error(ChainError::ConnectionFailed("down".to_string()))
            .await;

        let result = chain.submit(ChainCall::MintCards { athlete_id: 1 }).await;

        assert!(result.is_err());
        assert_eq!(chain.attempt_count().await, 1);
        assert_eq!(chain.submission_count().await, 0);
    }
}
