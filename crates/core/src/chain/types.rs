//! Types shared by chain capabilities and their implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::AthleteId;

/// Pallet holding athletes and cards.
pub const ATHLETES_PALLET: &str = "athletes";

/// Errors that can occur while querying or submitting to the chain.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error: {0}")]
    ApiError(String),

    /// The node refused the submitted call.
    #[error("Call rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A named storage collection that can be listed in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCollection {
    Athletes,
    Cards,
}

impl StorageCollection {
    pub fn pallet(&self) -> &'static str {
        ATHLETES_PALLET
    }

    pub fn item(&self) -> &'static str {
        match self {
            StorageCollection::Athletes => "athletes",
            StorageCollection::Cards => "cards",
        }
    }
}

impl std::fmt::Display for StorageCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.pallet(), self.item())
    }
}

/// A mutating call that can be submitted to the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", content = "args", rename_all = "snake_case")]
pub enum ChainCall {
    /// Mint the full set of cards for an athlete.
    MintCards { athlete_id: AthleteId },
}

impl ChainCall {
    pub fn pallet(&self) -> &'static str {
        ATHLETES_PALLET
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChainCall::MintCards { .. } => "mint_cards",
        }
    }

    /// Call arguments as a JSON object.
    pub fn args(&self) -> serde_json::Value {
        match self {
            ChainCall::MintCards { athlete_id } => serde_json::json!({ "athlete_id": athlete_id }),
        }
    }
}

/// Acknowledgment of a submitted call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// The call that was acknowledged.
    pub call: ChainCall,
    /// Human-readable description of what the node did.
    pub status: String,
    /// Block the call was included in, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    pub acknowledged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(StorageCollection::Athletes.to_string(), "athletes.athletes");
        assert_eq!(StorageCollection::Cards.to_string(), "athletes.cards");
    }

    #[test]
    fn test_mint_call_shape() {
        let call = ChainCall::MintCards { athlete_id: 42 };
        assert_eq!(call.pallet(), "athletes");
        assert_eq!(call.name(), "mint_cards");
        assert_eq!(call.args(), serde_json::json!({ "athlete_id": 42 }));
    }

    #[test]
    fn test_call_serde_tagging() {
        let call = ChainCall::MintCards { athlete_id: 3 };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "call": "mint_cards", "args": { "athlete_id": 3 } })
        );
    }

    #[test]
    fn test_rejected_display() {
        let err = ChainError::Rejected {
            status: 409,
            message: "AthleteAlreadyExists".to_string(),
        };
        assert_eq!(err.to_string(), "Call rejected (409): AthleteAlreadyExists");
    }
}
