use std::fmt;

use serde::{Deserialize, Serialize};

use super::units::{Height, TokenAmount, Weight};

/// Identifier of a registered athlete.
pub type AthleteId = u64;

/// Per-athlete sequential card number, starting at 1.
pub type InstanceId = u32;

/// Composite identifier of a card: owning athlete plus instance number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub athlete_id: AthleteId,
    pub instance_id: InstanceId,
}

impl CardId {
    pub fn new(athlete_id: AthleteId, instance_id: InstanceId) -> Self {
        Self {
            athlete_id,
            instance_id,
        }
    }
}

/// Opaque storage key of a card (hex-encoded hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardKey(pub String);

impl CardKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reference to data stored off-chain (BLAKE2 hash, hex-encoded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffchainRef {
    pub hash: String,
}

/// A registered athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    /// Full display name.
    pub name: String,
    /// Account owned by the athlete.
    pub athlete_account: String,
    pub weight: Weight,
    pub height: Height,
    /// Optional photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<OffchainRef>,
    /// Whether cards have been minted for this athlete.
    #[serde(default)]
    pub cards_minted: bool,
}

/// Rarity tier of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardTier {
    /// Common tier.
    Gold,
    /// Middle tier.
    Silver,
    /// Rarest tier.
    Diamond,
}

impl CardTier {
    /// All tiers, in report order.
    pub const ALL: [CardTier; 3] = [CardTier::Gold, CardTier::Silver, CardTier::Diamond];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardTier::Gold => "Gold",
            CardTier::Silver => "Silver",
            CardTier::Diamond => "Diamond",
        }
    }
}

impl fmt::Display for CardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collectible card tied to one athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Current owner, if any.
    #[serde(default)]
    pub owner: Option<String>,
    pub id: CardId,
    pub tier: CardTier,
    pub value: TokenAmount,
    #[serde(default)]
    pub is_on_market: bool,
}

impl Card {
    pub fn belongs_to(&self, athlete_id: AthleteId) -> bool {
        self.id.athlete_id == athlete_id
    }
}

/// One key/value pair from a list-all storage query.
///
/// `value` is `None` for pruned or otherwise empty entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageEntry<K, V> {
    pub key: K,
    pub value: Option<V>,
}

impl<K, V> StorageEntry<K, V> {
    pub fn new(key: K, value: Option<V>) -> Self {
        Self { key, value }
    }

    pub fn present(key: K, value: V) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the key and value, skipping absent entries.
    pub fn as_present(&self) -> Option<(&K, &V)> {
        self.value.as_ref().map(|v| (&self.key, v))
    }
}
