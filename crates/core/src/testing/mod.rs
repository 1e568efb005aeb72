//! Testing utilities and mock implementations.
//!
//! [`MockChain`] implements both chain capabilities in memory so the jobs
//! can be exercised without a node.
//!
//! # Example
//!
//! ```rust,ignore
//! use athlete_cards_core::testing::{fixtures, MockChain};
//!
//! let chain = Arc::new(MockChain::new());
//! chain.add_athlete(1, fixtures::athlete("Ada", true)).await;
//! chain.add_card_entries(fixtures::card_set(1, 2, 1, 0)).await;
//! ```

mod mock_chain;

pub use mock_chain::{MockChain, RecordedSubmission};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::model::{
        Athlete, AthleteId, Card, CardId, CardKey, CardTier, Height, InstanceId, StorageEntry,
        TokenAmount, Weight,
    };

    /// Create a test athlete with reasonable defaults.
    pub fn athlete(name: &str, cards_minted: bool) -> Athlete {
        Athlete {
            name: name.to_string(),
            athlete_account: format!("5{}Account", name.replace(' ', "")),
            weight: Weight::from_grams(75_000),
            height: Height::from_millimeters(1800),
            photo: None,
            cards_minted,
        }
    }

    /// Deterministic storage key for a card.
    pub fn card_key(athlete_id: AthleteId, instance_id: InstanceId) -> CardKey {
        CardKey(format!("0x{:016x}{:08x}", athlete_id, instance_id))
    }

    /// Default value of a freshly minted card per tier.
    pub fn tier_value(tier: CardTier) -> TokenAmount {
        match tier {
            CardTier::Gold => TokenAmount::from_tokens(1),
            CardTier::Silver => TokenAmount::from_tokens(5),
            CardTier::Diamond => TokenAmount::from_tokens(25),
        }
    }

    /// Create a present card entry.
    pub fn card_entry(
        athlete_id: AthleteId,
        instance_id: InstanceId,
        tier: CardTier,
    ) -> StorageEntry<CardKey, Card> {
        StorageEntry::present(
            card_key(athlete_id, instance_id),
            Card {
                owner: None,
                id: CardId::new(athlete_id, instance_id),
                tier,
                value: tier_value(tier),
                is_on_market: false,
            },
        )
    }

    /// Create an athlete's cards numbered from 1: gold first, then silver, then diamond.
    pub fn card_set(
        athlete_id: AthleteId,
        gold: u32,
        silver: u32,
        diamond: u32,
    ) -> Vec<StorageEntry<CardKey, Card>> {
        let tiers = std::iter::repeat(CardTier::Gold)
            .take(gold as usize)
            .chain(std::iter::repeat(CardTier::Silver).take(silver as usize))
            .chain(std::iter::repeat(CardTier::Diamond).take(diamond as usize));

        tiers
            .zip(1..)
            .map(|(tier, instance_id)| card_entry(athlete_id, instance_id, tier))
            .collect()
    }
}
