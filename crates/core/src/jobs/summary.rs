//! Per-athlete report of on-chain athletes and their cards.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::chain::ChainQuery;
use crate::config::{ProbeMode, SummaryConfig};
use crate::model::{
    Athlete, AthleteId, Card, CardKey, CardTier, Height, InstanceId, StorageEntry, Weight,
    TOKEN_SYMBOL,
};

use super::JobError;

/// Which card instances to print for each athlete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeSelection {
    /// These instance numbers, in order. A missing one is an error.
    Instances(Vec<InstanceId>),
    /// Every instance present, ascending.
    All,
    None,
}

impl Default for ProbeSelection {
    fn default() -> Self {
        ProbeSelection::Instances(vec![1, 20, 110])
    }
}

impl From<&SummaryConfig> for ProbeSelection {
    fn from(config: &SummaryConfig) -> Self {
        match config.probes {
            ProbeMode::Instances => ProbeSelection::Instances(config.instances.clone()),
            ProbeMode::All => ProbeSelection::All,
            ProbeMode::None => ProbeSelection::None,
        }
    }
}

/// Card counts per tier for one athlete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierTally {
    pub gold: usize,
    pub silver: usize,
    pub diamond: usize,
}

impl TierTally {
    pub fn record(&mut self, tier: CardTier) {
        match tier {
            CardTier::Gold => self.gold += 1,
            CardTier::Silver => self.silver += 1,
            CardTier::Diamond => self.diamond += 1,
        }
    }

    pub fn get(&self, tier: CardTier) -> usize {
        match tier {
            CardTier::Gold => self.gold,
            CardTier::Silver => self.silver,
            CardTier::Diamond => self.diamond,
        }
    }

    pub fn total(&self) -> usize {
        self.gold + self.silver + self.diamond
    }
}

impl fmt::Display for TierTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = CardTier::ALL
            .iter()
            .map(|tier| format!("{}: {};", tier, self.get(*tier)))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

/// A card together with its storage key.
#[derive(Debug, Clone, PartialEq)]
pub struct CardEntry {
    pub key: CardKey,
    pub card: Card,
}

/// Everything the report knows about one athlete.
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteSummary {
    pub athlete_id: AthleteId,
    pub name: String,
    pub height: Height,
    pub weight: Weight,
    pub cards_minted: bool,
    pub tally: TierTally,
    /// The athlete's cards keyed by instance number.
    pub cards: BTreeMap<InstanceId, CardEntry>,
}

impl AthleteSummary {
    /// Build the summary by scanning all cards for this athlete's id.
    pub fn build(
        athlete_id: AthleteId,
        athlete: &Athlete,
        cards: &[StorageEntry<CardKey, Card>],
    ) -> Self {
        let mut tally = TierTally::default();
        let mut by_instance = BTreeMap::new();

        for (key, card) in cards.iter().filter_map(StorageEntry::as_present) {
            if !card.belongs_to(athlete_id) {
                continue;
            }
            tally.record(card.tier);
            by_instance.insert(
                card.id.instance_id,
                CardEntry {
                    key: key.clone(),
                    card: card.clone(),
                },
            );
        }

        Self {
            athlete_id,
            name: athlete.name.clone(),
            height: athlete.height,
            weight: athlete.weight,
            cards_minted: athlete.cards_minted,
            tally,
            cards: by_instance,
        }
    }

    /// Look up a card by instance number.
    pub fn card(&self, instance_id: InstanceId) -> Result<&CardEntry, JobError> {
        self.cards
            .get(&instance_id)
            .ok_or_else(|| JobError::MissingInstance {
                athlete_id: self.athlete_id,
                name: self.name.clone(),
                instance_id,
            })
    }

    /// Instance numbers to print under the given selection.
    pub fn probe_ids(&self, selection: &ProbeSelection) -> Vec<InstanceId> {
        match selection {
            ProbeSelection::Instances(ids) => ids.clone(),
            ProbeSelection::All => self.cards.keys().copied().collect(),
            ProbeSelection::None => Vec::new(),
        }
    }

    pub fn card_line(&self, instance_id: InstanceId) -> Result<String, JobError> {
        let entry = self.card(instance_id)?;
        Ok(format!(
            "Card from onchain for {}: ({}): tier={} value={} {}",
            self.name, entry.key, entry.card.tier, entry.card.value, TOKEN_SYMBOL
        ))
    }

    /// Write this athlete's block. Lines already written stay written if a
    /// probe fails.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        selection: &ProbeSelection,
    ) -> Result<(), JobError> {
        writeln!(
            out,
            "Registered athlete {}: height={}cm weight={}kg",
            self.name,
            self.height.to_centimeters(),
            self.weight.to_kilograms()
        )?;
        writeln!(out, "Cards minted for {}: {}", self.name, self.cards_minted)?;
        writeln!(out, "{}", self.tally)?;
        for instance_id in self.probe_ids(selection) {
            let line = self.card_line(instance_id)?;
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Prints athletes, tier statistics and selected card instances.
pub struct SummaryJob {
    query: Arc<dyn ChainQuery>,
    probes: ProbeSelection,
}

impl SummaryJob {
    pub fn new(query: Arc<dyn ChainQuery>) -> Self {
        Self {
            query,
            probes: ProbeSelection::default(),
        }
    }

    pub fn with_probes(mut self, probes: ProbeSelection) -> Self {
        self.probes = probes;
        self
    }

    /// Fetch both collections and summarize every present athlete.
    pub async fn collect(&self) -> Result<Vec<AthleteSummary>, JobError> {
        let athletes = self.query.athlete_entries().await?;
        let cards = self.query.card_entries().await?;
        info!(
            "Fetched {} athlete entries and {} card entries",
            athletes.len(),
            cards.len()
        );

        let summaries = athletes
            .iter()
            .filter_map(|entry| {
                if !entry.is_present() {
                    debug!("Skipping empty athlete entry {}", entry.key);
                }
                entry.as_present()
            })
            .map(|(&athlete_id, athlete)| AthleteSummary::build(athlete_id, athlete, &cards))
            .collect();

        Ok(summaries)
    }

    /// Collect and print the report, stopping at the first missing probe.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Vec<AthleteSummary>, JobError> {
        let summaries = self.collect().await?;
        for summary in &summaries {
            summary.render(out, &self.probes)?;
        }
        info!("Summary printed for {} athletes", summaries.len());
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenAmount;
    use crate::testing::{fixtures, MockChain};

    #[test]
    fn test_tally_display() {
        let tally = TierTally {
            gold: 2,
            silver: 1,
            diamond: 0,
        };
        assert_eq!(tally.to_string(), "Gold: 2; Silver: 1; Diamond: 0;");
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_build_filters_by_athlete() {
        let athlete = fixtures::athlete("Ada", true);
        let cards = vec![
            fixtures::card_entry(1, 1, CardTier::Gold),
            fixtures::card_entry(1, 2, CardTier::Gold),
            fixtures::card_entry(2, 1, CardTier::Diamond),
            fixtures::card_entry(1, 3, CardTier::Silver),
            StorageEntry::new(CardKey::from("0xdead"), None),
        ];

        let summary = AthleteSummary::build(1, &athlete, &cards);

        assert_eq!(
            summary.tally,
            TierTally {
                gold: 2,
                silver: 1,
                diamond: 0
            }
        );
        assert_eq!(summary.tally.total(), summary.cards.len());
        assert_eq!(summary.cards.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_card_line_format() {
        let athlete = fixtures::athlete("Ada", true);
        let mut entry = fixtures::card_entry(1, 20, CardTier::Diamond);
        entry.value.as_mut().unwrap().value = TokenAmount::from_raw(2_500_000_000_000);
        let key = entry.key.clone();

        let summary = AthleteSummary::build(1, &athlete, &[entry]);

        assert_eq!(
            summary.card_line(20).unwrap(),
            format!(
                "Card from onchain for Ada: ({}): tier=Diamond value=2.5 ATHL",
                key
            )
        );
    }

    #[test]
    fn test_missing_instance_is_error() {
        let athlete = fixtures::athlete("Ada", true);
        let cards: Vec<_> = (1..=5)
            .map(|i| fixtures::card_entry(1, i, CardTier::Gold))
            .collect();
        let summary = AthleteSummary::build(1, &athlete, &cards);

        let err = summary.card(20).unwrap_err();
        assert!(matches!(
            err,
            JobError::MissingInstance {
                athlete_id: 1,
                instance_id: 20,
                ..
            }
        ));
    }

    #[test]
    fn test_probe_ids() {
        let athlete = fixtures::athlete("Ada", true);
        let cards = vec![
            fixtures::card_entry(1, 7, CardTier::Gold),
            fixtures::card_entry(1, 3, CardTier::Gold),
        ];
        let summary = AthleteSummary::build(1, &athlete, &cards);

        assert_eq!(summary.probe_ids(&ProbeSelection::All), vec![3, 7]);
        assert!(summary.probe_ids(&ProbeSelection::None).is_empty());
        assert_eq!(
            summary.probe_ids(&ProbeSelection::default()),
            vec![1, 20, 110]
        );
    }

    #[test]
    fn test_probe_selection_from_config() {
        let config = SummaryConfig {
            probes: ProbeMode::Instances,
            instances: vec![4, 5],
        };
        assert_eq!(
            ProbeSelection::from(&config),
            ProbeSelection::Instances(vec![4, 5])
        );
    }

    #[test]
    fn test_render_block() {
        let mut athlete = fixtures::athlete("Ada", true);
        athlete.height = Height::from_millimeters(1854);
        athlete.weight = Weight::from_grams(81_500);
        let summary = AthleteSummary::build(1, &athlete, &[]);

        let mut out = Vec::new();
        summary.render(&mut out, &ProbeSelection::None).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Registered athlete Ada: height=185.4cm weight=81.5kg\n\
             Cards minted for Ada: true\n\
             Gold: 0; Silver: 0; Diamond: 0;\n\
             \n"
        );
    }

    #[tokio::test]
    async fn test_run_stops_at_missing_probe() {
        let chain = Arc::new(MockChain::new());
        chain.add_athlete(1, fixtures::athlete("Ada", true)).await;
        for i in 1..=5 {
            chain.add_card_entry(fixtures::card_entry(1, i, CardTier::Silver)).await;
        }

        let mut out = Vec::new();
        let result = SummaryJob::new(chain.clone()).run(&mut out).await;

        assert!(matches!(
            result,
            Err(JobError::MissingInstance {
                instance_id: 20,
                ..
            })
        ));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Gold: 0; Silver: 5; Diamond: 0;"));
        assert!(text.contains("Card from onchain for Ada:"));
    }
}
