//! Mint cards for every athlete that has none yet.

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::chain::{ChainCall, ChainQuery, ChainSubmit};
use crate::model::AthleteId;

use super::JobError;

/// Outcome of a mint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintReport {
    /// Athletes a mint was submitted (or, in dry-run, would be submitted) for.
    pub submitted: Vec<AthleteId>,
    /// Athletes skipped because their cards are already minted.
    pub skipped: Vec<AthleteId>,
    /// Storage entries without a value.
    pub pruned: usize,
    /// Account the submissions were signed with; `None` in dry-run.
    pub signer: Option<String>,
}

/// Submits one `mint_cards` call per athlete whose `cards_minted` flag is unset.
///
/// Submissions are awaited one at a time. The flag is the only guard: if the
/// node has not updated it yet, a rerun will submit again.
pub struct MintJob {
    query: Arc<dyn ChainQuery>,
    submitter: Arc<dyn ChainSubmit>,
    dry_run: bool,
}

impl MintJob {
    pub fn new(query: Arc<dyn ChainQuery>, submitter: Arc<dyn ChainSubmit>) -> Self {
        Self {
            query,
            submitter,
            dry_run: false,
        }
    }

    /// Only report what would be minted.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<MintReport, JobError> {
        let athletes = self.query.athlete_entries().await?;
        info!("Fetched {} athlete entries", athletes.len());

        let mut report = MintReport::default();
        if !self.dry_run {
            let signer = self.submitter.signer();
            info!(signer, "Submitting mints");
            report.signer = Some(signer.to_string());
        }

        for entry in &athletes {
            let Some((&athlete_id, athlete)) = entry.as_present() else {
                debug!("Skipping empty athlete entry {}", entry.key);
                report.pruned += 1;
                continue;
            };

            if athlete.cards_minted {
                writeln!(
                    out,
                    "skipping {} because they already have cards minted",
                    athlete.name
                )?;
                report.skipped.push(athlete_id);
                continue;
            }

            if self.dry_run {
                writeln!(out, "would mint cards for {}", athlete.name)?;
                report.submitted.push(athlete_id);
                continue;
            }

            debug!("Minting cards for athlete {} ({})", athlete_id, athlete.name);
            let receipt = self
                .submitter
                .submit(ChainCall::MintCards { athlete_id })
                .await?;

            match &receipt.block_hash {
                Some(hash) => info!(athlete_id, block_hash = %hash, "Mint acknowledged"),
                None => info!(athlete_id, "Mint acknowledged"),
            }
            writeln!(out, "mint cards for {}: {}", athlete.name, receipt.status)?;
            report.submitted.push(athlete_id);
        }

        info!(
            submitted = report.submitted.len(),
            skipped = report.skipped.len(),
            pruned = report.pruned,
            dry_run = self.dry_run,
            "Mint run finished"
        );

        Ok(report)
    }
}
