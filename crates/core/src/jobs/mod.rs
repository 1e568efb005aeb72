//! Batch jobs run against the chain.
//!
//! Both jobs are strictly sequential: fetch, iterate, act or print. Any
//! error aborts the whole run; nothing is retried.

mod mint;
mod summary;

pub use mint::{MintJob, MintReport};
pub use summary::{AthleteSummary, CardEntry, ProbeSelection, SummaryJob, TierTally};

use thiserror::Error;

use crate::chain::ChainError;
use crate::model::{AthleteId, InstanceId};

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// A requested card instance does not exist for the athlete.
    #[error("No card with instance {instance_id} for athlete {athlete_id} ({name})")]
    MissingInstance {
        athlete_id: AthleteId,
        name: String,
        instance_id: InstanceId,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
