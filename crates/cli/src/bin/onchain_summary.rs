//! Print registered athletes, their card tiers and selected card instances.

use anyhow::{Context, Result};
use tracing::error;

use athlete_cards_cli::{connect, init_tracing, load_settings};
use athlete_cards_core::{ProbeSelection, SummaryJob};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = load_settings()?;
    let chain = connect(&config)?;

    let job = SummaryJob::new(chain).with_probes(ProbeSelection::from(&config.summary));

    let mut stdout = std::io::stdout().lock();
    job.run(&mut stdout)
        .await
        .context("Summary run failed")?;
    Ok(())
}
