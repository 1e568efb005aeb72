//! Mint cards for every registered athlete that has none yet.

use anyhow::{Context, Result};
use tracing::{error, info};

use athlete_cards_cli::{connect, init_tracing, load_settings};
use athlete_cards_core::MintJob;

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

    let job = MintJob::new(chain.clone(), chain).with_dry_run(config.mint.dry_run);

    let mut stdout = std::io::stdout().lock();
    let report = job.run(&mut stdout).await.context("Mint run failed")?;

    info!(
        "Done: {} minted, {} skipped",
        report.submitted.len(),
        report.skipped.len()
    );
    Ok(())
}
