//! Shared startup for the `mint-cards` and `onchain-summary` binaries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use athlete_cards_core::{load_config, validate_config, Config, GatewayClient, SanitizedConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ATHL_CONFIG";

/// Initialize logging. Logs go to stderr so stdout carries only the report.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Config path from `ATHL_CONFIG`, defaulting to `config.toml`.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Load and validate configuration from the given file.
pub fn load_settings_from(path: &Path) -> Result<Config> {
    info!("Loading configuration from {:?}", path);
    let config =
        load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?;

    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&sanitized).unwrap_or_default()
    );

    Ok(config)
}

/// Load and validate configuration from [`config_path`].
pub fn load_settings() -> Result<Config> {
    load_settings_from(&config_path())
}

/// Connect to the node gateway.
pub fn connect(config: &Config) -> Result<Arc<GatewayClient>> {
    let client = GatewayClient::new(&config.node, &config.signer)
        .context("Failed to create gateway client")?;
    info!(
        "Using gateway at {} as {}",
        client.base_url(),
        config.signer.account
    );
    Ok(Arc::new(client))
}
