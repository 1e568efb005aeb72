use serde::{Deserialize, Serialize};

use crate::model::InstanceId;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub node: NodeConfig,
    #[serde(default)]
    pub signer: SignerConfig,
    #[serde(default)]
    pub mint: MintConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Node gateway connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Gateway base URL (e.g., "http://127.0.0.1:9944")
    pub url: String,
    /// Timeout in seconds for storage listings and connection setup
    /// (default: 30). Submissions wait for block inclusion without a limit.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Identity used to sign submissions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignerConfig {
    /// Account name known to the gateway keystore
    #[serde(default = "default_account")]
    pub account: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            account: default_account(),
        }
    }
}

fn default_account() -> String {
    "alice".to_string()
}

/// Maintenance job settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MintConfig {
    /// Report what would be minted without submitting anything
    #[serde(default)]
    pub dry_run: bool,
}

/// Reporting job settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryConfig {
    /// Which card instances to print per athlete
    #[serde(default)]
    pub probes: ProbeMode,
    /// Instance numbers printed when `probes = "instances"`
    #[serde(default = "default_instances")]
    pub instances: Vec<InstanceId>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            probes: ProbeMode::default(),
            instances: default_instances(),
        }
    }
}

fn default_instances() -> Vec<InstanceId> {
    vec![1, 20, 110]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMode {
    /// Print the listed instances; a missing one aborts the report
    #[default]
    Instances,
    /// Print every instance present, ascending
    All,
    /// Print no card lines
    None,
}

/// Effective settings as logged at startup
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub node_url: String,
    pub timeout_secs: u32,
    pub signer: String,
    pub dry_run: bool,
    pub probes: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            node_url: config.node.url.clone(),
            timeout_secs: config.node.timeout_secs,
            signer: config.signer.account.clone(),
            dry_run: config.mint.dry_run,
            probes: match config.summary.probes {
                ProbeMode::Instances => format!("instances {:?}", config.summary.instances),
                ProbeMode::All => "all".to_string(),
                ProbeMode::None => "none".to_string(),
            },
        }
    }
}
