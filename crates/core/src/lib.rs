pub mod chain;
pub mod config;
pub mod jobs;
pub mod model;
pub mod testing;

pub use chain::{
    ChainCall, ChainError, ChainQuery, ChainSubmit, GatewayClient, StorageCollection,
    SubmissionReceipt,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, MintConfig,
    NodeConfig, ProbeMode, SanitizedConfig, SignerConfig, SummaryConfig,
};
pub use jobs::{
    AthleteSummary, CardEntry, JobError, MintJob, MintReport, ProbeSelection, SummaryJob,
    TierTally,
};
pub use model::{
    Athlete, AthleteId, Balance, Card, CardId, CardKey, CardTier, Height, InstanceId,
    OffchainRef, StorageEntry, TokenAmount, Weight, TOKEN_DECIMALS, TOKEN_SYMBOL,
};
