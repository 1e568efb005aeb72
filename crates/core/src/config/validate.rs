use super::{
    types::{Config, ProbeMode},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Node section exists (enforced by serde)
/// - Node URL is an http(s) URL
/// - Timeout is not 0
/// - Signer account is set
/// - Instance probes are non-empty and start at 1
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = config.node.url.trim();
    if url.is_empty() {
        return Err(ConfigError::invalid("node.url", "cannot be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::invalid(
            "node.url",
            format!("must be an http(s) URL, got '{}'", url),
        ));
    }

    if config.node.timeout_secs == 0 {
        return Err(ConfigError::invalid("node.timeout_secs", "cannot be 0"));
    }

    if config.signer.account.trim().is_empty() {
        return Err(ConfigError::invalid("signer.account", "cannot be empty"));
    }

    if config.summary.probes == ProbeMode::Instances {
        if config.summary.instances.is_empty() {
            return Err(ConfigError::invalid(
                "summary.instances",
                "cannot be empty when probes = \"instances\"",
            ));
        }
        if config.summary.instances.contains(&0) {
            return Err(ConfigError::invalid(
                "summary.instances",
                "instance numbers start at 1",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MintConfig, NodeConfig, SignerConfig, SummaryConfig};

    fn valid_config() -> Config {
        Config {
            node: NodeConfig {
                url: "http://127.0.0.1:9944".to_string(),
                timeout_secs: 30,
            },
            signer: SignerConfig::default(),
            mint: MintConfig::default(),
            summary: SummaryConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_url_fails() {
        let mut config = valid_config();
        config.node.url = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.key(), Some("node.url"));
        assert_eq!(err.to_string(), "Invalid node.url: cannot be empty");
    }

    #[test]
    fn test_validate_websocket_url_fails() {
        let mut config = valid_config();
        config.node.url = "ws://127.0.0.1:9944".to_string();
        assert_eq!(validate_config(&config).unwrap_err().key(), Some("node.url"));
    }

    #[test]
    fn test_validate_timeout_zero_fails() {
        let mut config = valid_config();
        config.node.timeout_secs = 0;
        assert_eq!(validate_config(&config).unwrap_err().key(), Some("node.timeout_secs"));
    }

    #[test]
    fn test_validate_empty_signer_fails() {
        let mut config = valid_config();
        config.signer.account = String::new();
        assert_eq!(validate_config(&config).unwrap_err().key(), Some("signer.account"));
    }

    #[test]
    fn test_validate_empty_instances_fails() {
        let mut config = valid_config();
        config.summary.instances.clear();
        assert_eq!(validate_config(&config).unwrap_err().key(), Some("summary.instances"));
    }

    #[test]
    fn test_validate_empty_instances_allowed_for_all() {
        let mut config = valid_config();
        config.summary.probes = ProbeMode::All;
        config.summary.instances.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_instance_zero_fails() {
        let mut config = valid_config();
        config.summary.instances = vec![0, 1];
        assert_eq!(validate_config(&config).unwrap_err().key(), Some("summary.instances"));
    }
}
