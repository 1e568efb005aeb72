use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ATHL_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[node]
url = "http://127.0.0.1:9944"
timeout_secs = 5
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.node.url, "http://127.0.0.1:9944");
        assert_eq!(config.node.timeout_secs, 5);
    }

    #[test]
    fn test_load_config_from_str_missing_node() {
        let toml = r#"
[signer]
account = "bob"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        match &err {
            ConfigError::FileNotFound(path) => {
                assert_eq!(path, Path::new("/nonexistent/config.toml"))
            }
            other => panic!("expected missing file, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Config file /nonexistent/config.toml does not exist"
        );
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[node]
url = "http://node.local:9944"

[signer]
account = "charlie"

[summary]
probes = "all"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.node.url, "http://node.local:9944");
        assert_eq!(config.signer.account, "charlie");
        assert_eq!(config.summary.probes, ProbeMode::All);
    }
}
