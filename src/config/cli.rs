use crate::config::toml_config::TomlConfig;
use crate::config::OverviewConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "mars-realestate")]
#[command(about = "Fetch and list Mars real-estate properties")]
pub struct CliConfig {
    /// Root address of the listing service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Request timeout in seconds (transport default when unset)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file, if any, then applies command-line overrides.
    pub fn resolve(&self) -> Result<OverviewConfig> {
        let mut config = match &self.config {
            Some(path) => {
                validate_path("config", path)?;
                OverviewConfig::from(TomlConfig::from_file(path)?)
            }
            None => OverviewConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        config.json_logs |= self.json_logs;
        config.verbose = self.verbose;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::BASE_URL;
    use crate::utils::error::MarsApiError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::parse_from(["mars-realestate"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.timeout_seconds, None);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nbase_url = \"http://file.example\"\ntimeout_seconds = 10\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "mars-realestate",
            "--config",
            path.as_str(),
            "--base-url",
            "http://flag.example",
            "--verbose",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url, "http://flag.example");
        assert_eq!(config.timeout_seconds, Some(10));
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let cli = CliConfig::parse_from(["mars-realestate", "--base-url", "ftp://mars"]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_invalid_file_value_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[source]\ntimeout_seconds = 0\n").unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["mars-realestate", "--config", path.as_str()]);
        match cli.resolve() {
            Err(MarsApiError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "timeout_seconds");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let cli = CliConfig::parse_from([
            "mars-realestate",
            "--config",
            path.as_str(),
            "--timeout-seconds",
            "15",
        ]);
        assert_eq!(cli.resolve().unwrap().timeout_seconds, Some(15));
    }
}
