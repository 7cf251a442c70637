use thiserror::Error;

/// Shown whenever a fetch ends in `MarsApiStatus::Error`.
pub const FETCH_FAILED_MESSAGE: &str = "Could not load Mars properties";
pub const FETCH_FAILED_SUGGESTION: &str = "Check your network connection and try again";

#[derive(Error, Debug)]
pub enum MarsApiError {
    #[error("API request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    StatusError { status: u16 },

    #[error("Failed to decode listings: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl MarsApiError {
    /// Transport, status and decoding failures all count as a failed fetch.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            MarsApiError::FetchError(_)
                | MarsApiError::StatusError { .. }
                | MarsApiError::DecodeError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        if self.is_fetch_failure() {
            return FETCH_FAILED_MESSAGE.to_string();
        }
        match self {
            MarsApiError::IoError(e) => format!("Could not read configuration: {}", e),
            MarsApiError::TomlError(_) => "Configuration file is not valid TOML".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MarsApiError::FetchError(_)
            | MarsApiError::StatusError { .. }
            | MarsApiError::DecodeError(_) => FETCH_FAILED_SUGGESTION,
            MarsApiError::IoError(_) => "Check that the configuration path exists and is readable",
            MarsApiError::TomlError(_) => "Fix the syntax of the configuration file",
            MarsApiError::ConfigError { .. } | MarsApiError::InvalidConfigValueError { .. } => {
                "Review the configuration values"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MarsApiError>;
