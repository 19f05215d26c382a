use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: String,
        value: String,
        reason: String,
    },

    #[error("TECHNITIUM_TOKEN is not set; the query log source requires an API token")]
    MissingToken,

    #[error("Validation error: {0}")]
    Validation(String),
}
