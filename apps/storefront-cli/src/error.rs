//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  toml / io / ValidationError ──► ConfigError ──┐                       │
//! │                                                 ├──► CliError ──► stderr│
//! │  CoreError (storefront-core) ───────────────────┘        │             │
//! │                                                           ▼             │
//! │                                                  ErrorCode + exit code  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use thiserror::Error;

// =============================================================================
// Config Error
// =============================================================================

/// Failures while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for our schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv { var: String, value: String },

    /// The log filter is not a valid tracing directive.
    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    /// Catalog or limits failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// CLI Error
// =============================================================================

/// Machine-readable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Config file, env override or catalog problem
    ConfigError,

    /// Bad command-line input
    ValidationError,

    /// Cart rule broken (limits)
    CartError,

    /// Checkout could not be satisfied
    InsufficientStock,

    /// Payment rejected
    PaymentError,

    /// Anything else
    Internal,
}

/// Everything `run` can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Classifies the error for display.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Core(core) => match core {
                CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                CoreError::InvalidAmount { .. } | CoreError::PaymentDeclined { .. } => {
                    ErrorCode::PaymentError
                }
                CoreError::CartTooLarge { .. }
                | CoreError::QuantityTooLarge { .. }
                | CoreError::Overflow { .. } => ErrorCode::CartError,
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            CliError::Output(_) => ErrorCode::Internal,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self.code() {
            ErrorCode::ConfigError => 78,
            ErrorCode::ValidationError => 65,
            ErrorCode::CartError | ErrorCode::InsufficientStock => 3,
            ErrorCode::PaymentError => 4,
            ErrorCode::Internal => 1,
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
