// src/infra/errors.rs — Error types for the wellness companion

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompanionError {
    // Startup (fatal)
    #[error("Configuration error: {0}")]
    Config(String),

    // Gateway errors
    #[error("Authentication with '{provider}' failed: {message}")]
    Authentication { provider: String, message: String },

    #[error("Gateway '{provider}' error: {message}")]
    Upstream { provider: String, message: String },

    #[error("Rate limited by '{provider}'")]
    RateLimited { provider: String },

    // User errors (rejected locally, no state mutation)
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown task '{name}'")]
    UnknownTask { name: String },

    #[error("Session '{id}' not found")]
    SessionNotFound { id: String },

    // Infra
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompanionError {
    /// Failures that originate at the inference gateway.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            CompanionError::Authentication { .. }
                | CompanionError::Upstream { .. }
                | CompanionError::RateLimited { .. }
        )
    }
}
