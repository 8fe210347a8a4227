use thiserror::Error;

use super::{ConfigError, MetricsError, ReportError, StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Run interrupted by shutdown signal.")]
    Interrupted,
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    /// True for operator mistakes that must abort the run before any traffic
    /// is issued (empty command list, unknown command, unreachable store).
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        match self {
            AppError::Validation(_) | AppError::Config(_) => true,
            AppError::Store(err) => err.is_connect_failure(),
            AppError::Io { .. }
            | AppError::Clap { .. }
            | AppError::Json { .. }
            | AppError::Join { .. }
            | AppError::Interrupted
            | AppError::Report(_)
            | AppError::Metrics(_) => false,
        }
    }
}
