//! CLI error types.

use folio_config::ConfigError;
use folio_renderer::ParseProviderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Provider(#[from] ParseProviderError),

    #[error("{0}")]
    Validation(String),
}
