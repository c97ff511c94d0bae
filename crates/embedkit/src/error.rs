//! CLI error types.

use embedkit_config::ConfigError;
use embedkit_media::EmbedError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Embed(#[from] EmbedError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} URLs could not be rendered")]
    Render { failed: usize, total: usize },
}
