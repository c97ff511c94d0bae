//! Error types for media rendering.

/// Error from a renderer or registry operation.
///
/// Only URL handling fails loudly. Remote lookup failures are absorbed by the
/// resolver and surface as placeholder markup, never as an `EmbedError`.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The URL could not be parsed while deriving an identifier.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// Input as given by the caller.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },

    /// A renderer was asked to render a URL its matcher does not accept.
    #[error("{provider} does not recognize {url}")]
    Unrecognized {
        /// Renderer type name.
        provider: &'static str,
        /// Input as given by the caller.
        url: String,
    },

    /// No registered renderer accepts the URL.
    #[error("no renderer supports {0}")]
    Unsupported(String),
}
