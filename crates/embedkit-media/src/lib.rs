//! Embeddable audio players for content hosts.
//!
//! Turns a link to a Mixcloud show or SoundCloud track into player markup:
//!
//! 1. a [`DomainMatcher`] decides whether a URL belongs to a provider
//! 2. the identifier (path plus query) is extracted from it
//! 3. the provider's oEmbed discovery URL is built and resolved (fail-soft)
//! 4. a [`Rendering`] is synthesized, either the remote markup inline or a
//!    mount element for a client-side player
//!
//! [`RendererRegistry`] picks the right provider for arbitrary URLs and can
//! render batches in parallel.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use embedkit_media::RendererRegistry;
//! use embedkit_oembed::MetadataResolver;
//! use embedkit_oembed::MockTransport;
//!
//! let resolver = MetadataResolver::new(Arc::new(MockTransport::new()));
//! let registry = RendererRegistry::with_defaults(&resolver);
//!
//! let rendering = registry
//!     .render_by_url("https://soundcloud.com/artist/track", None)
//!     .unwrap();
//! assert!(rendering.to_fragment().as_str().starts_with("<div id=\"sc_player_artist_track\""));
//! ```

mod error;
mod extract;
mod fragment;
mod matcher;
mod provider;
pub mod providers;
mod registry;
mod renderer;
mod style;
mod synth;

pub use error::EmbedError;
pub use extract::{location, media_id, query_params};
pub use fragment::{ERROR_PLACEHOLDER, HtmlFragment, escape_html};
pub use matcher::{DomainMatcher, UrlInput, parse_url};
pub use provider::{Provider, ProviderCapabilities};
pub use registry::{BatchError, BatchRendering, RenderedUrl, RendererRegistry};
pub use renderer::{MediaReference, MediaRenderer, ProviderRenderer, RenderOptions};
pub use style::{AUDIO_PLAYER_STYLES, Style, StyleProfile, ViewContext};
pub use synth::{ClientDirective, DeferredMount, DeferredPlayer, Rendering, Synthesis, mount_id};
pub use url::Url;
