//! Dispatch over multiple renderers.

use std::collections::BTreeSet;
use std::sync::Arc;

use embedkit_oembed::MetadataResolver;
use rayon::prelude::*;
use tracing::debug;

use crate::error::EmbedError;
use crate::providers::{mixcloud, soundcloud};
use crate::renderer::{MediaRenderer, RenderOptions};
use crate::synth::Rendering;

/// Ordered set of renderers; the first one accepting a URL wins.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: Vec<Arc<dyn MediaRenderer>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in providers (Mixcloud, then SoundCloud)
    /// sharing `resolver`.
    #[must_use]
    pub fn with_defaults(resolver: &MetadataResolver) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(mixcloud(resolver.clone())));
        registry.register(Arc::new(soundcloud(resolver.clone())));
        registry
    }

    /// Append a renderer.
    pub fn register(&mut self, renderer: Arc<dyn MediaRenderer>) {
        self.renderers.push(renderer);
    }

    /// Registered renderers in dispatch order.
    pub fn renderers(&self) -> &[Arc<dyn MediaRenderer>] {
        &self.renderers
    }

    /// First renderer supporting `url`.
    pub fn find(&self, url: &str) -> Option<&Arc<dyn MediaRenderer>> {
        let found = self.renderers.iter().find(|r| r.is_supported(url));
        if let Some(renderer) = found {
            debug!(url, renderer = renderer.name(), "Matched renderer");
        }
        found
    }

    /// Renderer handling a media type name.
    pub fn renderer_for_type(&self, media_type: &str) -> Option<&Arc<dyn MediaRenderer>> {
        self.renderers
            .iter()
            .find(|r| r.supported_types().contains(media_type))
    }

    /// Media type of `url`, if any renderer supports it.
    pub fn media_type(&self, url: &str) -> Option<&'static str> {
        self.find(url).and_then(|r| r.media_type(url))
    }

    /// Union of all renderers' supported types.
    pub fn supported_types(&self) -> BTreeSet<&'static str> {
        self.renderers
            .iter()
            .flat_map(|r| r.supported_types())
            .collect()
    }

    /// Render `url` with the first renderer supporting it.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Unsupported`] when no renderer accepts the URL,
    /// otherwise whatever the renderer's extraction reports.
    pub fn render_by_url(
        &self,
        url: &str,
        options: Option<&RenderOptions>,
    ) -> Result<Rendering, EmbedError> {
        self.require(url)?.render_by_url(url, options)
    }

    /// Thumbnail URI for `url`, or `""` when no renderer supports it.
    ///
    /// # Errors
    ///
    /// Propagates extraction errors from the matching renderer.
    pub fn thumbnail(&self, url: &str) -> Result<String, EmbedError> {
        match self.find(url) {
            Some(renderer) => renderer.thumbnail(url),
            None => Ok(String::new()),
        }
    }

    /// Render many URLs in parallel, keeping successes and failures apart.
    ///
    /// With a `context`, each URL's element is sized by its renderer's style
    /// for that view context. Uses the global rayon thread pool. Each entry
    /// carries the position of its URL in `urls`; both lists are in input
    /// order.
    #[must_use]
    pub fn render_all<S: AsRef<str> + Sync>(
        &self,
        urls: &[S],
        context: Option<&str>,
    ) -> BatchRendering {
        if urls.is_empty() {
            return BatchRendering::default();
        }

        let results: Vec<Result<RenderedUrl, BatchError>> = urls
            .par_iter()
            .enumerate()
            .map(|(index, url)| {
                let url = url.as_ref();
                self.render_in_context(url, context)
                    .map(|rendering| RenderedUrl {
                        index,
                        url: url.to_owned(),
                        rendering,
                    })
                    .map_err(|error| BatchError {
                        index,
                        url: url.to_owned(),
                        error,
                    })
            })
            .collect();

        partition_results(results)
    }

    fn render_in_context(&self, url: &str, context: Option<&str>) -> Result<Rendering, EmbedError> {
        let renderer = self.require(url)?;
        let options = context.map(|c| RenderOptions::from_style(renderer.style(c)));
        renderer.render_by_url(url, options.as_ref())
    }

    fn require(&self, url: &str) -> Result<&Arc<dyn MediaRenderer>, EmbedError> {
        self.find(url)
            .ok_or_else(|| EmbedError::Unsupported(url.to_owned()))
    }
}

/// One successfully rendered URL of a batch.
#[derive(Debug)]
pub struct RenderedUrl {
    pub index: usize,
    pub url: String,
    pub rendering: Rendering,
}

/// One failed URL of a batch.
#[derive(Debug, thiserror::Error)]
#[error("url {index} ({url}): {error}")]
pub struct BatchError {
    pub index: usize,
    pub url: String,
    #[source]
    pub error: EmbedError,
}

/// Result of [`RendererRegistry::render_all`].
#[derive(Debug, Default)]
pub struct BatchRendering {
    /// Successfully rendered URLs.
    pub rendered: Vec<RenderedUrl>,
    /// URLs that could not be rendered.
    pub errors: Vec<BatchError>,
}

fn partition_results(results: Vec<Result<RenderedUrl, BatchError>>) -> BatchRendering {
    let mut rendered = Vec::with_capacity(results.len());
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(item) => rendered.push(item),
            Err(error) => errors.push(error),
        }
    }

    BatchRendering { rendered, errors }
}

#[cfg(test)]
mod tests {
    use embedkit_oembed::Transport;
    use embedkit_oembed::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const MIXCLOUD_URL: &str = "https://www.mixcloud.com/artist/show/";
    const MIXCLOUD_DISCOVERY: &str =
        "http://www.mixcloud.com/oembed/?url=https%3A//www.mixcloud.com/artist/show/&format=json";
    const SOUNDCLOUD_URL: &str = "https://soundcloud.com/artist/track";

    fn registry() -> (RendererRegistry, Arc<MockTransport>) {
        let transport = Arc::new(
            MockTransport::new().with_json(MIXCLOUD_DISCOVERY, json!({ "embed": "<iframe/>" })),
        );
        let resolver = MetadataResolver::new(Arc::clone(&transport) as Arc<dyn Transport>);
        (RendererRegistry::with_defaults(&resolver), transport)
    }

    #[test]
    fn test_dispatch_by_host() {
        let (registry, _) = registry();

        assert_eq!(registry.media_type(MIXCLOUD_URL), Some("mixcloud"));
        assert_eq!(registry.media_type(SOUNDCLOUD_URL), Some("soundcloud"));
        assert_eq!(registry.media_type("https://example.org/a"), None);
        assert_eq!(registry.media_type("not a url"), None);
        assert_eq!(
            registry.find(SOUNDCLOUD_URL).map(|r| r.name()),
            Some("SoundCloudMediaRenderer")
        );
    }

    #[test]
    fn test_supported_types() {
        let (registry, _) = registry();
        assert_eq!(
            registry.supported_types().into_iter().collect::<Vec<_>>(),
            vec!["mixcloud", "soundcloud"]
        );
        assert_eq!(
            registry.renderer_for_type("soundcloud").map(|r| r.name()),
            Some("SoundCloudMediaRenderer")
        );
        assert!(registry.renderer_for_type("youtube").is_none());
    }

    #[test]
    fn test_render_by_url_unsupported() {
        let (registry, transport) = registry();

        let err = registry
            .render_by_url("https://example.org/a", None)
            .unwrap_err();
        assert!(matches!(err, EmbedError::Unsupported(_)), "got {err:?}");
        assert_eq!(registry.thumbnail("https://example.org/a").unwrap(), "");
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_render_all_partial_results() {
        let (registry, _) = registry();
        let urls = [
            MIXCLOUD_URL,
            "https://example.org/a",
            SOUNDCLOUD_URL,
            "https://www.mixcloud.com/missing/",
        ];

        let batch = registry.render_all(&urls, None);

        let rendered: Vec<(usize, bool)> = batch
            .rendered
            .iter()
            .map(|r| (r.index, r.rendering.is_placeholder()))
            .collect();
        assert_eq!(rendered, vec![(0, false), (2, false), (3, true)]);

        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].index, 1);
        assert_eq!(batch.errors[0].url, "https://example.org/a");
        assert!(matches!(batch.errors[0].error, EmbedError::Unsupported(_)));
    }

    #[test]
    fn test_render_all_applies_context_style() {
        let (registry, _) = registry();

        let batch = registry.render_all(&[SOUNDCLOUD_URL], Some("editor"));

        let Rendering::Deferred(mount) = &batch.rendered[0].rendering else {
            panic!("expected deferred rendering");
        };
        assert_eq!(mount.style.get("width").map(String::as_str), Some("560px"));
        assert_eq!(mount.style.get("height").map(String::as_str), Some("315px"));
    }

    #[test]
    fn test_render_all_empty() {
        let (registry, transport) = registry();
        let batch = registry.render_all::<&str>(&[], None);
        assert!(batch.rendered.is_empty());
        assert!(batch.errors.is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_empty_registry() {
        let registry = RendererRegistry::new();
        assert!(registry.find(MIXCLOUD_URL).is_none());
        assert!(registry.supported_types().is_empty());
    }
}
