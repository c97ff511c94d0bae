//! The renderer capability surface and its provider-driven implementation.

use std::collections::{BTreeMap, BTreeSet};

use embedkit_oembed::{EmbedMetadata, MetadataResolver, discovery_url};
use tracing::debug;

use crate::error::EmbedError;
use crate::extract::{media_id, query_params};
use crate::matcher::UrlInput;
use crate::provider::{Provider, ProviderCapabilities};
use crate::style::Style;
use crate::synth::{DeferredMount, Rendering, Synthesis};

/// Identifier of a resource on one provider: URL path plus query.
///
/// Only build one from an identifier the same provider's matcher accepted
/// (see [`MediaRenderer::media_id`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaReference {
    pub location: String,
}

impl MediaReference {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Attribute and style overrides for the element a renderer generates.
///
/// Only the deferred mount element honours them; remote inline markup and the
/// error placeholder are emitted as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
}

impl RenderOptions {
    /// Set an HTML attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set a CSS property.
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    /// Options carrying every property of `style`.
    pub fn from_style(style: Style) -> Self {
        style
            .iter()
            .fold(Self::default(), |options, (k, v)| options.style(k, v))
    }
}

/// Renders media from one hosting service into HTML.
///
/// Implementations are immutable and shareable across threads. The trait is
/// object safe so hosts can keep heterogeneous renderers in one registry.
pub trait MediaRenderer: Send + Sync {
    /// Renderer name shown to hosts.
    fn name(&self) -> &'static str;

    /// Static capability record.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Media type names this renderer handles.
    fn supported_types(&self) -> BTreeSet<&'static str>;

    /// Icon identifier for a media type. Built-in providers always answer
    /// with their own type name.
    fn icon(&self, media_type: &str) -> String;

    /// Dimension hints for a view context; unknown contexts get `view`.
    fn style(&self, context: &str) -> Style;

    /// Whether the URL's host belongs to this provider.
    fn is_full_site(&self, url: UrlInput<'_>) -> bool;

    /// Whether the URL can be rendered. Malformed URLs are unsupported.
    fn is_supported(&self, url: &str) -> bool {
        self.is_full_site(url.into())
    }

    /// Canonical media type for a supported URL.
    fn media_type(&self, url: &str) -> Option<&'static str>;

    /// Provider-scoped identifier for `url`, or `None` for foreign URLs.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::InvalidUrl`] for unparsable input.
    fn media_id(&self, url: &str) -> Result<Option<String>, EmbedError>;

    /// Query parameters of `url`, verbatim.
    fn meta(&self, url: &str) -> BTreeMap<String, String> {
        query_params(url)
    }

    /// Discovery URL for an identifier.
    fn oembed_url(&self, media_id: &str) -> String;

    /// Fetch discovery metadata. Failures yield `None`.
    fn oembed_resource(&self, discovery_url: &str) -> Option<EmbedMetadata>;

    /// Render a resource. Never fails: lookup failures produce the
    /// placeholder.
    fn render(&self, media: &MediaReference, options: Option<&RenderOptions>) -> Rendering;

    /// Extract the identifier from `url` and render it.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::InvalidUrl`] for unparsable input and
    /// [`EmbedError::Unrecognized`] for URLs of another provider. No lookup is
    /// made in either case.
    fn render_by_url(
        &self,
        url: &str,
        options: Option<&RenderOptions>,
    ) -> Result<Rendering, EmbedError>;

    /// Thumbnail URI for `url`, or `""` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::InvalidUrl`] for unparsable input.
    fn thumbnail(&self, url: &str) -> Result<String, EmbedError>;

    /// Public URL of a resource on the provider's site.
    fn native_url(&self, media: &MediaReference) -> String;
}

/// [`MediaRenderer`] driven by a static [`Provider`] description.
#[derive(Clone)]
pub struct ProviderRenderer {
    provider: &'static Provider,
    discovery_base: String,
    resolver: MetadataResolver,
}

impl ProviderRenderer {
    pub fn new(provider: &'static Provider, resolver: MetadataResolver) -> Self {
        Self {
            provider,
            discovery_base: provider.discovery_base.to_owned(),
            resolver,
        }
    }

    /// Use a different discovery endpoint, e.g. a local proxy.
    #[must_use]
    pub fn with_discovery_base(mut self, base: impl Into<String>) -> Self {
        self.discovery_base = base.into();
        self
    }

    pub fn provider(&self) -> &'static Provider {
        self.provider
    }

    pub fn discovery_base(&self) -> &str {
        &self.discovery_base
    }

    fn require_media_id(&self, url: &str) -> Result<String, EmbedError> {
        self.media_id(url)?.ok_or_else(|| EmbedError::Unrecognized {
            provider: self.provider.type_name,
            url: url.to_owned(),
        })
    }
}

impl MediaRenderer for ProviderRenderer {
    fn name(&self) -> &'static str {
        self.provider.display_name
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.provider.capabilities()
    }

    fn supported_types(&self) -> BTreeSet<&'static str> {
        BTreeSet::from([self.provider.type_name])
    }

    fn icon(&self, _media_type: &str) -> String {
        self.provider.type_name.to_owned()
    }

    fn style(&self, context: &str) -> Style {
        self.provider.styles.for_name(context)
    }

    fn is_full_site(&self, url: UrlInput<'_>) -> bool {
        self.provider.domain.is_full_site(url)
    }

    fn media_type(&self, url: &str) -> Option<&'static str> {
        self.is_supported(url).then_some(self.provider.type_name)
    }

    fn media_id(&self, url: &str) -> Result<Option<String>, EmbedError> {
        media_id(&self.provider.domain, url)
    }

    fn oembed_url(&self, media_id: &str) -> String {
        discovery_url(&self.discovery_base, &self.provider.public_url(media_id))
    }

    fn oembed_resource(&self, discovery_url: &str) -> Option<EmbedMetadata> {
        self.resolver.resolve(discovery_url)
    }

    fn render(&self, media: &MediaReference, options: Option<&RenderOptions>) -> Rendering {
        match &self.provider.synthesis {
            Synthesis::Inline => {
                let url = self.oembed_url(&media.location);
                Rendering::from_metadata(self.oembed_resource(&url))
            }
            Synthesis::Deferred(player) => Rendering::Deferred(DeferredMount::new(
                player,
                &media.location,
                self.native_url(media),
                options,
            )),
        }
    }

    fn render_by_url(
        &self,
        url: &str,
        options: Option<&RenderOptions>,
    ) -> Result<Rendering, EmbedError> {
        let location = self.require_media_id(url)?;
        debug!(provider = self.provider.type_name, %location, "Rendering media");
        Ok(self.render(&MediaReference::new(location), options))
    }

    fn thumbnail(&self, url: &str) -> Result<String, EmbedError> {
        let Some(location) = self.media_id(url)? else {
            return Ok(String::new());
        };
        let metadata = self.oembed_resource(&self.oembed_url(&location));
        Ok(metadata
            .as_ref()
            .and_then(EmbedMetadata::thumbnail)
            .unwrap_or_default()
            .to_owned())
    }

    fn native_url(&self, media: &MediaReference) -> String {
        self.provider.public_url(&media.location)
    }
}
