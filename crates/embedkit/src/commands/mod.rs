//! CLI command implementations.

pub(crate) mod inspect;
pub(crate) mod providers;
pub(crate) mod render;
pub(crate) mod thumbnail;

use std::sync::Arc;

use embedkit_config::Config;
use embedkit_media::{ProviderRenderer, RendererRegistry, providers::BUILTIN};
use embedkit_oembed::{MemoryCache, MetadataResolver, UreqTransport};
use tracing::debug;

pub(crate) use inspect::InspectArgs;
pub(crate) use providers::ProvidersArgs;
pub(crate) use render::RenderArgs;
pub(crate) use thumbnail::ThumbnailArgs;

/// View contexts accepted by `--context`.
const CONTEXTS: [&str; 3] = ["view", "editor", "post"];

/// Build the renderer registry described by `config`.
///
/// Disabled providers are left out; the remaining ones share one resolver.
pub(crate) fn build_registry(config: &Config) -> RendererRegistry {
    let mut transport = UreqTransport::new(config.http.timeout());
    if let Some(user_agent) = &config.http.user_agent {
        transport = transport.user_agent(user_agent.as_str());
    }

    let mut resolver = MetadataResolver::new(Arc::new(transport));
    if config.cache.enabled {
        resolver = resolver.with_cache(Arc::new(MemoryCache::new(
            config.cache.ttl(),
            config.cache.max_entries,
        )));
    }

    registry_from_config(config, &resolver)
}

fn registry_from_config(config: &Config, resolver: &MetadataResolver) -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    for &provider in &BUILTIN {
        let settings = config.providers.get(provider.type_name);
        if settings.is_some_and(|s| !s.enabled) {
            debug!(provider = provider.type_name, "Provider disabled");
            continue;
        }

        let mut renderer = ProviderRenderer::new(provider, resolver.clone());
        if let Some(url) = settings.and_then(|s| s.discovery_url.as_deref()) {
            renderer = renderer.with_discovery_base(url);
        }
        registry.register(Arc::new(renderer));
    }
    registry
}

#[cfg(test)]
mod tests {
    use embedkit_oembed::MockTransport;
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolver() -> MetadataResolver {
        MetadataResolver::new(Arc::new(MockTransport::new()))
    }

    #[test]
    fn test_default_registry_has_all_providers() {
        let registry = registry_from_config(&Config::default(), &resolver());
        assert_eq!(
            registry.supported_types().into_iter().collect::<Vec<_>>(),
            vec!["mixcloud", "soundcloud"]
        );
    }

    #[test]
    fn test_disabled_provider_is_skipped() {
        let mut config = Config::default();
        config.providers.soundcloud.enabled = false;

        let registry = registry_from_config(&config, &resolver());
        assert_eq!(registry.media_type("https://soundcloud.com/a/b"), None);
        assert_eq!(
            registry.media_type("https://www.mixcloud.com/a/b/"),
            Some("mixcloud")
        );
    }

    #[test]
    fn test_discovery_url_override() {
        let mut config = Config::default();
        config.providers.mixcloud.discovery_url = Some("http://localhost:9000/oembed/".to_owned());

        let registry = registry_from_config(&config, &resolver());
        let renderer = registry.renderer_for_type("mixcloud").unwrap();
        assert_eq!(
            renderer.oembed_url("/a/b/"),
            "http://localhost:9000/oembed/?url=https%3A//www.mixcloud.com/a/b/&format=json"
        );
    }
}
