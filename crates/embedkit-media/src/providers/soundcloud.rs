//! SoundCloud: player mounted client-side by the SoundCloud SDK.

use embedkit_oembed::MetadataResolver;

use crate::matcher::DomainMatcher;
use crate::provider::Provider;
use crate::renderer::ProviderRenderer;
use crate::style::AUDIO_PLAYER_STYLES;
use crate::synth::{DeferredPlayer, Synthesis};

pub static SOUNDCLOUD: Provider = Provider {
    type_name: "soundcloud",
    display_name: "SoundCloudMediaRenderer",
    domain: DomainMatcher::new("soundcloud.com"),
    public_base: "https://www.soundcloud.com",
    // Only used for thumbnails; rendering never performs a lookup.
    discovery_base: "https://soundcloud.com/oembed",
    styles: AUDIO_PLAYER_STYLES,
    synthesis: Synthesis::Deferred(DeferredPlayer {
        sdk_url: "http://connect.soundcloud.com/sdk.js",
        mount_prefix: "sc_player_",
        player_options: &[("color", "ff0066")],
    }),
};

/// SoundCloud renderer; `resolver` serves thumbnail lookups.
pub fn soundcloud(resolver: MetadataResolver) -> ProviderRenderer {
    ProviderRenderer::new(&SOUNDCLOUD, resolver)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use embedkit_oembed::Transport;
    use embedkit_oembed::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::renderer::{MediaRenderer, RenderOptions};

    const TRACK_URL: &str = "https://soundcloud.com/artist/track";

    #[test]
    fn test_render_deferred_mount() {
        let transport = Arc::new(MockTransport::new());
        let renderer = soundcloud(MetadataResolver::new(
            Arc::clone(&transport) as Arc<dyn Transport>
        ));
        let options = RenderOptions::default().attr("class", "sc-embed");

        let html = renderer
            .render_by_url(TRACK_URL, Some(&options))
            .unwrap()
            .into_fragment();

        assert_eq!(
            html.as_str(),
            "<div id=\"sc_player_artist_track\" class=\"sc-embed\" \
             data-embed-sdk=\"http://connect.soundcloud.com/sdk.js\" \
             data-embed-url=\"https://www.soundcloud.com/artist/track\" \
             data-embed-options=\"{&quot;color&quot;:&quot;ff0066&quot;}\"></div>"
        );
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_mount_ids_differ_per_track() {
        let renderer = soundcloud(MetadataResolver::new(Arc::new(MockTransport::new())));
        let a = renderer.render_by_url("https://soundcloud.com/a/one", None).unwrap();
        let b = renderer.render_by_url("https://soundcloud.com/a/two", None).unwrap();
        assert_ne!(a.to_fragment(), b.to_fragment());
    }

    #[test]
    fn test_thumbnail_uses_thumbnail_url() {
        let transport = MockTransport::new().with_json(
            "https://soundcloud.com/oembed?url=https%3A//www.soundcloud.com/artist/track&format=json",
            json!({ "html": "<iframe/>", "thumbnail_url": "https://i1.sndcdn.com/t.jpg" }),
        );
        let renderer = soundcloud(MetadataResolver::new(Arc::new(transport)));

        assert_eq!(
            renderer.thumbnail(TRACK_URL).unwrap(),
            "https://i1.sndcdn.com/t.jpg"
        );
    }

    #[test]
    fn test_identity() {
        let renderer = soundcloud(MetadataResolver::new(Arc::new(MockTransport::new())));
        assert_eq!(renderer.name(), "SoundCloudMediaRenderer");
        assert_eq!(renderer.media_type(TRACK_URL), Some("soundcloud"));
        assert_eq!(renderer.media_type("https://www.mixcloud.com/a/"), None);
    }
}
