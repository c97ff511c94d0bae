//! Mixcloud: inline oEmbed markup.

use embedkit_oembed::MetadataResolver;

use crate::matcher::DomainMatcher;
use crate::provider::Provider;
use crate::renderer::ProviderRenderer;
use crate::style::AUDIO_PLAYER_STYLES;
use crate::synth::Synthesis;

pub static MIXCLOUD: Provider = Provider {
    type_name: "mixcloud",
    display_name: "MixCloudMediaRenderer",
    domain: DomainMatcher::new("mixcloud.com"),
    public_base: "https://www.mixcloud.com",
    discovery_base: "http://www.mixcloud.com/oembed/",
    styles: AUDIO_PLAYER_STYLES,
    synthesis: Synthesis::Inline,
};

/// Mixcloud renderer looking metadata up through `resolver`.
pub fn mixcloud(resolver: MetadataResolver) -> ProviderRenderer {
    ProviderRenderer::new(&MIXCLOUD, resolver)
}
