//! Static provider descriptions.

use serde::Serialize;

use crate::matcher::DomainMatcher;
use crate::style::StyleProfile;
use crate::synth::Synthesis;

/// Everything that distinguishes one hosting service from another.
///
/// Providers are plain `static` data; behaviour lives in
/// [`ProviderRenderer`](crate::ProviderRenderer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Provider {
    /// Canonical media type name, e.g. `"mixcloud"`.
    pub type_name: &'static str,
    /// Human-readable renderer name.
    pub display_name: &'static str,
    /// Host substring accepted by the matcher.
    pub domain: DomainMatcher,
    /// Scheme and host prefixed to an identifier to form the public URL.
    pub public_base: &'static str,
    /// oEmbed discovery endpoint.
    pub discovery_base: &'static str,
    /// Dimension hints per view context.
    pub styles: StyleProfile,
    /// How markup is produced.
    pub synthesis: Synthesis,
}

impl Provider {
    /// Static capability record for this provider.
    pub fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            type_name: self.type_name,
            display_name: self.display_name,
            icon: self.type_name,
        }
    }

    /// Public URL of the resource at `location`.
    pub fn public_url(&self, location: &str) -> String {
        format!("{}{location}", self.public_base)
    }
}

/// What a host needs to list a renderer in its UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderCapabilities {
    pub type_name: &'static str,
    pub display_name: &'static str,
    /// Icon identifier; the type name for built-in providers.
    pub icon: &'static str,
}
