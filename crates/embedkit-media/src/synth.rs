//! Markup synthesis strategies.
//!
//! A provider either renders **inline** (the discovery response's `embed`
//! markup is used verbatim) or **deferred** (a mount element plus a client
//! directive that a front-end runtime executes at display time). Both end up
//! as a [`Rendering`], which converts to an [`HtmlFragment`].

use std::collections::BTreeMap;
use std::fmt::Write;

use embedkit_oembed::EmbedMetadata;
use serde::Serialize;

use crate::fragment::{HtmlFragment, escape_html};
use crate::renderer::RenderOptions;

/// Synthesis strategy of a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Synthesis {
    /// Use the discovery response's `embed` markup verbatim.
    Inline,
    /// Emit a mount point for the provider's client SDK.
    Deferred(DeferredPlayer),
}

/// Static client-side settings for deferred rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredPlayer {
    /// Script the front-end loads before initializing the player.
    pub sdk_url: &'static str,
    /// Prefix of generated mount element ids.
    pub mount_prefix: &'static str,
    /// Player options passed to the SDK (e.g. accent color).
    pub player_options: &'static [(&'static str, &'static str)],
}

/// Instruction for the front-end runtime to initialize a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientDirective {
    /// SDK script URL.
    pub sdk_url: String,
    /// Public URL of the resource the player should load.
    pub embed_url: String,
    /// Player options.
    pub options: BTreeMap<String, String>,
}

/// A mount element plus the directive that fills it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeferredMount {
    /// `id` of the mount element, unique per resource.
    pub mount_id: String,
    /// What to run once the page script runtime is ready.
    pub directive: ClientDirective,
    /// Extra attributes for the mount element.
    pub attrs: BTreeMap<String, String>,
    /// Inline style for the mount element.
    pub style: BTreeMap<String, String>,
}

impl DeferredMount {
    /// Build the mount for `embed_url`, applying caller options.
    pub fn new(
        player: &DeferredPlayer,
        location: &str,
        embed_url: String,
        options: Option<&RenderOptions>,
    ) -> Self {
        let (attrs, style) = options
            .map(|o| (o.attrs.clone(), o.style.clone()))
            .unwrap_or_default();

        Self {
            mount_id: mount_id(player.mount_prefix, location),
            directive: ClientDirective {
                sdk_url: player.sdk_url.to_owned(),
                embed_url,
                options: player
                    .player_options
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
            },
            attrs,
            style,
        }
    }

    /// Render the mount element.
    ///
    /// The directive travels in `data-embed-*` attributes; no script is
    /// emitted. Caller attributes named `id` or `style`, or starting with
    /// `data-embed-`, are ignored so they cannot clobber the mount.
    pub fn to_fragment(&self) -> HtmlFragment {
        let mut html = format!("<div id=\"{}\"", escape_html(&self.mount_id));

        for (name, value) in &self.attrs {
            if name == "id" || name == "style" || name.starts_with("data-embed-") {
                continue;
            }
            let _ = write!(html, " {}=\"{}\"", escape_html(name), escape_html(value));
        }

        let options = serde_json::to_string(&self.directive.options).unwrap_or_default();
        let _ = write!(
            html,
            " data-embed-sdk=\"{}\" data-embed-url=\"{}\" data-embed-options=\"{}\"",
            escape_html(&self.directive.sdk_url),
            escape_html(&self.directive.embed_url),
            escape_html(&options),
        );

        if !self.style.is_empty() {
            let css = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(html, " style=\"{}\"", escape_html(&css));
        }

        html.push_str("></div>");
        HtmlFragment::raw(html)
    }
}

/// Result of rendering one media resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendering {
    /// Remote markup, used verbatim.
    Inline(HtmlFragment),
    /// Metadata was unavailable; renders as the error placeholder.
    Placeholder,
    /// Client-initialized player.
    Deferred(DeferredMount),
}

impl Rendering {
    /// Inline rendering from a discovery result.
    ///
    /// Missing metadata, or metadata without `embed` markup, yields
    /// [`Rendering::Placeholder`].
    pub fn from_metadata(metadata: Option<EmbedMetadata>) -> Self {
        match metadata.and_then(|m| m.embed) {
            Some(embed) => Self::Inline(HtmlFragment::raw(embed)),
            None => Self::Placeholder,
        }
    }

    /// Whether this is the error placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Final HTML for the template layer.
    pub fn to_fragment(&self) -> HtmlFragment {
        match self {
            Self::Inline(fragment) => fragment.clone(),
            Self::Placeholder => HtmlFragment::error_placeholder(),
            Self::Deferred(mount) => mount.to_fragment(),
        }
    }

    /// Consume into final HTML.
    pub fn into_fragment(self) -> HtmlFragment {
        match self {
            Self::Inline(fragment) => fragment,
            other => other.to_fragment(),
        }
    }
}

/// Mount element id: `prefix` plus a slug of `location`.
///
/// Letters are lowercased and every run of other characters becomes a single
/// `_`. An empty slug falls back to `0`.
pub fn mount_id(prefix: &str, location: &str) -> String {
    let mut slug = String::with_capacity(location.len());
    let mut last_was_sep = true;
    for c in location.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    if slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push('0');
    }
    format!("{prefix}{slug}")
}
