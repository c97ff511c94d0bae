//! Per-view dimension hints.

use std::fmt;

/// Where a rendered player is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewContext {
    /// Generic view (fallback).
    View,
    /// Content editor preview.
    Editor,
    /// Published post.
    Post,
}

impl ViewContext {
    /// Parse a context name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "view" => Some(Self::View),
            "editor" => Some(Self::Editor),
            "post" => Some(Self::Post),
            _ => None,
        }
    }

    /// Context name as used by hosts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Editor => "editor",
            Self::Post => "post",
        }
    }
}

/// An ordered set of CSS property hints, e.g. `width: 560px`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style(&'static [(&'static str, &'static str)]);

impl Style {
    /// Wrap a static property list.
    #[must_use]
    pub const fn new(properties: &'static [(&'static str, &'static str)]) -> Self {
        Self(properties)
    }

    /// Value of a single property.
    pub fn get(&self, property: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| *value)
    }

    /// Iterate over `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.0.iter().copied()
    }

    /// Whether no properties are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inline CSS declaration list, e.g. `width: 560px; height: 315px`.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Styles for each [`ViewContext`] of one provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleProfile {
    /// Generic view, also used for unknown contexts.
    pub view: Style,
    /// Content editor preview.
    pub editor: Style,
    /// Published post.
    pub post: Style,
}

impl StyleProfile {
    /// Style for a context.
    pub fn get(&self, context: ViewContext) -> Style {
        match context {
            ViewContext::View => self.view,
            ViewContext::Editor => self.editor,
            ViewContext::Post => self.post,
        }
    }

    /// Style for a context name, falling back to `view` for unknown names.
    pub fn for_name(&self, name: &str) -> Style {
        self.get(ViewContext::parse(name).unwrap_or(ViewContext::View))
    }
}

/// Profile shared by the built-in audio providers: fluid in generic views,
/// a fixed 560x315 frame in the editor and in posts.
pub const AUDIO_PLAYER_STYLES: StyleProfile = StyleProfile {
    view: Style::new(&[("max-width", "100%")]),
    editor: Style::new(&[("width", "560px"), ("height", "315px")]),
    post: Style::new(&[("width", "560px"), ("height", "315px")]),
};
