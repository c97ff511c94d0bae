//! Pre-escaped HTML fragments.

use std::fmt;

use serde::Serialize;

/// Fixed markup shown in place of a player whose metadata could not be
/// retrieved.
pub const ERROR_PLACEHOLDER: &str = "<span>Error retrieving resource!</span>";

/// HTML that is already escaped and must be inserted verbatim.
///
/// Template engines receiving an `HtmlFragment` must not escape it again.
/// Serializes as a plain string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HtmlFragment(String);

impl HtmlFragment {
    /// Wrap markup that is already safe for direct insertion.
    #[must_use]
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// The error placeholder fragment.
    #[must_use]
    pub fn error_placeholder() -> Self {
        Self(ERROR_PLACEHOLDER.to_owned())
    }

    /// Borrow the markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the markup.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HtmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HtmlFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Escape HTML special characters for text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_not_escaped() {
        let fragment = HtmlFragment::raw("<iframe src=\"a&b\"></iframe>");
        assert_eq!(fragment.as_str(), "<iframe src=\"a&b\"></iframe>");
        assert_eq!(fragment.to_string(), "<iframe src=\"a&b\"></iframe>");
    }

    #[test]
    fn test_error_placeholder() {
        assert_eq!(
            HtmlFragment::error_placeholder().as_str(),
            "<span>Error retrieving resource!</span>"
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&HtmlFragment::raw("<b>x</b>")).unwrap();
        assert_eq!(json, r#""<b>x</b>""#);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }
}
