//! Identifier and query metadata extraction.

use std::collections::BTreeMap;

use url::Url;

use crate::error::EmbedError;
use crate::matcher::{DomainMatcher, parse_url};

/// Provider-scoped identifier for a parsed URL: path plus query, verbatim.
///
/// The query is kept (with its `?`) whenever the URL has one, even an empty
/// one. No case folding or trailing-slash normalization is applied.
pub fn location(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_owned(),
    }
}

/// Path plus query as written in `input`, fragment dropped.
///
/// Unlike [`location`], dot segments and escaping are left untouched. Returns
/// `None` when `input` has no `scheme://` or `//` authority prefix.
fn written_location(input: &str) -> Option<String> {
    let input = input.trim();
    let after_scheme = match input.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() && !scheme.contains(['/', '?', '#']) => rest,
        _ => input.strip_prefix("//")?,
    };
    let rest = after_scheme
        .split_once('#')
        .map_or(after_scheme, |(before, _)| before);

    Some(match rest.find(['/', '?']) {
        Some(start) if rest[start..].starts_with('?') => format!("/{}", &rest[start..]),
        Some(start) => rest[start..].to_owned(),
        None => "/".to_owned(),
    })
}

/// Derive the identifier for `input` if it belongs to `matcher`'s site.
///
/// The identifier is the path plus query exactly as written; `..` segments
/// are not resolved. Returns `Ok(None)` for URLs on other sites.
///
/// # Errors
///
/// Returns [`EmbedError::InvalidUrl`] when `input` cannot be parsed.
pub fn media_id(matcher: &DomainMatcher, input: &str) -> Result<Option<String>, EmbedError> {
    let url = parse_url(input).map_err(|source| EmbedError::InvalidUrl {
        url: input.to_owned(),
        source,
    })?;

    if matcher.matches(&url) {
        Ok(Some(written_location(input).unwrap_or_else(|| location(&url))))
    } else {
        Ok(None)
    }
}

/// Query parameters of `input`, decoded, with no provider interpretation.
///
/// Unparsable input yields an empty map. When a key repeats, the last value
/// wins.
pub fn query_params(input: &str) -> BTreeMap<String, String> {
    let Ok(url) = parse_url(input) else {
        return BTreeMap::new();
    };
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EXAMPLE: DomainMatcher = DomainMatcher::new("example-audio.com");

    #[test]
    fn test_media_id_is_path() {
        let id = media_id(&EXAMPLE, "https://www.example-audio.com/artist/track").unwrap();
        assert_eq!(id.as_deref(), Some("/artist/track"));
    }

    #[test]
    fn test_media_id_keeps_query_and_case() {
        let id = media_id(&EXAMPLE, "https://www.example-audio.com/Artist/Track/?t=30&x=1").unwrap();
        assert_eq!(id.as_deref(), Some("/Artist/Track/?t=30&x=1"));
    }

    #[test]
    fn test_media_id_drops_fragment() {
        let id = media_id(&EXAMPLE, "https://www.example-audio.com/a/b#comments").unwrap();
        assert_eq!(id.as_deref(), Some("/a/b"));
    }

    #[test]
    fn test_media_id_keeps_dot_segments() {
        let id = media_id(&EXAMPLE, "https://www.example-audio.com/a/../b/").unwrap();
        assert_eq!(id.as_deref(), Some("/a/../b/"));

        let id = media_id(&EXAMPLE, "//www.example-audio.com/./a?x=1#t").unwrap();
        assert_eq!(id.as_deref(), Some("/./a?x=1"));
    }

    #[test]
    fn test_media_id_query_without_path() {
        let id = media_id(&EXAMPLE, "https://www.example-audio.com:8080?t=1").unwrap();
        assert_eq!(id.as_deref(), Some("/?t=1"));
    }

    #[test]
    fn test_media_id_site_root() {
        let id = media_id(&EXAMPLE, "https://www.example-audio.com").unwrap();
        assert_eq!(id.as_deref(), Some("/"));
    }

    #[test]
    fn test_media_id_other_site_is_none() {
        let id = media_id(&EXAMPLE, "https://elsewhere.org/artist/track").unwrap();
        assert_eq!(id, None);
    }

    #[test]
    fn test_media_id_unparsable_is_error() {
        let err = media_id(&EXAMPLE, "example-audio.com/artist").unwrap_err();
        assert!(matches!(err, EmbedError::InvalidUrl { .. }), "got {err:?}");
        assert!(err.to_string().contains("example-audio.com/artist"));
    }

    #[test]
    fn test_query_params() {
        let meta = query_params("https://www.example-audio.com/a?autoplay=1&t=1m30s&q=a%20b");
        let expected: BTreeMap<String, String> = [
            ("autoplay".to_owned(), "1".to_owned()),
            ("q".to_owned(), "a b".to_owned()),
            ("t".to_owned(), "1m30s".to_owned()),
        ]
        .into();
        assert_eq!(meta, expected);
    }

    #[test]
    fn test_query_params_repeated_key_last_wins() {
        let meta = query_params("https://x.com/a?t=1&t=2");
        assert_eq!(meta.get("t").map(String::as_str), Some("2"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_query_params_empty_or_invalid() {
        assert!(query_params("https://x.com/a").is_empty());
        assert!(query_params("not a url").is_empty());
    }
}
