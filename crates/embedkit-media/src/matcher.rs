//! URL recognition by domain substring.

use url::Url;

/// A URL given either as raw text or already parsed.
///
/// Lets callers that hold a parsed [`Url`] skip re-parsing while keeping a
/// single matcher entry point.
#[derive(Clone, Copy, Debug)]
pub enum UrlInput<'a> {
    /// Unparsed URL text.
    Raw(&'a str),
    /// Parsed URL.
    Parsed(&'a Url),
}

impl<'a> From<&'a str> for UrlInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Raw(s)
    }
}

impl<'a> From<&'a String> for UrlInput<'a> {
    fn from(s: &'a String) -> Self {
        Self::Raw(s)
    }
}

impl<'a> From<&'a Url> for UrlInput<'a> {
    fn from(url: &'a Url) -> Self {
        Self::Parsed(url)
    }
}

/// Parse URL text the way authors paste it.
///
/// Surrounding whitespace is ignored and scheme-relative input
/// (`//host/path`) is read as `https://host/path`, so a leading `//` always
/// denotes a host.
pub fn parse_url(input: &str) -> Result<Url, url::ParseError> {
    let input = input.trim();
    match input.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(input),
    }
}

/// Host component including a non-default port, as in `host:8080`.
pub(crate) fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

/// Accepts URLs whose host contains a provider's domain.
///
/// Matching is plain substring containment on the host, not suffix matching:
/// `mixcloud.com.example.net` is accepted by a `mixcloud.com` matcher. Content
/// already stored by hosts relies on this, so it is kept as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainMatcher {
    domain: &'static str,
}

impl DomainMatcher {
    /// Create a matcher for `domain` (e.g. `"mixcloud.com"`).
    #[must_use]
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// The registered domain substring.
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// Whether a parsed URL's host contains the domain.
    pub fn matches(&self, url: &Url) -> bool {
        host_with_port(url).is_some_and(|host| host.contains(self.domain))
    }

    /// Whether the URL points at the provider's site.
    ///
    /// Unparsable input is not a match.
    pub fn is_full_site(&self, input: UrlInput<'_>) -> bool {
        match input {
            UrlInput::Parsed(url) => self.matches(url),
            UrlInput::Raw(s) => parse_url(s).is_ok_and(|url| self.matches(&url)),
        }
    }
}
