//! Discovery endpoint URL construction.
//!
//! Pure string building, no I/O and no validation of the identifier: the
//! remote service decides whether a resource exists.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::consts::RESPONSE_FORMAT;

/// Characters left untouched when encoding the public URL into the `url`
/// query parameter: A-Z a-z 0-9 - . _ ~ /
///
/// `:` and every query-significant character (`?`, `&`, `=`, `#`, `%`) are
/// escaped so the identifier's own query survives inside the discovery query.
const URL_PARAM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a public URL for use as the `url` discovery parameter.
///
/// # Example
///
/// ```
/// use embedkit_oembed::encode_url_param;
///
/// assert_eq!(
///     encode_url_param("https://www.mixcloud.com/artist/show/"),
///     "https%3A//www.mixcloud.com/artist/show/"
/// );
/// ```
pub fn encode_url_param(public_url: &str) -> String {
    utf8_percent_encode(public_url, URL_PARAM_ENCODE_SET).to_string()
}

/// Build the discovery request URI for a public resource URL.
///
/// Format: `{base}?url={encoded public_url}&format=json`. If `base` already
/// carries a query string the parameters are appended with `&`.
///
/// # Example
///
/// ```
/// use embedkit_oembed::discovery_url;
///
/// let url = discovery_url(
///     "http://www.mixcloud.com/oembed/",
///     "https://www.mixcloud.com/artist/show/",
/// );
/// assert_eq!(
///     url,
///     "http://www.mixcloud.com/oembed/?url=https%3A//www.mixcloud.com/artist/show/&format=json"
/// );
/// ```
pub fn discovery_url(base: &str, public_url: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!(
        "{base}{separator}url={}&format={RESPONSE_FORMAT}",
        encode_url_param(public_url)
    )
}
