//! Discovery response model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Embed metadata returned by a discovery endpoint.
///
/// Only `embed` and `image` are interpreted. A value of any type other than a
/// string reads as missing. Every other field is kept in
/// [`extra`](Self::extra) and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedMetadata {
    /// Raw player markup, already escaped by the remote service.
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub embed: Option<String>,
    /// Thumbnail URI.
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Provider-defined fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmbedMetadata {
    /// Thumbnail URI for the resource.
    ///
    /// Prefers `image`, falling back to the standard oEmbed `thumbnail_url`
    /// field. Empty values count as missing.
    pub fn thumbnail(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.extra
                    .get("thumbnail_url")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
    }

    /// Look up a provider-defined field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_extra_fields() {
        let meta: EmbedMetadata = serde_json::from_value(json!({
            "embed": "<iframe src=\"x\"></iframe>",
            "image": "https://img/x.jpg",
            "title": "Show",
            "width": 300
        }))
        .unwrap();

        assert_eq!(meta.embed.as_deref(), Some("<iframe src=\"x\"></iframe>"));
        assert_eq!(meta.image.as_deref(), Some("https://img/x.jpg"));
        assert_eq!(meta.field("title"), Some(&json!("Show")));
        assert_eq!(meta.field("width"), Some(&json!(300)));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let meta: EmbedMetadata = serde_json::from_value(json!({})).unwrap();
        assert_eq!(meta.embed, None);
        assert_eq!(meta.thumbnail(), None);
    }

    #[test]
    fn test_deserialize_non_string_fields_read_as_missing() {
        let meta: EmbedMetadata = serde_json::from_value(json!({
            "embed": "<div>player</div>",
            "image": { "url": "https://img/x.jpg" },
            "thumbnail_url": "https://img/t.jpg"
        }))
        .unwrap();
        assert_eq!(meta.embed.as_deref(), Some("<div>player</div>"));
        assert_eq!(meta.image, None);
        assert_eq!(meta.thumbnail(), Some("https://img/t.jpg"));

        let meta: EmbedMetadata =
            serde_json::from_value(json!({ "embed": 42, "image": true })).unwrap();
        assert_eq!(meta.embed, None);
        assert_eq!(meta.image, None);
    }

    #[test]
    fn test_thumbnail_prefers_image() {
        let meta: EmbedMetadata = serde_json::from_value(json!({
            "image": "https://img/a.jpg",
            "thumbnail_url": "https://img/b.jpg"
        }))
        .unwrap();
        assert_eq!(meta.thumbnail(), Some("https://img/a.jpg"));
    }

    #[test]
    fn test_thumbnail_falls_back_to_thumbnail_url() {
        let meta: EmbedMetadata = serde_json::from_value(json!({
            "image": "",
            "thumbnail_url": "https://img/b.jpg"
        }))
        .unwrap();
        assert_eq!(meta.thumbnail(), Some("https://img/b.jpg"));
    }

    #[test]
    fn test_serialize_round_trips_extra() {
        let meta: EmbedMetadata = serde_json::from_value(json!({
            "embed": "<div>player</div>",
            "author_name": "DJ"
        }))
        .unwrap();
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            json!({ "embed": "<div>player</div>", "author_name": "DJ" })
        );
    }
}
