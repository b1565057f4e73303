#![forbid(unsafe_code)]

//! Embedded item payloads.
//!
//! Every collection item carries a JSON object in a script-like child node.
//! The object names the item's group and lists its images:
//!
//! ```json
//! {"group": "A", "items": [{"url": "https://cdn.example/a0.jpg", "width": 1600}]}
//! ```
//!
//! Only the first entry of the image list is used. Further entries are
//! ignored until cards with several images are supported.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GalleryConfig;

/// Why a payload could not be used.
///
/// These never reach the end user: an item with a bad payload simply does
/// not take part in the gallery. They exist so the reason can be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The item has no payload node.
    Missing,
    /// The payload text is not valid JSON.
    Malformed(String),
    /// The payload is valid JSON but not an object.
    NotAnObject,
    /// The group key is absent, or holds something other than a string or number.
    MissingGroup,
    /// The image list is absent or empty, or its first entry has no usable `url`.
    MissingImage,
    /// The first image entry has the wrong shape.
    InvalidImage(String),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "item has no payload"),
            Self::Malformed(msg) => write!(f, "payload is not valid JSON: {msg}"),
            Self::NotAnObject => write!(f, "payload is not a JSON object"),
            Self::MissingGroup => write!(f, "payload has no group identifier"),
            Self::MissingImage => write!(f, "payload has no image url"),
            Self::InvalidImage(msg) => write!(f, "payload image entry is invalid: {msg}"),
        }
    }
}

impl std::error::Error for PayloadError {}

/// Group identifier as written in the payload.
///
/// Equality is typed: the number `7` and the string `"7"` name different groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// One image reference from a payload's image list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    /// Responsive candidates, in `srcset` attribute syntax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srcset: Option<String>,
    /// Responsive size hints, in `sizes` attribute syntax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A successfully parsed item payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPayload {
    pub group: GroupKey,
    pub image: ImageRef,
}

impl ItemPayload {
    /// Parse payload text using the configured group and items keys.
    pub fn parse(text: &str, config: &GalleryConfig) -> Result<Self, PayloadError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| PayloadError::Malformed(err.to_string()))?;
        let object = value.as_object().ok_or(PayloadError::NotAnObject)?;

        let group = match object.get(&config.group_key) {
            Some(Value::String(group)) => GroupKey::Text(group.clone()),
            Some(Value::Number(group)) => GroupKey::Number(group.clone()),
            _ => return Err(PayloadError::MissingGroup),
        };

        let first = object
            .get(&config.items_key)
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .ok_or(PayloadError::MissingImage)?;
        let image = ImageRef::deserialize(first).map_err(|err| {
            if first.get("url").is_none() {
                PayloadError::MissingImage
            } else {
                PayloadError::InvalidImage(err.to_string())
            }
        })?;
        if image.url.trim().is_empty() {
            return Err(PayloadError::MissingImage);
        }

        Ok(Self { group, image })
    }

    /// Parse an optional payload; an absent payload node is an error like any other.
    pub fn parse_opt(text: Option<&str>, config: &GalleryConfig) -> Result<Self, PayloadError> {
        match text {
            Some(text) => Self::parse(text, config),
            None => Err(PayloadError::Missing),
        }
    }
}

/// One navigable image inside an open gallery session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub src: String,
    pub srcset: Option<String>,
    pub sizes: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: String,
}

impl GalleryEntry {
    /// Build an entry from a payload image, falling back to the item's own
    /// thumbnail alt text when the payload carries none.
    #[must_use]
    pub fn from_image(image: ImageRef, fallback_alt: Option<&str>) -> Self {
        let alt = image
            .alt
            .filter(|alt| !alt.is_empty())
            .or_else(|| fallback_alt.map(str::to_owned))
            .unwrap_or_default();
        Self {
            src: image.url,
            srcset: image.srcset.filter(|s| !s.is_empty()),
            sizes: image.sizes.filter(|s| !s.is_empty()),
            width: image.width,
            height: image.height,
            alt,
        }
    }

    /// Entry with only a source, mostly for tests and programmatic opens.
    #[must_use]
    pub fn from_src(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            srcset: None,
            sizes: None,
            width: None,
            height: None,
            alt: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<ItemPayload, PayloadError> {
        ItemPayload::parse(text, &GalleryConfig::default())
    }

    #[test]
    fn parses_webflow_style_payload() {
        let payload = parse(
            r#"{"items":[{"url":"https://cdn.example/a.jpg","type":"image","width":1200,"height":800,"fileName":"a.jpg"}],"group":"Lobby"}"#,
        )
        .unwrap();
        assert_eq!(payload.group, GroupKey::from("Lobby"));
        assert_eq!(payload.image.url, "https://cdn.example/a.jpg");
        assert_eq!(payload.image.width, Some(1200));
        assert_eq!(payload.image.height, Some(800));
        assert_eq!(payload.image.srcset, None);
    }

    #[test]
    fn only_first_image_entry_is_used() {
        let payload = parse(r#"{"group":"g","items":[{"url":"first.jpg"},{"url":"second.jpg"}]}"#)
            .unwrap();
        assert_eq!(payload.image.url, "first.jpg");
    }

    #[test]
    fn responsive_descriptor_is_optional() {
        let payload = parse(
            r#"{"group":"g","items":[{"url":"a.jpg","srcset":"a-640.jpg 640w, a-1280.jpg 1280w","sizes":"90vw"}]}"#,
        )
        .unwrap();
        assert_eq!(
            payload.image.srcset.as_deref(),
            Some("a-640.jpg 640w, a-1280.jpg 1280w")
        );
        assert_eq!(payload.image.sizes.as_deref(), Some("90vw"));
    }

    #[test]
    fn numeric_and_text_groups_stay_distinct() {
        let number = parse(r#"{"group":7,"items":[{"url":"a.jpg"}]}"#).unwrap();
        let text = parse(r#"{"group":"7","items":[{"url":"b.jpg"}]}"#).unwrap();
        assert_eq!(number.group, GroupKey::Number(7.into()));
        assert_eq!(text.group, GroupKey::from("7"));
        assert_ne!(number.group, text.group);
        assert_eq!(number.group.to_string(), "7");
        assert_eq!(text.group.to_string(), "\"7\"");
    }

    #[test]
    fn malformed_payloads_are_classified() {
        assert!(matches!(parse("{not json"), Err(PayloadError::Malformed(_))));
        assert_eq!(parse("[1,2]"), Err(PayloadError::NotAnObject));
        assert_eq!(
            parse(r#"{"items":[{"url":"a.jpg"}]}"#),
            Err(PayloadError::MissingGroup)
        );
        assert_eq!(
            parse(r#"{"group":true,"items":[{"url":"a.jpg"}]}"#),
            Err(PayloadError::MissingGroup)
        );
        assert_eq!(parse(r#"{"group":"g"}"#), Err(PayloadError::MissingImage));
        assert_eq!(
            parse(r#"{"group":"g","items":[]}"#),
            Err(PayloadError::MissingImage)
        );
        assert_eq!(
            parse(r#"{"group":"g","items":[{"type":"image"}]}"#),
            Err(PayloadError::MissingImage)
        );
        assert_eq!(
            parse(r#"{"group":"g","items":[{"url":"   "}]}"#),
            Err(PayloadError::MissingImage)
        );
        assert!(matches!(
            parse(r#"{"group":"g","items":[{"url":42}]}"#),
            Err(PayloadError::InvalidImage(_))
        ));
        assert_eq!(
            ItemPayload::parse_opt(None, &GalleryConfig::default()),
            Err(PayloadError::Missing)
        );
    }

    #[test]
    fn custom_keys_follow_config() {
        let config = GalleryConfig {
            group_key: "gallery".to_string(),
            items_key: "images".to_string(),
            ..GalleryConfig::default()
        };
        let payload =
            ItemPayload::parse(r#"{"gallery":"x","images":[{"url":"x.jpg"}]}"#, &config).unwrap();
        assert_eq!(payload.group, GroupKey::from("x"));
        assert_eq!(
            ItemPayload::parse(r#"{"group":"x","items":[{"url":"x.jpg"}]}"#, &config),
            Err(PayloadError::MissingGroup)
        );
    }

    #[test]
    fn entry_alt_prefers_payload_then_fallback() {
        let image = ImageRef {
            url: "a.jpg".into(),
            srcset: Some(String::new()),
            sizes: None,
            width: None,
            height: None,
            alt: Some("From payload".into()),
        };
        let entry = GalleryEntry::from_image(image.clone(), Some("From thumbnail"));
        assert_eq!(entry.alt, "From payload");
        assert_eq!(entry.srcset, None);

        let entry = GalleryEntry::from_image(ImageRef { alt: None, ..image }, Some("From thumbnail"));
        assert_eq!(entry.alt, "From thumbnail");
    }
}
