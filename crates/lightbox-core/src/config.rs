#![forbid(unsafe_code)]

//! Gallery configuration.
//!
//! The embedding page passes options as a JSON object with camelCase keys.
//! Every key is optional; the defaults match the common CMS markup of
//! `.collection-item` cards with a `.w-json` payload node.

use core::fmt;

use bitflags::bitflags;
use serde::Deserialize;

/// Placeholder for the 1-based position in [`GalleryConfig::counter_template`].
pub const INDEX_PLACEHOLDER: &str = "{index}";
/// Placeholder for the group length in [`GalleryConfig::counter_template`].
pub const TOTAL_PLACEHOLDER: &str = "{total}";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options text is not valid JSON for [`GalleryConfig`].
    Parse(String),
    /// A selector or payload key is empty.
    Empty(&'static str),
    /// The class prefix contains characters that are not valid in a CSS class name.
    InvalidClassPrefix(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid gallery options: {msg}"),
            Self::Empty(field) => write!(f, "gallery option `{field}` must not be empty"),
            Self::InvalidClassPrefix(prefix) => {
                write!(f, "gallery option `classPrefix` is not a valid class name: {prefix:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How the overlay indicates the current position within the group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionIndicator {
    /// Text counter, e.g. "Image 2 of 5".
    #[default]
    Counter,
    /// Thumbnail strip with the current image marked active.
    Thumbnails,
    Both,
}

/// What happens to the overlay subtree on close.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountStrategy {
    /// Remove the subtree from the document; it is re-attached on the next open.
    #[default]
    Detach,
    /// Keep the subtree attached and hide it.
    Hide,
}

bitflags! {
    /// Parts of the overlay subtree to build.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OverlayParts: u8 {
        const BACKDROP_CLOSE = 0b0000_0001;
        const CLOSE          = 0b0000_0010;
        const NAVIGATION     = 0b0000_0100;
        const COUNTER        = 0b0000_1000;
        const THUMBNAILS     = 0b0001_0000;
    }
}

/// Button labels and accessible names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub close: String,
    pub previous: String,
    pub next: String,
    pub close_aria: String,
    pub previous_aria: String,
    pub next_aria: String,
    pub dialog_aria: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            close: "\u{00d7}".to_string(),
            previous: "\u{2190}".to_string(),
            next: "\u{2192}".to_string(),
            close_aria: "Close".to_string(),
            previous_aria: "Previous image".to_string(),
            next_aria: "Next image".to_string(),
            dialog_aria: "Image gallery".to_string(),
        }
    }
}

/// Gallery options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    /// Selector matching collection items.
    pub item_selector: String,
    /// Selector, relative to an item, matching its payload node.
    pub payload_selector: String,
    /// Selector, relative to an item, matching its clickable image.
    pub image_selector: String,
    /// Payload key holding the group identifier.
    pub group_key: String,
    /// Payload key holding the image list.
    pub items_key: String,
    /// Prefix for every class name the overlay uses.
    pub class_prefix: String,
    pub position: PositionIndicator,
    /// Counter text; `{index}` is 1-based, `{total}` is the group length.
    pub counter_template: String,
    pub close_on_backdrop: bool,
    pub keyboard: bool,
    pub mount: MountStrategy,
    pub lazy_thumbnails: bool,
    pub inject_styles: bool,
    pub labels: Labels,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            item_selector: ".collection-item".to_string(),
            payload_selector: ".w-json".to_string(),
            image_selector: "img".to_string(),
            group_key: "group".to_string(),
            items_key: "items".to_string(),
            class_prefix: "gallery".to_string(),
            position: PositionIndicator::Counter,
            counter_template: "Image {index} of {total}".to_string(),
            close_on_backdrop: true,
            keyboard: true,
            mount: MountStrategy::Detach,
            lazy_thumbnails: true,
            inject_styles: true,
            labels: Labels::default(),
        }
    }
}

impl GalleryConfig {
    /// Parse and validate JSON options.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject options the widget cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("itemSelector", &self.item_selector),
            ("payloadSelector", &self.payload_selector),
            ("imageSelector", &self.image_selector),
            ("groupKey", &self.group_key),
            ("itemsKey", &self.items_key),
            ("classPrefix", &self.class_prefix),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(field));
            }
        }

        let mut chars = self.class_prefix.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_start || !valid_rest {
            return Err(ConfigError::InvalidClassPrefix(self.class_prefix.clone()));
        }
        Ok(())
    }

    /// Overlay parts implied by these options.
    #[must_use]
    pub fn parts(&self) -> OverlayParts {
        let mut parts = OverlayParts::CLOSE | OverlayParts::NAVIGATION;
        if self.close_on_backdrop {
            parts |= OverlayParts::BACKDROP_CLOSE;
        }
        match self.position {
            PositionIndicator::Counter => parts |= OverlayParts::COUNTER,
            PositionIndicator::Thumbnails => parts |= OverlayParts::THUMBNAILS,
            PositionIndicator::Both => parts |= OverlayParts::COUNTER | OverlayParts::THUMBNAILS,
        }
        parts
    }

    /// Fill the counter template for a 0-based `index` in a group of `total`.
    #[must_use]
    pub fn counter_text(&self, index: usize, total: usize) -> String {
        self.counter_template
            .replace(INDEX_PLACEHOLDER, &(index + 1).to_string())
            .replace(TOTAL_PLACEHOLDER, &total.to_string())
    }

    /// Prefixed class name, e.g. `gallery-modal`.
    #[must_use]
    pub fn class(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.class_prefix)
    }
}
