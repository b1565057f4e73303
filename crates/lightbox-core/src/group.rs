#![forbid(unsafe_code)]

//! Group resolution: which items are navigable together with a clicked one.

use crate::config::GalleryConfig;
use crate::payload::{GalleryEntry, GroupKey, ItemPayload};

/// One collection item as seen by the resolver.
///
/// `handle` identifies the item in the host (a DOM element in the browser)
/// and is compared with `PartialEq` to locate the clicked item.
#[derive(Debug, Clone)]
pub struct CollectionItem<H> {
    pub handle: H,
    /// Text content of the payload node, if the item has one.
    pub payload: Option<String>,
    /// Alt text of the item's visible image.
    pub alt: Option<String>,
}

impl<H> CollectionItem<H> {
    #[must_use]
    pub fn new(handle: H, payload: Option<String>) -> Self {
        Self {
            handle,
            payload,
            alt: None,
        }
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// Resolved group for a click: entries in document order plus the clicked position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSelection {
    pub group: GroupKey,
    pub entries: Vec<GalleryEntry>,
    pub start: usize,
}

/// Resolve the group of `clicked` among `items` (in document order).
///
/// Returns `None` when the clicked item's payload is missing or unusable, or
/// when `clicked` is not among `items`. Siblings with unusable payloads are
/// skipped.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn resolve_group<H: PartialEq>(
    items: &[CollectionItem<H>],
    clicked: &H,
    config: &GalleryConfig,
) -> Option<GroupSelection> {
    let position = items.iter().position(|item| item.handle == *clicked)?;
    let group = match ItemPayload::parse_opt(items[position].payload.as_deref(), config) {
        Ok(payload) => payload.group,
        Err(err) => {
            crate::debug!(position, error = %err, "clicked item has no usable payload");
            return None;
        }
    };

    let mut entries = Vec::new();
    let mut start = None;
    for (idx, item) in items.iter().enumerate() {
        let payload = match ItemPayload::parse_opt(item.payload.as_deref(), config) {
            Ok(payload) => payload,
            Err(err) => {
                crate::trace!(idx, error = %err, "skipping item");
                continue;
            }
        };
        if payload.group != group {
            continue;
        }
        if idx == position {
            start = Some(entries.len());
        }
        entries.push(GalleryEntry::from_image(payload.image, item.alt.as_deref()));
    }

    Some(GroupSelection {
        group,
        entries,
        start: start?,
    })
}
