#![forbid(unsafe_code)]

//! View model for the overlay.
//!
//! [`OverlayView`] is everything a host needs to reflect the session into
//! visible state. It is a pure function of the session and the options, so
//! presenting the same state twice presents the same view.

use crate::config::{GalleryConfig, PositionIndicator};
use crate::payload::GalleryEntry;
use crate::session::GallerySession;

/// The enlarged image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub src: String,
    pub srcset: Option<String>,
    pub sizes: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: String,
}

impl From<&GalleryEntry> for ImageView {
    fn from(entry: &GalleryEntry) -> Self {
        Self {
            src: entry.src.clone(),
            srcset: entry.srcset.clone(),
            sizes: entry.sizes.clone(),
            width: entry.width,
            height: entry.height,
            alt: entry.alt.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView {
    pub src: String,
    pub alt: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailStrip {
    pub thumbnails: Vec<ThumbnailView>,
    pub lazy: bool,
}

impl ThumbnailStrip {
    /// Index of the active thumbnail.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.thumbnails.iter().position(|t| t.active)
    }

    /// Whether `other` shows the same images, ignoring which one is active.
    #[must_use]
    pub fn same_images(&self, other: &Self) -> bool {
        self.thumbnails.len() == other.thumbnails.len()
            && self
                .thumbnails
                .iter()
                .zip(&other.thumbnails)
                .all(|(a, b)| a.src == b.src && a.alt == b.alt)
    }
}

/// Full overlay content for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub image: ImageView,
    /// 0-based position within the group.
    pub index: usize,
    pub total: usize,
    pub counter: Option<String>,
    pub thumbnails: Option<ThumbnailStrip>,
}

impl OverlayView {
    #[must_use]
    pub fn from_session(session: &GallerySession, config: &GalleryConfig) -> Self {
        let index = session.current();
        let total = session.len();
        let counter = match config.position {
            PositionIndicator::Counter | PositionIndicator::Both => {
                Some(config.counter_text(index, total))
            }
            PositionIndicator::Thumbnails => None,
        };
        let thumbnails = match config.position {
            PositionIndicator::Thumbnails | PositionIndicator::Both => Some(ThumbnailStrip {
                thumbnails: session
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| ThumbnailView {
                        src: entry.src.clone(),
                        alt: entry.alt.clone(),
                        active: i == index,
                    })
                    .collect(),
                lazy: config.lazy_thumbnails,
            }),
            PositionIndicator::Counter => None,
        };

        Self {
            image: ImageView::from(session.current_entry()),
            index,
            total,
            counter,
            thumbnails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn session(start: usize) -> GallerySession {
        let entries = ["a.jpg", "b.jpg", "c.jpg"]
            .into_iter()
            .map(GalleryEntry::from_src)
            .collect();
        GallerySession::new(entries, start).unwrap()
    }

    #[test]
    fn counter_view_by_default() {
        let view = OverlayView::from_session(&session(1), &GalleryConfig::default());
        assert_eq!(view.image.src, "b.jpg");
        assert_eq!(view.counter.as_deref(), Some("Image 2 of 3"));
        assert_eq!(view.thumbnails, None);
        assert_eq!((view.index, view.total), (1, 3));
    }

    #[test]
    fn thumbnail_strip_marks_exactly_one_active() {
        let config = GalleryConfig {
            position: PositionIndicator::Thumbnails,
            ..GalleryConfig::default()
        };
        let view = OverlayView::from_session(&session(2), &config);
        assert_eq!(view.counter, None);
        let strip = view.thumbnails.unwrap();
        assert_eq!(strip.thumbnails.iter().filter(|t| t.active).count(), 1);
        assert_eq!(strip.active(), Some(2));
        assert!(strip.lazy);
    }

    #[test]
    fn both_indicators_and_idempotence() {
        let config = GalleryConfig {
            position: PositionIndicator::Both,
            ..GalleryConfig::default()
        };
        let s = session(0);
        let first = OverlayView::from_session(&s, &config);
        let second = OverlayView::from_session(&s, &config);
        assert_eq!(first, second);
        assert!(first.counter.is_some());
        assert!(first.thumbnails.is_some());
    }

    #[test]
    fn same_images_ignores_active_marker() {
        let config = GalleryConfig {
            position: PositionIndicator::Thumbnails,
            ..GalleryConfig::default()
        };
        let a = OverlayView::from_session(&session(0), &config).thumbnails.unwrap();
        let b = OverlayView::from_session(&session(2), &config).thumbnails.unwrap();
        assert!(a.same_images(&b));
        assert_ne!(a, b);
    }
}
