#![forbid(unsafe_code)]

//! Host-agnostic core of the gallery lightbox.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment (the DOM frontend, or a test)
//!   feeds collection items, clicks, and key presses in; nothing here touches
//!   the DOM directly.
//! - **Deterministic**: every decision (grouping, navigation, what to render)
//!   is a pure function of the inputs, so it can be exercised without a browser.
//! - **Lenient input**: malformed item payloads make an item non-interactive,
//!   they never surface as errors to the end user.
//!
//! The DOM binding lives in `lightbox-web`, which implements [`OverlayHost`]
//! on top of `web-sys`.

pub mod config;
pub mod controller;
pub mod group;
pub mod headless;
pub mod input;
pub mod logging;
pub mod payload;
pub mod session;
pub mod style;
pub mod view;

pub use config::{ConfigError, GalleryConfig, MountStrategy, OverlayParts, PositionIndicator};
pub use controller::{GalleryController, GalleryState, OverlayHost};
pub use group::{CollectionItem, GroupSelection, resolve_group};
pub use input::{GalleryKey, KeyModifiers, OverlayAction};
pub use payload::{GalleryEntry, GroupKey, ImageRef, ItemPayload, PayloadError};
pub use session::{Direction, GallerySession};
pub use view::{ImageView, OverlayView, ThumbnailStrip, ThumbnailView};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
