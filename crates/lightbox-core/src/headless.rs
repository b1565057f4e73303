#![forbid(unsafe_code)]

//! In-memory [`OverlayHost`] that records what it was asked to do.
//!
//! Lets the controller run without a browser: scenario tests drive the
//! controller and inspect the recorded views and mount state.

use core::fmt;

use crate::config::{GalleryConfig, MountStrategy};
use crate::controller::OverlayHost;
use crate::view::OverlayView;

/// Failure injected into a [`HeadlessOverlay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessError(pub &'static str);

impl fmt::Display for HeadlessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "headless overlay: {}", self.0)
    }
}

impl std::error::Error for HeadlessError {}

#[derive(Debug, Default, Clone)]
pub struct HeadlessOverlay {
    built: bool,
    build_count: u32,
    attached: bool,
    visible: bool,
    views: Vec<OverlayView>,
    image_src: Option<String>,
    fail_mount: bool,
}

impl HeadlessOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the overlay subtree was created.
    #[must_use]
    pub const fn build_count(&self) -> u32 {
        self.build_count
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.views.len()
    }

    /// Whether the overlay is in the document, visible or not.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the overlay is in the document and visible.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.attached && self.visible
    }

    /// Every presented view, oldest first.
    #[must_use]
    pub fn views(&self) -> &[OverlayView] {
        &self.views
    }

    #[must_use]
    pub fn last_view(&self) -> Option<&OverlayView> {
        self.views.last()
    }

    /// Source currently set on the primary image slot.
    #[must_use]
    pub fn current_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    /// Make the next `mount` call fail.
    pub fn fail_next_mount(&mut self) {
        self.fail_mount = true;
    }
}

impl OverlayHost for HeadlessOverlay {
    type Error = HeadlessError;

    fn is_built(&self) -> bool {
        self.built
    }

    fn build(&mut self, _config: &GalleryConfig) -> Result<(), Self::Error> {
        self.built = true;
        self.build_count += 1;
        Ok(())
    }

    fn present(&mut self, view: &OverlayView) -> Result<(), Self::Error> {
        if !self.built {
            return Err(HeadlessError("present before build"));
        }
        self.image_src = Some(view.image.src.clone());
        self.views.push(view.clone());
        Ok(())
    }

    fn mount(&mut self, _strategy: MountStrategy) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_mount) {
            return Err(HeadlessError("mount failed"));
        }
        self.attached = true;
        self.visible = true;
        Ok(())
    }

    fn unmount(&mut self, strategy: MountStrategy) -> Result<(), Self::Error> {
        self.visible = false;
        if strategy == MountStrategy::Detach {
            self.attached = false;
            self.image_src = None;
        }
        Ok(())
    }
}
